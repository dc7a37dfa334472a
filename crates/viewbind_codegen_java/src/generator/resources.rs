use super::{
    ClassEmitter, ANIMATION_UTILS, BITMAP_FACTORY, CONTEXT, CONTEXT_COMPAT, RESOURCES,
    RESOURCES_COMPAT, TYPEFACE, UTILS,
};
use crate::builder::JavaSourceBuilder;
use viewbind_model::resource::{CONTEXT_COLOR_SDK, CONTEXT_DRAWABLE_SDK, RESOURCES_FONT_SDK};
use viewbind_model::{ResourceBinding, ResourceKind, TypefaceStyle};

impl ClassEmitter<'_> {
    /// Hoists the shared `context` and `res` locals, then assigns each resource.
    pub(super) fn resource_statements(&mut self, out: &mut JavaSourceBuilder) {
        let set = self.set;
        let min_sdk = self.config.min_sdk;
        if set.constructor_needs_view() {
            let context = self.known(CONTEXT);
            out.push_statement(&format!("{context} context = source.getContext()"));
        }
        if set.needs_resources(min_sdk) {
            let resources = self.known(RESOURCES);
            out.push_statement(&format!("{resources} res = context.getResources()"));
        }
        for binding in set.resource_bindings() {
            let value = self.resource_value(binding);
            out.push_statement(&format!("target.{} = {value}", binding.name));
        }
    }

    fn resource_value(&mut self, binding: &ResourceBinding) -> String {
        let min_sdk = self.config.min_sdk;
        let id = self.id_code(&binding.id);
        match &binding.kind {
            ResourceKind::Animation => {
                let animation_utils = self.known(ANIMATION_UTILS);
                format!("{animation_utils}.loadAnimation(context, {id})")
            }
            ResourceKind::Bitmap => {
                let bitmap_factory = self.known(BITMAP_FACTORY);
                format!("{bitmap_factory}.decodeResource(res, {id})")
            }
            ResourceKind::Bool => format!("res.getBoolean({id})"),
            ResourceKind::Color => self.context_accessor("getColor", &id, min_sdk >= CONTEXT_COLOR_SDK),
            ResourceKind::ColorStateList => {
                self.context_accessor("getColorStateList", &id, min_sdk >= CONTEXT_COLOR_SDK)
            }
            ResourceKind::DimenAsInt => format!("res.getDimensionPixelSize({id})"),
            ResourceKind::DimenAsFloat => format!("res.getDimension({id})"),
            ResourceKind::Drawable { tint: Some(tint) } => {
                let utils = self.known(UTILS);
                let tint = self.id_code(tint);
                format!("{utils}.getTintedDrawable(context, {id}, {tint})")
            }
            ResourceKind::Drawable { tint: None } => {
                self.context_accessor("getDrawable", &id, min_sdk >= CONTEXT_DRAWABLE_SDK)
            }
            ResourceKind::Float => {
                let utils = self.known(UTILS);
                format!("{utils}.getFloat(context, {id})")
            }
            ResourceKind::Int => format!("res.getInteger({id})"),
            ResourceKind::IntArray => format!("res.getIntArray({id})"),
            ResourceKind::String => format!("res.getString({id})"),
            ResourceKind::StringArray => format!("res.getStringArray({id})"),
            ResourceKind::TextArray => format!("res.getTextArray({id})"),
            ResourceKind::TypedArray => format!("res.obtainTypedArray({id})"),
            ResourceKind::Typeface { style } => {
                let font = if min_sdk >= RESOURCES_FONT_SDK {
                    format!("res.getFont({id})")
                } else {
                    let resources_compat = self.known(RESOURCES_COMPAT);
                    format!("{resources_compat}.getFont(context, {id})")
                };
                if *style == TypefaceStyle::Normal {
                    font
                } else {
                    let typeface = self.known(TYPEFACE);
                    format!("{typeface}.create({font}, {typeface}.{})", style.constant())
                }
            }
            ResourceKind::AttrColor => {
                let utils = self.known(UTILS);
                format!("{utils}.getThemeColor(context, {id})")
            }
            ResourceKind::AttrColorStateList => {
                let utils = self.known(UTILS);
                format!("{utils}.getThemeColorStateList(context, {id})")
            }
        }
    }

    /// `context.method(id)` on new platforms, `ContextCompat.method(context, id)` otherwise.
    fn context_accessor(&mut self, method: &str, id: &str, on_context: bool) -> String {
        if on_context {
            format!("context.{method}({id})")
        } else {
            let context_compat = self.known(CONTEXT_COMPAT);
            format!("{context_compat}.{method}(context, {id})")
        }
    }
}
