use crate::error::ModelError;
use crate::id::ResolvedId;

/// First SDK level with `Context.getColor`/`getColorStateList`.
pub const CONTEXT_COLOR_SDK: u32 = 23;
/// First SDK level with `Context.getDrawable`.
pub const CONTEXT_DRAWABLE_SDK: u32 = 21;
/// First SDK level with `Resources.getFont`.
pub const RESOURCES_FONT_SDK: u32 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypefaceStyle {
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl TypefaceStyle {
    pub fn from_constant(name: &str) -> Result<Self, ModelError> {
        match name {
            "NORMAL" => Ok(TypefaceStyle::Normal),
            "BOLD" => Ok(TypefaceStyle::Bold),
            "ITALIC" => Ok(TypefaceStyle::Italic),
            "BOLD_ITALIC" => Ok(TypefaceStyle::BoldItalic),
            other => Err(ModelError::UnknownTypefaceStyle {
                style: other.to_string(),
            }),
        }
    }

    pub fn constant(self) -> &'static str {
        match self {
            TypefaceStyle::Normal => "NORMAL",
            TypefaceStyle::Bold => "BOLD",
            TypefaceStyle::Italic => "ITALIC",
            TypefaceStyle::BoldItalic => "BOLD_ITALIC",
        }
    }
}

/// What a resource field is loaded as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    Animation,
    Bitmap,
    Bool,
    Color,
    ColorStateList,
    DimenAsInt,
    DimenAsFloat,
    Drawable { tint: Option<ResolvedId> },
    Float,
    Int,
    IntArray,
    String,
    StringArray,
    TextArray,
    TypedArray,
    Typeface { style: TypefaceStyle },
    AttrColor,
    AttrColorStateList,
}

impl ResourceKind {
    /// Whether the accessor reads from the shared `Resources` local.
    pub fn requires_resources(&self, min_sdk: u32) -> bool {
        match self {
            ResourceKind::Bitmap
            | ResourceKind::Bool
            | ResourceKind::DimenAsInt
            | ResourceKind::DimenAsFloat
            | ResourceKind::Int
            | ResourceKind::IntArray
            | ResourceKind::String
            | ResourceKind::StringArray
            | ResourceKind::TextArray
            | ResourceKind::TypedArray => true,
            ResourceKind::Typeface { .. } => min_sdk >= RESOURCES_FONT_SDK,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBinding {
    pub id: ResolvedId,
    pub name: String,
    pub kind: ResourceKind,
}

impl ResourceBinding {
    pub fn new(id: ResolvedId, name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }
}
