//! Turns one frozen [`TargetBindingSet`] into the source of its companion class.

use crate::builder::{JavaCompilationUnit, JavaSourceBuilder};
use crate::config::JavaCodeGenConfig;
use crate::error::CodeGenError;
use crate::imports::ImportManager;
use tracing::debug;
use viewbind_model::{ClassName, ResolvedId, TargetBindingSet, TypeName};

mod constructors;
mod formatting;
mod listeners;
mod resources;
mod unbind;
mod views;


/// A class the generated code refers to by name.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KnownClass {
    package: &'static str,
    simple_name: &'static str,
}

impl KnownClass {
    const fn new(package: &'static str, simple_name: &'static str) -> Self {
        Self {
            package,
            simple_name,
        }
    }

    fn class_name(self) -> ClassName {
        ClassName::new(self.package, self.simple_name)
    }
}

pub(crate) const UTILS: KnownClass = KnownClass::new("butterknife.internal", "Utils");
pub(crate) const UNBINDER: KnownClass = KnownClass::new("butterknife", "Unbinder");
pub(crate) const VIEW: KnownClass = KnownClass::new("android.view", "View");
pub(crate) const CONTEXT: KnownClass = KnownClass::new("android.content", "Context");
pub(crate) const RESOURCES: KnownClass = KnownClass::new("android.content.res", "Resources");
pub(crate) const UI_THREAD: KnownClass = KnownClass::new("androidx.annotation", "UiThread");
pub(crate) const CALL_SUPER: KnownClass = KnownClass::new("androidx.annotation", "CallSuper");
pub(crate) const SUPPRESS_LINT: KnownClass = KnownClass::new("android.annotation", "SuppressLint");
pub(crate) const ANIMATION_UTILS: KnownClass =
    KnownClass::new("android.view.animation", "AnimationUtils");
pub(crate) const BITMAP_FACTORY: KnownClass = KnownClass::new("android.graphics", "BitmapFactory");
pub(crate) const CONTEXT_COMPAT: KnownClass = KnownClass::new("androidx.core.content", "ContextCompat");
pub(crate) const RESOURCES_COMPAT: KnownClass =
    KnownClass::new("androidx.core.content.res", "ResourcesCompat");
pub(crate) const TYPEFACE: KnownClass = KnownClass::new("android.graphics", "Typeface");

/// Package of the platform resource index, which is always written qualified.
const PLATFORM_INDEX_PACKAGE: &str = "android";

/// Renders binding sets as Java companion classes.
#[derive(Debug, Clone, Default)]
pub struct BindingClassGenerator {
    config: JavaCodeGenConfig,
}

impl BindingClassGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JavaCodeGenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JavaCodeGenConfig {
        &self.config
    }

    pub fn generate(&self, set: &TargetBindingSet) -> Result<JavaCompilationUnit, CodeGenError> {
        let mut emitter = ClassEmitter::new(set, &self.config);
        let declaration = emitter.type_declaration()?;

        let package = set.binding_class().package();
        let unit = JavaCompilationUnit {
            file_comment: self.config.file_comment.clone(),
            package_declaration: (!package.is_empty()).then(|| package.to_string()),
            imports: emitter.imports.get_imports(),
            type_declarations: vec![declaration],
        };
        debug!(
            binding_class = %set.binding_class(),
            imports = unit.imports.len(),
            "rendered binding class"
        );
        Ok(unit)
    }

    pub fn generate_source(&self, set: &TargetBindingSet) -> Result<String, CodeGenError> {
        Ok(self.generate(set)?.to_source(&self.config))
    }
}

/// Per-class rendering state: the set being written and the imports it has used.
pub(crate) struct ClassEmitter<'a> {
    set: &'a TargetBindingSet,
    config: &'a JavaCodeGenConfig,
    imports: ImportManager,
}

impl<'a> ClassEmitter<'a> {
    fn new(set: &'a TargetBindingSet, config: &'a JavaCodeGenConfig) -> Self {
        Self {
            set,
            config,
            imports: ImportManager::new(set.binding_class()),
        }
    }

    fn type_declaration(&mut self) -> Result<String, CodeGenError> {
        let mut members = self.field_declarations()?;
        members.extend(self.constructors()?);
        if self.set.has_view_bindings() || self.set.parent().is_none() {
            members.push(self.unbind_method()?);
        }

        let mut header = String::from("public ");
        if self.set.is_final() {
            header.push_str("final ");
        }
        header.push_str("class ");
        header.push_str(self.set.binding_class().simple_name());
        match self.set.parent() {
            Some(parent) => {
                let parent = self.imports.reference(parent.binding_class());
                header.push_str(&format!(" extends {parent}"));
            }
            None => {
                let unbinder = self.known(UNBINDER);
                header.push_str(&format!(" implements {unbinder}"));
            }
        }

        let mut out = self.source_builder();
        out.push_line(&format!("{header} {{"));
        let mut source = out.build();
        for (index, member) in members.iter().enumerate() {
            if index > 0 {
                source.push('\n');
            }
            source.push_str(member);
        }
        source.push_str("}\n");
        Ok(source)
    }

    /// `target`, then one slot per listener-bearing view, each followed by the
    /// listener instances that need removing later.
    fn field_declarations(&mut self) -> Result<Vec<String>, CodeGenError> {
        let mut fields = Vec::new();
        if self.set.has_target_field() {
            let target = self.target_type();
            fields.push(self.member_line(&format!("private {target} target;")));
        }
        for group in self.set.view_bindings().iter().filter(|group| group.has_listeners()) {
            let slot = formatting::view_slot_name(group);
            let view = self.known(VIEW);
            fields.push(self.member_line(&format!("private {view} {slot};")));
            for kind in group.listeners().keys().filter(|kind| kind.remover.is_some()) {
                let listener_type = ClassName::best_guess(kind.listener_type)?;
                let field = formatting::listener_field_name(&slot, &listener_type);
                let listener = self.imports.reference(&listener_type);
                fields.push(self.member_line(&format!("private {listener} {field};")));
            }
        }
        Ok(fields)
    }

    /// A builder positioned at member indentation.
    fn member_builder(&self) -> JavaSourceBuilder {
        let mut builder = self.source_builder();
        builder.indent();
        builder
    }

    fn member_line(&self, line: &str) -> String {
        let mut builder = self.member_builder();
        builder.push_line(line);
        builder.build()
    }

    fn source_builder(&self) -> JavaSourceBuilder {
        JavaSourceBuilder::new(self.config.indent.clone())
    }

    fn known(&mut self, class: KnownClass) -> String {
        self.imports.reference(&class.class_name())
    }

    fn target_type(&mut self) -> String {
        self.imports.type_name(self.set.target_type())
    }

    /// Renders type text from the listener table, e.g. `android.widget.AdapterView<?>`.
    fn type_text(&mut self, text: &str) -> Result<String, CodeGenError> {
        let ty = TypeName::best_guess(text)?;
        Ok(self.imports.type_name(&ty))
    }

    /// How an id is written: a literal, or a reference into a resource index.
    fn id_code(&mut self, id: &ResolvedId) -> String {
        match id {
            ResolvedId::Constant(value) => value.to_string(),
            ResolvedId::Reference { owner, member, .. } => {
                let owner = if owner.package() == PLATFORM_INDEX_PACKAGE {
                    self.imports.qualified(owner)
                } else {
                    self.imports.reference(owner)
                };
                format!("{owner}.{member}")
            }
        }
    }
}
