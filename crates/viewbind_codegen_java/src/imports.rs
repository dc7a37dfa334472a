use std::collections::{BTreeSet, HashMap};
use viewbind_model::{ClassName, TypeName};

const JAVA_LANG: &str = "java.lang";

/// Tracks which imports a compilation unit needs and how each class is spelled.
///
/// The first top-level class to claim a simple name is imported; later classes
/// sharing that simple name are written fully qualified.
#[derive(Debug, Clone)]
pub struct ImportManager {
    package: String,
    claimed: HashMap<String, ClassName>,
    imports: BTreeSet<String>,
}

impl ImportManager {
    /// `own` is the class being generated; its simple name is never imported.
    pub fn new(own: &ClassName) -> Self {
        let mut claimed = HashMap::new();
        claimed.insert(own.simple_names()[0].clone(), own.top_level());
        Self {
            package: own.package().to_string(),
            claimed,
            imports: BTreeSet::new(),
        }
    }

    /// How `class` is written at a use site, recording its import if one is needed.
    pub fn reference(&mut self, class: &ClassName) -> String {
        let top = class.top_level();
        let simple = &class.simple_names()[0];
        match self.claimed.get(simple) {
            Some(owner) if *owner == top => {}
            Some(_) => return class.canonical(),
            None => {
                self.claimed.insert(simple.clone(), top.clone());
                if top.package() != self.package && top.package() != JAVA_LANG {
                    self.imports.insert(top.canonical());
                }
            }
        }
        class.simple_names().join(".")
    }

    /// Writes a class reference without importing it.
    pub fn qualified(&self, class: &ClassName) -> String {
        class.canonical()
    }

    pub fn type_name(&mut self, ty: &TypeName) -> String {
        match ty {
            TypeName::Void => "void".to_string(),
            TypeName::Primitive(keyword) => keyword.clone(),
            TypeName::Class(class) => self.reference(class),
            TypeName::Parameterized { raw, args } => {
                let raw = self.reference(raw);
                let args: Vec<String> = args.iter().map(|arg| self.type_name(arg)).collect();
                format!("{raw}<{}>", args.join(", "))
            }
            TypeName::Array(component) => format!("{}[]", self.type_name(component)),
            TypeName::Wildcard(None) => "?".to_string(),
            TypeName::Wildcard(Some(bound)) => format!("? extends {}", self.type_name(bound)),
        }
    }

    /// Sorted canonical names to import.
    pub fn get_imports(&self) -> Vec<String> {
        self.imports.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> ClassName {
        ClassName::best_guess(name).unwrap()
    }

    #[test]
    fn nested_classes_import_their_top_level() {
        let mut imports = ImportManager::new(&class("com.example.Main_ViewBinding"));
        let listener = class("android.widget.AdapterView.OnItemClickListener");
        assert_eq!(imports.reference(&listener), "AdapterView.OnItemClickListener");
        assert_eq!(imports.get_imports(), vec!["android.widget.AdapterView"]);
    }

    #[test]
    fn same_package_and_java_lang_are_not_imported() {
        let mut imports = ImportManager::new(&class("com.example.Main_ViewBinding"));
        assert_eq!(imports.reference(&class("com.example.Main")), "Main");
        assert_eq!(imports.reference(&class("java.lang.String")), "String");
        assert!(imports.get_imports().is_empty());
    }

    #[test]
    fn conflicting_simple_names_are_qualified() {
        let mut imports = ImportManager::new(&class("com.example.Main_ViewBinding"));
        assert_eq!(imports.reference(&class("com.example.R")), "R");
        assert_eq!(imports.reference(&class("com.library.R")), "com.library.R");
        let own = class("com.other.Main_ViewBinding");
        assert_eq!(imports.reference(&own), "com.other.Main_ViewBinding");
    }

    #[test]
    fn parameterized_types_render_arguments() {
        let mut imports = ImportManager::new(&class("com.example.Main_ViewBinding"));
        let ty = TypeName::best_guess("java.util.List<android.widget.Button>").unwrap();
        assert_eq!(imports.type_name(&ty), "List<Button>");
        assert_eq!(imports.get_imports(), vec!["android.widget.Button", "java.util.List"]);
    }
}
