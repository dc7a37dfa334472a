//! Maps `(package, literal)` pairs to symbolic resource references.

use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::{debug, trace};
use viewbind_elements::{
    CompiledClass, ResourceIndex, ResourceIndexForm, RoundEnvironment, SourceClass,
};
use viewbind_model::{ClassName, QualifiedResourceRef, ResolvedId};

/// Nested classes of a resource index whose `int` members are bindable ids.
pub const SUPPORTED_TYPES: &[&str] = &[
    "anim", "array", "attr", "bool", "color", "dimen", "drawable", "font", "id", "integer",
    "string",
];

/// Members referenced from annotations, as `(category, member)` pairs with the
/// constant value the annotation was compiled with.
pub type ReferencedSymbols = IndexMap<(String, String), i32>;

/// Round-scoped symbol table. Dropped with the round.
#[derive(Debug, Clone, Default)]
pub struct ResourceSymbols {
    table: HashMap<QualifiedResourceRef, ResolvedId>,
}

impl ResourceSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every index referenced by the given annotations' symbolic ids,
    /// keyed by the package of the annotated element.
    pub fn scan_round(env: &RoundEnvironment, annotations: &[&str]) -> Self {
        let mut referenced: IndexMap<String, IndexMap<String, ReferencedSymbols>> = IndexMap::new();
        for annotation in annotations {
            for element in env.universe.elements_annotated_with(annotation) {
                let Some(mirror) = element.element.annotation(annotation) else {
                    continue;
                };
                for value in mirror.values.keys() {
                    for id in mirror.ids(value) {
                        if let Some((index_type, category, member)) = id.symbol_parts() {
                            referenced
                                .entry(element.enclosing.package.clone())
                                .or_default()
                                .entry(index_type.to_string())
                                .or_default()
                                .insert((category.to_string(), member.to_string()), id.value);
                        }
                    }
                }
            }
        }

        let mut symbols = Self::new();
        for (package, indices) in &referenced {
            for (index_type, members) in indices {
                match env.resource_index(index_type) {
                    Some(index) => symbols.register_index(package, index, members),
                    None => {
                        debug!(%package, %index_type, "resource index not available; using annotation symbols");
                        symbols.register_symbols(package, index_type, members);
                    }
                }
            }
        }
        symbols
    }

    /// Records the referenced `int` members of one index. Members are always
    /// recorded against the primary `R` name of the index's package, so a
    /// library's `R2` mirror and its `R` produce equal references.
    pub fn register_index(
        &mut self,
        respective_package: &str,
        index: &ResourceIndex,
        referenced: &ReferencedSymbols,
    ) {
        let mut entries = Vec::new();
        match &index.form {
            ResourceIndexForm::Source { tree } => collect_source(tree, &mut entries),
            ResourceIndexForm::Compiled { classes } => collect_compiled(classes, &mut entries),
        }

        let primary = ClassName::new(index.package(), "R");
        let mut recorded = 0usize;
        for (category, member, value) in entries {
            if !referenced.contains_key(&(category.clone(), member.clone())) {
                continue;
            }
            let key = QualifiedResourceRef::new(respective_package, value);
            let id = ResolvedId::reference(primary.nested(category), member, value);
            if self.record(key, id) {
                recorded += 1;
            }
        }
        debug!(index = %index.name, package = respective_package, recorded, "registered resource index");
    }

    /// Records members straight from the symbols the annotations were written
    /// with, for indices whose declarations are not part of the round.
    pub fn register_symbols(
        &mut self,
        respective_package: &str,
        index_type: &str,
        referenced: &ReferencedSymbols,
    ) {
        let package = index_type.rsplit_once('.').map_or("", |(package, _)| package);
        let primary = ClassName::new(package, "R");
        for ((category, member), value) in referenced {
            let key = QualifiedResourceRef::new(respective_package, *value);
            self.record(key, ResolvedId::reference(primary.nested(category.as_str()), member.as_str(), *value));
        }
    }

    /// Inserts a mapping unless the key is already known. The first registered
    /// mapping for a key is kept.
    pub fn record(&mut self, key: QualifiedResourceRef, id: ResolvedId) -> bool {
        match self.table.entry(key) {
            std::collections::hash_map::Entry::Occupied(existing) => {
                trace!(key = ?existing.key(), "keeping first registered resource id");
                false
            }
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(id);
                true
            }
        }
    }

    /// Resolves a literal, falling back to a constant. The answer is memoized.
    pub fn resolve(&mut self, key: QualifiedResourceRef) -> ResolvedId {
        let value = key.value;
        self.table
            .entry(key)
            .or_insert(ResolvedId::Constant(value))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn collect_source(class: &SourceClass, entries: &mut Vec<(String, String, i32)>) {
    for nested in &class.nested {
        if SUPPORTED_TYPES.contains(&nested.name.as_str()) {
            for field in nested.fields.iter().filter(|field| field.ty == "int") {
                if let Some(value) = field.int_value() {
                    entries.push((nested.name.clone(), field.name.clone(), value));
                }
            }
        }
        collect_source(nested, entries);
    }
}

fn collect_compiled(classes: &[CompiledClass], entries: &mut Vec<(String, String, i32)>) {
    for class in classes
        .iter()
        .filter(|class| SUPPORTED_TYPES.contains(&class.name.as_str()))
    {
        for member in &class.members {
            if let Some(value) = member.constant_value {
                entries.push((class.name.clone(), member.name.clone(), value));
            }
        }
    }
}
