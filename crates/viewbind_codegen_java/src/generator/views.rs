use super::formatting::{lookup_local, string_literal};
use super::{ClassEmitter, UTILS};
use crate::builder::JavaSourceBuilder;
use crate::error::CodeGenError;
use viewbind_model::{
    human_description, CollectionBinding, FieldBinding, TypeName, ViewBindingGroup,
};

impl ClassEmitter<'_> {
    /// One lookup for the group, then its field assignment and listeners.
    pub(super) fn view_group(
        &mut self,
        out: &mut JavaSourceBuilder,
        group: &ViewBindingGroup,
    ) -> Result<(), CodeGenError> {
        let id = self.id_code(group.id());

        if let Some(field) = group.field().filter(|_| group.is_single_field_binding()) {
            let lookup = self.single_field_lookup(field, &id);
            out.push_statement(&format!("target.{} = {lookup}", field.name));
            return Ok(());
        }

        // The bound object itself needs no lookup.
        if !group.is_bound_to_root() {
            let required = group.required_descriptions();
            if !self.config.debuggable || required.is_empty() {
                out.push_statement(&format!("view = source.findViewById({id})"));
            } else {
                let utils = self.known(UTILS);
                let who = string_literal(&human_description(&required));
                out.push_statement(&format!("view = {utils}.findRequiredView(source, {id}, {who})"));
            }
        }

        if let Some(field) = group.field() {
            let value = self.cast_lookup(field, &id, lookup_local(group));
            out.push_statement(&format!("target.{} = {value}", field.name));
        }
        self.listener_bindings(out, group)
    }

    /// Direct assignment when the id carries nothing but one field.
    fn single_field_lookup(&mut self, field: &FieldBinding, id: &str) -> String {
        let requires_cast = field.requires_cast();
        if !self.config.debuggable || (!requires_cast && !field.required) {
            let cast = if requires_cast {
                format!("({}) ", self.imports.type_name(&field.ty))
            } else {
                String::new()
            };
            return format!("{cast}source.findViewById({id})");
        }
        let who = field.description();
        self.helper_lookup(field.required, requires_cast, &field.ty.raw(), id, &who)
    }

    fn cast_lookup(&mut self, field: &FieldBinding, id: &str, local: &str) -> String {
        if !field.requires_cast() {
            return local.to_string();
        }
        if self.config.debuggable {
            let utils = self.known(UTILS);
            let who = string_literal(&field.description());
            let raw = self.imports.type_name(&field.ty.raw());
            format!("{utils}.castView({local}, {id}, {who}, {raw}.class)")
        } else {
            format!("({}) {local}", self.imports.type_name(&field.ty))
        }
    }

    /// `Utils.find{Required,Optional}View[AsType](source, id[, who][, Type.class])`.
    fn helper_lookup(
        &mut self,
        required: bool,
        requires_cast: bool,
        raw: &TypeName,
        id: &str,
        who: &str,
    ) -> String {
        let utils = self.known(UTILS);
        let mut call = format!(
            "{utils}.find{}View{}(source, {id}",
            if required { "Required" } else { "Optional" },
            if requires_cast { "AsType" } else { "" }
        );
        if required || requires_cast {
            call.push_str(&format!(", {}", string_literal(who)));
        }
        if requires_cast {
            call.push_str(&format!(", {}.class", self.imports.type_name(raw)));
        }
        call.push(')');
        call
    }

    /// `target.views = Utils.listFilteringNull(` with one lookup per line.
    pub(super) fn collection_statement(&mut self, binding: &CollectionBinding) -> String {
        let utils = self.known(UTILS);
        let requires_cast = binding.requires_cast();
        let raw = binding.element_type.raw();
        let who = binding.description();

        let mut items = Vec::with_capacity(binding.ids.len());
        for id in &binding.ids {
            let id = self.id_code(id);
            let item = if !self.config.debuggable {
                let cast = if requires_cast {
                    format!("({}) ", self.imports.type_name(&binding.element_type))
                } else {
                    String::new()
                };
                format!("{cast}source.findViewById({id})")
            } else if !requires_cast && !binding.required {
                format!("source.findViewById({id})")
            } else {
                self.helper_lookup(binding.required, requires_cast, &raw, &id, &who)
            };
            items.push(item);
        }

        format!(
            "target.{} = {utils}.{}(\n{})",
            binding.name,
            binding.kind.factory(),
            items.join(",\n")
        )
    }
}
