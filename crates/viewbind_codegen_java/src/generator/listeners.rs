use super::formatting::{listener_field_name, lookup_local, string_literal, view_slot_name};
use super::{ClassEmitter, UTILS};
use crate::builder::JavaSourceBuilder;
use crate::error::CodeGenError;
use viewbind_model::binding::CallbackBindings;
use viewbind_model::{
    ClassName, ListenerCallback, ListenerKind, MethodBinding, ViewBindingGroup, VIEW_TYPE,
};

impl ClassEmitter<'_> {
    /// Stores the group's view in its slot and attaches one listener per kind.
    pub(super) fn listener_bindings(
        &mut self,
        out: &mut JavaSourceBuilder,
        group: &ViewBindingGroup,
    ) -> Result<(), CodeGenError> {
        if !group.has_listeners() {
            return Ok(());
        }
        let local = lookup_local(group);
        let slot = view_slot_name(group);
        let null_checked = group.needs_null_check();
        if null_checked {
            out.begin_control_flow(&format!("if ({local} != null)"));
        }
        out.push_statement(&format!("{slot} = {local}"));

        for (kind, callbacks) in group.listeners() {
            let listener_type = ClassName::best_guess(kind.listener_type)?;
            let receiver = self.listener_receiver(kind, local)?;
            if kind.remover.is_some() {
                let field = listener_field_name(&slot, &listener_type);
                self.anonymous_listener(out, &format!("{field} = "), "", &listener_type, kind, callbacks)?;
                out.push_statement(&format!("{receiver}.{}({field})", kind.setter));
            } else {
                let prefix = format!("{receiver}.{}(", kind.setter);
                self.anonymous_listener(out, &prefix, ")", &listener_type, kind, callbacks)?;
            }
        }

        if null_checked {
            out.end_control_flow();
        }
        Ok(())
    }

    /// `view`, or `((TextView) view)` when the setter lives on a subclass.
    pub(super) fn listener_receiver(
        &mut self,
        kind: &ListenerKind,
        local: &str,
    ) -> Result<String, CodeGenError> {
        if kind.target_type == VIEW_TYPE {
            return Ok(local.to_string());
        }
        let target_type = self.type_text(kind.target_type)?;
        Ok(format!("(({target_type}) {local})"))
    }

    /// `prefix new Listener() { ...every declared callback... }suffix;`
    fn anonymous_listener(
        &mut self,
        out: &mut JavaSourceBuilder,
        prefix: &str,
        suffix: &str,
        listener_type: &ClassName,
        kind: &ListenerKind,
        callbacks: &CallbackBindings,
    ) -> Result<(), CodeGenError> {
        let listener = self.imports.reference(listener_type);
        out.push_line(&format!("{prefix}new {listener}() {{"));
        out.indent();
        for (index, callback) in kind.declared_callbacks().iter().enumerate() {
            if index > 0 {
                out.blank_line();
            }
            let methods = callbacks.get(callback).map(|methods| methods.iter());
            self.callback_method(out, kind, callback, methods.into_iter().flatten())?;
        }
        out.dedent();
        out.push_line(&format!("}}{suffix};"));
        Ok(())
    }

    fn callback_method<'m>(
        &mut self,
        out: &mut JavaSourceBuilder,
        kind: &ListenerKind,
        callback: &ListenerCallback,
        methods: impl Iterator<Item = &'m MethodBinding>,
    ) -> Result<(), CodeGenError> {
        let return_type = self.type_text(callback.return_type)?;
        let mut parameters = Vec::with_capacity(callback.parameters.len());
        for (position, parameter) in callback.parameters.iter().enumerate() {
            parameters.push(format!("{} p{position}", self.type_text(parameter)?));
        }

        out.push_line("@Override");
        out.begin_control_flow(&format!(
            "public {return_type} {}({})",
            callback.name,
            parameters.join(", ")
        ));
        let mut returned = false;
        for method in methods {
            let call = format!("target.{}({})", method.name, self.arguments(kind, callback, method)?);
            if method.has_return_value {
                returned = true;
                out.push_statement(&format!("return {call}"));
            } else {
                out.push_statement(&call);
            }
        }
        if callback.has_return_type() && !returned {
            out.push_statement(&format!("return {}", callback.default_return));
        }
        out.end_control_flow();
        Ok(())
    }

    /// Forwards callback parameters to the bound method, casting where the
    /// declared types differ.
    fn arguments(
        &mut self,
        kind: &ListenerKind,
        callback: &ListenerCallback,
        method: &MethodBinding,
    ) -> Result<String, CodeGenError> {
        let mut arguments = Vec::with_capacity(method.parameters.len());
        for (index, parameter) in method.parameters.iter().enumerate() {
            let position = parameter.listener_position;
            let callback_type = callback.parameters.get(position).ok_or_else(|| {
                CodeGenError::InvalidListener {
                    annotation: kind.annotation.to_string(),
                    message: format!("{} has no parameter at position {position}", callback.name),
                }
            })?;
            if !parameter.requires_cast(callback_type) {
                arguments.push(format!("p{position}"));
            } else if self.config.debuggable {
                let utils = self.known(UTILS);
                let raw = self.imports.type_name(&parameter.ty.raw());
                arguments.push(format!(
                    "{utils}.castParam(p{position}, {}, {position}, {}, {index}, {raw}.class)",
                    string_literal(callback.name),
                    string_literal(&method.name),
                ));
            } else {
                let ty = self.imports.type_name(&parameter.ty);
                arguments.push(format!("({ty}) p{position}"));
            }
        }
        Ok(arguments.join(", "))
    }
}
