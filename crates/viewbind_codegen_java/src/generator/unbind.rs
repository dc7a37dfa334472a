use super::formatting::{listener_field_name, view_slot_name};
use super::{ClassEmitter, CALL_SUPER};
use crate::builder::JavaSourceBuilder;
use crate::error::CodeGenError;
use viewbind_model::{ClassName, ViewBindingGroup};

impl ClassEmitter<'_> {
    /// Releases the target, its fields, then every attached listener, and
    /// finally the parent companion.
    pub(super) fn unbind_method(&mut self) -> Result<String, CodeGenError> {
        let set = self.set;
        let mut out = self.member_builder();
        out.push_line("@Override");
        if !set.is_final() && set.parent().is_none() {
            let call_super = self.known(CALL_SUPER);
            out.push_line(&format!("@{call_super}"));
        }
        out.begin_control_flow("public void unbind()");

        if set.has_target_field() {
            let has_fields = set.has_field_bindings();
            if has_fields {
                let target = self.target_type();
                out.push_statement(&format!("{target} target = this.target"));
            }
            out.push_statement(
                "if (target == null) throw new IllegalStateException(\"Bindings already cleared.\")",
            );
            out.push_statement(if has_fields { "this.target = null" } else { "target = null" });
            out.blank_line();
            for field in set.view_bindings().iter().filter_map(ViewBindingGroup::field) {
                out.push_statement(&format!("target.{} = null", field.name));
            }
            for collection in set.collection_bindings() {
                out.push_statement(&format!("target.{} = null", collection.name));
            }
        }

        if set.has_method_bindings() {
            out.blank_line();
            for group in set.view_bindings().iter().filter(|group| group.has_listeners()) {
                self.listener_teardown(&mut out, group)?;
            }
        }

        if set.parent().is_some() {
            out.blank_line();
            out.push_statement("super.unbind()");
        }

        out.trim_trailing_blank_lines();
        out.end_control_flow();
        Ok(out.build())
    }

    /// Detaches each listener while the slot still holds the view, then clears the slot.
    fn listener_teardown(
        &mut self,
        out: &mut JavaSourceBuilder,
        group: &ViewBindingGroup,
    ) -> Result<(), CodeGenError> {
        let slot = view_slot_name(group);
        let null_checked = group.needs_null_check();
        if null_checked {
            out.begin_control_flow(&format!("if ({slot} != null)"));
        }

        for kind in group.listeners().keys() {
            let receiver = self.listener_receiver(kind, &slot)?;
            let detach = kind.remover_or_setter();
            if kind.remover.is_some() {
                let listener_type = ClassName::best_guess(kind.listener_type)?;
                let field = listener_field_name(&slot, &listener_type);
                out.push_statement(&format!("{receiver}.{detach}({field})"));
                out.push_statement(&format!("{field} = null"));
            } else {
                out.push_statement(&format!("{receiver}.{detach}(null)"));
            }
        }
        out.push_statement(&format!("{slot} = null"));

        if null_checked {
            out.end_control_flow();
        }
        Ok(())
    }
}
