use super::{ClassEmitter, CONTEXT, SUPPRESS_LINT, UI_THREAD, VIEW};
use crate::error::CodeGenError;
use viewbind_model::listener::ON_TOUCH;
use viewbind_model::{HostCategory, ParentLink};

impl ClassEmitter<'_> {
    /// Host shortcut, legacy view delegate, then the binding constructor.
    pub(super) fn constructors(&mut self) -> Result<Vec<String>, CodeGenError> {
        let mut constructors = Vec::new();
        if let Some(host) = self.host_constructor() {
            constructors.push(host);
        }
        if !self.set.constructor_needs_view() {
            constructors.push(self.view_delegate_constructor());
        }
        constructors.push(self.binding_constructor()?);
        Ok(constructors)
    }

    fn host_constructor(&mut self) -> Option<String> {
        let needs_view = self.set.constructor_needs_view();
        let delegate = match (self.set.category(), needs_view) {
            (HostCategory::View, true) => "this(target, target)",
            (HostCategory::View, false) => "this(target, target.getContext())",
            (HostCategory::Activity, true) | (HostCategory::Dialog, true) => {
                "this(target, target.getWindow().getDecorView())"
            }
            (HostCategory::Activity, false) => "this(target, target)",
            (HostCategory::Dialog, false) => "this(target, target.getContext())",
            (HostCategory::Generic, _) => return None,
        };

        let ui_thread = self.known(UI_THREAD);
        let target = self.target_type();
        let name = self.set.binding_class().simple_name().to_string();
        let mut out = self.member_builder();
        out.push_line(&format!("@{ui_thread}"));
        out.begin_control_flow(&format!("public {name}({target} target)"));
        out.push_statement(delegate);
        out.end_control_flow();
        Some(out.build())
    }

    /// Kept for reflective binding, which always passes a view.
    fn view_delegate_constructor(&mut self) -> String {
        let ui_thread = self.known(UI_THREAD);
        let view = self.known(VIEW);
        let context = self.known(CONTEXT);
        let target = self.target_type();
        let name = self.set.binding_class().simple_name().to_string();

        let mut out = self.member_builder();
        out.push_line("/**");
        out.push_line(&format!(
            " * @deprecated Use {{@link #{name}({target}, {context})}} for direct creation."
        ));
        out.push_line(" *     Only present for runtime invocation through {@code ButterKnife.bind()}.");
        out.push_line(" */");
        out.push_line("@Deprecated");
        out.push_line(&format!("@{ui_thread}"));
        out.begin_control_flow(&format!("public {name}({target} target, {view} source)"));
        out.push_statement("this(target, source.getContext())");
        out.end_control_flow();
        out.build()
    }

    fn binding_constructor(&mut self) -> Result<String, CodeGenError> {
        let set = self.set;
        let needs_view = set.constructor_needs_view();

        let mut annotations = vec![format!("@{}", self.known(UI_THREAD))];
        if set.has_unqualified_resource_bindings() {
            annotations.push("@SuppressWarnings(\"ResourceType\")".to_string());
        }
        if set.has_listener(&ON_TOUCH) {
            let suppress_lint = self.known(SUPPRESS_LINT);
            annotations.push(format!("@{suppress_lint}(\"ClickableViewAccessibility\")"));
        }

        let target = self.target_type();
        let target_parameter = if set.has_method_bindings() {
            format!("final {target} target")
        } else {
            format!("{target} target")
        };
        let source_parameter = if needs_view {
            format!("{} source", self.known(VIEW))
        } else {
            format!("{} context", self.known(CONTEXT))
        };
        let name = set.binding_class().simple_name().to_string();

        let mut out = self.member_builder();
        for annotation in &annotations {
            out.push_line(annotation);
        }
        out.begin_control_flow(&format!("public {name}({target_parameter}, {source_parameter})"));

        if let Some(parent) = set.parent() {
            out.push_statement(super_call(parent, needs_view));
            out.blank_line();
        }
        if set.has_target_field() {
            out.push_statement("this.target = target");
            out.blank_line();
        }

        if set.has_view_bindings() {
            if set.has_view_local() {
                let view = self.known(VIEW);
                out.push_statement(&format!("{view} view"));
            }
            for group in set.view_bindings() {
                self.view_group(&mut out, group)?;
            }
            for collection in set.collection_bindings() {
                let statement = self.collection_statement(collection);
                out.push_statement(&statement);
            }
            if !set.resource_bindings().is_empty() {
                out.blank_line();
            }
        }

        if !set.resource_bindings().is_empty() {
            self.resource_statements(&mut out);
        }

        out.trim_trailing_blank_lines();
        out.end_control_flow();
        Ok(out.build())
    }
}

fn super_call(parent: &ParentLink, needs_view: bool) -> &'static str {
    if parent.constructor_needs_view() {
        "super(target, source)"
    } else if needs_view {
        "super(target, source.getContext())"
    } else {
        "super(target, context)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewbind_model::{binding_class_name, ExternalParentInfo};

    fn parent(needs_view: bool) -> ParentLink {
        ParentLink::Classpath(ExternalParentInfo {
            binding_class: binding_class_name("test", &["Base"]),
            constructor_needs_view: needs_view,
        })
    }

    #[test]
    fn super_call_forwards_what_the_parent_takes() {
        assert_eq!(super_call(&parent(true), true), "super(target, source)");
        assert_eq!(super_call(&parent(false), true), "super(target, source.getContext())");
        assert_eq!(super_call(&parent(false), false), "super(target, context)");
    }
}
