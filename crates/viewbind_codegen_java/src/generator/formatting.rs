use viewbind_model::{ClassName, ViewBindingGroup};

/// Escape special characters in Java string literals.
pub(super) fn escape_string(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

pub(super) fn string_literal(value: &str) -> String {
    format!("\"{}\"", escape_string(value))
}

/// Field holding the view a group's listeners are attached to: `viewSource`
/// for the bound object itself, otherwise `view` plus the id in hex.
pub(super) fn view_slot_name(group: &ViewBindingGroup) -> String {
    if group.is_bound_to_root() {
        "viewSource".to_string()
    } else {
        // Two's complement, matching Integer.toHexString.
        format!("view{:x}", group.id().value() as u32)
    }
}

/// Field keeping a listener instance so it can be passed to its remover.
pub(super) fn listener_field_name(slot: &str, listener_type: &ClassName) -> String {
    format!("{slot}{}", listener_type.simple_name())
}

/// Local the lookup result is read from inside the constructor.
pub(super) fn lookup_local(group: &ViewBindingGroup) -> &'static str {
    if group.is_bound_to_root() {
        "source"
    } else {
        "view"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewbind_model::{ResolvedId, NO_ID};

    #[test]
    fn slot_names_use_hex_ids() {
        let group = ViewBindingGroup::new(ResolvedId::Constant(0x7f0a0012));
        assert_eq!(view_slot_name(&group), "view7f0a0012");
        let root = ViewBindingGroup::new(ResolvedId::Constant(NO_ID));
        assert_eq!(view_slot_name(&root), "viewSource");
        assert_eq!(lookup_local(&root), "source");
    }

    #[test]
    fn listener_fields_append_simple_name() {
        let watcher = ClassName::best_guess("android.text.TextWatcher").unwrap();
        assert_eq!(listener_field_name("view1", &watcher), "view1TextWatcher");
    }

    #[test]
    fn string_literals_are_escaped() {
        assert_eq!(string_literal("field \"a\""), "\"field \\\"a\\\"\"");
    }
}
