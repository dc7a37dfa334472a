//! Restrictions shared by every annotation: generated code must be able to
//! reach the member, and must not land in a framework package.

use crate::diagnostics::Diagnostics;
use indexmap::IndexSet;
use viewbind_elements::{ElementRef, Modifier, TypeKind};

/// Reports every accessibility violation of `element`; true when any was found.
pub fn is_inaccessible(
    diagnostics: &mut Diagnostics,
    annotation: &str,
    target_thing: &str,
    element: ElementRef<'_>,
) -> bool {
    let enclosing = element.enclosing;
    let location = format!("({}.{})", enclosing.name, element.element.name);
    let mut has_error = false;

    if element.element.has_modifier(Modifier::Private) || element.element.has_modifier(Modifier::Static) {
        diagnostics.error(
            &element.path(),
            format!("@{annotation} {target_thing} must not be private or static. {location}"),
        );
        has_error = true;
    }

    if enclosing.kind != TypeKind::Class {
        diagnostics.error(
            &enclosing.name,
            format!("@{annotation} {target_thing} may only be contained in classes. {location}"),
        );
        has_error = true;
    }

    if enclosing.has_modifier(Modifier::Private) {
        diagnostics.error(
            &enclosing.name,
            format!("@{annotation} {target_thing} may not be contained in private classes. {location}"),
        );
        has_error = true;
    }

    has_error
}

pub fn is_in_wrong_package(
    diagnostics: &mut Diagnostics,
    annotation: &str,
    element: ElementRef<'_>,
) -> bool {
    let qualified = &element.enclosing.name;
    let framework = if qualified.starts_with("android.") {
        "Android"
    } else if qualified.starts_with("java.") {
        "Java"
    } else {
        return false;
    };
    diagnostics.error(
        &element.path(),
        format!("@{annotation}-annotated class incorrectly in {framework} framework package. ({qualified})"),
    );
    true
}

/// First value seen twice, if any.
pub fn find_duplicate(values: &[i32]) -> Option<i32> {
    let mut seen = IndexSet::new();
    values.iter().copied().find(|value| !seen.insert(*value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use viewbind_elements::{Element, TypeDecl, TypeMirror};

    fn check(decl: &TypeDecl) -> (bool, Vec<String>) {
        let mut diagnostics = Diagnostics::new();
        let element = ElementRef {
            enclosing: decl,
            element: &decl.members[0],
        };
        let inaccessible = is_inaccessible(&mut diagnostics, "BindView", "fields", element);
        let wrong_package = is_in_wrong_package(&mut diagnostics, "BindView", element);
        let messages = diagnostics
            .messages(Severity::Error)
            .into_iter()
            .map(str::to_string)
            .collect();
        (inaccessible || wrong_package, messages)
    }

    fn field() -> Element {
        Element::field("thing", TypeMirror::declared("android.view.View"))
    }

    #[test]
    fn accessible_field_passes() {
        let decl = TypeDecl::class("test.Test").with_member(field());
        assert_eq!(check(&decl), (false, vec![]));
    }

    #[test]
    fn every_violation_is_reported() {
        let decl = TypeDecl::interface("test.Test")
            .with_modifier(Modifier::Private)
            .with_member(field().with_modifier(Modifier::Static));
        let (has_error, messages) = check(&decl);
        assert!(has_error);
        assert_eq!(
            messages,
            vec![
                "@BindView fields must not be private or static. (test.Test.thing)",
                "@BindView fields may only be contained in classes. (test.Test.thing)",
                "@BindView fields may not be contained in private classes. (test.Test.thing)",
            ]
        );
    }

    #[test]
    fn framework_packages_are_rejected() {
        let decl = TypeDecl::class("android.widget.Custom").with_member(field());
        let (has_error, messages) = check(&decl);
        assert!(has_error);
        assert_eq!(
            messages,
            vec!["@BindView-annotated class incorrectly in Android framework package. (android.widget.Custom)"]
        );
    }

    #[test]
    fn duplicates_report_first_repeat() {
        assert_eq!(find_duplicate(&[1, 2, 3]), None);
        assert_eq!(find_duplicate(&[1, 2, 2, 1]), Some(2));
    }
}
