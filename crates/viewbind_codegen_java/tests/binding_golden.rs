mod golden;

use golden::{resource_subclass, run_case, shared_lookup, text_watcher_activity};

#[test]
fn shared_lookup_golden() {
    run_case(shared_lookup::field_and_click());
}

#[test]
fn text_watcher_activity_golden() {
    run_case(text_watcher_activity::optional_watcher_with_resources());
}

#[test]
fn resource_subclass_sdk26_golden() {
    run_case(resource_subclass::sdk26_view());
}
