use viewbind_elements::{
    AnnotationMirror, AnnotationValue, Element, IdValue, Modifier, ResourceIndex,
    ResourceIndexForm, RoundEnvironment, RoundInput, SourceClass, SourceField, TypeDecl,
    TypeMirror,
};
use viewbind_model::ParentLink;
use viewbind_processor::{
    process_round, GeneratedFile, MemorySink, Processor, ProcessorOptions, Severity, SinkError,
    SourceSink,
};

fn view_field(name: &str, ty: &str, id: i32) -> Element {
    Element::field(name, TypeMirror::declared(ty)).annotated(
        AnnotationMirror::new("BindView").with("value", AnnotationValue::Id(IdValue::literal(id))),
    )
}

fn click_method(name: &str, ids: &[i32], parameters: Vec<TypeMirror>) -> Element {
    let ids = ids.iter().copied().map(IdValue::literal).collect();
    Element::method(name, TypeMirror::Void, parameters)
        .annotated(AnnotationMirror::new("OnClick").with("value", AnnotationValue::Ids(ids)))
}

fn environment(types: Vec<TypeDecl>) -> RoundEnvironment {
    RoundEnvironment::from_types(types).unwrap()
}

fn run(env: &RoundEnvironment) -> (viewbind_processor::RoundOutcome, MemorySink) {
    let mut sink = MemorySink::new();
    let outcome = Processor::default().process(env, &mut sink);
    (outcome, sink)
}

fn source_of<'a>(sink: &'a MemorySink, name: &str) -> &'a str {
    &sink
        .get(name)
        .unwrap_or_else(|| panic!("{name} was not generated"))
        .source
}

#[test]
fn field_and_listener_on_one_id_share_a_lookup() {
    let test = TypeDecl::class("test.Test")
        .with_member(view_field("x", "android.view.View", 1))
        .with_member(click_method("y", &[1], Vec::new()));
    let (outcome, sink) = run(&environment(vec![test]));

    assert!(!outcome.has_errors(), "{:?}", outcome.diagnostics);
    assert_eq!(outcome.written, vec!["test.Test_ViewBinding".to_string()]);
    let source = source_of(&sink, "test.Test_ViewBinding");
    assert_eq!(source.matches("findRequiredView(").count(), 1);
    assert!(source.contains(
        "    view = Utils.findRequiredView(source, 1, \"field 'x' and method 'y'\");\n    target.x = view;\n    view1 = view;\n"
    ));
    assert!(source.contains("        target.y();\n"));
    assert!(source.contains(
        "    target.x = null;\n\n    view1.setOnClickListener(null);\n    view1 = null;\n"
    ));
}

#[test]
fn optional_members_keep_the_null_guard() {
    let test = TypeDecl::class("test.Test")
        .with_member(
            view_field("x", "android.view.View", 1).annotated(AnnotationMirror::new("Nullable")),
        )
        .with_member(
            click_method("y", &[1], Vec::new()).annotated(AnnotationMirror::new("Optional")),
        );
    let (outcome, sink) = run(&environment(vec![test]));

    assert!(!outcome.has_errors());
    let source = source_of(&sink, "test.Test_ViewBinding");
    assert!(source.contains("view = source.findViewById(1);"));
    assert!(source.contains("    if (view != null) {\n      view1 = view;\n"));
}

#[test]
fn second_field_on_the_same_id_is_rejected() {
    let test = TypeDecl::class("test.Test")
        .with_member(view_field("a", "android.view.View", 1))
        .with_member(view_field("b", "android.view.View", 1));
    let (outcome, sink) = run(&environment(vec![test]));

    assert_eq!(
        outcome.diagnostics.messages(Severity::Error),
        vec!["Attempt to use @BindView for an already bound ID 1 on 'a'. (test.Test.b)"]
    );
    let set = &outcome.bindings["test.Test"];
    assert_eq!(set.view_bindings().len(), 1);
    assert_eq!(set.view_bindings()[0].field().unwrap().name, "a");
    assert!(sink.get("test.Test_ViewBinding").is_some());
}

#[test]
fn unannotated_subclass_gets_no_companion() {
    let a = TypeDecl::class("test.A").with_member(view_field("one", "android.view.View", 1));
    let b = TypeDecl::class("test.B")
        .extending(TypeMirror::declared("test.A"))
        .with_member(view_field("two", "android.view.View", 2));
    let c = TypeDecl::class("test.C").extending(TypeMirror::declared("test.B"));
    let (outcome, sink) = run(&environment(vec![a, b, c]));

    assert!(!outcome.has_errors());
    let keys: Vec<&str> = outcome.bindings.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["test.A", "test.B"]);
    assert!(outcome.bindings["test.A"].parent().is_none());
    match outcome.bindings["test.B"].parent() {
        Some(ParentLink::Round { target, binding_class, .. }) => {
            assert_eq!(target, "test.A");
            assert_eq!(binding_class.canonical(), "test.A_ViewBinding");
        }
        other => panic!("unexpected parent {other:?}"),
    }
    assert!(sink.get("test.C_ViewBinding").is_none());
    let b_source = source_of(&sink, "test.B_ViewBinding");
    assert!(b_source.contains("public class B_ViewBinding extends A_ViewBinding {"));
    assert!(b_source.contains("    super(target, source);\n"));
}

#[test]
fn classpath_ancestor_is_extended() {
    let base = TypeDecl::class("lib.Base")
        .with_member(view_field("title", "android.widget.TextView", 1))
        .on_classpath();
    let child = TypeDecl::class("test.Child")
        .extending(TypeMirror::declared("lib.Base"))
        .with_member(
            Element::field("label", TypeMirror::declared("java.lang.String")).annotated(
                AnnotationMirror::new("BindString")
                    .with("value", AnnotationValue::Id(IdValue::literal(2))),
            ),
        );
    let (outcome, sink) = run(&environment(vec![base, child]));

    assert!(!outcome.has_errors(), "{:?}", outcome.diagnostics);
    assert_eq!(outcome.bindings.len(), 1);
    let source = source_of(&sink, "test.Child_ViewBinding");
    assert!(source.contains("import lib.Base_ViewBinding;"));
    assert!(source.contains("public class Child_ViewBinding extends Base_ViewBinding {"));
    assert!(source.contains("public Child_ViewBinding(Child target, View source) {"));
    assert!(source.contains(
        "    super(target, source);\n\n    Context context = source.getContext();\n    Resources res = context.getResources();\n    target.label = res.getString(2);\n"
    ));
}

#[test]
fn invalid_fields_are_reported_and_skipped() {
    let test = TypeDecl::class("test.Test")
        .with_member(view_field("hidden", "android.view.View", 1).with_modifier(Modifier::Private))
        .with_member(view_field("name", "java.lang.String", 2));
    let (outcome, sink) = run(&environment(vec![test]));

    assert_eq!(
        outcome.diagnostics.messages(Severity::Error),
        vec![
            "@BindView fields must not be private or static. (test.Test.hidden)",
            "@BindView fields must extend from View or be an interface. (test.Test.name)",
        ]
    );
    assert!(outcome.bindings.is_empty());
    assert!(sink.files().is_empty());
}

#[test]
fn framework_packages_are_rejected() {
    let widget = TypeDecl::class("android.widget.Custom")
        .with_member(view_field("x", "android.view.View", 1));
    let (outcome, _) = run(&environment(vec![widget]));

    assert_eq!(
        outcome.diagnostics.messages(Severity::Error),
        vec!["@BindView-annotated class incorrectly in Android framework package. (android.widget.Custom)"]
    );
}

#[test]
fn unmatched_listener_parameter_is_described() {
    let test = TypeDecl::class("test.Test").with_member(click_method(
        "clicked",
        &[1],
        vec![TypeMirror::declared("java.lang.String")],
    ));
    let (outcome, _) = run(&environment(vec![test]));

    let expected = "Unable to match @OnClick method arguments. (test.Test.clicked)\n\n  Parameter #1: java.lang.String\n    did not match any listener parameters\n\nMethods may have up to 1 parameter(s):\n\n  android.view.View\n\nThese may be listed in any order but will be searched for from top to bottom.";
    assert_eq!(outcome.diagnostics.messages(Severity::Error), vec![expected]);
}

#[test]
fn subtype_parameter_is_cast_at_the_call() {
    let test = TypeDecl::class("test.Test").with_member(click_method(
        "clicked",
        &[1],
        vec![TypeMirror::declared("android.widget.Button")],
    ));
    let (outcome, sink) = run(&environment(vec![test]));

    assert!(!outcome.has_errors());
    let source = source_of(&sink, "test.Test_ViewBinding");
    assert!(source.contains(
        "target.clicked(Utils.castParam(p0, \"doClick\", 0, \"clicked\", 0, Button.class));"
    ));
}

#[test]
fn root_sentinel_must_stand_alone() {
    let test = TypeDecl::class("test.Test").with_member(click_method("y", &[1, -1], Vec::new()));
    let (outcome, _) = run(&environment(vec![test]));

    assert_eq!(
        outcome.diagnostics.messages(Severity::Error),
        vec!["@OnClick annotation contains invalid ID -1. (test.Test.y)"]
    );
}

#[test]
fn library_index_resolves_to_its_r_class() {
    let index = ResourceIndex {
        name: "com.example.lib.R2".to_string(),
        form: ResourceIndexForm::Source {
            tree: SourceClass {
                name: "R2".to_string(),
                nested: vec![SourceClass {
                    name: "id".to_string(),
                    modifiers: vec![Modifier::Public, Modifier::Static],
                    fields: vec![SourceField {
                        name: "title".to_string(),
                        ty: "int".to_string(),
                        modifiers: vec![Modifier::Public, Modifier::Static, Modifier::Final],
                        initializer: Some("0x7f0a0001".to_string()),
                    }],
                    nested: Vec::new(),
                }],
                ..SourceClass::default()
            },
        },
    };
    let id = IdValue::symbolic(0x7f0a_0001, "com.example.lib.R2.id.title");
    let screen = TypeDecl::class("com.example.lib.Screen").with_member(
        Element::field("title", TypeMirror::declared("android.widget.TextView"))
            .annotated(AnnotationMirror::new("BindView").with("value", AnnotationValue::Id(id))),
    );
    let env = environment(vec![screen]).with_resource_index(index);
    let (outcome, sink) = run(&env);

    assert!(!outcome.has_errors());
    let source = source_of(&sink, "com.example.lib.Screen_ViewBinding");
    assert!(source.contains(
        "target.title = Utils.findRequiredViewAsType(source, R.id.title, \"field 'title'\", TextView.class);"
    ));
    assert!(!source.contains("@SuppressWarnings"));
}

#[test]
fn round_options_select_release_lookups() {
    let mut input = RoundInput::default();
    input.options.insert("butterknife.debuggable".to_string(), "false".to_string());
    input.options.insert("butterknife.minSdk".to_string(), "Q".to_string());
    input.types.push(
        TypeDecl::class("test.Test").with_member(view_field("x", "android.widget.Button", 1)),
    );
    let env = RoundEnvironment::new(input).unwrap();
    let mut sink = MemorySink::new();
    let outcome = process_round(&env, &mut sink);

    assert_eq!(
        outcome.diagnostics.messages(Severity::Warning),
        vec!["Unable to parse supplied minSdk option 'Q'. Falling back to API 1 support."]
    );
    assert!(!outcome.has_errors());
    let source = source_of(&sink, "test.Test_ViewBinding");
    assert!(source.contains("target.x = (Button) source.findViewById(1);"));
}

struct RejectingSink;

impl SourceSink for RejectingSink {
    fn write(&mut self, file: &GeneratedFile) -> Result<(), SinkError> {
        Err(SinkError::AlreadyWritten {
            name: file.qualified_name(),
        })
    }
}

#[test]
fn sink_failures_are_reported_per_type() {
    let a = TypeDecl::class("test.A").with_member(view_field("x", "android.view.View", 1));
    let b = TypeDecl::class("test.B").with_member(view_field("y", "android.view.View", 2));
    let env = environment(vec![a, b]);
    let outcome = Processor::new(ProcessorOptions::default()).process(&env, &mut RejectingSink);

    assert!(outcome.written.is_empty());
    assert_eq!(
        outcome.diagnostics.messages(Severity::Error),
        vec![
            "Unable to write binding for type test.A: test.A_ViewBinding was already written this round",
            "Unable to write binding for type test.B: test.B_ViewBinding was already written this round",
        ]
    );
}

#[test]
fn child_listed_first_waits_for_its_parent() {
    let child = TypeDecl::class("test.C")
        .extending(TypeMirror::declared("test.P"))
        .with_member(
            Element::field("label", TypeMirror::declared("java.lang.String")).annotated(
                AnnotationMirror::new("BindString")
                    .with("value", AnnotationValue::Id(IdValue::literal(2))),
            ),
        );
    let parent = TypeDecl::class("test.P")
        .extending(TypeMirror::declared("android.app.Dialog"))
        .with_member(view_field("title", "android.view.View", 1));
    let (outcome, sink) = run(&environment(vec![child, parent]));

    assert!(!outcome.has_errors(), "{:?}", outcome.diagnostics);
    let keys: Vec<&str> = outcome.bindings.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["test.P", "test.C"]);
    let source = source_of(&sink, "test.C_ViewBinding");
    assert!(source.contains("public class C_ViewBinding extends P_ViewBinding {"));
    assert!(source.contains("    super(target, source);\n"));
}

#[test]
fn cyclic_superclasses_stall_linking() {
    let a = TypeDecl::class("test.A")
        .extending(TypeMirror::declared("test.B"))
        .with_member(view_field("one", "android.view.View", 1));
    let b = TypeDecl::class("test.B")
        .extending(TypeMirror::declared("test.A"))
        .with_member(view_field("two", "android.view.View", 2));
    let (outcome, sink) = run(&environment(vec![a, b]));

    assert_eq!(
        outcome.diagnostics.messages(Severity::Error),
        vec!["Superclass links of test.B, test.A could not be resolved."]
    );
    assert!(outcome.bindings.is_empty());
    assert!(sink.files().is_empty());
}

#[test]
fn dialog_host_binds_through_its_decor_view() {
    let dialog = TypeDecl::class("test.D")
        .extending(TypeMirror::declared("android.app.Dialog"))
        .with_member(view_field("title", "android.widget.TextView", 1));
    let (outcome, sink) = run(&environment(vec![dialog]));

    assert!(!outcome.has_errors(), "{:?}", outcome.diagnostics);
    let source = source_of(&sink, "test.D_ViewBinding");
    assert!(source.contains(
        "  public D_ViewBinding(D target) {\n    this(target, target.getWindow().getDecorView());\n  }"
    ));
}

#[test]
fn unresolved_view_type_is_noted_and_bound() {
    let test = TypeDecl::class("test.T").with_member(
        Element::field("g", TypeMirror::parse("!test.GeneratedView").unwrap()).annotated(
            AnnotationMirror::new("BindView")
                .with("value", AnnotationValue::Id(IdValue::literal(1))),
        ),
    );
    let (outcome, sink) = run(&environment(vec![test]));

    assert!(!outcome.has_errors(), "{:?}", outcome.diagnostics);
    assert_eq!(
        outcome.diagnostics.messages(Severity::Note),
        vec!["@BindView field with unresolved type (test.GeneratedView) must elsewhere be generated as a View or interface. (test.T.g)"]
    );
    let source = source_of(&sink, "test.T_ViewBinding");
    assert!(source.contains(
        "target.g = Utils.findRequiredViewAsType(source, 1, \"field 'g'\", GeneratedView.class);"
    ));
}
