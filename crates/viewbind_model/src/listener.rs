//! Declarative table of the listener interfaces a method can be bound to.

use std::hash::{Hash, Hasher};

/// One callback method of a listener interface.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ListenerCallback {
    /// Name of the annotation's `callback` constant selecting this method, if any.
    pub constant: Option<&'static str>,
    pub name: &'static str,
    pub parameters: &'static [&'static str],
    pub return_type: &'static str,
    /// Returned from the synthesized body when no bound method supplies a value.
    pub default_return: &'static str,
}

impl ListenerCallback {
    pub const fn method(name: &'static str, parameters: &'static [&'static str]) -> Self {
        Self {
            constant: None,
            name,
            parameters,
            return_type: "void",
            default_return: "null",
        }
    }

    pub const fn returning(mut self, return_type: &'static str, default_return: &'static str) -> Self {
        self.return_type = return_type;
        self.default_return = default_return;
        self
    }

    pub const fn selected_by(mut self, constant: &'static str) -> Self {
        self.constant = Some(constant);
        self
    }

    pub fn has_return_type(&self) -> bool {
        self.return_type != "void"
    }
}

/// A listener interface together with how it is attached to a view.
#[derive(Debug)]
pub struct ListenerKind {
    /// Simple name of the annotation selecting this listener, e.g. `OnClick`.
    pub annotation: &'static str,
    pub target_type: &'static str,
    pub setter: &'static str,
    /// Detaches a listener; when absent the setter is called with `null`.
    pub remover: Option<&'static str>,
    pub listener_type: &'static str,
    /// Single-method listeners list their method here.
    pub methods: &'static [ListenerCallback],
    /// Multi-method listeners list every callback here, selected by constant.
    pub callbacks: &'static [ListenerCallback],
    pub default_callback: Option<&'static str>,
}

impl ListenerKind {
    /// Every method the listener interface declares, in declaration order.
    pub fn declared_callbacks(&self) -> &'static [ListenerCallback] {
        if self.methods.is_empty() {
            self.callbacks
        } else {
            self.methods
        }
    }

    pub fn callback_by_constant(&self, constant: &str) -> Option<&'static ListenerCallback> {
        self.callbacks
            .iter()
            .find(|callback| callback.constant == Some(constant))
    }

    pub fn remover_or_setter(&self) -> &'static str {
        self.remover.unwrap_or(self.setter)
    }
}

impl PartialEq for ListenerKind {
    fn eq(&self, other: &Self) -> bool {
        self.annotation == other.annotation
    }
}

impl Eq for ListenerKind {}

impl Hash for ListenerKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.annotation.hash(state);
    }
}

const VIEW: &str = "android.view.View";
const ADAPTER_VIEW: &str = "android.widget.AdapterView<?>";

const SINGLE_METHOD: ListenerKind = ListenerKind {
    annotation: "",
    target_type: VIEW,
    setter: "",
    remover: None,
    listener_type: "",
    methods: &[],
    callbacks: &[],
    default_callback: None,
};

pub static ON_CHECKED_CHANGED: ListenerKind = ListenerKind {
    annotation: "OnCheckedChanged",
    target_type: "android.widget.CompoundButton",
    setter: "setOnCheckedChangeListener",
    listener_type: "android.widget.CompoundButton.OnCheckedChangeListener",
    methods: &[ListenerCallback::method(
        "onCheckedChanged",
        &["android.widget.CompoundButton", "boolean"],
    )],
    ..SINGLE_METHOD
};

pub static ON_CLICK: ListenerKind = ListenerKind {
    annotation: "OnClick",
    target_type: VIEW,
    setter: "setOnClickListener",
    listener_type: "butterknife.internal.DebouncingOnClickListener",
    methods: &[ListenerCallback::method("doClick", &[VIEW])],
    ..SINGLE_METHOD
};

pub static ON_EDITOR_ACTION: ListenerKind = ListenerKind {
    annotation: "OnEditorAction",
    target_type: "android.widget.TextView",
    setter: "setOnEditorActionListener",
    listener_type: "android.widget.TextView.OnEditorActionListener",
    methods: &[ListenerCallback::method(
        "onEditorAction",
        &["android.widget.TextView", "int", "android.view.KeyEvent"],
    )
    .returning("boolean", "false")],
    ..SINGLE_METHOD
};

pub static ON_FOCUS_CHANGE: ListenerKind = ListenerKind {
    annotation: "OnFocusChange",
    target_type: VIEW,
    setter: "setOnFocusChangeListener",
    listener_type: "android.view.View.OnFocusChangeListener",
    methods: &[ListenerCallback::method("onFocusChange", &[VIEW, "boolean"])],
    ..SINGLE_METHOD
};

pub static ON_ITEM_CLICK: ListenerKind = ListenerKind {
    annotation: "OnItemClick",
    target_type: ADAPTER_VIEW,
    setter: "setOnItemClickListener",
    listener_type: "android.widget.AdapterView.OnItemClickListener",
    methods: &[ListenerCallback::method(
        "onItemClick",
        &[ADAPTER_VIEW, VIEW, "int", "long"],
    )],
    ..SINGLE_METHOD
};

pub static ON_ITEM_LONG_CLICK: ListenerKind = ListenerKind {
    annotation: "OnItemLongClick",
    target_type: ADAPTER_VIEW,
    setter: "setOnItemLongClickListener",
    listener_type: "android.widget.AdapterView.OnItemLongClickListener",
    methods: &[ListenerCallback::method(
        "onItemLongClick",
        &[ADAPTER_VIEW, VIEW, "int", "long"],
    )
    .returning("boolean", "false")],
    ..SINGLE_METHOD
};

pub static ON_ITEM_SELECTED: ListenerKind = ListenerKind {
    annotation: "OnItemSelected",
    target_type: ADAPTER_VIEW,
    setter: "setOnItemSelectedListener",
    remover: None,
    listener_type: "android.widget.AdapterView.OnItemSelectedListener",
    methods: &[],
    callbacks: &[
        ListenerCallback::method("onItemSelected", &[ADAPTER_VIEW, VIEW, "int", "long"])
            .selected_by("ITEM_SELECTED"),
        ListenerCallback::method("onNothingSelected", &[ADAPTER_VIEW])
            .selected_by("NOTHING_SELECTED"),
    ],
    default_callback: Some("ITEM_SELECTED"),
};

pub static ON_KEY: ListenerKind = ListenerKind {
    annotation: "OnKey",
    target_type: VIEW,
    setter: "setOnKeyListener",
    listener_type: "android.view.View.OnKeyListener",
    methods: &[ListenerCallback::method("onKey", &[VIEW, "int", "android.view.KeyEvent"])
        .returning("boolean", "false")],
    ..SINGLE_METHOD
};

pub static ON_LONG_CLICK: ListenerKind = ListenerKind {
    annotation: "OnLongClick",
    target_type: VIEW,
    setter: "setOnLongClickListener",
    listener_type: "android.view.View.OnLongClickListener",
    methods: &[ListenerCallback::method("onLongClick", &[VIEW]).returning("boolean", "true")],
    ..SINGLE_METHOD
};

pub static ON_PAGE_CHANGE: ListenerKind = ListenerKind {
    annotation: "OnPageChange",
    target_type: "androidx.viewpager.widget.ViewPager",
    setter: "addOnPageChangeListener",
    remover: Some("removeOnPageChangeListener"),
    listener_type: "androidx.viewpager.widget.ViewPager.OnPageChangeListener",
    methods: &[],
    callbacks: &[
        ListenerCallback::method("onPageSelected", &["int"]).selected_by("PAGE_SELECTED"),
        ListenerCallback::method("onPageScrolled", &["int", "float", "int"])
            .selected_by("PAGE_SCROLLED"),
        ListenerCallback::method("onPageScrollStateChanged", &["int"])
            .selected_by("PAGE_SCROLL_STATE_CHANGED"),
    ],
    default_callback: Some("PAGE_SELECTED"),
};

pub static ON_RATING_BAR_CHANGE: ListenerKind = ListenerKind {
    annotation: "OnRatingBarChange",
    target_type: "android.widget.RatingBar",
    setter: "setOnRatingBarChangeListener",
    listener_type: "android.widget.RatingBar.OnRatingBarChangeListener",
    methods: &[ListenerCallback::method(
        "onRatingChanged",
        &["android.widget.RatingBar", "float", "boolean"],
    )],
    ..SINGLE_METHOD
};

pub static ON_SEEK_BAR_CHANGE: ListenerKind = ListenerKind {
    annotation: "OnSeekBarChange",
    target_type: "android.widget.SeekBar",
    setter: "setOnSeekBarChangeListener",
    remover: None,
    listener_type: "android.widget.SeekBar.OnSeekBarChangeListener",
    methods: &[],
    callbacks: &[
        ListenerCallback::method(
            "onProgressChanged",
            &["android.widget.SeekBar", "int", "boolean"],
        )
        .selected_by("PROGRESS_CHANGED"),
        ListenerCallback::method("onStartTrackingTouch", &["android.widget.SeekBar"])
            .selected_by("START_TRACKING_TOUCH"),
        ListenerCallback::method("onStopTrackingTouch", &["android.widget.SeekBar"])
            .selected_by("STOP_TRACKING_TOUCH"),
    ],
    default_callback: Some("PROGRESS_CHANGED"),
};

pub static ON_TEXT_CHANGED: ListenerKind = ListenerKind {
    annotation: "OnTextChanged",
    target_type: "android.widget.TextView",
    setter: "addTextChangedListener",
    remover: Some("removeTextChangedListener"),
    listener_type: "android.text.TextWatcher",
    methods: &[],
    callbacks: &[
        ListenerCallback::method(
            "onTextChanged",
            &["java.lang.CharSequence", "int", "int", "int"],
        )
        .selected_by("TEXT_CHANGED"),
        ListenerCallback::method(
            "beforeTextChanged",
            &["java.lang.CharSequence", "int", "int", "int"],
        )
        .selected_by("BEFORE_TEXT_CHANGED"),
        ListenerCallback::method("afterTextChanged", &["android.text.Editable"])
            .selected_by("AFTER_TEXT_CHANGED"),
    ],
    default_callback: Some("TEXT_CHANGED"),
};

pub static ON_TOUCH: ListenerKind = ListenerKind {
    annotation: "OnTouch",
    target_type: VIEW,
    setter: "setOnTouchListener",
    listener_type: "android.view.View.OnTouchListener",
    methods: &[ListenerCallback::method("onTouch", &[VIEW, "android.view.MotionEvent"])
        .returning("boolean", "false")],
    ..SINGLE_METHOD
};

pub static ON_VALUE_CHANGE: ListenerKind = ListenerKind {
    annotation: "OnValueChange",
    target_type: "android.widget.NumberPicker",
    setter: "setOnValueChangedListener",
    listener_type: "android.widget.NumberPicker.OnValueChangeListener",
    methods: &[ListenerCallback::method(
        "onValueChange",
        &["android.widget.NumberPicker", "int", "int"],
    )],
    ..SINGLE_METHOD
};

/// Built-in listener kinds, in processing order.
pub static LISTENERS: &[&ListenerKind] = &[
    &ON_CHECKED_CHANGED,
    &ON_CLICK,
    &ON_EDITOR_ACTION,
    &ON_FOCUS_CHANGE,
    &ON_ITEM_CLICK,
    &ON_ITEM_LONG_CLICK,
    &ON_ITEM_SELECTED,
    &ON_KEY,
    &ON_LONG_CLICK,
    &ON_PAGE_CHANGE,
    &ON_RATING_BAR_CHANGE,
    &ON_SEEK_BAR_CHANGE,
    &ON_TEXT_CHANGED,
    &ON_TOUCH,
    &ON_VALUE_CHANGE,
];
