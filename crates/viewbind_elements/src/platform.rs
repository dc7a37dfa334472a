//! Stub declarations for the Android and JDK types the processor inspects.

use crate::element::{TypeDecl, TypeKind};
use crate::types::TypeMirror;

struct PlatformType {
    name: &'static str,
    kind: TypeKind,
    superclass: Option<(&'static str, &'static [&'static str])>,
    interfaces: &'static [&'static str],
}

const fn class(
    name: &'static str,
    superclass: &'static str,
) -> PlatformType {
    PlatformType {
        name,
        kind: TypeKind::Class,
        superclass: Some((superclass, &[])),
        interfaces: &[],
    }
}

const fn interface(name: &'static str, interfaces: &'static [&'static str]) -> PlatformType {
    PlatformType {
        name,
        kind: TypeKind::Interface,
        superclass: None,
        interfaces,
    }
}

const OBJECT: &str = "java.lang.Object";

static PLATFORM_TYPES: &[PlatformType] = &[
    PlatformType {
        name: OBJECT,
        kind: TypeKind::Class,
        superclass: None,
        interfaces: &[],
    },
    interface("java.lang.CharSequence", &[]),
    PlatformType {
        name: "java.lang.String",
        kind: TypeKind::Class,
        superclass: Some((OBJECT, &[])),
        interfaces: &["java.lang.CharSequence"],
    },
    interface("java.util.List", &[]),
    interface("java.lang.Runnable", &[]),
    class("android.content.Context", OBJECT),
    class("android.content.ContextWrapper", "android.content.Context"),
    class("android.view.ContextThemeWrapper", "android.content.ContextWrapper"),
    class("android.app.Activity", "android.view.ContextThemeWrapper"),
    class("androidx.activity.ComponentActivity", "android.app.Activity"),
    class("androidx.fragment.app.FragmentActivity", "androidx.activity.ComponentActivity"),
    class("androidx.appcompat.app.AppCompatActivity", "androidx.fragment.app.FragmentActivity"),
    class("android.app.Dialog", OBJECT),
    class("androidx.appcompat.app.AppCompatDialog", "android.app.Dialog"),
    class("android.view.View", OBJECT),
    class("android.view.ViewGroup", "android.view.View"),
    class("android.widget.FrameLayout", "android.view.ViewGroup"),
    class("android.widget.LinearLayout", "android.view.ViewGroup"),
    class("android.widget.TextView", "android.view.View"),
    class("android.widget.EditText", "android.widget.TextView"),
    class("android.widget.Button", "android.widget.TextView"),
    class("android.widget.CompoundButton", "android.widget.Button"),
    class("android.widget.CheckBox", "android.widget.CompoundButton"),
    class("android.widget.ImageView", "android.view.View"),
    class("android.widget.ImageButton", "android.widget.ImageView"),
    class("android.widget.AdapterView", "android.view.ViewGroup"),
    PlatformType {
        name: "android.widget.AbsListView",
        kind: TypeKind::Class,
        superclass: Some(("android.widget.AdapterView", &["android.widget.ListAdapter"])),
        interfaces: &[],
    },
    class("android.widget.ListView", "android.widget.AbsListView"),
    class("android.widget.GridView", "android.widget.AbsListView"),
    PlatformType {
        name: "android.widget.AbsSpinner",
        kind: TypeKind::Class,
        superclass: Some(("android.widget.AdapterView", &["android.widget.SpinnerAdapter"])),
        interfaces: &[],
    },
    class("android.widget.Spinner", "android.widget.AbsSpinner"),
    interface("android.widget.Adapter", &[]),
    interface("android.widget.ListAdapter", &["android.widget.Adapter"]),
    interface("android.widget.SpinnerAdapter", &["android.widget.Adapter"]),
    class("android.widget.ProgressBar", "android.view.View"),
    class("android.widget.AbsSeekBar", "android.widget.ProgressBar"),
    class("android.widget.SeekBar", "android.widget.AbsSeekBar"),
    class("android.widget.RatingBar", "android.widget.AbsSeekBar"),
    class("android.widget.NumberPicker", "android.widget.LinearLayout"),
    class("androidx.viewpager.widget.ViewPager", "android.view.ViewGroup"),
    class("android.view.KeyEvent", OBJECT),
    class("android.view.MotionEvent", OBJECT),
    interface("android.text.Editable", &["java.lang.CharSequence"]),
    interface("android.text.TextWatcher", &[]),
    class("android.content.res.ColorStateList", OBJECT),
    class("android.content.res.TypedArray", OBJECT),
    class("android.graphics.Bitmap", OBJECT),
    class("android.graphics.drawable.Drawable", OBJECT),
    class("android.graphics.Typeface", OBJECT),
    class("android.view.animation.Animation", OBJECT),
];

pub(crate) fn declarations() -> impl Iterator<Item = TypeDecl> {
    PLATFORM_TYPES.iter().map(|stub| {
        let mut decl = match stub.kind {
            TypeKind::Interface => TypeDecl::interface(stub.name),
            _ => TypeDecl::class(stub.name),
        }
        .on_classpath();
        if let Some((name, args)) = stub.superclass {
            decl.superclass = Some(TypeMirror::Declared {
                name: name.to_string(),
                args: args.iter().map(|arg| TypeMirror::declared(*arg)).collect(),
            });
        }
        decl.interfaces = stub
            .interfaces
            .iter()
            .map(|interface| TypeMirror::declared(*interface))
            .collect();
        decl
    })
}

pub(crate) fn is_platform_type(name: &str) -> bool {
    PLATFORM_TYPES.iter().any(|stub| stub.name == name)
}
