/// Registers a struct as a record by listing its fields in declaration order.
///
/// The listed order is the order fields are written in and the order they
/// are bound back from an object's members.
///
/// ```rust
/// use record_json::{record, to_string};
///
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
/// record!(Point { x, y });
///
/// assert_eq!(to_string(&Point { x: 1, y: -2 }).unwrap(), "{\n\t\"x\": 1,\n\t\"y\": -2,\n}");
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn field_names() -> &'static [&'static str] {
                &[$(stringify!($field)),*]
            }

            fn visit_fields<'a, R, F>(&'a self, visit: F) -> R
            where
                F: FnOnce(::std::vec::Vec<&'a dyn $crate::Reflect>) -> R,
            {
                visit(::std::vec![$(&self.$field as &dyn $crate::Reflect),*])
            }

            fn visit_fields_mut<'a, R, F>(&'a mut self, visit: F) -> R
            where
                F: FnOnce(::std::vec::Vec<&'a mut dyn $crate::Reflect>) -> R,
            {
                visit(::std::vec![$(&mut self.$field as &mut dyn $crate::Reflect),*])
            }
        }

        impl $crate::Reflect for $ty {
            fn category(&self) -> $crate::Category {
                $crate::Category::Record
            }

            fn view(&self) -> $crate::View<'_> {
                $crate::reflect::record_view(self)
            }

            fn view_mut(&mut self) -> $crate::ViewMut<'_> {
                $crate::reflect::record_view_mut(self)
            }
        }
    };
}

/// Registers a fieldless enum as a primitive written as its integer
/// discriminant.
///
/// The enum must be `Copy`; every variant that should decode must be listed.
///
/// ```rust
/// use record_json::{json_enum, Value};
///
/// #[derive(Clone, Copy, Debug, Default, PartialEq)]
/// #[repr(i32)]
/// enum Mode { #[default] Off = 0, On = 1, Reverse = -1 }
/// json_enum!(Mode as i32 { Off, On, Reverse });
///
/// assert_eq!(Value::from(-1).get::<Mode>().unwrap(), Mode::Reverse);
/// ```
#[macro_export]
macro_rules! json_enum {
    ($ty:ident as $repr:ty { $($variant:ident),* $(,)? }) => {
        impl $crate::FromValue for $ty {
            fn from_value(value: &$crate::Value) -> $crate::Result<Self> {
                let raw: $repr = value.get()?;
                $(
                    if raw == $ty::$variant as $repr {
                        return Ok($ty::$variant);
                    }
                )*
                Err($crate::Error::unknown_variant(stringify!($ty), raw))
            }
        }

        impl $crate::Reflect for $ty {
            fn category(&self) -> $crate::Category {
                $crate::Category::Primitive
            }

            fn view(&self) -> $crate::View<'_> {
                $crate::View::Primitive($crate::Value::from(*self as $repr))
            }

            fn view_mut(&mut self) -> $crate::ViewMut<'_> {
                $crate::ViewMut::Leaf(self)
            }
        }
    };
}

/// Builds a [`Value`](crate::Value) tree from JSON-like syntax.
///
/// Object members keep the order they are written in.
#[macro_export]
macro_rules! json {
    // Handle empty array
    ([]) => {
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::json!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::JsonMap::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::JsonMap::new();
        $(
            object.insert($key.to_string(), $crate::json!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Scalars and anything else convertible
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
