//! Structural reflection for records and the values inside them.
//!
//! Two traits split the work:
//!
//! - [`Record`] is the field-list contract. A record type reports its
//!   field names in declaration order and hands out references to all of
//!   its fields at once, in the same order. Implement it with the
//!   [`record!`](crate::record) macro.
//! - [`Reflect`] is implemented by every value the codec can walk. Its
//!   [`Category`] is fixed per type, and [`Reflect::view`] /
//!   [`Reflect::view_mut`] expose the value as a closed set of shapes the
//!   serializer and deserializer branch on.
//!
//! ```rust
//! use record_json::{record, Record};
//!
//! #[derive(Default)]
//! struct Vector { x: f64, y: f64, z: f64 }
//! record!(Vector { x, y, z });
//!
//! assert_eq!(Vector::field_count(), 3);
//! assert_eq!(Vector::field_names(), &["x", "y", "z"]);
//! ```

use crate::{FromValue, Result, Value};

/// Value-shape category of a reflected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// bool, integers, floats and integer-backed enums
    Primitive,
    /// string-like values
    Text,
    /// ordered homogeneous collections
    Sequence,
    /// types with named fields
    Record,
}

/// Read-only view of a reflected value.
pub enum View<'a> {
    Primitive(Value),
    Text(&'a str),
    Sequence(Vec<&'a dyn Reflect>),
    Record {
        names: &'static [&'static str],
        fields: Vec<&'a dyn Reflect>,
    },
}

/// Mutable view of a reflected value.
pub enum ViewMut<'a> {
    /// primitive or text target, assigned from a single node
    Leaf(&'a mut dyn Leaf),
    Sequence(&'a mut dyn SequenceMut),
    Record {
        names: &'static [&'static str],
        fields: Vec<&'a mut dyn Reflect>,
    },
}

/// A value the codec can serialize and bind.
pub trait Reflect {
    fn category(&self) -> Category;
    fn view(&self) -> View<'_>;
    fn view_mut(&mut self) -> ViewMut<'_>;
}

/// Field-list contract for record types.
///
/// `field_names` and the references handed to the visitors must list the
/// fields in the same order on every call.
pub trait Record {
    fn field_names() -> &'static [&'static str];

    fn field_count() -> usize {
        Self::field_names().len()
    }

    /// Calls `visit` once with references to every field, in declaration order.
    fn visit_fields<'a, R, F>(&'a self, visit: F) -> R
    where
        F: FnOnce(Vec<&'a dyn Reflect>) -> R;

    /// Calls `visit` once with mutable references to every field, in declaration order.
    fn visit_fields_mut<'a, R, F>(&'a mut self, visit: F) -> R
    where
        F: FnOnce(Vec<&'a mut dyn Reflect>) -> R;
}

/// A primitive or text target assigned from one tree node.
pub trait Leaf {
    fn assign(&mut self, node: &Value) -> Result<()>;
}

impl<T: FromValue> Leaf for T {
    fn assign(&mut self, node: &Value) -> Result<()> {
        *self = node.get()?;
        Ok(())
    }
}

/// A sequence target.
pub trait SequenceMut {
    /// Grows or shrinks to `len` elements. Fixed-size sequences ignore it.
    fn resize(&mut self, len: usize);
    fn elements_mut(&mut self) -> Vec<&mut dyn Reflect>;
}

/// Builds the [`View`] of a record; used by [`record!`](crate::record).
pub fn record_view<R: Record>(record: &R) -> View<'_> {
    record.visit_fields(|fields| View::Record {
        names: R::field_names(),
        fields,
    })
}

/// Builds the [`ViewMut`] of a record; used by [`record!`](crate::record).
pub fn record_view_mut<R: Record>(record: &mut R) -> ViewMut<'_> {
    record.visit_fields_mut(|fields| ViewMut::Record {
        names: R::field_names(),
        fields,
    })
}

macro_rules! impl_reflect_primitive {
    ($($ty:ty),*) => {
        $(
            impl Reflect for $ty {
                fn category(&self) -> Category {
                    Category::Primitive
                }

                fn view(&self) -> View<'_> {
                    View::Primitive(Value::from(*self))
                }

                fn view_mut(&mut self) -> ViewMut<'_> {
                    ViewMut::Leaf(self)
                }
            }
        )*
    };
}

impl_reflect_primitive!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Reflect for String {
    fn category(&self) -> Category {
        Category::Text
    }

    fn view(&self) -> View<'_> {
        View::Text(self)
    }

    fn view_mut(&mut self) -> ViewMut<'_> {
        ViewMut::Leaf(self)
    }
}

impl<T: Reflect + Default> Reflect for Vec<T> {
    fn category(&self) -> Category {
        Category::Sequence
    }

    fn view(&self) -> View<'_> {
        View::Sequence(self.iter().map(|e| e as &dyn Reflect).collect())
    }

    fn view_mut(&mut self) -> ViewMut<'_> {
        ViewMut::Sequence(self)
    }
}

impl<T: Reflect + Default> SequenceMut for Vec<T> {
    fn resize(&mut self, len: usize) {
        self.resize_with(len, T::default);
    }

    fn elements_mut(&mut self) -> Vec<&mut dyn Reflect> {
        self.iter_mut().map(|e| e as &mut dyn Reflect).collect()
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn category(&self) -> Category {
        Category::Sequence
    }

    fn view(&self) -> View<'_> {
        View::Sequence(self.iter().map(|e| e as &dyn Reflect).collect())
    }

    fn view_mut(&mut self) -> ViewMut<'_> {
        ViewMut::Sequence(self)
    }
}

impl<T: Reflect, const N: usize> SequenceMut for [T; N] {
    fn resize(&mut self, _len: usize) {}

    fn elements_mut(&mut self) -> Vec<&mut dyn Reflect> {
        self.iter_mut().map(|e| e as &mut dyn Reflect).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record, Number};

    #[derive(Default, Debug, PartialEq)]
    struct Pair {
        left: i32,
        right: String,
    }

    record!(Pair { left, right });

    #[test]
    fn test_field_list() {
        assert_eq!(Pair::field_count(), 2);
        assert_eq!(Pair::field_names(), &["left", "right"]);
    }

    #[test]
    fn test_visit_fields_in_declaration_order() {
        let pair = Pair {
            left: -4,
            right: "r".to_string(),
        };
        let categories = pair.visit_fields(|fields| {
            fields.iter().map(|f| f.category()).collect::<Vec<_>>()
        });
        assert_eq!(categories, vec![Category::Primitive, Category::Text]);
    }

    #[test]
    fn test_visit_fields_mut_assigns() {
        let mut pair = Pair::default();
        pair.visit_fields_mut(|fields| {
            let mut fields = fields.into_iter();
            if let Some(first) = fields.next() {
                if let ViewMut::Leaf(leaf) = first.view_mut() {
                    leaf.assign(&Value::from(9)).unwrap();
                }
            }
        });
        assert_eq!(pair.left, 9);
    }

    #[test]
    fn test_categories() {
        assert_eq!(1.5f32.category(), Category::Primitive);
        assert_eq!(true.category(), Category::Primitive);
        assert_eq!(String::new().category(), Category::Text);
        assert_eq!(vec![1u8].category(), Category::Sequence);
        assert_eq!([0i64; 4].category(), Category::Sequence);
        assert_eq!(Pair::default().category(), Category::Record);
    }

    #[test]
    fn test_primitive_view() {
        match (-3i16).view() {
            View::Primitive(value) => assert_eq!(value, Value::Number(Number::Signed(-3))),
            _ => panic!("Expected primitive"),
        }
    }

    #[test]
    fn test_vec_resizes_array_does_not() {
        let mut items: Vec<u8> = vec![1, 2, 3];
        SequenceMut::resize(&mut items, 1);
        assert_eq!(items, vec![1]);
        SequenceMut::resize(&mut items, 3);
        assert_eq!(items, vec![1, 0, 0]);

        let mut fixed = [7u8; 3];
        SequenceMut::resize(&mut fixed, 5);
        assert_eq!(fixed.elements_mut().len(), 3);
    }
}
