//! Binding a parsed tree back onto a reflected target.
//!
//! The [`Deserializer`] walks the target's shape and the tree side by side.
//! Record fields are matched to object members **by position**, not by
//! name: the n-th declared field takes the n-th member in the order the
//! members appeared in the text. Consequences:
//!
//! - members written in a different order than the fields are declared in
//!   land in the wrong fields, without error
//! - missing trailing members leave fields at their current value
//! - extra members past the field count are ignored
//!
//! One exception keeps partial objects usable: when every member key is a
//! declared field name and the keys appear in declaration order, each
//! member binds to the field it names and skipped fields are left alone.
//!
//! ```rust
//! use record_json::{from_str, record};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Abc { a: u32, b: u32, c: u32 }
//! record!(Abc { a, b, c });
//!
//! let sparse: Abc = from_str(r#"{"a": 4, "c": 2}"#).unwrap();
//! assert_eq!(sparse, Abc { a: 4, b: 0, c: 2 });
//!
//! let swapped: Abc = from_str(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
//! assert_eq!(swapped, Abc { a: 1, b: 2, c: 3 });
//! ```
//!
//! Sequences: a `Vec` is resized to the parsed length. A fixed-size array
//! binds the overlapping prefix; extra parsed elements are ignored and
//! unmatched trailing elements keep their value.

use crate::reflect::{Category, Reflect, ViewMut};
use crate::{Error, JsonMap, Result, Value};

const ROOT_KEY: &str = "value";

/// Binds one parsed tree onto targets.
pub struct Deserializer {
    root: Value,
}

impl Deserializer {
    /// Wraps `tree` under a single synthetic key, so that record, sequence
    /// and primitive targets all start from the same position.
    pub fn new(tree: Value) -> Self {
        let mut root = Value::Empty;
        root[ROOT_KEY] = tree;
        Deserializer { root }
    }

    /// Binds the wrapped tree onto `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] when a present node has the wrong form
    /// for its target, and the errors of [`Value::get`] for leaves.
    pub fn deserialize_into(&self, target: &mut dyn Reflect) -> Result<()> {
        bind(0, &self.root, target, false)
    }
}

fn bind(position: usize, node: &Value, target: &mut dyn Reflect, is_leaf: bool) -> Result<()> {
    // non-record fields are addressed positionally inside their parent object
    if !is_leaf && target.category() != Category::Record {
        return match node.get_at(position) {
            Some(child) => bind(0, child, target, true),
            None => Ok(()),
        };
    }

    match target.view_mut() {
        ViewMut::Leaf(leaf) => {
            if matches!(node, Value::Empty) {
                return Ok(());
            }
            leaf.assign(node)
        }
        ViewMut::Sequence(sequence) => {
            let items = match node {
                Value::Array(items) => items,
                Value::Empty => return Ok(()),
                other => return Err(Error::type_mismatch("array", other.kind())),
            };
            sequence.resize(items.len());
            for (element, item) in sequence.elements_mut().into_iter().zip(items) {
                bind(0, item, element, true)?;
            }
            Ok(())
        }
        ViewMut::Record { names, fields } => {
            let object = if is_leaf {
                node
            } else {
                match node.get_at(position) {
                    Some(child) => child,
                    None => return Ok(()),
                }
            };
            let members = match object {
                Value::Object(members) => members,
                Value::Empty => return Ok(()),
                other => return Err(Error::type_mismatch("object", other.kind())),
            };

            tracing::trace!(fields = names.len(), members = members.len(), "binding record");
            for (field, slot) in fields.into_iter().zip(member_slots(names, members)) {
                if let Some(index) = slot {
                    bind(index, object, field, false)?;
                }
            }
            Ok(())
        }
    }
}

/// Maps each declared field to the member position it binds to.
///
/// Positional unless the member keys are declared names in declaration
/// order, in which case each member goes to the field it names.
fn member_slots(names: &[&str], members: &JsonMap) -> Vec<Option<usize>> {
    let mut slots = vec![None; names.len()];

    let mut cursor = 0;
    let mut aligned = true;
    for (index, key) in members.keys().enumerate() {
        match names[cursor.min(names.len())..]
            .iter()
            .position(|name| *name == key.as_str())
        {
            Some(offset) => {
                slots[cursor + offset] = Some(index);
                cursor += offset + 1;
            }
            None => {
                aligned = false;
                break;
            }
        }
    }

    if !aligned {
        for (index, slot) in slots.iter_mut().enumerate() {
            *slot = (index < members.len()).then_some(index);
        }
    }
    slots
}
