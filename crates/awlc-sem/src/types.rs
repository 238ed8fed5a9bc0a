//! The primitive type table.

use awlc_util::{define_idx, IndexVec};

define_idx!(pub struct TypeId);

/// A primitive type: `(name, byte_size, signed?)`.
///
/// There is no type *kind* beyond "primitive" — the language has no
/// structs, pointers, or arrays, so the field the original carried for
/// that distinction is not reproduced here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Type {
    pub name: &'static str,
    pub byte_size: u32,
    pub signed: bool,
}

/// The ten primitives the analyser pre-populates `types[]` with, in the
/// order their `TypeId`s are handed out.
const PRIMITIVES: &[(&str, u32, bool)] = &[
    ("u0", 0, false),
    ("u8", 1, false),
    ("u16", 2, false),
    ("u32", 4, false),
    ("u64", 8, false),
    ("s8", 1, true),
    ("s16", 2, true),
    ("s32", 4, true),
    ("s64", 8, true),
    ("bool", 1, false),
];

/// Builds the pre-populated primitive type table and returns the `TypeId`
/// of `u0`, which the analyser uses as the default return type.
pub fn build_primitives() -> (IndexVec<TypeId, Type>, TypeId) {
    let mut types = IndexVec::new();
    let mut u0 = None;
    for (name, byte_size, signed) in PRIMITIVES {
        let id = types.push(Type { name, byte_size: *byte_size, signed: *signed });
        if *name == "u0" {
            u0 = Some(id);
        }
    }
    (types, u0.expect("u0 is always in PRIMITIVES"))
}

/// Linear search for a primitive by name, mirroring the original's
/// `find_type_name` — the table has ten entries, so there is no benefit to
/// a hash map.
pub fn find_type_name(types: &IndexVec<TypeId, Type>, name: &str) -> Option<TypeId> {
    types.iter_enumerated().find(|(_, t)| t.name == name).map(|(id, _)| id)
}
