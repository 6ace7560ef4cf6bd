// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Closed registry of schema record types.
//!
//! Type tags are resolved by exhaustive matching over [`EntityKind`] and
//! [`Entity`]; there is no runtime type-name reflection.

use core::fmt;

use crate::{Anode, Face, Plane, Point, Store, Wire};

/// The registered record types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// [`Point`]
    Point,
    /// [`Wire`]
    Wire,
    /// [`Plane`]
    Plane,
    /// [`Face`]
    Face,
    /// [`Anode`]
    Anode,
    /// [`Store`]
    Store,
}

impl EntityKind {
    /// Every registered type, leaves first.
    pub const ALL: [Self; 6] = [
        Self::Point,
        Self::Wire,
        Self::Plane,
        Self::Face,
        Self::Anode,
        Self::Store,
    ];

    /// Type name used as the document tag.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::Wire => "Wire",
            Self::Plane => "Plane",
            Self::Face => "Face",
            Self::Anode => "Anode",
            Self::Store => "Store",
        }
    }

    /// Declared field names, in declaration order.
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Point => &["x", "y", "z"],
            Self::Wire => &["ident", "channel", "segment", "tail", "head"],
            Self::Plane => &["ident", "wires"],
            Self::Face => &["ident", "planes"],
            Self::Anode => &["ident", "faces"],
            Self::Store => &["anodes", "faces", "planes", "wires", "points"],
        }
    }

    /// Looks up a registered type by its tag.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const fn same_name(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn names_are_distinct() -> bool {
    let mut i = 0;
    while i < EntityKind::ALL.len() {
        let mut j = i + 1;
        while j < EntityKind::ALL.len() {
            if same_name(EntityKind::ALL[i].name(), EntityKind::ALL[j].name()) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(names_are_distinct(), "entity type names must be distinct");

/// A value of any registered record type.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    /// A point record.
    Point(Point),
    /// A wire record.
    Wire(Wire),
    /// A plane record.
    Plane(Plane),
    /// A face record.
    Face(Face),
    /// An anode record.
    Anode(Anode),
    /// A whole store.
    Store(Store),
}

impl Entity {
    /// Registered type of the wrapped record.
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Point(_) => EntityKind::Point,
            Self::Wire(_) => EntityKind::Wire,
            Self::Plane(_) => EntityKind::Plane,
            Self::Face(_) => EntityKind::Face,
            Self::Anode(_) => EntityKind::Anode,
            Self::Store(_) => EntityKind::Store,
        }
    }
}

/// Implemented by every registered record type.
pub trait Record: Sized + Into<Entity> {
    /// Registered type of `Self`.
    const KIND: EntityKind;

    /// Unwraps an [`Entity`] of this type, handing back any other entity.
    fn from_entity(entity: Entity) -> Result<Self, Entity>;
}

macro_rules! impl_record {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Entity {
                fn from(value: $ty) -> Self {
                    Self::$ty(value)
                }
            }

            impl Record for $ty {
                const KIND: EntityKind = EntityKind::$ty;

                fn from_entity(entity: Entity) -> Result<Self, Entity> {
                    match entity {
                        Entity::$ty(value) => Ok(value),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_record!(Point, Wire, Plane, Face, Anode, Store);
