// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Value <-> tagged document conversion.
//!
//! Dispatch, applied recursively:
//! 1. Records become `{TypeName: {field: ..., ...}}` with every declared field
//!    in declaration order.
//! 2. Arrays become `{"array": {"shape": [...], "elements": [...]}}`, elements
//!    flattened in row-major order.
//! 3. Sequences become JSON arrays, order kept.
//! 4. Leaves pass through.

use ndarray::{ArrayD, IxDyn};
use serde_json::{Map, Number};
use wire_schema::{Anode, Entity, EntityKind, Face, Plane, Point, Record, Store, Wire};

use crate::{violation, CodecError, Value};

/// Self-describing document tree (JSON, keys kept in insertion order).
pub type Document = serde_json::Value;

/// Tag marking a numeric array mapping.
pub const ARRAY_TAG: &str = "array";

type Result<T> = std::result::Result<T, CodecError>;

// ============================================================================
// Encoding
// ============================================================================

/// Encodes `value` as a tagged document.
///
/// Non-finite floats have no JSON form and are written as `null`.
pub fn serialize(value: &Value) -> Document {
    match value {
        Value::Null => Document::Null,
        Value::Bool(b) => Document::Bool(*b),
        Value::Int(i) => Document::from(*i),
        Value::Float(f) => float_doc(*f),
        Value::Text(s) => Document::String(s.clone()),
        Value::Seq(items) => Document::Array(items.iter().map(serialize).collect()),
        Value::Array(array) => array_doc(array),
        Value::Entity(entity) => serialize_entity(entity),
    }
}

/// Encodes one record as `{TypeName: {...}}`.
pub fn serialize_entity(entity: &Entity) -> Document {
    match entity {
        Entity::Point(p) => point_doc(p),
        Entity::Wire(w) => wire_doc(w),
        Entity::Plane(p) => plane_doc(p),
        Entity::Face(f) => face_doc(f),
        Entity::Anode(a) => anode_doc(a),
        Entity::Store(s) => serialize_store(s),
    }
}

/// Encodes a store without first wrapping it in a [`Value`].
pub fn serialize_store(store: &Store) -> Document {
    tagged(
        EntityKind::Store,
        [
            seq_doc(store.anodes(), anode_doc),
            seq_doc(store.faces(), face_doc),
            seq_doc(store.planes(), plane_doc),
            seq_doc(store.wires(), wire_doc),
            seq_doc(store.points(), point_doc),
        ],
    )
}

fn tagged<const F: usize>(kind: EntityKind, values: [Document; F]) -> Document {
    let body: Map<String, Document> = kind
        .fields()
        .iter()
        .zip(values)
        .map(|(name, value)| ((*name).to_owned(), value))
        .collect();
    let mut outer = Map::with_capacity(1);
    outer.insert(kind.name().to_owned(), Document::Object(body));
    Document::Object(outer)
}

fn float_doc(f: f64) -> Document {
    Number::from_f64(f).map_or(Document::Null, Document::Number)
}

fn indices_doc(indices: &[usize]) -> Document {
    Document::Array(indices.iter().map(|&i| Document::from(i)).collect())
}

fn seq_doc<T>(items: &[T], encode: fn(&T) -> Document) -> Document {
    Document::Array(items.iter().map(encode).collect())
}

fn point_doc(p: &Point) -> Document {
    tagged(EntityKind::Point, [float_doc(p.x), float_doc(p.y), float_doc(p.z)])
}

fn wire_doc(w: &Wire) -> Document {
    tagged(
        EntityKind::Wire,
        [
            Document::from(w.ident),
            Document::from(w.channel),
            Document::from(w.segment),
            Document::from(w.tail),
            Document::from(w.head),
        ],
    )
}

fn plane_doc(p: &Plane) -> Document {
    tagged(EntityKind::Plane, [Document::from(p.ident), indices_doc(&p.wires)])
}

fn face_doc(f: &Face) -> Document {
    tagged(EntityKind::Face, [Document::from(f.ident), indices_doc(&f.planes)])
}

fn anode_doc(a: &Anode) -> Document {
    tagged(EntityKind::Anode, [Document::from(a.ident), indices_doc(&a.faces)])
}

fn array_doc(array: &ArrayD<f64>) -> Document {
    let shape: Vec<Document> = array.shape().iter().map(|&d| Document::from(d)).collect();
    let elements: Vec<Document> = array.iter().map(|&x| float_doc(x)).collect();
    let mut body = Map::with_capacity(2);
    body.insert("shape".to_owned(), Document::Array(shape));
    body.insert("elements".to_owned(), Document::Array(elements));
    let mut outer = Map::with_capacity(1);
    outer.insert(ARRAY_TAG.to_owned(), Document::Object(body));
    Document::Object(outer)
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes a tagged document; the inverse of [`serialize`].
///
/// Fails with [`CodecError::SchemaViolation`] on any mapping that is not a
/// single registered type tag or an `array` tag, and on records with
/// missing, extra, or mistyped fields.
pub fn deserialize(doc: &Document) -> Result<Value> {
    match doc {
        Document::Null => Ok(Value::Null),
        Document::Bool(b) => Ok(Value::Bool(*b)),
        Document::Number(n) => number_value(n),
        Document::String(s) => Ok(Value::Text(s.clone())),
        Document::Array(items) => items
            .iter()
            .map(deserialize)
            .collect::<Result<Vec<_>>>()
            .map(Value::Seq),
        Document::Object(map) => deserialize_mapping(map),
    }
}

fn number_value(n: &Number) -> Result<Value> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::Int(i));
    }
    n.as_f64()
        .map(Value::Float)
        .ok_or_else(|| violation(format!("unrepresentable number {n}")))
}

fn deserialize_mapping(map: &Map<String, Document>) -> Result<Value> {
    let mut entries = map.iter();
    let (tag, body) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => {
            return Err(violation(format!(
                "expected a single-key tagged mapping, found {} keys",
                map.len()
            )))
        }
    };
    if let Some(kind) = EntityKind::from_name(tag) {
        return deserialize_entity(kind, body).map(Value::Entity);
    }
    if tag == ARRAY_TAG {
        return deserialize_array(body).map(Value::Array);
    }
    Err(violation(format!("`{tag}` is not a registered type")))
}

fn deserialize_entity(kind: EntityKind, body: &Document) -> Result<Entity> {
    let Document::Object(raw) = body else {
        return Err(violation(format!("{kind} body must be a mapping")));
    };
    let fields = Fields::bind(kind, raw)?;
    let entity = match kind {
        EntityKind::Point => Point::new(fields.float("x")?, fields.float("y")?, fields.float("z")?).into(),
        EntityKind::Wire => Wire::new(
            fields.int("ident")?,
            fields.int("channel")?,
            fields.int("segment")?,
            fields.index("tail")?,
            fields.index("head")?,
        )
        .into(),
        EntityKind::Plane => Plane::new(fields.int("ident")?, fields.indices("wires")?).into(),
        EntityKind::Face => Face::new(fields.int("ident")?, fields.indices("planes")?).into(),
        EntityKind::Anode => Anode::new(fields.int("ident")?, fields.indices("faces")?).into(),
        EntityKind::Store => Store::new(
            fields.records("anodes")?,
            fields.records("faces")?,
            fields.records("planes")?,
            fields.records("wires")?,
            fields.records("points")?,
        )?
        .into(),
    };
    Ok(entity)
}

/// Validating by-name binder: exactly the declared fields, no more, no less.
struct Fields<'a> {
    kind: EntityKind,
    raw: &'a Map<String, Document>,
}

impl<'a> Fields<'a> {
    fn bind(kind: EntityKind, raw: &'a Map<String, Document>) -> Result<Self> {
        let declared = kind.fields();
        if let Some(extra) = raw.keys().find(|k| !declared.contains(&k.as_str())) {
            return Err(violation(format!("{kind} has no field `{extra}`")));
        }
        if let Some(missing) = declared.iter().find(|f| !raw.contains_key(**f)) {
            return Err(violation(format!("{kind} is missing field `{missing}`")));
        }
        Ok(Self { kind, raw })
    }

    fn value(&self, name: &str) -> Result<Value> {
        let raw = self
            .raw
            .get(name)
            .ok_or_else(|| violation(format!("{} is missing field `{name}`", self.kind)))?;
        deserialize(raw)
    }

    fn mistyped(&self, name: &str, expected: &str, found: &Value) -> CodecError {
        violation(format!(
            "{}.{name} must be {expected}, found {found:?}",
            self.kind
        ))
    }

    #[allow(clippy::cast_precision_loss)]
    fn float(&self, name: &str) -> Result<f64> {
        match self.value(name)? {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(self.mistyped(name, "a number", &other)),
        }
    }

    fn int(&self, name: &str) -> Result<i64> {
        match self.value(name)? {
            Value::Int(i) => Ok(i),
            other => Err(self.mistyped(name, "an integer", &other)),
        }
    }

    fn to_index(&self, name: &str, value: Value) -> Result<usize> {
        match value {
            Value::Int(i) => usize::try_from(i).map_err(|_| self.mistyped(name, "an index", &value)),
            other => Err(self.mistyped(name, "an index", &other)),
        }
    }

    fn index(&self, name: &str) -> Result<usize> {
        let value = self.value(name)?;
        self.to_index(name, value)
    }

    fn indices(&self, name: &str) -> Result<Vec<usize>> {
        match self.value(name)? {
            Value::Seq(items) => items.into_iter().map(|v| self.to_index(name, v)).collect(),
            other => Err(self.mistyped(name, "a list of indices", &other)),
        }
    }

    fn records<R: Record>(&self, name: &str) -> Result<Vec<R>> {
        match self.value(name)? {
            Value::Seq(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Entity(entity) => R::from_entity(entity).map_err(|other| {
                        violation(format!(
                            "{}.{name} holds {} records, found {}",
                            self.kind,
                            R::KIND,
                            other.kind()
                        ))
                    }),
                    other => Err(self.mistyped(name, "a list of records", &other)),
                })
                .collect(),
            other => Err(self.mistyped(name, "a list of records", &other)),
        }
    }
}

fn deserialize_array(body: &Document) -> Result<ArrayD<f64>> {
    let Document::Object(raw) = body else {
        return Err(violation("array body must be a mapping"));
    };
    if let Some(extra) = raw.keys().find(|k| *k != "shape" && *k != "elements") {
        return Err(violation(format!("array has no field `{extra}`")));
    }
    let shape = raw
        .get("shape")
        .and_then(Document::as_array)
        .ok_or_else(|| violation("array is missing a `shape` list"))?
        .iter()
        .map(|d| {
            d.as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| violation(format!("invalid array extent {d}")))
        })
        .collect::<Result<Vec<usize>>>()?;
    let elements = raw
        .get("elements")
        .and_then(Document::as_array)
        .ok_or_else(|| violation("array is missing an `elements` list"))?
        .iter()
        .map(|d| {
            d.as_f64()
                .ok_or_else(|| violation(format!("invalid array element {d}")))
        })
        .collect::<Result<Vec<f64>>>()?;
    ArrayD::from_shape_vec(IxDyn(&shape), elements)
        .map_err(|e| violation(format!("array elements do not fit shape {shape:?}: {e}")))
}

// ============================================================================
// Typed helpers
// ============================================================================

/// Wraps a typed record as a [`Value`].
pub fn to_value<R: Record>(record: R) -> Value {
    Value::record(record)
}

/// Unwraps a [`Value`] holding a record of type `R`.
pub fn from_value<R: Record>(value: Value) -> Result<R> {
    match value {
        Value::Entity(entity) => R::from_entity(entity)
            .map_err(|other| violation(format!("expected {}, found {}", R::KIND, other.kind()))),
        other => Err(violation(format!("expected {}, found {other:?}", R::KIND))),
    }
}
