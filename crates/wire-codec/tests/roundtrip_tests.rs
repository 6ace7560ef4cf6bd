// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::float_cmp)]
//! Serializer round trips and on-disk persistence.

use ndarray::{ArrayD, IxDyn};
use proptest::prelude::*;
use wire_codec::{
    deserialize, dump, dump_store, dump_store_with, dump_with, dumps, load, load_store, loads,
    serialize, to_value, CodecConfig, CodecError, Value,
};
use wire_schema::{Anode, Face, Plane, Point, Store, StoreBuilder, Wire};

fn sample_store() -> Store {
    let mut b = StoreBuilder::new();
    let p0 = b.add_point(Point::new(0.0, 0.0, 0.0));
    let p1 = b.add_point(Point::new(0.0, 100.0, 3.5));
    let p2 = b.add_point(Point::new(0.0, -20.25, 7.0));
    let w0 = b.add_wire(Wire::new(3, 12, 0, p0, p1));
    let w1 = b.add_wire(Wire::new(4, 13, 0, p2, p1));
    let u = b.add_plane(Plane::new(0, vec![w0, w1]));
    let v = b.add_plane(Plane::new(1, vec![w1]));
    let f = b.add_face(Face::new(0, vec![u, v]));
    b.add_anode(Anode::new(0, vec![f]));
    b.build().unwrap()
}

fn finite() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6
}

fn arb_point() -> impl Strategy<Value = Point> {
    (finite(), finite(), finite()).prop_map(|(x, y, z)| Point::new(x, y, z))
}

fn arb_wire() -> impl Strategy<Value = Wire> {
    (any::<i64>(), any::<i64>(), 0_i64..4, 0_usize..1000, 0_usize..1000)
        .prop_map(|(i, c, s, t, h)| Wire::new(i, c, s, t, h))
}

fn arb_array() -> impl Strategy<Value = ArrayD<f64>> {
    prop::collection::vec(1_usize..4, 0..4).prop_flat_map(|shape| {
        let len = shape.iter().product::<usize>();
        prop::collection::vec(finite(), len).prop_map(move |elements| {
            ArrayD::from_shape_vec(IxDyn(&shape), elements).unwrap()
        })
    })
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        finite().prop_map(Value::Float),
        "[a-z ]{0,12}".prop_map(Value::Text),
        arb_point().prop_map(to_value),
        arb_wire().prop_map(to_value),
        (any::<i64>(), prop::collection::vec(0_usize..50, 0..6))
            .prop_map(|(i, w)| to_value(Plane::new(i, w))),
        arb_array().prop_map(Value::Array),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Value::Seq)
    })
}

proptest! {
    #[test]
    fn serialize_then_deserialize_is_identity(value in arb_value()) {
        prop_assert_eq!(deserialize(&serialize(&value)).unwrap(), value);
    }

    #[test]
    fn text_round_trip_is_identity(value in arb_value()) {
        let text = dumps(&value, &CodecConfig::default()).unwrap();
        prop_assert_eq!(loads(&text).unwrap(), value);
    }
}

#[test]
fn store_document_keeps_field_order() {
    let text = dumps(
        &to_value(sample_store()),
        &CodecConfig {
            indent: None,
            ..CodecConfig::default()
        },
    )
    .unwrap();
    assert!(text.starts_with(r#"{"Store":{"anodes":[{"Anode":{"ident":0,"faces":[0]}}],"faces""#));
    assert!(text.contains(r#"{"Wire":{"ident":3,"channel":12,"segment":0,"tail":0,"head":1}}"#));
    let order = ["\"anodes\"", "\"faces\"", "\"planes\"", "\"wires\"", "\"points\""];
    let positions: Vec<usize> = order.iter().map(|k| text.find(k).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn store_persists_under_every_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let store = sample_store();
    for name in ["geom.json", "geom.json.bz2", "geom.json.gz"] {
        let path = dir.path().join(name);
        dump_store(&path, &store).unwrap();
        assert_eq!(load_store(&path).unwrap(), store, "{name}");
    }
}

#[test]
fn compressed_files_are_not_plain_json() {
    let dir = tempfile::tempdir().unwrap();
    let value = to_value(sample_store());
    let plain = dir.path().join("a.json");
    let gz = dir.path().join("a.json.gz");
    let bz = dir.path().join("a.json.bz2");
    dump(&plain, &value).unwrap();
    dump(&gz, &value).unwrap();
    dump(&bz, &value).unwrap();
    assert_eq!(std::fs::read(&plain).unwrap().first(), Some(&b'{'));
    assert_eq!(&std::fs::read(&gz).unwrap()[..2], &[0x1f, 0x8b]);
    assert_eq!(&std::fs::read(&bz).unwrap()[..3], b"BZh");
}

#[test]
fn generic_values_persist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.json.gz");
    let value = Value::Seq(vec![
        Value::from("label"),
        Value::from(2.5),
        to_value(Point::new(1.0, 2.0, 3.0)),
        Value::Array(ndarray::arr2(&[[1.0, 2.0], [3.0, 4.0]]).into_dyn()),
    ]);
    let compact = CodecConfig {
        indent: None,
        gzip_level: 1,
        ..CodecConfig::default()
    };
    dump_with(&path, &value, &compact).unwrap();
    assert_eq!(load(&path).unwrap(), value);
}

#[test]
fn dump_overwrites_existing_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v.json");
    dump(&path, &Value::Int(1)).unwrap();
    dump(&path, &Value::Int(2)).unwrap();
    assert_eq!(load(&path).unwrap(), Value::Int(2));
    let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn unsupported_suffix_fails_before_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geom.txt");
    let err = dump(&path, &Value::Null).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedFormat(ref p) if *p == path));
    assert!(!path.exists());

    // Loading an absent file with a bad suffix still reports the suffix.
    let err = load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedFormat(_)));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CodecError::Io(_)));
}

#[test]
fn load_store_rejects_other_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("point.json");
    dump(&path, &to_value(Point::new(0.0, 0.0, 0.0))).unwrap();
    let err = load_store(&path).unwrap_err();
    assert!(matches!(err, CodecError::SchemaViolation(_)));
}

#[test]
fn malformed_text_is_json_error() {
    assert!(matches!(loads("{\"Point\":").unwrap_err(), CodecError::Json(_)));
    assert!(matches!(
        loads(r#"{"Nope": {}}"#).unwrap_err(),
        CodecError::SchemaViolation(_)
    ));
}

#[test]
fn store_dump_honours_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compact.json");
    let store = sample_store();
    let compact = CodecConfig {
        indent: None,
        ..CodecConfig::default()
    };
    dump_store_with(&path, &store, &compact).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains('\n'));
    assert!(text.starts_with(r#"{"Store":{"anodes":"#));
    assert_eq!(load_store(&path).unwrap(), store);
}

#[cfg(unix)]
#[test]
fn new_files_follow_umask_like_plain_writes() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("plain.txt");
    std::fs::write(&plain, b"x").unwrap();
    let expected = std::fs::metadata(&plain).unwrap().permissions().mode() & 0o777;

    for name in ["g.json", "g.json.gz", "g.json.bz2"] {
        let path = dir.path().join(name);
        dump(&path, &Value::Int(1)).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, expected, "{name}");
    }
}

#[cfg(unix)]
#[test]
fn overwrite_keeps_existing_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geom.json");
    std::fs::write(&path, b"{}").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

    dump_store(&path, &sample_store()).unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o640);
    assert_eq!(load_store(&path).unwrap(), sample_store());
}
