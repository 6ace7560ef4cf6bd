// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::float_cmp)]
//! Bounding boxes and summaries over parsed geometry.

use proptest::prelude::*;
use wire_geom::{Point3D, Ray3D};
use wire_schema::celltree::{parse_celltree, CelltreeOptions};
use wire_survey::{bounding_box, rows_from_store, summarize, Endpoints, WireRow};

const DUMP: &str = "\
0 0 0 0.0 0.0 0.0 0.0 10.0 0.5
1 0 1 0.0 0.0 1.0 0.0 10.0 1.5
2 0 2 0.0 10.0 2.0 0.0 0.0 2.5
100 1 0 -1.0 0.0 0.0 1.0 10.0 0.0
101 1 1 -1.0 2.0 1.0 1.0 12.0 1.0
200 2 0 0.5 0.0 3.0 0.5 10.0 3.0
";

fn options() -> CelltreeOptions {
    CelltreeOptions {
        unit_scale: 1.0,
        ..CelltreeOptions::default()
    }
}

#[test]
fn celltree_rows_summarize_per_plane() {
    let geom = parse_celltree(DUMP, &options()).unwrap();
    let rows: Vec<WireRow> = geom.rows.iter().map(WireRow::from).collect();
    let summaries = summarize(&rows).unwrap();
    let lines: Vec<String> = summaries.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "plane U: 3 wires [0 - 2], 3 chans [0000 - 0002], minpt=(+0.0, +0.0, +0.0000), maxpt=(+0.0, +10.0, +2.5)",
            "plane V: 2 wires [0 - 1], 2 chans [0100 - 0101], minpt=(-1.0, +0.0, +0.0000), maxpt=(+1.0, +12.0, +1.0)",
            "plane W: 1 wires [0 - 0], 1 chans [0200 - 0200], minpt=(+0.5, +0.0, +3.0000), maxpt=(+0.5, +10.0, +3.0)",
        ]
    );
}

#[test]
fn store_rows_agree_with_dump_bounds() {
    let geom = parse_celltree(DUMP, &options()).unwrap();
    let from_store = rows_from_store(&geom.store);
    let from_dump: Vec<WireRow> = geom.rows.iter().map(WireRow::from).collect();
    assert_eq!(from_store.len(), from_dump.len());
    assert_eq!(
        bounding_box(&from_store).unwrap(),
        bounding_box(&from_dump).unwrap()
    );
    // Store rows follow plane order; wip is the sorted position.
    let u: Vec<i64> = from_store
        .iter()
        .filter(|r| r.plane == 0)
        .map(|r| r.channel)
        .collect();
    assert_eq!(u, vec![0, 1, 2]);
}

fn arb_ray() -> impl Strategy<Value = Ray3D> {
    let coord = -1.0e4..1.0e4_f64;
    (
        coord.clone(),
        coord.clone(),
        coord.clone(),
        coord.clone(),
        coord.clone(),
        coord,
    )
        .prop_map(|(a, b, c, d, e, f)| Ray3D::new(Point3D::new(a, b, c), Point3D::new(d, e, f)))
}

proptest! {
    #[test]
    fn box_contains_every_endpoint(rays in prop::collection::vec(arb_ray(), 1..16)) {
        let bb = bounding_box(&rays).unwrap();
        let (lo, hi) = (Endpoints::tail(&bb), Endpoints::head(&bb));
        for ray in &rays {
            for p in [ray.tail(), ray.head()] {
                for axis in 0..3 {
                    prop_assert!(lo[axis] <= p[axis] && p[axis] <= hi[axis]);
                }
            }
        }
        // Each bound is attained by some endpoint.
        for axis in 0..3 {
            prop_assert!(rays.iter().any(|r| r.tail()[axis] == lo[axis] || r.head()[axis] == lo[axis]));
            prop_assert!(rays.iter().any(|r| r.tail()[axis] == hi[axis] || r.head()[axis] == hi[axis]));
        }
    }
}
