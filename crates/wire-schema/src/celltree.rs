// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reader for "celltree" wire dumps.
//!
//! The dump is line oriented. Lines starting with `#` are comments; every
//! other non-blank line holds nine whitespace-separated columns:
//!
//! ```text
//! # channel plane wip tail_x tail_y tail_z head_x head_y head_z
//! 0 0 0 -6.34915e-14 117.153 0.0352608 -6.34287e-14 117.45 0.548658
//! ```
//!
//! `plane` is 0, 1 or 2 (U, V, W) and `wip` is the wire index in its plane.
//! Coordinates are centimeters. The reader assumes a single-sided anode with
//! no wire wrapping.

use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{Anode, Face, Plane, Point, SchemaError, Store, StoreBuilder, Wire};

/// Number of planes (U, V, W) in a celltree dump.
pub const PLANE_COUNT: usize = 3;

const COLUMNS: usize = 9;

/// Packs plane, face, and anode numbers into a wire-plane identifier.
pub const fn wire_plane_id(plane: i64, face: i64, anode: i64) -> i64 {
    (plane & 0x7) | (face << 3) | (anode << 4)
}

/// Knobs for interpreting a celltree dump.
///
/// The default `unit_scale` of 10 converts the dump's centimeters to
/// millimeters, so the resulting [`Store`] is already in millimeters. Set
/// it to 1 to keep raw dump units; do not scale the store again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CelltreeOptions {
    /// Raw coordinates with a smaller magnitude are snapped to zero.
    pub snap_epsilon: f64,
    /// Multiplier taking dump units to millimeters.
    pub unit_scale: f64,
    /// Face number and ident used for the single face.
    pub face: i64,
    /// Anode number and ident used for the single anode.
    pub anode: i64,
    /// Segment number assigned to every wire.
    pub segment: i64,
}

impl Default for CelltreeOptions {
    fn default() -> Self {
        Self {
            snap_epsilon: 1e-13,
            unit_scale: 10.0,
            face: 0,
            anode: 0,
            segment: 0,
        }
    }
}

/// One dump line after snapping, scaling, and orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CelltreeRow {
    /// Electronics channel.
    pub channel: i64,
    /// Plane number (0, 1 or 2).
    pub plane: usize,
    /// Wire index in plane as written in the dump.
    pub wip: usize,
    /// Tail end point (mm).
    pub tail: Point,
    /// Head end point (mm); never lower in Y than the tail.
    pub head: Point,
}

/// A parsed dump: the frozen store plus the per-line rows.
#[derive(Clone, Debug, PartialEq)]
pub struct CelltreeGeometry {
    /// Store holding one anode, one face, and three planes.
    pub store: Store,
    /// Rows in file order.
    pub rows: Vec<CelltreeRow>,
}

/// Reads and parses the dump at `path`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_celltree(path: &Path, options: &CelltreeOptions) -> Result<CelltreeGeometry, SchemaError> {
    let text = fs::read_to_string(path)?;
    let geometry = parse_celltree(&text, options)?;
    info!(
        wires = geometry.store.wires().len(),
        "loaded celltree geometry"
    );
    Ok(geometry)
}

/// Parses dump text into a [`CelltreeGeometry`].
///
/// Wires in each plane are ordered by the mean Z of their end points (ties
/// keep file order). Each wire's `ident` is its index in the store.
pub fn parse_celltree(text: &str, options: &CelltreeOptions) -> Result<CelltreeGeometry, SchemaError> {
    let mut builder = StoreBuilder::new();
    let mut rows = Vec::new();
    let mut planes: [Vec<(usize, f64)>; PLANE_COUNT] = Default::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = parse_row(line_no, line, options)?;

        let tail = builder.add_point(row.tail);
        let head = builder.add_point(row.head);
        let ident = i64::try_from(builder.wire_count()).map_err(|_| SchemaError::Parse {
            line: line_no,
            message: "too many wires".into(),
        })?;
        let wire = builder.add_wire(Wire::new(ident, row.channel, options.segment, tail, head));
        let mid_z = row.tail.midpoint(&row.head).z;
        if let Some(plane) = planes.get_mut(row.plane) {
            plane.push((wire, mid_z));
        }
        rows.push(row);
    }

    let mut plane_indices = Vec::with_capacity(PLANE_COUNT);
    for (number, mut wires) in (0_i64..).zip(planes) {
        wires.sort_by(|a, b| a.1.total_cmp(&b.1));
        let ident = wire_plane_id(number, options.face, options.anode);
        let index = builder.add_plane(Plane::new(ident, wires.into_iter().map(|(w, _)| w).collect()));
        plane_indices.push(index);
    }
    let face = builder.add_face(Face::new(options.face, plane_indices));
    builder.add_anode(Anode::new(options.anode, vec![face]));

    let store = builder.build()?;
    debug!(
        points = store.points().len(),
        wires = store.wires().len(),
        "parsed celltree dump"
    );
    Ok(CelltreeGeometry { store, rows })
}

fn parse_row(line_no: usize, line: &str, options: &CelltreeOptions) -> Result<CelltreeRow, SchemaError> {
    let parse_err = |message: String| SchemaError::Parse {
        line: line_no,
        message,
    };

    let cols: Vec<&str> = line.split_whitespace().collect();
    if cols.len() < COLUMNS {
        return Err(parse_err(format!(
            "expected {COLUMNS} columns, got {}",
            cols.len()
        )));
    }

    let int = |i: usize, name: &str| -> Result<i64, SchemaError> {
        cols[i]
            .parse::<i64>()
            .map_err(|_| parse_err(format!("invalid {name}: {}", cols[i])))
    };
    let coord = |i: usize| -> Result<f64, SchemaError> {
        let raw = cols[i]
            .parse::<f64>()
            .map_err(|_| parse_err(format!("invalid coordinate: {}", cols[i])))?;
        let snapped = if raw.abs() < options.snap_epsilon { 0.0 } else { raw };
        Ok(snapped * options.unit_scale)
    };

    let channel = int(0, "channel")?;
    let plane = usize::try_from(int(1, "plane")?)
        .ok()
        .filter(|&p| p < PLANE_COUNT)
        .ok_or_else(|| parse_err(format!("plane must be 0, 1 or 2, got {}", cols[1])))?;
    let wip = usize::try_from(int(2, "wire index")?)
        .map_err(|_| parse_err(format!("invalid wire index: {}", cols[2])))?;

    let mut tail = Point::new(coord(3)?, coord(4)?, coord(5)?);
    let mut head = Point::new(coord(6)?, coord(7)?, coord(8)?);
    if head.y < tail.y {
        std::mem::swap(&mut tail, &mut head);
    }

    Ok(CelltreeRow {
        channel,
        plane,
        wip,
        tail,
        head,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]
    use super::*;

    #[test]
    fn plane_ids_pack_layers() {
        assert_eq!(wire_plane_id(2, 0, 0), 2);
        assert_eq!(wire_plane_id(1, 1, 0), 9);
        assert_eq!(wire_plane_id(0, 1, 3), 56);
        assert_eq!(wire_plane_id(9, 0, 0), 1);
    }

    #[test]
    fn tiny_coordinates_snap_to_zero() {
        let line = "5 1 0 -6.3e-14 1.0 2.0 6.3e-14 3.0 4.0";
        let row = parse_row(1, line, &CelltreeOptions::default()).unwrap();
        assert_eq!(row.tail, Point::new(0.0, 10.0, 20.0));
        assert_eq!(row.head, Point::new(0.0, 30.0, 40.0));
        assert_eq!(row.channel, 5);
        assert_eq!(row.plane, 1);
    }

    #[test]
    fn short_line_reports_its_number() {
        let err = parse_celltree("# header\n\n1 0 0 1 2 3\n", &CelltreeOptions::default())
            .unwrap_err();
        assert!(matches!(err, SchemaError::Parse { line: 3, .. }));
    }

    #[test]
    fn unknown_plane_is_rejected() {
        let err = parse_celltree("1 3 0 0 0 0 0 1 1\n", &CelltreeOptions::default()).unwrap_err();
        assert!(matches!(err, SchemaError::Parse { line: 1, .. }));
    }
}
