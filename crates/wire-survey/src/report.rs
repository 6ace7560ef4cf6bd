// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;
use wire_geom::{Point3D, Ray3D};
use wire_schema::celltree::CelltreeRow;
use wire_schema::Store;

use crate::{bounding_box, to_point3, Endpoints, SurveyError};

/// A wire as seen by the summary: plane, position in plane, channel, ends.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WireRow {
    /// Plane number.
    pub plane: usize,
    /// Wire index in plane.
    pub wip: usize,
    /// Electronics channel.
    pub channel: i64,
    /// Tail end point.
    pub tail: Point3D,
    /// Head end point.
    pub head: Point3D,
}

impl Endpoints for WireRow {
    fn tail(&self) -> Point3D {
        self.tail
    }

    fn head(&self) -> Point3D {
        self.head
    }
}

impl From<&CelltreeRow> for WireRow {
    fn from(row: &CelltreeRow) -> Self {
        Self {
            plane: row.plane,
            wip: row.wip,
            channel: row.channel,
            tail: to_point3(row.tail),
            head: to_point3(row.head),
        }
    }
}

/// One row per wire: `plane` is the index in [`Store::planes`], `wip` the
/// position in that plane's wire list.
pub fn rows_from_store(store: &Store) -> Vec<WireRow> {
    store
        .planes()
        .iter()
        .enumerate()
        .flat_map(|(plane, p)| {
            store.wires_of(p).enumerate().filter_map(move |(wip, wire)| {
                let (tail, head) = store.endpoints(wire)?;
                Some(WireRow {
                    plane,
                    wip,
                    channel: wire.channel,
                    tail: to_point3(tail),
                    head: to_point3(head),
                })
            })
        })
        .collect()
}

/// Per-plane totals and extents.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaneSummary {
    /// Plane number.
    pub plane: usize,
    /// Number of wires.
    pub wires: usize,
    /// Smallest and largest wire index in plane.
    pub wip_range: (usize, usize),
    /// Number of channel entries (one per wire).
    pub channels: usize,
    /// Smallest and largest channel.
    pub channel_range: (i64, i64),
    /// Bounding box as `(min, max)`.
    pub bounds: Ray3D,
}

/// Groups rows by plane, in ascending plane order. Planes without wires do
/// not appear.
pub fn summarize(rows: &[WireRow]) -> Result<Vec<PlaneSummary>, SurveyError> {
    let mut by_plane: BTreeMap<usize, Vec<&WireRow>> = BTreeMap::new();
    for row in rows {
        by_plane.entry(row.plane).or_default().push(row);
    }
    let summaries = by_plane
        .into_iter()
        .map(|(plane, wires)| {
            let bounds = bounding_box(wires.iter().copied())?;
            let wip_lo = wires.iter().map(|w| w.wip).min().unwrap_or_default();
            let wip_hi = wires.iter().map(|w| w.wip).max().unwrap_or_default();
            let chan_lo = wires.iter().map(|w| w.channel).min().unwrap_or_default();
            let chan_hi = wires.iter().map(|w| w.channel).max().unwrap_or_default();
            Ok(PlaneSummary {
                plane,
                wires: wires.len(),
                wip_range: (wip_lo, wip_hi),
                channels: wires.len(),
                channel_range: (chan_lo, chan_hi),
                bounds,
            })
        })
        .collect::<Result<Vec<_>, SurveyError>>()?;
    debug!(rows = rows.len(), planes = summaries.len(), "summarized wires");
    Ok(summaries)
}

impl fmt::Display for PlaneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.plane {
            0 => f.write_str("plane U")?,
            1 => f.write_str("plane V")?,
            2 => f.write_str("plane W")?,
            n => write!(f, "plane {n}")?,
        }
        let lo = self.bounds.tail();
        let hi = self.bounds.head();
        write!(
            f,
            ": {} wires [{} - {}], {} chans [{:04} - {:04}], \
             minpt=({:+.1}, {:+.1}, {:+.4}), maxpt=({:+.1}, {:+.1}, {:+.1})",
            self.wires,
            self.wip_range.0,
            self.wip_range.1,
            self.channels,
            self.channel_range.0,
            self.channel_range.1,
            lo.x(),
            lo.y(),
            lo.z(),
            hi.x(),
            hi.y(),
            hi.z(),
        )
    }
}
