//! On-disk record layout.
//!
//! Every field is optional at the serde level so that a missing field can be
//! reported by name instead of as a generic parse failure.

use serde::{Deserialize, Serialize};

/// Top-level map file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct MapRecord {
    /// Number of row arrays in `cells`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) rows: Option<u16>,
    /// Number of records per row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) cols: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) cell_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) cell_height: Option<f64>,
    /// Older files spell this `viewportwidth`.
    #[serde(default, alias = "viewportwidth", skip_serializing_if = "Option::is_none")]
    pub(super) viewport_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) viewport_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) playable_width: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) playable_height: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) iso_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) cells: Option<Vec<Vec<CellRecord>>>,
}

/// One cell.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CellRecord {
    pub(super) x: f64,
    pub(super) y: f64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub(super) cell_type: Option<String>,
    pub(super) occupied: bool,
}
