//! Maze grid data model.
//!
//! Mirrors the JSON document on disk. Field names are camelCase on the wire,
//! map keys keep their declaration order, and fields this model does not know
//! about are carried through untouched so the document can be served back as-is.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Root document: grids and settings, both keyed by difficulty label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDocument {
    pub grids: IndexMap<String, Vec<Grid>>,
    pub difficulty_settings: IndexMap<String, Settings>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GridDocument {
    /// Total number of grids across every difficulty bucket.
    pub fn grid_count(&self) -> usize {
        self.grids.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmParams {
    pub seed: i64,
    pub complexity: i64,
}

/// One pre-authored maze layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub id: String,
    pub size: Size,
    pub start: Position,
    pub end: Position,
    pub walls: Vec<Position>,
    pub optimal_path_length: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm_params: Option<AlgorithmParams>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Grid {
    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls.contains(&pos)
    }
}

/// Gameplay parameters shared by every grid of one difficulty.
///
/// `time_limit` and `visibility_radius` are kept as raw JSON numbers so an
/// integer limit is written back as an integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub time_limit: Number,
    pub hints_allowed: u32,
    pub fog_of_war: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_radius: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving_obstacles: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Settings {
    /// Time limit in seconds.
    pub fn time_limit_secs(&self) -> Option<f64> {
        self.time_limit.as_f64()
    }

    pub fn visibility_radius(&self) -> Option<f64> {
        self.visibility_radius.as_ref().and_then(Number::as_f64)
    }
}

/// Response of a difficulty lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyGrids {
    pub grids: Vec<Grid>,
    pub settings: Settings,
}

/// Response of an id lookup: the grid and the settings of its owning bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridWithSettings {
    pub grid: Grid,
    pub settings: Settings,
}
