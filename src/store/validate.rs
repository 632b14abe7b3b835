//! Checks applied to every freshly parsed grid document.
//!
//! [`validate`] covers the document-level invariants; a document failing it is
//! never served. [`lint`] reports authoring problems inside single grids. Those
//! are logged but the document is still served.

use std::collections::HashMap;
use thiserror::Error;

use super::model::{Grid, GridDocument, Position};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("difficulty '{0}' has grids but no settings")]
    MissingSettings(String),

    #[error("difficulty '{0}' has settings but no grids")]
    MissingGrids(String),

    #[error("grid id '{id}' is declared in both '{first}' and '{second}'")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },
}

/// Non-fatal problem in an authored grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridIssue {
    #[error("difficulty '{0}' has an empty grid list")]
    EmptyDifficulty(String),

    #[error("grid '{id}' has a zero-sized dimension")]
    EmptySize { id: String },

    #[error("grid '{id}': {cell} ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        id: String,
        cell: &'static str,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("grid '{id}': {cell} ({x}, {y}) is a wall")]
    BlockedEndpoint {
        id: String,
        cell: &'static str,
        x: usize,
        y: usize,
    },
}

/// Check label parity and id uniqueness. Returns the first violation found.
pub fn validate(document: &GridDocument) -> Result<(), ValidationError> {
    for label in document.grids.keys() {
        if !document.difficulty_settings.contains_key(label) {
            return Err(ValidationError::MissingSettings(label.clone()));
        }
    }
    for label in document.difficulty_settings.keys() {
        if !document.grids.contains_key(label) {
            return Err(ValidationError::MissingGrids(label.clone()));
        }
    }

    // id -> owning difficulty
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(document.grid_count());
    for (label, grids) in &document.grids {
        for grid in grids {
            if let Some(first) = seen.insert(&grid.id, label) {
                return Err(ValidationError::DuplicateId {
                    id: grid.id.clone(),
                    first: first.to_string(),
                    second: label.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Collect every empty difficulty and every grid with broken geometry,
/// in declaration order.
pub fn lint(document: &GridDocument) -> Vec<GridIssue> {
    let mut issues = Vec::new();
    for (label, grids) in &document.grids {
        if grids.is_empty() {
            issues.push(GridIssue::EmptyDifficulty(label.clone()));
        }
        for grid in grids {
            lint_geometry(grid, &mut issues);
        }
    }
    issues
}

fn lint_geometry(grid: &Grid, issues: &mut Vec<GridIssue>) {
    let size = grid.size;
    if size.width == 0 || size.height == 0 {
        issues.push(GridIssue::EmptySize { id: grid.id.clone() });
        return;
    }

    let out_of_bounds = |cell: &'static str, pos: Position| GridIssue::OutOfBounds {
        id: grid.id.clone(),
        cell,
        x: pos.x,
        y: pos.y,
        width: size.width,
        height: size.height,
    };

    for (cell, pos) in [("start", grid.start), ("end", grid.end)] {
        if !size.contains(pos) {
            issues.push(out_of_bounds(cell, pos));
        } else if grid.is_wall(pos) {
            issues.push(GridIssue::BlockedEndpoint {
                id: grid.id.clone(),
                cell,
                x: pos.x,
                y: pos.y,
            });
        }
    }
    issues.extend(
        grid.walls
            .iter()
            .filter(|&&w| !size.contains(w))
            .map(|&w| out_of_bounds("wall", w)),
    );
}
