use crate::store::ReloadPolicy;

/// Grid store configuration constants.
///
/// Path of the grid document, relative to the working directory.
pub const GRIDS_PATH: &str = "data/mazeGrids.json";

/// The document is read fresh on every request unless overridden.
pub const RELOAD_POLICY: ReloadPolicy = ReloadPolicy::EveryRequest;
