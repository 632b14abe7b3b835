//! HTTP routing configuration.
//!
//! All maze endpoints live under `/maze` and read from the `GridStore<S>`
//! registered as app data.

use actix_web::web;

use crate::server::maze::{get_all_grids, get_grid_by_id, get_grids_by_difficulty, get_settings};
use crate::store::GridSource;

/// Configure the application's maze routes for a store backed by `S`.
pub fn config<S: GridSource>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/maze")
            .route("/grids", web::get().to(get_all_grids::<S>))
            .route(
                "/grids/difficulty/{difficulty}",
                web::get().to(get_grids_by_difficulty::<S>),
            )
            .route("/grids/id/{id}", web::get().to(get_grid_by_id::<S>))
            .route("/settings/{difficulty}", web::get().to(get_settings::<S>)),
    );
}
