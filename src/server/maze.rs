//! Maze grid endpoints.
//!
//! Each handler translates its path parameter into one `GridStore` query and
//! serializes the result. Handlers are generic over the grid source so tests
//! can mount them on an in-memory store.

use actix_web::{HttpResponse, web};

use crate::server::http_error::store_error_response;
use crate::store::{GridSource, GridStore};

/// `GET /maze/grids`
pub async fn get_all_grids<S: GridSource>(store: web::Data<GridStore<S>>) -> HttpResponse {
    match store.get_all().await {
        Ok(document) => HttpResponse::Ok().json(document),
        Err(e) => store_error_response("get_all_grids", &e),
    }
}

/// `GET /maze/grids/difficulty/{difficulty}`
pub async fn get_grids_by_difficulty<S: GridSource>(
    store: web::Data<GridStore<S>>,
    path: web::Path<String>,
) -> HttpResponse {
    let difficulty = path.into_inner();
    match store.get_by_difficulty(&difficulty).await {
        Ok(found) => HttpResponse::Ok().json(found),
        Err(e) => store_error_response("get_grids_by_difficulty", &e),
    }
}

/// `GET /maze/grids/id/{id}`
pub async fn get_grid_by_id<S: GridSource>(
    store: web::Data<GridStore<S>>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    match store.get_by_id(&id).await {
        Ok(found) => HttpResponse::Ok().json(found),
        Err(e) => store_error_response("get_grid_by_id", &e),
    }
}

/// `GET /maze/settings/{difficulty}`
pub async fn get_settings<S: GridSource>(
    store: web::Data<GridStore<S>>,
    path: web::Path<String>,
) -> HttpResponse {
    let difficulty = path.into_inner();
    match store.get_settings(&difficulty).await {
        Ok(settings) => HttpResponse::Ok().json(settings),
        Err(e) => store_error_response("get_settings", &e),
    }
}
