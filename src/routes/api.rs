use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::quotes::SelectionEntry;
use crate::repository::DieselRepository;
use crate::services::configurations::preview_price;
use crate::services::hierarchy::load_tree;
use crate::services::manufacturing_types::list_active_types;
use crate::services::quotes::{QuotesQuery, load_quotes_page};
use crate::services::ServiceError;

/// Body of the price preview endpoint.
#[derive(Debug, Deserialize)]
pub struct PricePreviewRequest {
    pub selections: Vec<SelectionEntry>,
}

#[get("/v1/types")]
pub async fn api_v1_types(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_active_types(repo.get_ref()) {
        Ok(types) => HttpResponse::Ok().json(types),
        Err(err) => {
            log::error!("Failed to list types: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/types/{type_id}/tree")]
pub async fn api_v1_type_tree(
    path: web::Path<i32>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let type_id = path.into_inner();

    match load_tree(repo.get_ref(), type_id) {
        Ok(tree) => HttpResponse::Ok().json(tree),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load node tree for type {type_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/v1/types/{type_id}/price")]
pub async fn api_v1_type_price(
    path: web::Path<i32>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    body: web::Json<PricePreviewRequest>,
) -> impl Responder {
    let type_id = path.into_inner();

    match preview_price(repo.get_ref(), type_id, &body.selections) {
        Ok(breakdown) => HttpResponse::Ok().json(breakdown),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Form(message)) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": message,
        })),
        Err(err) => {
            log::error!("Failed to price selections for type {type_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/quotes")]
pub async fn api_v1_quotes(
    params: web::Query<QuotesQuery>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match load_quotes_page(repo.get_ref(), params.0) {
        Ok(data) => HttpResponse::Ok().json(data.quotes),
        Err(ServiceError::Form(message)) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": message,
        })),
        Err(err) => {
            log::error!("Failed to list quotes: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
