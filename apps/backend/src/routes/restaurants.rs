use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};
use serde::Serialize;

use super::store_upload;
use crate::error::AppError;
use crate::repos::restaurants::{self, NewRestaurant, Restaurant, RestaurantUpdate};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct RestaurantResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub image: String,
}

impl RestaurantResponse {
    fn render(state: &AppState, restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
            image: state.image_url(&restaurant.image),
        }
    }
}

#[derive(Debug, MultipartForm)]
pub struct RestaurantForm {
    pub name: Text<String>,
    pub address: Text<String>,
    pub image: TempFile,
}

async fn list_restaurants(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let rows = restaurants::list_all(&state.db).await?;
    let body: Vec<RestaurantResponse> = rows
        .into_iter()
        .map(|r| RestaurantResponse::render(&state, r))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn create_restaurant(
    state: web::Data<AppState>,
    form: MultipartForm<RestaurantForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let image = store_upload(&state.assets, &form.image).await?;
    let created = restaurants::create(
        &state.db,
        NewRestaurant {
            name: form.name.0,
            address: form.address.0,
            image,
        },
    )
    .await?;
    Ok(HttpResponse::Created().json(RestaurantResponse::render(&state, created)))
}

async fn get_restaurant(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let restaurant = restaurants::find_by_id(&state.db, id)
        .await?
        .ok_or_else(AppError::not_found)?;
    Ok(HttpResponse::Ok().json(RestaurantResponse::render(&state, restaurant)))
}

async fn update_restaurant(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: MultipartForm<RestaurantForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let existing = restaurants::find_by_id(&state.db, id)
        .await?
        .ok_or_else(AppError::not_found)?;

    let form = form.into_inner();
    let image = store_upload(&state.assets, &form.image).await?;
    let updated = restaurants::update(
        &state.db,
        id,
        RestaurantUpdate {
            name: form.name.0,
            address: form.address.0,
            image,
        },
    )
    .await?;

    // The replaced image is unreferenced once the row update commits.
    state.assets.remove(&existing.image).await;

    Ok(HttpResponse::Ok().json(RestaurantResponse::render(&state, updated)))
}

async fn delete_restaurant(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let existing = restaurants::find_by_id(&state.db, id)
        .await?
        .ok_or_else(AppError::not_found)?;

    restaurants::delete(&state.db, id).await?;
    state.assets.remove(&existing.image).await;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/restaurants")
            .route(web::get().to(list_restaurants))
            .route(web::post().to(create_restaurant)),
    );
    cfg.service(
        web::resource("/restaurants/{id}")
            .route(web::get().to(get_restaurant))
            .route(web::put().to(update_restaurant))
            .route(web::delete().to(delete_restaurant)),
    );
}
