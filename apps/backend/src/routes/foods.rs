use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};
use serde::Serialize;

use super::store_upload;
use crate::error::AppError;
use crate::repos::foods::{self, Food, FoodUpdate, FoodWithRestaurant, NewFood};
use crate::repos::{ingredients, restaurants};
use crate::state::app_state::AppState;

/// Response for writes, mirroring the food row itself.
#[derive(Debug, Serialize)]
pub struct FoodResponse {
    pub id: i32,
    pub restaurant_id: i32,
    pub name: String,
    pub recipe: String,
    pub image: String,
}

impl FoodResponse {
    fn render(state: &AppState, food: Food) -> Self {
        Self {
            id: food.id,
            restaurant_id: food.restaurant_id,
            name: food.name,
            recipe: food.recipe,
            image: state.image_url(&food.image),
        }
    }
}

/// Response for reads, denormalized with the owning restaurant.
#[derive(Debug, Serialize)]
pub struct FoodWithRestaurantResponse {
    pub food_id: i32,
    pub food_name: String,
    pub food_recipe: String,
    pub food_image: String,
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub restaurant_image: String,
}

impl FoodWithRestaurantResponse {
    fn render(state: &AppState, row: FoodWithRestaurant) -> Self {
        Self {
            food_id: row.food_id,
            food_name: row.food_name,
            food_recipe: row.food_recipe,
            food_image: state.image_url(&row.food_image),
            restaurant_id: row.restaurant_id,
            restaurant_name: row.restaurant_name,
            restaurant_image: state.image_url(&row.restaurant_image),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngredientEntry {
    pub id: i32,
    pub name: String,
    pub value: String,
}

/// Food detail: the denormalized record plus its ingredients in order.
#[derive(Debug, Serialize)]
pub struct FoodDetailResponse {
    #[serde(flatten)]
    pub food: FoodWithRestaurantResponse,
    pub ingredients: Vec<IngredientEntry>,
}

#[derive(Debug, MultipartForm)]
pub struct FoodForm {
    pub name: Text<String>,
    pub recipe: Text<String>,
    pub image: TempFile,
}

async fn list_restaurant_foods(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let restaurant_id = path.into_inner();
    if !restaurants::exists(&state.db, restaurant_id).await? {
        return Err(AppError::not_found());
    }

    let rows = foods::list_by_restaurant(&state.db, restaurant_id).await?;
    let body: Vec<FoodWithRestaurantResponse> = rows
        .into_iter()
        .map(|row| FoodWithRestaurantResponse::render(&state, row))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn create_food(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: MultipartForm<FoodForm>,
) -> Result<HttpResponse, AppError> {
    let restaurant_id = path.into_inner();
    // Parent check precedes the asset write: a create that was always
    // going to fail must not leave an orphaned file behind.
    if !restaurants::exists(&state.db, restaurant_id).await? {
        return Err(AppError::not_found());
    }

    let form = form.into_inner();
    let image = store_upload(&state.assets, &form.image).await?;
    let created = foods::create(
        &state.db,
        NewFood {
            name: form.name.0,
            recipe: form.recipe.0,
            image,
            restaurant_id,
        },
    )
    .await?;
    Ok(HttpResponse::Created().json(FoodResponse::render(&state, created)))
}

async fn get_food(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let food = foods::find_by_id(&state.db, id)
        .await?
        .ok_or_else(AppError::not_found)?;

    let entries = ingredients::list_by_food(&state.db, food.food_id)
        .await?
        .into_iter()
        .map(|i| IngredientEntry {
            id: i.id,
            name: i.name,
            value: i.value,
        })
        .collect();

    Ok(HttpResponse::Ok().json(FoodDetailResponse {
        food: FoodWithRestaurantResponse::render(&state, food),
        ingredients: entries,
    }))
}

async fn update_food(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: MultipartForm<FoodForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let existing = foods::find_by_id(&state.db, id)
        .await?
        .ok_or_else(AppError::not_found)?;

    let form = form.into_inner();
    let image = store_upload(&state.assets, &form.image).await?;
    let updated = foods::update(
        &state.db,
        id,
        FoodUpdate {
            name: form.name.0,
            recipe: form.recipe.0,
            image,
        },
    )
    .await?;

    // The replaced image is unreferenced once the row update commits.
    state.assets.remove(&existing.food_image).await;

    Ok(HttpResponse::Ok().json(FoodResponse::render(&state, updated)))
}

async fn delete_food(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let existing = foods::find_by_id(&state.db, id)
        .await?
        .ok_or_else(AppError::not_found)?;

    foods::delete(&state.db, id).await?;
    state.assets.remove(&existing.food_image).await;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/restaurants/{id}/foods")
            .route(web::get().to(list_restaurant_foods))
            .route(web::post().to(create_food)),
    );
    cfg.service(
        web::resource("/foods/{id}")
            .route(web::get().to(get_food))
            .route(web::put().to(update_food))
            .route(web::delete().to(delete_food)),
    );
}
