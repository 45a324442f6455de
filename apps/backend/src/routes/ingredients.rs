use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::repos::{foods, ingredients};
use crate::repos::ingredients::{Ingredient, IngredientWithFood, NewIngredient};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: i32,
    pub food_id: i32,
    pub name: String,
    pub value: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            food_id: ingredient.food_id,
            name: ingredient.name,
            value: ingredient.value,
        }
    }
}

/// Read response, denormalized with the owning food.
#[derive(Debug, Serialize)]
pub struct IngredientWithFoodResponse {
    pub food_id: i32,
    pub food_name: String,
    pub food_recipe: String,
    pub food_image: String,
    pub ingredient_id: i32,
    pub ingredient_name: String,
    pub ingredient_value: String,
}

impl IngredientWithFoodResponse {
    fn render(state: &AppState, row: IngredientWithFood) -> Self {
        Self {
            food_id: row.food_id,
            food_name: row.food_name,
            food_recipe: row.food_recipe,
            food_image: state.image_url(&row.food_image),
            ingredient_id: row.ingredient_id,
            ingredient_name: row.ingredient_name,
            ingredient_value: row.ingredient_value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IngredientFormData {
    pub name: String,
    pub value: String,
}

async fn get_ingredient(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let row = ingredients::find_by_id(&state.db, id)
        .await?
        .ok_or_else(AppError::not_found)?;
    Ok(HttpResponse::Ok().json(IngredientWithFoodResponse::render(&state, row)))
}

async fn create_ingredient(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<IngredientFormData>,
) -> Result<HttpResponse, AppError> {
    let food_id = path.into_inner();
    if !foods::exists(&state.db, food_id).await? {
        return Err(AppError::not_found());
    }

    let form = form.into_inner();
    let created = ingredients::create(
        &state.db,
        NewIngredient {
            name: form.name,
            value: form.value,
            food_id,
        },
    )
    .await?;
    Ok(HttpResponse::Created().json(IngredientResponse::from(created)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/foods/{id}/ingredients").route(web::post().to(create_ingredient)));
    cfg.service(web::resource("/ingredients/{id}").route(web::get().to(get_ingredient)));
}
