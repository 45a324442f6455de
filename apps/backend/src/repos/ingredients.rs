use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use super::trimmed;
use crate::entities::{foods, ingredients};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub value: String,
    pub food_id: i32,
}

impl From<ingredients::Model> for Ingredient {
    fn from(model: ingredients::Model) -> Self {
        Self {
            id: model.id,
            name: trimmed(model.name),
            value: trimmed(model.value),
            food_id: model.food_id,
        }
    }
}

/// An ingredient joined with its food, mirroring the denormalized read
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientWithFood {
    pub food_id: i32,
    pub food_name: String,
    pub food_recipe: String,
    pub food_image: String,
    pub ingredient_id: i32,
    pub ingredient_name: String,
    pub ingredient_value: String,
}

#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub name: String,
    pub value: String,
    pub food_id: i32,
}

pub async fn list_by_food<C: ConnectionTrait>(
    conn: &C,
    food_id: i32,
) -> Result<Vec<Ingredient>, AppError> {
    let rows = ingredients::Entity::find()
        .filter(ingredients::Column::FoodId.eq(food_id))
        .order_by_asc(ingredients::Column::Id)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(Ingredient::from).collect())
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<IngredientWithFood>, AppError> {
    let row = ingredients::Entity::find_by_id(id)
        .find_also_related(foods::Entity)
        .one(conn)
        .await?;
    match row {
        None => Ok(None),
        Some((ingredient, food)) => {
            let food =
                food.ok_or_else(|| AppError::db("ingredient row references a missing food"))?;
            Ok(Some(IngredientWithFood {
                food_id: food.id,
                food_name: trimmed(food.name),
                food_recipe: trimmed(food.recipe),
                food_image: trimmed(food.image),
                ingredient_id: ingredient.id,
                ingredient_name: trimmed(ingredient.name),
                ingredient_value: trimmed(ingredient.value),
            }))
        }
    }
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    new: NewIngredient,
) -> Result<Ingredient, AppError> {
    let active = ingredients::ActiveModel {
        id: NotSet,
        name: Set(trimmed(new.name)),
        value: Set(trimmed(new.value)),
        food_id: Set(new.food_id),
    };
    let model = active.insert(conn).await?;
    Ok(Ingredient::from(model))
}
