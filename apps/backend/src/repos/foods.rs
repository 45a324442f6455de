use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use super::trimmed;
use crate::entities::{foods, restaurants};
use crate::error::AppError;

/// A food row. `image` holds the relative asset path as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    pub id: i32,
    pub name: String,
    pub recipe: String,
    pub image: String,
    pub restaurant_id: i32,
}

impl From<foods::Model> for Food {
    fn from(model: foods::Model) -> Self {
        Self {
            id: model.id,
            name: trimmed(model.name),
            recipe: trimmed(model.recipe),
            image: trimmed(model.image),
            restaurant_id: model.restaurant_id,
        }
    }
}

/// A food joined with its restaurant, mirroring the denormalized read
/// responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodWithRestaurant {
    pub food_id: i32,
    pub food_name: String,
    pub food_recipe: String,
    pub food_image: String,
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub restaurant_image: String,
}

impl FoodWithRestaurant {
    fn from_join(food: foods::Model, restaurant: restaurants::Model) -> Self {
        Self {
            food_id: food.id,
            food_name: trimmed(food.name),
            food_recipe: trimmed(food.recipe),
            food_image: trimmed(food.image),
            restaurant_id: restaurant.id,
            restaurant_name: trimmed(restaurant.name),
            restaurant_image: trimmed(restaurant.image),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewFood {
    pub name: String,
    pub recipe: String,
    pub image: String,
    pub restaurant_id: i32,
}

#[derive(Debug, Clone)]
pub struct FoodUpdate {
    pub name: String,
    pub recipe: String,
    pub image: String,
}

pub async fn list_by_restaurant<C: ConnectionTrait>(
    conn: &C,
    restaurant_id: i32,
) -> Result<Vec<FoodWithRestaurant>, AppError> {
    let rows = foods::Entity::find()
        .filter(foods::Column::RestaurantId.eq(restaurant_id))
        .find_also_related(restaurants::Entity)
        .order_by_asc(foods::Column::Id)
        .all(conn)
        .await?;
    rows.into_iter()
        .map(|(food, restaurant)| {
            let restaurant = restaurant
                .ok_or_else(|| AppError::db("food row references a missing restaurant"))?;
            Ok(FoodWithRestaurant::from_join(food, restaurant))
        })
        .collect()
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<FoodWithRestaurant>, AppError> {
    let row = foods::Entity::find_by_id(id)
        .find_also_related(restaurants::Entity)
        .one(conn)
        .await?;
    match row {
        None => Ok(None),
        Some((food, restaurant)) => {
            let restaurant = restaurant
                .ok_or_else(|| AppError::db("food row references a missing restaurant"))?;
            Ok(Some(FoodWithRestaurant::from_join(food, restaurant)))
        }
    }
}

pub async fn exists<C: ConnectionTrait>(conn: &C, id: i32) -> Result<bool, AppError> {
    let row = foods::Entity::find_by_id(id).one(conn).await?;
    Ok(row.is_some())
}

pub async fn create<C: ConnectionTrait>(conn: &C, new: NewFood) -> Result<Food, AppError> {
    let active = foods::ActiveModel {
        id: NotSet,
        name: Set(trimmed(new.name)),
        recipe: Set(trimmed(new.recipe)),
        image: Set(trimmed(new.image)),
        restaurant_id: Set(new.restaurant_id),
    };
    let model = active.insert(conn).await?;
    Ok(Food::from(model))
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    update: FoodUpdate,
) -> Result<Food, AppError> {
    let active = foods::ActiveModel {
        id: Set(id),
        name: Set(trimmed(update.name)),
        recipe: Set(trimmed(update.recipe)),
        image: Set(trimmed(update.image)),
        restaurant_id: NotSet,
    };
    let model = active.update(conn).await?;
    Ok(Food::from(model))
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), AppError> {
    foods::Entity::delete_by_id(id).exec(conn).await?;
    Ok(())
}
