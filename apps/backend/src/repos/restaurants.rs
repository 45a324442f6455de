use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};

use super::trimmed;
use crate::entities::restaurants;
use crate::error::AppError;

/// A restaurant row. `image` holds the relative asset path as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub image: String,
}

impl From<restaurants::Model> for Restaurant {
    fn from(model: restaurants::Model) -> Self {
        Self {
            id: model.id,
            name: trimmed(model.name),
            address: trimmed(model.address),
            image: trimmed(model.image),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
    pub image: String,
}

#[derive(Debug, Clone)]
pub struct RestaurantUpdate {
    pub name: String,
    pub address: String,
    pub image: String,
}

pub async fn list_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<Restaurant>, AppError> {
    let rows = restaurants::Entity::find()
        .order_by_asc(restaurants::Column::Id)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(Restaurant::from).collect())
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<Restaurant>, AppError> {
    let row = restaurants::Entity::find_by_id(id).one(conn).await?;
    Ok(row.map(Restaurant::from))
}

pub async fn exists<C: ConnectionTrait>(conn: &C, id: i32) -> Result<bool, AppError> {
    let row = restaurants::Entity::find_by_id(id).one(conn).await?;
    Ok(row.is_some())
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    new: NewRestaurant,
) -> Result<Restaurant, AppError> {
    let active = restaurants::ActiveModel {
        id: NotSet,
        name: Set(trimmed(new.name)),
        address: Set(trimmed(new.address)),
        image: Set(trimmed(new.image)),
    };
    let model = active.insert(conn).await?;
    Ok(Restaurant::from(model))
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    update: RestaurantUpdate,
) -> Result<Restaurant, AppError> {
    let active = restaurants::ActiveModel {
        id: Set(id),
        name: Set(trimmed(update.name)),
        address: Set(trimmed(update.address)),
        image: Set(trimmed(update.image)),
    };
    let model = active.update(conn).await?;
    Ok(Restaurant::from(model))
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<(), AppError> {
    restaurants::Entity::delete_by_id(id).exec(conn).await?;
    Ok(())
}
