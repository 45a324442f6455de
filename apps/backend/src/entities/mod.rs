pub mod foods;
pub mod ingredients;
pub mod restaurants;

pub use foods::Entity as Foods;
pub use ingredients::Entity as Ingredients;
pub use restaurants::Entity as Restaurants;
