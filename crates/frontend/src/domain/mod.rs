pub mod a001_restaurant;
pub mod a002_menu;
pub mod a003_food;
pub mod a004_food_category;
