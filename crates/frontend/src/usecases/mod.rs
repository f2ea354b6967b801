pub mod u501_import_chain_menus;
pub mod u502_meal_planner;
pub mod u503_food_exchange;
