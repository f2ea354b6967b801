//! Maps a tab key to the page it shows.

use crate::domain::a001_restaurant::ui::list::RestaurantList;
use crate::domain::a002_menu::ui::browse::MenuBrowse;
use crate::domain::a002_menu::ui::list::MenuList;
use crate::domain::a003_food::ui::browse::FoodBrowse;
use crate::domain::a003_food::ui::list::FoodList;
use crate::domain::a004_food_category::ui::list::CategoryList;
use crate::usecases::u501_import_chain_menus::ImportChainMenusPage;
use crate::usecases::u502_meal_planner::MealPlannerPage;
use crate::usecases::u503_food_exchange::FoodExchangePage;
use leptos::prelude::*;

/// Renders the content of the tab identified by `key`.
///
/// Unknown keys (for instance a stale `?active=` value) get a placeholder.
pub fn render_tab_content(key: &str) -> AnyView {
    match key {
        // Admin
        "a001_restaurant" => view! { <RestaurantList /> }.into_any(),
        "a002_menu" => view! { <MenuList /> }.into_any(),
        "a003_food" => view! { <FoodList /> }.into_any(),
        "a004_food_category" => view! { <CategoryList /> }.into_any(),

        // Browse
        "a002_menu_browse" => view! { <MenuBrowse /> }.into_any(),
        "a003_food_browse" => view! { <FoodBrowse /> }.into_any(),

        // Tools
        "u501_import_chain_menus" => view! { <ImportChainMenusPage /> }.into_any(),
        "u502_meal_planner" => view! { <MealPlannerPage /> }.into_any(),
        "u503_food_exchange" => view! { <FoodExchangePage /> }.into_any(),

        _ => {
            log::warn!("unknown tab key: {}", key);
            view! { <div class="placeholder">"このページは存在しません"</div> }.into_any()
        }
    }
}
