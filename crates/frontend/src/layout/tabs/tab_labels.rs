//! Tab titles, looked up by tab key.

use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_chain_menus::ImportChainMenus;
use contracts::usecases::u502_meal_planner::MealPlanner;
use contracts::usecases::u503_food_exchange::FoodExchange;

/// Returns the readable title for a tab key. Unknown keys get an empty string.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        // ── Admin ─────────────────────────────────────────────────────────
        "a001_restaurant" => "レストラン",
        "a002_menu" => "メニュー管理",
        "a003_food" => "食材管理",
        "a004_food_category" => "食材カテゴリー",

        // ── Browse ────────────────────────────────────────────────────────
        "a002_menu_browse" => "メニュー検索",
        "a003_food_browse" => "おすすめ食材",

        // ── Tools ─────────────────────────────────────────────────────────
        "u501_import_chain_menus" => ImportChainMenus::display_name(),
        "u502_meal_planner" => MealPlanner::display_name(),
        "u503_food_exchange" => FoodExchange::display_name(),

        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sidebar_key_has_a_title() {
        for key in [
            "a001_restaurant",
            "a002_menu",
            "a002_menu_browse",
            "a003_food",
            "a003_food_browse",
            "a004_food_category",
            "u501_import_chain_menus",
            "u502_meal_planner",
            "u503_food_exchange",
        ] {
            assert!(!tab_label_for_key(key).is_empty(), "{key}");
        }
        assert_eq!(tab_label_for_key("a999_unknown"), "");
    }

    #[test]
    fn usecase_keys_follow_full_names() {
        assert_eq!(
            tab_label_for_key(&ImportChainMenus::full_name()),
            ImportChainMenus::display_name()
        );
        assert_eq!(tab_label_for_key(&MealPlanner::full_name()), MealPlanner::display_name());
        assert_eq!(tab_label_for_key(&FoodExchange::full_name()), FoodExchange::display_name());
    }
}
