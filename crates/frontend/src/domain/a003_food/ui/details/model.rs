use leptos::prelude::{With, WithUntracked};
use crate::shared::state::{AppStores, DomainError};
use contracts::domain::a003_food::filter::distinct_categories;
use contracts::domain::a003_food::FoodDto;

pub fn fetch_by_id(stores: &AppStores, id: &str) -> Option<FoodDto> {
    stores.foods.with_untracked(|d| d.food(id).map(|f| f.to_dto()))
}

/// Managed category names first, then categories only present on foods
pub fn category_options(stores: &AppStores) -> Vec<String> {
    stores.foods.with(|d| {
        let mut names: Vec<String> = d.categories().iter().map(|c| c.name.clone()).collect();
        for name in distinct_categories(d.foods()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    })
}

pub fn save_form(stores: &AppStores, dto: &FoodDto) -> Result<(), DomainError> {
    if dto.id.is_some() {
        stores.with_foods(|d, now| d.update_food(dto, now))
    } else {
        stores.with_foods(|d, now| d.create_food(dto, now).map(|_| ()))
    }
}
