use leptos::prelude::WithUntracked;
use crate::shared::state::{AppStores, DomainError};
use contracts::domain::a004_food_category::CategoryDto;

pub fn fetch_by_id(stores: &AppStores, id: &str) -> Option<CategoryDto> {
    stores.foods.with_untracked(|d| d.category(id).map(|c| c.to_dto()))
}

pub fn save_form(stores: &AppStores, dto: &CategoryDto) -> Result<(), DomainError> {
    if dto.id.is_some() {
        stores.with_foods(|d, _| d.update_category(dto))
    } else {
        stores.with_foods(|d, _| d.create_category(dto).map(|_| ()))
    }
}
