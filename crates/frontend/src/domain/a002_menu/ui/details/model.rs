use leptos::prelude::{With, WithUntracked};
use crate::shared::state::{AppStores, DomainError};
use contracts::domain::a002_menu::MenuDto;

pub fn fetch_by_id(stores: &AppStores, id: &str) -> Option<MenuDto> {
    stores.restaurants.with_untracked(|d| d.menu(id).map(|m| m.to_dto()))
}

/// (id, name) of every restaurant a menu can belong to
pub fn restaurant_options(stores: &AppStores) -> Vec<(String, String)> {
    stores.restaurants.with(|d| {
        d.restaurants()
            .iter()
            .map(|r| (r.id.0.clone(), r.name.clone()))
            .collect()
    })
}

pub fn save_form(stores: &AppStores, dto: &MenuDto) -> Result<(), DomainError> {
    if dto.id.is_some() {
        stores.with_restaurants(|d, now| d.update_menu(dto, now))
    } else {
        stores.with_restaurants(|d, now| d.create_menu(dto, now).map(|_| ()))
    }
}
