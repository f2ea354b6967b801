use leptos::prelude::WithUntracked;
use crate::shared::state::{AppStores, DomainError};
use contracts::domain::a001_restaurant::RestaurantDto;

pub fn fetch_by_id(stores: &AppStores, id: &str) -> Option<RestaurantDto> {
    stores
        .restaurants
        .with_untracked(|d| d.restaurant(id).map(|r| r.to_dto()))
}

pub fn save_form(stores: &AppStores, dto: &RestaurantDto) -> Result<(), DomainError> {
    if dto.id.is_some() {
        stores.with_restaurants(|d, now| d.update_restaurant(dto, now))
    } else {
        stores.with_restaurants(|d, now| d.create_restaurant(dto, now).map(|_| ()))
    }
}
