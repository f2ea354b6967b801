use super::model;
use crate::shared::state::AppStores;
use contracts::domain::a001_restaurant::RestaurantDto;
use leptos::prelude::*;

/// ViewModel for the restaurant form
#[derive(Clone, Copy)]
pub struct RestaurantDetailsViewModel {
    pub form: RwSignal<RestaurantDto>,
    pub error: RwSignal<Option<String>>,
    stores: AppStores,
}

impl RestaurantDetailsViewModel {
    pub fn new(stores: AppStores) -> Self {
        Self {
            form: RwSignal::new(RestaurantDto::default()),
            error: RwSignal::new(None),
            stores,
        }
    }

    pub fn is_edit_mode(&self) -> impl Fn() -> bool + '_ {
        move || self.form.with(|f| f.id.is_some())
    }

    pub fn is_form_valid(&self) -> impl Fn() -> bool + '_ {
        move || self.form.with(|f| !f.name.trim().is_empty())
    }

    pub fn load_if_needed(&self, id: Option<String>) {
        let Some(id) = id else {
            return;
        };
        match model::fetch_by_id(&self.stores, &id) {
            Some(dto) => self.form.set(dto),
            None => self.error.set(Some(format!("レストラン '{}' が見つかりません", id))),
        }
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if current.name.trim().is_empty() {
            self.error.set(Some("レストラン名を入力してください".to_string()));
            return;
        }

        let message = if current.id.is_some() {
            format!("「{}」を更新しました", current.name.trim())
        } else {
            format!("「{}」を追加しました", current.name.trim())
        };
        let result = model::save_form(&self.stores, &current);
        if self.stores.settle(result, &message, self.error) {
            on_saved.run(());
        }
    }
}
