use super::model;
use crate::shared::state::AppStores;
use contracts::domain::a002_menu::MenuDto;
use leptos::prelude::*;

/// ViewModel for the menu form
#[derive(Clone, Copy)]
pub struct MenuDetailsViewModel {
    pub form: RwSignal<MenuDto>,
    pub error: RwSignal<Option<String>>,
    /// Extended nutrient inputs are folded away until opened
    pub show_micro: RwSignal<bool>,
    stores: AppStores,
}

impl MenuDetailsViewModel {
    pub fn new(stores: AppStores) -> Self {
        Self {
            form: RwSignal::new(MenuDto::default()),
            error: RwSignal::new(None),
            show_micro: RwSignal::new(false),
            stores,
        }
    }

    pub fn is_edit_mode(&self) -> impl Fn() -> bool + '_ {
        move || self.form.with(|f| f.id.is_some())
    }

    pub fn is_form_valid(&self) -> impl Fn() -> bool + '_ {
        move || {
            self.form
                .with(|f| !f.name.trim().is_empty() && !f.restaurant_id.trim().is_empty())
        }
    }

    pub fn restaurant_options(&self) -> Vec<(String, String)> {
        model::restaurant_options(&self.stores)
    }

    /// Edit an existing menu, or start a new one preset to a restaurant
    pub fn load_if_needed(&self, id: Option<String>, restaurant_id: Option<String>) {
        match id {
            Some(id) => match model::fetch_by_id(&self.stores, &id) {
                Some(dto) => {
                    self.show_micro.set(!dto.micro.is_empty());
                    self.form.set(dto);
                }
                None => self.error.set(Some(format!("メニュー '{}' が見つかりません", id))),
            },
            None => {
                if let Some(restaurant_id) = restaurant_id {
                    self.form.update(|f| f.restaurant_id = restaurant_id);
                }
            }
        }
    }

    pub fn micro_value(self, key: &'static str) -> impl Fn() -> String {
        move || self.form.with(|f| f.micro.get(key).cloned().unwrap_or_default())
    }

    pub fn set_micro(&self, key: &'static str, value: String) {
        self.form.update(|f| {
            if value.trim().is_empty() {
                f.micro.remove(key);
            } else {
                f.micro.insert(key.to_string(), value);
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if current.name.trim().is_empty() {
            self.error.set(Some("メニュー名を入力してください".to_string()));
            return;
        }
        if current.restaurant_id.trim().is_empty() {
            self.error.set(Some("レストランを選択してください".to_string()));
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
