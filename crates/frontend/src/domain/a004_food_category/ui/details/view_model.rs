use super::model;
use crate::shared::state::AppStores;
use contracts::domain::a004_food_category::CategoryDto;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct CategoryDetailsViewModel {
    pub form: RwSignal<CategoryDto>,
    pub error: RwSignal<Option<String>>,
    stores: AppStores,
}

impl CategoryDetailsViewModel {
    pub fn new(stores: AppStores) -> Self {
        Self {
            form: RwSignal::new(CategoryDto::default()),
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
            None => self.error.set(Some(format!("カテゴリー '{}' が見つかりません", id))),
        }
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if current.name.trim().is_empty() {
            self.error.set(Some("カテゴリー名を入力してください".to_string()));
            return;
        }

        let message = format!("カテゴリー「{}」を保存しました", current.name.trim());
        let result = model::save_form(&self.stores, &current);
        if self.stores.settle(result, &message, self.error) {
            on_saved.run(());
        }
    }
}
