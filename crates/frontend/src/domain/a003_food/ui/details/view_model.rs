use super::model;
use crate::shared::state::AppStores;
use contracts::domain::a003_food::aggregate::{DEFAULT_PRICE_RANGE, DEFAULT_RATING};
use contracts::domain::a003_food::{FoodDto, NutrientAmount};
use leptos::prelude::*;

/// Which nutrient line list an edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutrientList {
    Vitamins,
    Minerals,
}

impl NutrientList {
    fn of(self, form: &mut FoodDto) -> &mut Vec<NutrientAmount> {
        match self {
            NutrientList::Vitamins => &mut form.vitamins,
            NutrientList::Minerals => &mut form.minerals,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NutrientList::Vitamins => "ビタミン",
            NutrientList::Minerals => "ミネラル",
        }
    }
}

/// ViewModel for the food form
#[derive(Clone, Copy)]
pub struct FoodDetailsViewModel {
    pub form: RwSignal<FoodDto>,
    pub error: RwSignal<Option<String>>,
    stores: AppStores,
}

impl FoodDetailsViewModel {
    pub fn new(stores: AppStores) -> Self {
        Self {
            form: RwSignal::new(FoodDto {
                rating: DEFAULT_RATING.to_string(),
                price_range: DEFAULT_PRICE_RANGE.to_string(),
                ..FoodDto::default()
            }),
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

    pub fn category_options(&self) -> Vec<String> {
        model::category_options(&self.stores)
    }

    pub fn load_if_needed(&self, id: Option<String>) {
        let Some(id) = id else {
            return;
        };
        match model::fetch_by_id(&self.stores, &id) {
            Some(dto) => self.form.set(dto),
            None => self.error.set(Some(format!("食材 '{}' が見つかりません", id))),
        }
    }

    pub fn add_nutrient(&self, list: NutrientList) {
        self.form.update(|f| list.of(f).push(NutrientAmount::default()));
    }

    pub fn remove_nutrient(&self, list: NutrientList, index: usize) {
        self.form.update(|f| {
            let lines = list.of(f);
            if index < lines.len() {
                lines.remove(index);
            }
        });
    }

    pub fn set_nutrient(&self, list: NutrientList, index: usize, name: Option<String>, amount: Option<String>) {
        self.form.update(|f| {
            if let Some(line) = list.of(f).get_mut(index) {
                if let Some(name) = name {
                    line.name = name;
                }
                if let Some(amount) = amount {
                    line.amount = amount;
                }
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if current.name.trim().is_empty() {
            self.error.set(Some("食材名を入力してください".to_string()));
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
