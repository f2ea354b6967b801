use crate::shared::dialogs::confirm;
use crate::shared::state::AppStores;
use contracts::domain::a003_food::filter::sort_foods;
use contracts::domain::a003_food::{Food, FoodFilter, FoodSort};
use contracts::domain::common::now_iso;
use contracts::usecases::u502_meal_planner::{MealPlan, MealSlot, PlanTemplate, Preset};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct PlannerViewModel {
    pub plan: RwSignal<MealPlan>,
    /// Raw text of the target field
    pub target_input: RwSignal<String>,
    /// Slot the food picker is open for
    pub picker: RwSignal<Option<MealSlot>>,
    pub picker_search: RwSignal<String>,
    stores: AppStores,
}

impl PlannerViewModel {
    pub fn new(stores: AppStores) -> Self {
        let target = stores.config.with_value(|c| c.planner.default_target);
        Self {
            plan: RwSignal::new(MealPlan::new(target)),
            target_input: RwSignal::new(target.to_string()),
            picker: RwSignal::new(None),
            picker_search: RwSignal::new(String::new()),
            stores,
        }
    }

    pub fn catalog(&self) -> Vec<Food> {
        self.stores.foods.with(|d| d.foods().to_vec())
    }

    /// Foods offered by the picker, highest protein per serving first
    pub fn picker_foods(&self) -> Vec<Food> {
        let filter = FoodFilter {
            search: self.picker_search.get(),
            ..FoodFilter::default()
        };
        self.stores.foods.with(|d| {
            let mut shown = filter.apply(d.foods());
            sort_foods(&mut shown, FoodSort::ServingDesc);
            shown.into_iter().cloned().collect()
        })
    }

    pub fn apply_target(&self) {
        let raw = self.target_input.get_untracked();
        let target = raw.trim().parse::<u32>().unwrap_or(0);
        let result = self
            .plan
            .try_update(|p| p.set_target(target))
            .unwrap_or(Ok(()));
        match result {
            Ok(()) => self.stores.notices.info(format!("目標を {}g に設定しました", target)),
            Err(e) => {
                self.stores.notices.error(e.to_string());
                let current = self.plan.with_untracked(|p| p.target());
                self.target_input.set(current.to_string());
            }
        }
    }

    pub fn auto_distribute(&self) {
        self.plan.update(|p| p.auto_distribute());
        self.stores.notices.info("目標を朝30%・昼35%・夕35%で配分しました");
    }

    pub fn add_food(&self, slot: MealSlot, food: &Food) {
        self.plan.update(|p| p.add_food(slot, food));
        self.stores
            .notices
            .success(format!("{}に「{}」を追加しました", slot.label(), food.name));
    }

    pub fn set_quantity(&self, slot: MealSlot, food_id: &str, quantity: i64) {
        self.plan.update(|p| p.set_quantity(slot, food_id, quantity));
    }

    pub fn remove(&self, slot: MealSlot, food_id: &str) {
        self.plan.update(|p| p.remove(slot, food_id));
    }

    pub fn clear(&self) {
        if self.plan.with_untracked(|p| p.meals().is_empty()) {
            return;
        }
        if confirm("すべての食事をクリアしますか？") {
            self.plan.update(|p| p.clear());
        }
    }

    pub fn apply_preset(&self, preset: Preset) {
        let catalog = self.catalog();
        let skipped = self
            .plan
            .try_update(|p| p.apply_preset(preset, &catalog))
            .unwrap_or_default();
        self.report_applied(preset.label(), skipped);
    }

    pub fn apply_template(&self, template: &PlanTemplate) {
        let catalog = self.catalog();
        let skipped = self
            .plan
            .try_update(|p| p.apply_template(template, &catalog))
            .unwrap_or_default();
        self.target_input.set(template.target_protein.to_string());
        self.report_applied(template.name, skipped);
    }

    fn report_applied(&self, name: &str, skipped: Vec<String>) {
        if skipped.is_empty() {
            self.stores.notices.success(format!("「{}」を適用しました", name));
        } else {
            self.stores.notices.info(format!(
                "「{}」を適用しました（見つからない食材 {} 件をスキップ: {}）",
                name,
                skipped.len(),
                skipped.join(", ")
            ));
        }
    }

    pub fn save(&self) {
        let result = self
            .stores
            .plans
            .with_value(|store| self.plan.with_untracked(|p| store.save(p, &now_iso())));
        if self.stores.report(result).is_some() {
            self.stores.notices.success("プランを保存しました");
        }
    }

    pub fn load(&self) {
        match self.stores.plans.with_value(|store| store.load()) {
            Ok(Some(plan)) => {
                self.target_input.set(plan.target().to_string());
                self.plan.set(plan);
                self.stores.notices.success("保存したプランを読み込みました");
            }
            Ok(None) => self.stores.notices.info("保存されたプランがありません"),
            Err(e) => self.stores.notices.error(e.to_string()),
        }
    }

    /// Forget the saved plan and start over from the configured target
    pub fn reset(&self) {
        if !confirm("保存したプランを削除して初期状態に戻しますか？") {
            return;
        }
        let result = self.stores.plans.with_value(|store| store.clear());
        if self.stores.report(result).is_some() {
            let target = self.stores.config.with_value(|c| c.planner.default_target);
            self.plan.set(MealPlan::new(target));
            self.target_input.set(target.to_string());
            self.stores.notices.info("プランをリセットしました");
        }
    }
}
