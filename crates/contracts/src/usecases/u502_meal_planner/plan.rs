use crate::domain::a003_food::{Food, FoodId};
use crate::domain::common::lenient::decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TARGET: u32 = 70;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("目標タンパク質量は1g以上で入力してください")]
    InvalidTarget,
}

// ============================================================================
// Slots
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub fn all() -> [MealSlot; 3] {
        [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner]
    }

    pub fn key(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "朝食",
            MealSlot::Lunch => "昼食",
            MealSlot::Dinner => "夕食",
        }
    }

    /// Share of the daily target in percent
    fn share(&self) -> u64 {
        match self {
            MealSlot::Breakfast => 30,
            MealSlot::Lunch => 35,
            MealSlot::Dinner => 35,
        }
    }
}

// ============================================================================
// Plan data
// ============================================================================

/// One food line in a meal slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    pub id: FoodId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub serving_size: String,
    #[serde(default, deserialize_with = "decimal")]
    pub protein_per_serving: f64,
    pub quantity: u32,
    /// Serving note carried over from a template, e.g. "120g"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_serving_weight: Option<String>,
}

impl PlanItem {
    pub fn from_food(food: &Food, quantity: u32) -> Self {
        Self {
            id: food.id.clone(),
            name: food.name.clone(),
            category: food.category.clone(),
            serving_size: food.serving_size.clone(),
            protein_per_serving: food.protein_per_serving,
            quantity,
            template_serving_weight: None,
        }
    }

    pub fn protein(&self) -> f64 {
        self.protein_per_serving * self.quantity as f64
    }

    /// "120g × 2" style label
    pub fn serving_label(&self) -> String {
        let weight = self
            .template_serving_weight
            .as_deref()
            .unwrap_or(&self.serving_size);
        format!("{} × {}", weight, self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MealTargets {
    pub breakfast: u32,
    pub lunch: u32,
    pub dinner: u32,
}

impl MealTargets {
    pub fn get(&self, slot: MealSlot) -> u32 {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
        }
    }

    pub fn total(&self) -> u32 {
        self.breakfast + self.lunch + self.dinner
    }

    /// 30 / 35 / 35 split with half-up rounding; dinner absorbs the remainder
    pub fn distribute(target: u32) -> Self {
        let t = target as u64;
        let part = |slot: MealSlot| ((t * slot.share() + 50) / 100) as i64;
        let breakfast = part(MealSlot::Breakfast);
        let lunch = part(MealSlot::Lunch);
        let dinner = part(MealSlot::Dinner);
        let diff = target as i64 - (breakfast + lunch + dinner);
        Self {
            breakfast: breakfast as u32,
            lunch: lunch as u32,
            dinner: (dinner + diff).max(0) as u32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Meals {
    #[serde(default)]
    pub breakfast: Vec<PlanItem>,
    #[serde(default)]
    pub lunch: Vec<PlanItem>,
    #[serde(default)]
    pub dinner: Vec<PlanItem>,
}

impl Meals {
    pub fn get(&self, slot: MealSlot) -> &[PlanItem] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    pub fn get_mut(&mut self, slot: MealSlot) -> &mut Vec<PlanItem> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    pub fn is_empty(&self) -> bool {
        MealSlot::all().iter().all(|s| self.get(*s).is_empty())
    }
}

// ============================================================================
// Plan
// ============================================================================

/// Daily protein plan split into breakfast, lunch and dinner
#[derive(Debug, Clone, PartialEq)]
pub struct MealPlan {
    target: u32,
    meal_targets: MealTargets,
    meals: Meals,
}

impl Default for MealPlan {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET)
    }
}

impl MealPlan {
    pub fn new(target: u32) -> Self {
        let target = target.max(1);
        Self {
            target,
            meal_targets: MealTargets::distribute(target),
            meals: Meals::default(),
        }
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn meal_targets(&self) -> MealTargets {
        self.meal_targets
    }

    pub fn meals(&self) -> &Meals {
        &self.meals
    }

    pub fn items(&self, slot: MealSlot) -> &[PlanItem] {
        self.meals.get(slot)
    }

    /// Only positive targets are accepted; slot targets are re-distributed
    pub fn set_target(&mut self, target: u32) -> Result<(), PlannerError> {
        if target == 0 {
            return Err(PlannerError::InvalidTarget);
        }
        self.target = target;
        self.auto_distribute();
        Ok(())
    }

    pub fn auto_distribute(&mut self) {
        self.meal_targets = MealTargets::distribute(self.target);
    }

    /// Add one serving; an existing line for the same food is incremented
    pub fn add_food(&mut self, slot: MealSlot, food: &Food) {
        let items = self.meals.get_mut(slot);
        match items.iter_mut().find(|item| item.id == food.id) {
            Some(existing) => existing.quantity += 1,
            None => items.push(PlanItem::from_food(food, 1)),
        }
    }

    /// Negative quantities clamp to 0 and a quantity of 0 drops the line
    pub fn set_quantity(&mut self, slot: MealSlot, food_id: &str, quantity: i64) {
        let quantity = quantity.clamp(0, u32::MAX as i64) as u32;
        if quantity == 0 {
            self.remove(slot, food_id);
            return;
        }
        if let Some(item) = self
            .meals
            .get_mut(slot)
            .iter_mut()
            .find(|item| item.id.0 == food_id)
        {
            item.quantity = quantity;
        }
    }

    pub fn remove(&mut self, slot: MealSlot, food_id: &str) {
        self.meals.get_mut(slot).retain(|item| item.id.0 != food_id);
    }

    /// Empty every slot, target is kept
    pub fn clear(&mut self) {
        self.meals = Meals::default();
    }

    pub(crate) fn push_item(&mut self, slot: MealSlot, item: PlanItem) {
        self.meals.get_mut(slot).push(item);
    }

    pub fn slot_protein(&self, slot: MealSlot) -> f64 {
        self.meals.get(slot).iter().map(PlanItem::protein).sum()
    }

    pub fn total_protein(&self) -> f64 {
        MealSlot::all().iter().map(|s| self.slot_protein(*s)).sum()
    }

    pub fn summary(&self) -> PlanSummary {
        let total = self.total_protein();
        let target = self.target as f64;
        let slot_progress = MealSlot::all().map(|slot| {
            let slot_target = self.meal_targets.get(slot) as f64;
            let pct = if slot_target > 0.0 {
                (self.slot_protein(slot) / slot_target * 100.0).min(100.0)
            } else {
                0.0
            };
            (slot, pct)
        });
        PlanSummary {
            total_protein: total,
            target: self.target,
            achievement_percent: (total / target * 100.0).round() as u32,
            remaining: (target - total).max(0.0),
            slot_progress,
        }
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    pub fn to_saved(&self, timestamp: &str) -> SavedPlan {
        SavedPlan {
            target: self.target,
            meal_targets: self.meal_targets,
            meals: self.meals.clone(),
            timestamp: timestamp.to_string(),
        }
    }

    pub fn from_saved(saved: SavedPlan) -> Self {
        let target = saved.target.max(1);
        let meal_targets = if saved.meal_targets.total() == 0 {
            MealTargets::distribute(target)
        } else {
            saved.meal_targets
        };
        Self {
            target,
            meal_targets,
            meals: saved.meals,
        }
    }
}

/// Figures for the summary panel
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    pub total_protein: f64,
    pub target: u32,
    pub achievement_percent: u32,
    pub remaining: f64,
    /// Per slot progress, capped at 100
    pub slot_progress: [(MealSlot, f64); 3],
}

/// Stored form of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlan {
    pub target: u32,
    #[serde(rename = "mealTargets", default)]
    pub meal_targets: MealTargets,
    #[serde(default)]
    pub meals: Meals,
    #[serde(default)]
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_food::FoodDto;

    fn food(id: &str, per_serving: &str) -> Food {
        Food::from_dto(&FoodDto {
            id: Some(id.into()),
            name: id.into(),
            protein_per_serving: per_serving.into(),
            serving_size: "100g".into(),
            ..Default::default()
        })
    }

    #[test]
    fn test_distribute_seventy() {
        let t = MealTargets::distribute(70);
        assert_eq!((t.breakfast, t.lunch, t.dinner), (21, 25, 24));
        assert_eq!(t.total(), 70);
    }

    #[test]
    fn test_distribute_always_sums_to_target() {
        for target in 1..=300 {
            assert_eq!(MealTargets::distribute(target).total(), target, "target {target}");
        }
    }

    #[test]
    fn test_set_target_rejects_zero() {
        let mut plan = MealPlan::default();
        assert_eq!(plan.set_target(0), Err(PlannerError::InvalidTarget));
        assert_eq!(plan.target(), 70);
        plan.set_target(120).unwrap();
        assert_eq!(plan.meal_targets().total(), 120);
    }

    #[test]
    fn test_adding_same_food_twice_increments_quantity() {
        let mut plan = MealPlan::default();
        let chicken = food("chicken_breast", "28");
        plan.add_food(MealSlot::Lunch, &chicken);
        plan.add_food(MealSlot::Lunch, &chicken);
        let items = plan.items(MealSlot::Lunch);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(plan.slot_protein(MealSlot::Lunch), 56.0);
    }

    #[test]
    fn test_quantity_zero_or_negative_removes_line() {
        let mut plan = MealPlan::default();
        plan.add_food(MealSlot::Dinner, &food("natto", "6.6"));
        plan.add_food(MealSlot::Dinner, &food("tofu", "7"));
        plan.set_quantity(MealSlot::Dinner, "natto", 3);
        assert_eq!(plan.items(MealSlot::Dinner)[0].quantity, 3);
        plan.set_quantity(MealSlot::Dinner, "natto", -2);
        assert_eq!(plan.items(MealSlot::Dinner).len(), 1);
        plan.set_quantity(MealSlot::Dinner, "tofu", 0);
        assert!(plan.items(MealSlot::Dinner).is_empty());
    }

    #[test]
    fn test_summary() {
        let mut plan = MealPlan::default();
        plan.add_food(MealSlot::Breakfast, &food("egg", "6.2"));
        plan.add_food(MealSlot::Lunch, &food("chicken_breast", "28"));
        let s = plan.summary();
        assert!((s.total_protein - 34.2).abs() < 1e-9);
        assert_eq!(s.achievement_percent, 49);
        assert!((s.remaining - 35.8).abs() < 1e-9);
        assert_eq!(s.slot_progress[1].1, 100.0);
    }

    #[test]
    fn test_remaining_never_negative() {
        let mut plan = MealPlan::new(10);
        plan.add_food(MealSlot::Lunch, &food("chicken_breast", "28"));
        assert_eq!(plan.summary().remaining, 0.0);
        assert_eq!(plan.summary().achievement_percent, 280);
    }

    #[test]
    fn test_saved_plan_shape_and_restore() {
        let mut plan = MealPlan::new(90);
        plan.add_food(MealSlot::Breakfast, &food("milk", "6.8"));
        let saved = plan.to_saved("2024-06-01T00:00:00.000Z");
        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["target"], 90);
        assert!(json.get("mealTargets").is_some());
        assert_eq!(json["meals"]["breakfast"][0]["quantity"], 1);

        let back: SavedPlan = serde_json::from_value(json).unwrap();
        assert_eq!(MealPlan::from_saved(back), plan);
    }

    #[test]
    fn test_clear_keeps_target() {
        let mut plan = MealPlan::new(100);
        plan.add_food(MealSlot::Lunch, &food("tofu", "7"));
        plan.clear();
        assert!(plan.meals().is_empty());
        assert_eq!(plan.target(), 100);
    }
}
