use super::error::DomainError;
use crate::shared::storage::KeyValueStore;
use contracts::usecases::u502_meal_planner::{MealPlan, SavedPlan};

/// Saved planner state under a single key
#[derive(Debug, Clone)]
pub struct PlanStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PlanStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    pub fn save(&self, plan: &MealPlan, timestamp: &str) -> Result<(), DomainError> {
        self.store.write_json(&self.key, &plan.to_saved(timestamp))?;
        log::info!("plan saved under '{}'", self.key);
        Ok(())
    }

    /// `Ok(None)` when nothing was saved yet
    pub fn load(&self) -> Result<Option<MealPlan>, DomainError> {
        let Some(raw) = self.store.read(&self.key) else {
            return Ok(None);
        };
        let saved: SavedPlan = serde_json::from_str(&raw).map_err(|e| {
            log::warn!("saved plan '{}' is not readable: {}", self.key, e);
            DomainError::Malformed(e.to_string())
        })?;
        Ok(Some(MealPlan::from_saved(saved)))
    }

    pub fn clear(&self) -> Result<(), DomainError> {
        self.store.remove(&self.key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use contracts::domain::a003_food::Food;
    use contracts::usecases::u502_meal_planner::MealSlot;

    fn egg() -> Food {
        serde_json::from_str(r#"{"id":"egg","name":"卵","servingSize":"1個","proteinPerServing":6.2}"#)
            .unwrap()
    }

    #[test]
    fn test_absent_plan_is_none() {
        let plans = PlanStore::new(MemoryStorage::new(), "proteinPlan");
        assert!(plans.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStorage::new();
        let plans = PlanStore::new(store.clone(), "proteinPlan");
        let mut plan = MealPlan::new(90);
        plan.add_food(MealSlot::Breakfast, &egg());
        plan.add_food(MealSlot::Breakfast, &egg());
        plans.save(&plan, "2024-06-01T07:00:00.000Z").unwrap();

        let raw = store.read("proteinPlan").unwrap();
        assert!(raw.contains("mealTargets"));

        let loaded = plans.load().unwrap().unwrap();
        assert_eq!(loaded.target(), 90);
        assert_eq!(loaded.items(MealSlot::Breakfast)[0].quantity, 2);
    }

    #[test]
    fn test_unreadable_plan_is_an_error() {
        let store = MemoryStorage::new().with_entry("proteinPlan", "[1,2");
        let plans = PlanStore::new(store, "proteinPlan");
        assert!(matches!(plans.load(), Err(DomainError::Malformed(_))));
    }
}
