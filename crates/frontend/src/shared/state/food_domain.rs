//! Store B: foods and food categories.
//!
//! Foods are written as `{ foods, lastUpdated }`, categories as a bare array
//! under their own key.

use super::error::DomainError;
use crate::shared::storage::KeyValueStore;
use contracts::domain::a003_food::{Food, FoodDto, FoodId};
use contracts::domain::a004_food_category::{Category, CategoryDto, CategoryId};
use contracts::domain::common::{AggregateRoot, Collection, CrudError};
use contracts::shared::{FoodsSnapshot, StoredEntry};
use contracts::usecases::u503_food_exchange::{ExportDocument, ImportedData};

#[derive(Debug, Clone)]
pub struct FoodDomain<S> {
    store: S,
    foods_key: String,
    categories_key: String,
    foods: Collection<Food>,
    categories: Collection<Category>,
    load_error: Option<String>,
    /// Stored foods are unreadable and have no backup, so the baseline must not replace them
    keep_stored: bool,
}

impl<S: KeyValueStore> FoodDomain<S> {
    pub fn new(store: S, foods_key: impl Into<String>, categories_key: impl Into<String>) -> Self {
        Self {
            store,
            foods_key: foods_key.into(),
            categories_key: categories_key.into(),
            foods: Collection::default(),
            categories: Collection::default(),
            load_error: None,
            keep_stored: false,
        }
    }

    /// Read categories and, when present, the foods override.
    /// Returns false when the food baseline is needed.
    ///
    /// Unreadable stored values are copied to their backup keys before
    /// anything can overwrite them.
    pub fn load_override(&mut self) -> bool {
        let categories_raw = self.store.read(&self.categories_key);
        self.categories = match StoredEntry::<Vec<Category>>::read(categories_raw.as_deref()) {
            StoredEntry::Readable(categories) => categories.into(),
            StoredEntry::Absent => Collection::default(),
            StoredEntry::Unreadable { raw, error } => {
                log::error!("'{}' is not readable: {}", self.categories_key, error);
                self.store.back_up(&self.categories_key, &raw);
                Collection::default()
            }
        };

        let foods_raw = self.store.read(&self.foods_key);
        let snapshot = match StoredEntry::<FoodsSnapshot>::read(foods_raw.as_deref()) {
            StoredEntry::Readable(snapshot) => snapshot,
            StoredEntry::Absent => FoodsSnapshot::default(),
            StoredEntry::Unreadable { raw, error } => {
                log::error!("'{}' is not readable: {}", self.foods_key, error);
                self.keep_stored = self.store.back_up(&self.foods_key, &raw).is_none();
                FoodsSnapshot::default()
            }
        };
        if !snapshot.is_override() {
            log::info!("'{}' holds no foods, baseline required", self.foods_key);
            return false;
        }
        log::info!("'{}' override: {} foods", self.foods_key, snapshot.foods.len());
        self.foods = snapshot.foods.into();
        self.load_error = None;
        true
    }

    pub fn adopt_baseline(&mut self, foods: Vec<Food>, now: &str) -> Result<(), DomainError> {
        self.foods = foods.into();
        self.load_error = None;
        if self.keep_stored {
            log::error!("'{}' left untouched, baseline kept in memory only", self.foods_key);
            return Ok(());
        }
        self.persist_foods(now)
    }

    pub fn fail_load(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("food data unavailable: {}", message);
        self.foods = Collection::default();
        self.load_error = Some(message);
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn foods(&self) -> &[Food] {
        self.foods.as_slice()
    }

    pub fn categories(&self) -> &[Category] {
        self.categories.as_slice()
    }

    pub fn food(&self, id: &str) -> Option<&Food> {
        self.foods.find(id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.find(id)
    }

    // ------------------------------------------------------------------------
    // Foods
    // ------------------------------------------------------------------------

    pub fn create_food(&mut self, dto: &FoodDto, now: &str) -> Result<FoodId, DomainError> {
        let mut form = dto.clone();
        form.id = None;
        let food = Food::from_dto(&form);
        let id = food.id.clone();
        self.foods.insert(food)?;
        log::info!("food '{}' created", id.0);
        self.persist_foods(now)?;
        Ok(id)
    }

    pub fn update_food(&mut self, dto: &FoodDto, now: &str) -> Result<(), DomainError> {
        let id = existing_id(dto.id.as_deref(), &self.foods)?;
        self.foods.replace(Food::from_dto(dto))?;
        log::info!("food '{}' updated", id);
        self.persist_foods(now)
    }

    pub fn delete_food(&mut self, id: &str, now: &str) -> Result<(), DomainError> {
        self.foods.remove(id)?;
        log::info!("food '{}' deleted", id);
        self.persist_foods(now)
    }

    // ------------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------------

    pub fn create_category(&mut self, dto: &CategoryDto) -> Result<CategoryId, DomainError> {
        let mut form = dto.clone();
        form.id = None;
        let category = Category::from_dto(&form);
        let id = category.id.clone();
        self.categories.insert(category)?;
        self.persist_categories()?;
        Ok(id)
    }

    pub fn update_category(&mut self, dto: &CategoryDto) -> Result<(), DomainError> {
        existing_id(dto.id.as_deref(), &self.categories)?;
        self.categories.replace(Category::from_dto(dto))?;
        self.persist_categories()
    }

    pub fn delete_category(&mut self, id: &str) -> Result<(), DomainError> {
        self.categories.remove(id)?;
        self.persist_categories()
    }

    // ------------------------------------------------------------------------
    // Exchange
    // ------------------------------------------------------------------------

    pub fn export_document(&self, now: &str) -> ExportDocument {
        ExportDocument::new(self.foods.as_slice(), self.categories.as_slice(), now)
    }

    /// Replace every collection present in the file. The file was validated
    /// as a whole beforehand, so nothing here can fail half way in memory.
    pub fn apply_import(&mut self, data: ImportedData, now: &str) -> Result<(), DomainError> {
        let ImportedData { foods, categories } = data;
        let foods_changed = foods.is_some();
        let categories_changed = categories.is_some();

        if let Some(foods) = foods {
            log::info!("import: replacing foods with {} records", foods.len());
            self.foods = foods.into();
        }
        if let Some(categories) = categories {
            log::info!("import: replacing categories with {} records", categories.len());
            self.categories = categories.into();
        }

        // both writes are attempted; the first failure is reported
        let foods_written = if foods_changed { self.persist_foods(now) } else { Ok(()) };
        let categories_written = if categories_changed { self.persist_categories() } else { Ok(()) };
        foods_written.and(categories_written)
    }

    pub fn clear(&mut self) -> Result<(), DomainError> {
        self.foods = Collection::default();
        self.categories = Collection::default();
        self.store.remove(&self.foods_key)?;
        self.store.remove(&self.categories_key)?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    fn persist_foods(&self, now: &str) -> Result<(), DomainError> {
        let snapshot = FoodsSnapshot {
            foods: self.foods.as_slice().to_vec(),
            last_updated: Some(now.to_string()),
        };
        self.store.write_json(&self.foods_key, &snapshot).map_err(|e| {
            log::error!("could not write '{}': {}", self.foods_key, e);
            DomainError::Persist(e)
        })
    }

    fn persist_categories(&self) -> Result<(), DomainError> {
        self.store
            .write_json(&self.categories_key, self.categories.as_slice())
            .map_err(|e| {
                log::error!("could not write '{}': {}", self.categories_key, e);
                DomainError::Persist(e)
            })
    }
}

fn existing_id<T: AggregateRoot>(id: Option<&str>, items: &Collection<T>) -> Result<String, CrudError> {
    let id = id.map(str::trim).unwrap_or_default();
    if id.is_empty() || !items.contains(id) {
        return Err(CrudError::NotFound { collection: T::collection_name(), id: id.to_string() });
    }
    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use contracts::domain::a003_food::BaselineDocument;
    use contracts::usecases::u503_food_exchange::parse_import;

    const FOODS: &str = "foodsData";
    const CATEGORIES: &str = "categories";
    const NOW: &str = "2024-06-01T09:00:00.000Z";

    fn domain(store: &MemoryStorage) -> FoodDomain<MemoryStorage> {
        FoodDomain::new(store.clone(), FOODS, CATEGORIES)
    }

    fn baseline() -> Vec<Food> {
        let doc: BaselineDocument = serde_json::from_str(
            r#"{"recommended_foods": [
                {"id": "chicken_breast", "name": "鶏むね肉", "category": "肉類",
                 "protein_per_100g": 23.3, "protein_per_serving": 28, "serving_size": "120g"},
                {"id": "tofu", "name": "木綿豆腐", "category": "大豆製品", "protein_per_100g": 7}
            ]}"#,
        )
        .unwrap();
        doc.into_foods()
    }

    #[test]
    fn test_baseline_adopted_and_persisted_in_camel_case() {
        let store = MemoryStorage::new();
        let mut d = domain(&store);
        assert!(!d.load_override());
        d.adopt_baseline(baseline(), NOW).unwrap();

        let raw = store.read(FOODS).unwrap();
        assert!(raw.contains("proteinPer100g"));
        assert!(raw.contains("lastUpdated"));

        let mut again = domain(&store);
        assert!(again.load_override());
        assert_eq!(again.foods(), d.foods());
        assert_eq!(again.food("tofu").unwrap().rating, 4);
    }

    #[test]
    fn test_override_with_null_fields_is_adopted() {
        let stored = r#"{"foods":[{"id":"tofu","name":"豆腐"},{"id":"egg","name":"卵","servingSize":null}]}"#;
        let store = MemoryStorage::new().with_entry(FOODS, stored);
        let mut d = domain(&store);
        assert!(d.load_override());
        assert_eq!(d.foods().len(), 2);
        assert_eq!(d.food("egg").unwrap().serving_size, "");
        assert_eq!(store.read(FOODS).as_deref(), Some(stored));
    }

    #[test]
    fn test_unreadable_foods_are_backed_up_before_baseline() {
        let store = MemoryStorage::new()
            .with_entry(FOODS, r#"{"foods":[{"id":"tofu""#)
            .with_entry(CATEGORIES, "[{");
        let mut d = domain(&store);
        assert!(!d.load_override());
        assert!(d.categories().is_empty());
        d.adopt_baseline(baseline(), NOW).unwrap();

        assert_eq!(store.read("foodsData.backup").as_deref(), Some(r#"{"foods":[{"id":"tofu""#));
        assert_eq!(store.read("categories.backup").as_deref(), Some("[{"));
        assert!(FoodsSnapshot::parse(store.read(FOODS).as_deref(), FOODS).is_override());
    }

    #[test]
    fn test_unreadable_foods_without_backup_are_not_replaced() {
        let store = MemoryStorage::new().with_entry(FOODS, "{broken");
        store.reject_writes_to("foodsData.backup");
        let mut d = domain(&store);
        assert!(!d.load_override());
        d.adopt_baseline(baseline(), NOW).unwrap();

        assert_eq!(d.foods().len(), 2);
        assert_eq!(store.read(FOODS).as_deref(), Some("{broken"));
    }

    #[test]
    fn test_categories_are_a_bare_array() {
        let store = MemoryStorage::new();
        let mut d = domain(&store);
        d.load_override();
        assert!(d.categories().is_empty());

        let id = d
            .create_category(&CategoryDto { name: "肉類".into(), ..Default::default() })
            .unwrap();
        let raw = store.read(CATEGORIES).unwrap();
        assert!(raw.starts_with('['));
        assert_eq!(d.category(&id.0).unwrap().emoji, "📄");
    }

    #[test]
    fn test_food_crud() {
        let mut d = domain(&MemoryStorage::new());
        d.adopt_baseline(baseline(), NOW).unwrap();

        let id = d
            .create_food(&FoodDto { name: "ギリシャヨーグルト".into(), rating: "5".into(), ..Default::default() }, NOW)
            .unwrap();
        assert_eq!(d.foods().len(), 3);

        let mut form = d.food(&id.0).unwrap().to_dto();
        form.protein_per_serving = "10".into();
        d.update_food(&form, NOW).unwrap();
        assert_eq!(d.food(&id.0).unwrap().protein_per_serving, 10.0);

        d.delete_food(&id.0, NOW).unwrap();
        assert!(d.food(&id.0).is_none());
        assert!(matches!(
            d.delete_food(&id.0, NOW),
            Err(DomainError::Crud(CrudError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut d = domain(&MemoryStorage::new());
        let err = d.create_food(&FoodDto::default(), NOW).unwrap_err();
        assert!(matches!(err, DomainError::Crud(CrudError::Validation(_))));
        assert!(d.foods().is_empty());
    }

    #[test]
    fn test_import_replaces_only_present_collections() {
        let store = MemoryStorage::new();
        let mut d = domain(&store);
        d.adopt_baseline(baseline(), NOW).unwrap();
        d.create_category(&CategoryDto { name: "既存".into(), ..Default::default() })
            .unwrap();

        let data = parse_import(r#"{"foods": [{"id": "egg", "name": "卵"}]}"#).unwrap();
        d.apply_import(data, NOW).unwrap();

        assert_eq!(d.foods().len(), 1);
        assert_eq!(d.foods()[0].id.0, "egg");
        assert_eq!(d.categories().len(), 1);
        let persisted = FoodsSnapshot::parse(store.read(FOODS).as_deref(), FOODS);
        assert_eq!(persisted.foods.len(), 1);
    }

    #[test]
    fn test_import_writes_categories_even_when_foods_fail() {
        let store = MemoryStorage::new();
        let mut d = domain(&store);
        d.adopt_baseline(baseline(), NOW).unwrap();
        store.reject_writes_to(FOODS);

        let data = parse_import(
            r#"{"foods": [{"id": "egg", "name": "卵"}], "categories": [{"id": "meat", "name": "肉類"}]}"#,
        )
        .unwrap();
        let err = d.apply_import(data, NOW).unwrap_err();

        assert!(err.is_persist_failure());
        assert_eq!(d.foods().len(), 1);
        assert_eq!(d.categories().len(), 1);
        let stored: Vec<Category> = store.read_json(CATEGORIES).unwrap();
        assert_eq!(stored[0].id.0, "meat");
        assert_eq!(FoodsSnapshot::parse(store.read(FOODS).as_deref(), FOODS).foods.len(), 2);
    }

    #[test]
    fn test_export_then_import_restores_state() {
        let mut d = domain(&MemoryStorage::new());
        d.adopt_baseline(baseline(), NOW).unwrap();
        d.create_category(&CategoryDto { name: "肉類".into(), emoji: "🍗".into(), ..Default::default() })
            .unwrap();
        let json = d.export_document(NOW).to_pretty_json().unwrap();

        let mut other = domain(&MemoryStorage::new());
        other.apply_import(parse_import(&json).unwrap(), NOW).unwrap();
        assert_eq!(other.foods(), d.foods());
        assert_eq!(other.categories(), d.categories());
    }

    #[test]
    fn test_clear() {
        let store = MemoryStorage::new();
        let mut d = domain(&store);
        d.adopt_baseline(baseline(), NOW).unwrap();
        d.clear().unwrap();
        assert!(d.foods().is_empty());
        assert!(store.read(FOODS).is_none());
    }
}
