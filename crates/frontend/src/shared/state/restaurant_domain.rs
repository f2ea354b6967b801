//! Store A: restaurants and the menus that reference them.
//!
//! The in-memory collections are the only writable copy. Every mutation is
//! applied to them first and the whole `restaurantData` document is then
//! rewritten. A failed write leaves memory as is and is reported as
//! [`DomainError::Persist`].

use super::error::DomainError;
use crate::shared::storage::KeyValueStore;
use contracts::domain::a001_restaurant::{Restaurant, RestaurantDto, RestaurantId};
use contracts::domain::a002_menu::{analysis, Menu, MenuDto, MenuId};
use contracts::domain::common::{AggregateRoot, Collection, CrudError};
use contracts::shared::{RestaurantSnapshot, StoredEntry};
use contracts::usecases::u501_import_chain_menus::{apply_batch, Chain, ImportSummary};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct RestaurantDomain<S> {
    store: S,
    key: String,
    restaurants: Collection<Restaurant>,
    menus: Collection<Menu>,
    load_error: Option<String>,
    /// Stored value is unreadable and has no backup, so the baseline must not replace it
    keep_stored: bool,
}

impl<S: KeyValueStore> RestaurantDomain<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            restaurants: Collection::default(),
            menus: Collection::default(),
            load_error: None,
            keep_stored: false,
        }
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// Adopt the stored override. Returns false when the baseline is needed.
    ///
    /// An unreadable stored value is copied to its backup key first; when
    /// that copy fails the later baseline stays in memory only.
    pub fn load_override(&mut self) -> bool {
        let snapshot = match StoredEntry::<RestaurantSnapshot>::read(self.store.read(&self.key).as_deref()) {
            StoredEntry::Readable(snapshot) => snapshot,
            StoredEntry::Absent => RestaurantSnapshot::default(),
            StoredEntry::Unreadable { raw, error } => {
                log::error!("'{}' is not readable: {}", self.key, error);
                self.keep_stored = self.store.back_up(&self.key, &raw).is_none();
                RestaurantSnapshot::default()
            }
        };
        if !snapshot.is_override() {
            log::info!("'{}' holds no restaurants, baseline required", self.key);
            return false;
        }
        log::info!(
            "'{}' override: {} restaurants, {} menus",
            self.key,
            snapshot.restaurants.len(),
            snapshot.menus.len()
        );
        self.restaurants = snapshot.restaurants.into();
        self.menus = snapshot.menus.into();
        self.load_error = None;
        true
    }

    /// Adopt the baseline and write it through so the next load finds an override
    pub fn adopt_baseline(&mut self, baseline: RestaurantSnapshot, now: &str) -> Result<(), DomainError> {
        self.restaurants = baseline.restaurants.into();
        self.menus = baseline.menus.into();
        self.load_error = None;
        if self.keep_stored {
            log::error!("'{}' left untouched, baseline kept in memory only", self.key);
            return Ok(());
        }
        self.persist(now)
    }

    /// Baseline could not be loaded; the domain stays empty
    pub fn fail_load(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("restaurant data unavailable: {}", message);
        self.restaurants = Collection::default();
        self.menus = Collection::default();
        self.load_error = Some(message);
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub fn restaurants(&self) -> &[Restaurant] {
        self.restaurants.as_slice()
    }

    pub fn menus(&self) -> &[Menu] {
        self.menus.as_slice()
    }

    pub fn restaurant(&self, id: &str) -> Option<&Restaurant> {
        self.restaurants.find(id)
    }

    pub fn menu(&self, id: &str) -> Option<&Menu> {
        self.menus.find(id)
    }

    /// Parent of a menu, if it still exists
    pub fn parent_of(&self, menu: &Menu) -> Option<&Restaurant> {
        self.restaurants.find(&menu.restaurant_id.0)
    }

    pub fn menus_of(&self, restaurant_id: &str) -> Vec<&Menu> {
        self.menus
            .iter()
            .filter(|m| m.restaurant_id.0 == restaurant_id)
            .collect()
    }

    pub fn menu_counts(&self) -> HashMap<String, usize> {
        analysis::menu_counts(self.menus.as_slice())
    }

    // ------------------------------------------------------------------------
    // Restaurants
    // ------------------------------------------------------------------------

    pub fn create_restaurant(&mut self, dto: &RestaurantDto, now: &str) -> Result<RestaurantId, DomainError> {
        let mut form = dto.clone();
        form.id = None;
        let restaurant = Restaurant::from_dto(&form, now);
        let id = restaurant.id.clone();
        self.restaurants.insert(restaurant)?;
        log::info!("restaurant '{}' created", id.0);
        self.persist(now)?;
        Ok(id)
    }

    pub fn update_restaurant(&mut self, dto: &RestaurantDto, now: &str) -> Result<(), DomainError> {
        let id = require_id(dto.id.as_deref(), Restaurant::collection_name())?;
        if !self.restaurants.contains(&id) {
            return Err(CrudError::NotFound { collection: Restaurant::collection_name(), id }.into());
        }
        self.restaurants.replace(Restaurant::from_dto(dto, now))?;
        log::info!("restaurant '{}' updated", id);
        self.persist(now)
    }

    /// Remove the restaurant and every menu pointing at it. Returns the number of menus removed.
    pub fn delete_restaurant(&mut self, id: &str, now: &str) -> Result<usize, DomainError> {
        self.restaurants.remove(id)?;
        let removed = self.menus.retain(|m| m.restaurant_id.0 != id);
        log::info!("restaurant '{}' deleted with {} menus", id, removed);
        self.persist(now)?;
        Ok(removed)
    }

    // ------------------------------------------------------------------------
    // Menus
    // ------------------------------------------------------------------------

    fn check_parent(&self, restaurant_id: &str) -> Result<(), CrudError> {
        let restaurant_id = restaurant_id.trim();
        if restaurant_id.is_empty() {
            return Err(CrudError::Validation("レストランを選択してください".into()));
        }
        if !self.restaurants.contains(restaurant_id) {
            return Err(CrudError::DanglingReference {
                collection: Restaurant::collection_name(),
                id: restaurant_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn create_menu(&mut self, dto: &MenuDto, now: &str) -> Result<MenuId, DomainError> {
        self.check_parent(&dto.restaurant_id)?;
        let mut form = dto.clone();
        form.id = None;
        form.added_date = None;
        let menu = Menu::from_dto(&form, now);
        let id = menu.id.clone();
        self.menus.insert(menu)?;
        log::info!("menu '{}' created under '{}'", id.0, dto.restaurant_id);
        self.persist(now)?;
        Ok(id)
    }

    /// Replace the menu wholesale; `added_date` is taken from the stored record
    pub fn update_menu(&mut self, dto: &MenuDto, now: &str) -> Result<(), DomainError> {
        let id = require_id(dto.id.as_deref(), Menu::collection_name())?;
        let added_date = match self.menus.find(&id) {
            Some(existing) => existing.added_date.clone(),
            None => {
                return Err(CrudError::NotFound { collection: Menu::collection_name(), id }.into())
            }
        };
        self.check_parent(&dto.restaurant_id)?;
        let mut menu = Menu::from_dto(dto, now);
        menu.added_date = added_date;
        self.menus.replace(menu)?;
        log::info!("menu '{}' updated", id);
        self.persist(now)
    }

    pub fn delete_menu(&mut self, id: &str, now: &str) -> Result<(), DomainError> {
        self.menus.remove(id)?;
        log::info!("menu '{}' deleted", id);
        self.persist(now)
    }

    // ------------------------------------------------------------------------
    // Bulk import
    // ------------------------------------------------------------------------

    pub fn import_chain(&mut self, chain: Chain, now: &str) -> Result<ImportSummary, DomainError> {
        let batch = chain.batch().map_err(|e| DomainError::Malformed(e.to_string()))?;
        let summary = apply_batch(&mut self.restaurants, &mut self.menus, batch, now);
        self.persist(now)?;
        Ok(summary)
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    fn snapshot(&self, now: &str) -> RestaurantSnapshot {
        RestaurantSnapshot {
            restaurants: self.restaurants.as_slice().to_vec(),
            menus: self.menus.as_slice().to_vec(),
            last_updated: Some(now.to_string()),
        }
    }

    fn persist(&self, now: &str) -> Result<(), DomainError> {
        self.store.write_json(&self.key, &self.snapshot(now)).map_err(|e| {
            log::error!("could not write '{}': {}", self.key, e);
            DomainError::Persist(e)
        })
    }

    /// Forget every record, in memory and in storage
    pub fn clear(&mut self) -> Result<(), DomainError> {
        self.restaurants = Collection::default();
        self.menus = Collection::default();
        self.store.remove(&self.key)?;
        Ok(())
    }
}

fn require_id(id: Option<&str>, collection: &'static str) -> Result<String, CrudError> {
    match id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => Ok(id.to_string()),
        None => Err(CrudError::NotFound { collection, id: String::new() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use contracts::domain::a002_menu::{MenuFilter, ProteinBand};

    const KEY: &str = "restaurantData";
    const NOW: &str = "2024-06-01T09:00:00.000Z";

    fn domain(store: &MemoryStorage) -> RestaurantDomain<MemoryStorage> {
        RestaurantDomain::new(store.clone(), KEY)
    }

    fn baseline() -> RestaurantSnapshot {
        serde_json::from_str(
            r#"{
                "restaurants": [
                    {"id": "matsuya", "name": "松屋", "category": "牛丼", "locations": "東京, 大阪"},
                    {"id": "cocoichi", "name": "CoCo壱番屋", "category": "カレー", "established": 1978}
                ],
                "menus": [
                    {"id": "matsuya_gyumeshi", "restaurant_id": "matsuya", "name": "牛めし",
                     "price": "400", "nutrition": {"calories": 692, "protein": "20.2", "carbs": 95.2, "fat": 23.4},
                     "added_date": "2024-01-15"},
                    {"id": "coco_pork", "restaurant_id": "cocoichi", "name": "ポークカレー",
                     "nutrition": {"calories": 750, "protein": 14.5}}
                ]
            }"#,
        )
        .unwrap()
    }

    fn restaurant_form(name: &str, category: &str) -> RestaurantDto {
        RestaurantDto { name: name.into(), category: category.into(), ..Default::default() }
    }

    fn menu_form(restaurant_id: &str, name: &str) -> MenuDto {
        MenuDto {
            restaurant_id: restaurant_id.into(),
            name: name.into(),
            price: "500".into(),
            calories: "300".into(),
            protein: "20".into(),
            carbs: "5".into(),
            fat: "22".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_override_wins_over_baseline() {
        let store = MemoryStorage::new().with_entry(
            KEY,
            r#"{"restaurants":[{"id":"mine","name":"自分の店"}],"menus":[]}"#,
        );
        let mut d = domain(&store);
        assert!(d.load_override());
        assert_eq!(d.restaurants().len(), 1);
        assert_eq!(d.restaurants()[0].name, "自分の店");
    }

    #[test]
    fn test_empty_or_broken_override_requires_baseline() {
        let store = MemoryStorage::new().with_entry(KEY, r#"{"restaurants":[]}"#);
        assert!(!domain(&store).load_override());
        let store = MemoryStorage::new().with_entry(KEY, "not json");
        assert!(!domain(&store).load_override());
        assert!(!domain(&MemoryStorage::new()).load_override());
    }

    #[test]
    fn test_override_with_null_fields_is_adopted() {
        let stored = r#"{"restaurants":[{"id":"mine","name":"自分の店"},{"id":"other","name":"別の店","description":null}],
            "menus":[{"id":"m1","restaurant_id":"mine","name":"x","is_vegan":null}]}"#;
        let store = MemoryStorage::new().with_entry(KEY, stored);
        let mut d = domain(&store);
        assert!(d.load_override());
        assert_eq!(d.restaurants().len(), 2);
        assert_eq!(d.menus().len(), 1);
        assert_eq!(d.restaurant("other").unwrap().description, "");
        assert!(!d.menu("m1").unwrap().is_vegan);
        assert_eq!(store.read(KEY).as_deref(), Some(stored));
    }

    #[test]
    fn test_unreadable_override_is_backed_up_before_baseline() {
        let store = MemoryStorage::new().with_entry(KEY, r#"{"restaurants":[{"id":"mine"#);
        let mut d = domain(&store);
        assert!(!d.load_override());
        d.adopt_baseline(baseline(), NOW).unwrap();

        assert_eq!(store.read("restaurantData.backup").as_deref(), Some(r#"{"restaurants":[{"id":"mine"#));
        assert!(RestaurantSnapshot::parse(store.read(KEY).as_deref(), KEY).is_override());
    }

    #[test]
    fn test_unreadable_override_without_backup_is_not_replaced() {
        let store = MemoryStorage::new().with_entry(KEY, "{broken");
        store.set_read_only(true);
        let mut d = domain(&store);
        assert!(!d.load_override());
        assert!(d.adopt_baseline(baseline(), NOW).is_ok());

        assert!(!d.restaurants().is_empty());
        assert_eq!(store.read(KEY).as_deref(), Some("{broken"));
        assert_eq!(store.read("restaurantData.backup"), None);
    }

    #[test]
    fn test_baseline_materialization_is_idempotent() {
        let store = MemoryStorage::new();
        let mut first = domain(&store);
        assert!(!first.load_override());
        first.adopt_baseline(baseline(), NOW).unwrap();
        let written = store.read(KEY).unwrap();

        let mut second = domain(&store);
        assert!(second.load_override());
        assert_eq!(second.restaurants(), first.restaurants());
        assert_eq!(second.menus(), first.menus());

        second.adopt_baseline(baseline(), NOW).unwrap();
        assert_eq!(store.read(KEY).unwrap(), written);
    }

    #[test]
    fn test_lenient_baseline_fields() {
        let mut d = domain(&MemoryStorage::new());
        d.adopt_baseline(baseline(), NOW).unwrap();
        let matsuya = d.restaurant("matsuya").unwrap();
        assert_eq!(matsuya.locations, vec!["東京", "大阪"]);
        assert_eq!(d.restaurant("cocoichi").unwrap().established, "1978");
        let gyumeshi = d.menu("matsuya_gyumeshi").unwrap();
        assert_eq!(gyumeshi.price, 400);
        assert_eq!(gyumeshi.nutrition.protein, 20.2);
    }

    #[test]
    fn test_test_diner_scenario() {
        let store = MemoryStorage::new();
        let mut d = domain(&store);

        let rid = d.create_restaurant(&restaurant_form("Test Diner", "Cafe"), NOW).unwrap();
        assert!(rid.0.starts_with("restaurant_"));
        let persisted = RestaurantSnapshot::parse(store.read(KEY).as_deref(), KEY);
        assert_eq!(persisted.restaurants[0].name, "Test Diner");

        d.create_menu(&menu_form(&rid.0, "Omelette"), NOW).unwrap();
        let under = d.menus_of(&rid.0);
        assert_eq!(under.len(), 1);
        assert_eq!(under[0].name, "Omelette");
        assert_eq!(under[0].price, 500);
        assert_eq!(d.menu_counts().get(&rid.0), Some(&1));

        let removed = d.delete_restaurant(&rid.0, NOW).unwrap();
        assert_eq!(removed, 1);
        assert!(!d.menus().iter().any(|m| m.name == "Omelette"));
        assert!(!d.restaurants().iter().any(|r| r.name == "Test Diner"));

        let persisted = RestaurantSnapshot::parse(store.read(KEY).as_deref(), KEY);
        assert!(persisted.restaurants.is_empty());
        assert!(persisted.menus.is_empty());
    }

    #[test]
    fn test_delete_cascades_only_to_own_menus() {
        let mut d = domain(&MemoryStorage::new());
        d.adopt_baseline(baseline(), NOW).unwrap();
        d.delete_restaurant("matsuya", NOW).unwrap();
        assert_eq!(d.menus().len(), 1);
        assert_eq!(d.menus()[0].id.0, "coco_pork");
    }

    #[test]
    fn test_menu_requires_existing_restaurant() {
        let mut d = domain(&MemoryStorage::new());
        let err = d.create_menu(&menu_form("ghost", "Soup"), NOW).unwrap_err();
        assert!(matches!(err, DomainError::Crud(CrudError::DanglingReference { .. })));
        let err = d.create_menu(&menu_form("", "Soup"), NOW).unwrap_err();
        assert!(matches!(err, DomainError::Crud(CrudError::Validation(_))));
    }

    #[test]
    fn test_update_keeps_added_date_and_stamps_last_updated() {
        let mut d = domain(&MemoryStorage::new());
        d.adopt_baseline(baseline(), NOW).unwrap();
        let mut form = d.menu("matsuya_gyumeshi").unwrap().to_dto();
        form.added_date = Some("2099-01-01".into());
        form.price = "430".into();
        d.update_menu(&form, "2024-07-01T00:00:00.000Z").unwrap();

        let menu = d.menu("matsuya_gyumeshi").unwrap();
        assert_eq!(menu.price, 430);
        assert_eq!(menu.added_date.as_deref(), Some("2024-01-15"));
        assert_eq!(menu.last_updated.as_deref(), Some("2024-07-01T00:00:00.000Z"));
    }

    #[test]
    fn test_missing_ids_are_referential_misses() {
        let mut d = domain(&MemoryStorage::new());
        let mut form = restaurant_form("x", "y");
        form.id = Some("nope".into());
        assert!(matches!(
            d.update_restaurant(&form, NOW),
            Err(DomainError::Crud(CrudError::NotFound { .. }))
        ));
        assert!(matches!(
            d.delete_menu("nope", NOW),
            Err(DomainError::Crud(CrudError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_write_failure_keeps_memory() {
        let store = MemoryStorage::new();
        let mut d = domain(&store);
        store.set_read_only(true);
        let err = d.create_restaurant(&restaurant_form("Cafe", ""), NOW).unwrap_err();
        assert!(err.is_persist_failure());
        assert_eq!(d.restaurants().len(), 1);
        assert!(store.read(KEY).is_none());
    }

    #[test]
    fn test_logo_edit_is_visible_through_menu_parent() {
        let mut d = domain(&MemoryStorage::new());
        d.adopt_baseline(baseline(), NOW).unwrap();
        let mut form = d.restaurant("matsuya").unwrap().to_dto();
        form.logo_url = "https://example.com/matsuya.png".into();
        d.update_restaurant(&form, NOW).unwrap();
        let menu = d.menu("matsuya_gyumeshi").unwrap();
        assert_eq!(d.parent_of(menu).unwrap().logo.src(), Some("https://example.com/matsuya.png"));
    }

    #[test]
    fn test_bulk_import_through_domain_is_idempotent() {
        let store = MemoryStorage::new();
        let mut d = domain(&store);
        d.adopt_baseline(baseline(), NOW).unwrap();
        let first = d.import_chain(Chain::Subway, NOW).unwrap();
        let after_first: Vec<String> = d.menus().iter().map(|m| m.id.0.clone()).collect();
        let second = d.import_chain(Chain::Subway, NOW).unwrap();
        let after_second: Vec<String> = d.menus().iter().map(|m| m.id.0.clone()).collect();
        assert!(first.restaurant_created);
        assert!(!second.restaurant_created);
        assert_eq!(after_first, after_second);
        assert_eq!(d.restaurants().len(), 3);

        let reloaded = {
            let mut r = domain(&store);
            r.load_override();
            r.menus().len()
        };
        assert_eq!(reloaded, after_second.len());
    }

    #[test]
    fn test_high_protein_filter() {
        let mut d = domain(&MemoryStorage::new());
        d.adopt_baseline(baseline(), NOW).unwrap();
        let filter = MenuFilter { protein: Some(ProteinBand::High), ..Default::default() };
        let hits = filter.apply(d.menus());
        assert_eq!(hits.len(), 1);
        assert!(hits.iter().all(|m| m.nutrition.protein >= 20.0));
    }

    #[test]
    fn test_clear_removes_key() {
        let store = MemoryStorage::new();
        let mut d = domain(&store);
        d.adopt_baseline(baseline(), NOW).unwrap();
        d.clear().unwrap();
        assert!(d.restaurants().is_empty());
        assert!(store.read(KEY).is_none());
    }
}
