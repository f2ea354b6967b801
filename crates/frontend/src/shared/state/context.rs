//! Reactive wrappers around the domain stores.
//!
//! `AppStores` is provided once at the root. Views read through the signals
//! and mutate through the methods here, which stamp the time, report failures
//! as notices and return the domain result to the caller.

use super::error::DomainError;
use super::favorites::Favorites;
use super::food_domain::FoodDomain;
use super::plan_store::PlanStore;
use super::restaurant_domain::RestaurantDomain;
use crate::shared::baseline::{fetch_food_baseline, fetch_restaurant_baseline};
use crate::shared::config::AppConfig;
use crate::shared::notice::NoticeService;
use crate::shared::storage::{BrowserStorage, KeyValueStore, StorageError};
use contracts::domain::common::now_iso;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Copy)]
pub struct AppStores {
    pub config: StoredValue<AppConfig>,
    pub restaurants: RwSignal<RestaurantDomain<BrowserStorage>>,
    pub foods: RwSignal<FoodDomain<BrowserStorage>>,
    pub favorites: RwSignal<Favorites<BrowserStorage>>,
    pub plans: StoredValue<PlanStore<BrowserStorage>>,
    pub restaurants_loading: RwSignal<bool>,
    pub foods_loading: RwSignal<bool>,
    pub notices: NoticeService,
}

impl AppStores {
    pub fn new(config: AppConfig, notices: NoticeService) -> Self {
        let store = BrowserStorage;
        let keys = config.storage.clone();
        Self {
            restaurants: RwSignal::new(RestaurantDomain::new(store, keys.restaurants)),
            foods: RwSignal::new(FoodDomain::new(store, keys.foods, keys.categories)),
            favorites: RwSignal::new(Favorites::new(store, keys.favorites)),
            plans: StoredValue::new(PlanStore::new(store, keys.plan)),
            config: StoredValue::new(config),
            restaurants_loading: RwSignal::new(false),
            foods_loading: RwSignal::new(false),
            notices,
        }
    }

    /// Adopt stored overrides and fetch whichever baseline is still missing
    pub fn init(&self) {
        let config = self.config.get_value();

        self.favorites.update(|f| f.load());

        let has_restaurants = self.restaurants.try_update(|d| d.load_override()).unwrap_or(false);
        if !has_restaurants {
            self.restaurants_loading.set(true);
            let this = *self;
            let url = config.baseline.restaurants_url.clone();
            spawn_local(async move {
                match fetch_restaurant_baseline(&url).await {
                    Ok(snapshot) => {
                        let now = now_iso();
                        let result = this
                            .restaurants
                            .try_update(|d| d.adopt_baseline(snapshot, &now))
                            .unwrap_or(Err(DomainError::Disposed));
                        this.report(result);
                    }
                    Err(e) => this
                        .restaurants
                        .update(|d| d.fail_load(format!("レストランデータの読み込みに失敗しました: {:#}", e))),
                }
                this.restaurants_loading.set(false);
            });
        }

        let has_foods = self.foods.try_update(|d| d.load_override()).unwrap_or(false);
        if !has_foods {
            self.foods_loading.set(true);
            let this = *self;
            let url = config.baseline.foods_url.clone();
            spawn_local(async move {
                match fetch_food_baseline(&url).await {
                    Ok(foods) => {
                        let now = now_iso();
                        let result = this
                            .foods
                            .try_update(|d| d.adopt_baseline(foods, &now))
                            .unwrap_or(Err(DomainError::Disposed));
                        this.report(result);
                    }
                    Err(e) => this
                        .foods
                        .update(|d| d.fail_load(format!("食材データの読み込みに失敗しました: {:#}", e))),
                }
                this.foods_loading.set(false);
            });
        }
    }

    /// Show the error of a failed operation; the value is passed through
    pub fn report<T>(&self, result: Result<T, DomainError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.notices.error(e.to_string());
                None
            }
        }
    }

    /// Outcome of a form save; true when the form may close.
    ///
    /// A write failure still closes the form since the record is in memory.
    /// Validation and reference errors stay on the form.
    pub fn settle<T>(
        &self,
        result: Result<T, DomainError>,
        success: &str,
        form_error: RwSignal<Option<String>>,
    ) -> bool {
        match result {
            Ok(_) => {
                form_error.set(None);
                self.notices.success(success);
                true
            }
            Err(e) if e.is_persist_failure() => {
                self.notices.error(e.to_string());
                true
            }
            Err(e) => {
                form_error.set(Some(e.to_string()));
                false
            }
        }
    }

    /// Run a mutation on the restaurant domain with the current timestamp
    pub fn with_restaurants<R>(
        &self,
        f: impl FnOnce(&mut RestaurantDomain<BrowserStorage>, &str) -> Result<R, DomainError>,
    ) -> Result<R, DomainError> {
        let now = now_iso();
        self.restaurants
            .try_update(|d| f(d, &now))
            .unwrap_or(Err(DomainError::Disposed))
    }

    pub fn with_foods<R>(
        &self,
        f: impl FnOnce(&mut FoodDomain<BrowserStorage>, &str) -> Result<R, DomainError>,
    ) -> Result<R, DomainError> {
        let now = now_iso();
        self.foods
            .try_update(|d| f(d, &now))
            .unwrap_or(Err(DomainError::Disposed))
    }

    /// Add or remove a favourite and announce the outcome
    pub fn toggle_favorite(&self, menu_id: &str, menu_name: &str) {
        let is_favorite = self.favorites.with_untracked(|f| f.contains(menu_id));
        let result = self
            .favorites
            .try_update(|f| {
                if is_favorite {
                    f.remove(menu_id).map(|_| false)
                } else {
                    f.add(menu_id)
                }
            })
            .unwrap_or(Err(DomainError::Disposed));

        match result {
            Ok(true) => self.notices.success(format!("「{}」をお気に入りに追加しました", menu_name)),
            Ok(false) if is_favorite => self.notices.info(format!("「{}」をお気に入りから外しました", menu_name)),
            Ok(false) => self.notices.info("既にお気に入りに登録されています"),
            Err(e) => self.notices.error(e.to_string()),
        }
    }

    /// Characters held by this origin's storage
    pub fn storage_usage(&self) -> Result<usize, StorageError> {
        BrowserStorage.usage_chars()
    }

    /// Drop every key this app owns and empty the in-memory stores
    pub fn reset_all(&self) -> Result<(), DomainError> {
        self.with_restaurants(|d, _| d.clear())?;
        self.with_foods(|d, _| d.clear())?;
        self.favorites
            .try_update(|f| f.clear())
            .unwrap_or(Err(DomainError::Disposed))?;
        self.plans.with_value(|p| p.clear())?;

        let config = self.config.get_value();
        for key in config.owned_keys() {
            BrowserStorage.remove(key)?;
        }
        log::warn!("all stored data was reset");
        Ok(())
    }
}

pub fn use_stores() -> AppStores {
    use_context::<AppStores>().expect("AppStores not provided in context")
}
