use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub storage: StorageKeys,
    pub baseline: BaselineConfig,
    pub planner: PlannerConfig,
}

/// Keys under which each document is persisted
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StorageKeys {
    pub restaurants: String,
    pub foods: String,
    pub categories: String,
    pub favorites: String,
    pub plan: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BaselineConfig {
    pub restaurants_url: String,
    pub foods_url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PlannerConfig {
    pub default_target: u32,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[storage]
restaurants = "restaurantData"
foods = "foodsData"
categories = "categories"
favorites = "favoriteMenus"
plan = "proteinPlan"

[baseline]
restaurants_url = "data/restaurant-data.json"
foods_url = "data/recommended-foods.json"

[planner]
default_target = 70
"#;

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        Ok(toml::from_str(DEFAULT_CONFIG)?)
    }

    /// Keys this app owns, cleared by "reset all"
    pub fn owned_keys(&self) -> [&str; 5] {
        [
            &self.storage.restaurants,
            &self.storage.foods,
            &self.storage.categories,
            &self.storage.favorites,
            &self.storage.plan,
        ]
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::error!("embedded configuration is invalid: {}", e);
                Self {
                    storage: StorageKeys {
                        restaurants: "restaurantData".into(),
                        foods: "foodsData".into(),
                        categories: "categories".into(),
                        favorites: "favoriteMenus".into(),
                        plan: "proteinPlan".into(),
                    },
                    baseline: BaselineConfig {
                        restaurants_url: "data/restaurant-data.json".into(),
                        foods_url: "data/recommended-foods.json".into(),
                    },
                    planner: PlannerConfig { default_target: 70 },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::load();
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.storage.restaurants, "restaurantData");
        assert_eq!(config.storage.categories, "categories");
        assert_eq!(config.planner.default_target, 70);
        assert_eq!(config.owned_keys().len(), 5);
    }
}
