use super::chain::ChainBatch;
use crate::domain::a001_restaurant::Restaurant;
use crate::domain::a002_menu::Menu;
use crate::domain::common::Collection;
use serde::{Deserialize, Serialize};

/// Outcome of one bulk import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub restaurant_id: String,
    pub restaurant_name: String,
    /// Parent restaurant was missing and got inserted
    pub restaurant_created: bool,
    /// Menus of this chain that were dropped before the batch was appended
    pub replaced: usize,
    pub imported: usize,
}

impl ImportSummary {
    pub fn message(&self) -> String {
        format!(
            "{}メニュー {} 件を正常にインポートしました！",
            self.restaurant_name, self.imported
        )
    }
}

/// Replace every menu of the batch's chain with the batch.
///
/// The parent restaurant is inserted only when absent, so local edits to it
/// survive. Applying the same batch twice leaves the same final state apart
/// from `last_updated`.
pub fn apply_batch(
    restaurants: &mut Collection<Restaurant>,
    menus: &mut Collection<Menu>,
    batch: ChainBatch,
    now: &str,
) -> ImportSummary {
    let ChainBatch { restaurant, menus: batch_menus } = batch;
    let chain_id = restaurant.id.clone();

    let restaurant_name = restaurants
        .find(&chain_id.0)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| restaurant.name.clone());

    let restaurant_created = if restaurants.contains(&chain_id.0) {
        false
    } else {
        log::info!("bulk import: adding missing restaurant '{}'", chain_id.0);
        restaurants.extend(std::iter::once(Restaurant {
            last_updated: Some(now.to_string()),
            ..restaurant
        }));
        true
    };

    let replaced = menus.retain(|m| m.restaurant_id != chain_id);

    let stamped: Vec<Menu> = batch_menus
        .into_iter()
        .map(|mut m| {
            m.restaurant_id = chain_id.clone();
            m.last_updated = Some(now.to_string());
            m
        })
        .collect();
    let imported = stamped.len();
    menus.extend(stamped);

    log::info!(
        "bulk import '{}': {} replaced, {} imported",
        chain_id.0,
        replaced,
        imported
    );

    ImportSummary {
        restaurant_id: chain_id.0,
        restaurant_name,
        restaurant_created,
        replaced,
        imported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_menu::MenuDto;
    use crate::usecases::u501_import_chain_menus::Chain;

    fn other_menu(restaurant: &str, id: &str) -> Menu {
        Menu::from_dto(
            &MenuDto {
                id: Some(id.into()),
                restaurant_id: restaurant.into(),
                name: id.into(),
                ..Default::default()
            },
            "2024-01-01",
        )
    }

    #[test]
    fn test_creates_missing_parent_and_appends_batch() {
        let mut restaurants = Collection::default();
        let mut menus = Collection::new(vec![other_menu("subway", "keep_me")]);
        let batch = Chain::Ootoya.batch().unwrap();
        let expected = batch.menus.len();

        let summary = apply_batch(&mut restaurants, &mut menus, batch, "2024-06-01T00:00:00.000Z");

        assert!(summary.restaurant_created);
        assert_eq!(summary.imported, expected);
        assert_eq!(summary.replaced, 0);
        assert_eq!(restaurants.len(), 1);
        assert_eq!(restaurants.find("ootoya").unwrap().name, "大戸屋");
        assert_eq!(menus.len(), expected + 1);
        assert!(menus.contains("keep_me"));
        assert!(menus
            .iter()
            .filter(|m| m.restaurant_id.0 == "ootoya")
            .all(|m| m.last_updated.as_deref() == Some("2024-06-01T00:00:00.000Z")));
    }

    #[test]
    fn test_import_is_idempotent() {
        let mut restaurants = Collection::default();
        let mut menus = Collection::default();

        apply_batch(&mut restaurants, &mut menus, Chain::Yayoiken.batch().unwrap(), "t1");
        let first_ids: Vec<String> = menus.iter().map(|m| m.id.0.clone()).collect();

        let summary = apply_batch(&mut restaurants, &mut menus, Chain::Yayoiken.batch().unwrap(), "t2");
        let second_ids: Vec<String> = menus.iter().map(|m| m.id.0.clone()).collect();

        assert!(!summary.restaurant_created);
        assert_eq!(summary.replaced, first_ids.len());
        assert_eq!(first_ids, second_ids);
        assert_eq!(restaurants.len(), 1);
    }

    #[test]
    fn test_existing_parent_is_left_untouched() {
        let mut parent = Chain::Subway.batch().unwrap().restaurant;
        parent.name = "SUBWAY 渋谷店".into();
        let mut restaurants = Collection::new(vec![parent]);
        let mut menus = Collection::new(vec![other_menu("subway", "subway_old_item")]);

        let summary = apply_batch(&mut restaurants, &mut menus, Chain::Subway.batch().unwrap(), "now");

        assert_eq!(restaurants.find("subway").unwrap().name, "SUBWAY 渋谷店");
        assert_eq!(summary.replaced, 1);
        assert!(!menus.contains("subway_old_item"));
        assert_eq!(summary.message(), format!("SUBWAY 渋谷店メニュー {} 件を正常にインポートしました！", summary.imported));
    }

    #[test]
    fn test_dietary_flags_default_to_false() {
        let mut restaurants = Collection::default();
        let mut menus = Collection::default();
        apply_batch(&mut restaurants, &mut menus, Chain::Yoshinoya.batch().unwrap(), "now");
        assert!(menus.iter().all(|m| !m.is_vegetarian && !m.is_vegan && !m.is_gluten_free));
    }
}
