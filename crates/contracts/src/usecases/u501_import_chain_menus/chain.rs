use crate::domain::a001_restaurant::Restaurant;
use crate::domain::a002_menu::Menu;
use serde::{Deserialize, Serialize};

/// Restaurant chains that ship a literal menu batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chain {
    Yoshinoya,
    Subway,
    Ootoya,
    Yayoiken,
}

/// Parent restaurant plus the complete menu list of one chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainBatch {
    pub restaurant: Restaurant,
    pub menus: Vec<Menu>,
}

impl Chain {
    pub fn all() -> [Chain; 4] {
        [Chain::Yoshinoya, Chain::Subway, Chain::Ootoya, Chain::Yayoiken]
    }

    /// Restaurant id the batch is keyed by
    pub fn restaurant_id(&self) -> &'static str {
        match self {
            Chain::Yoshinoya => "yoshinoya",
            Chain::Subway => "subway",
            Chain::Ootoya => "ootoya",
            Chain::Yayoiken => "yayoiken",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Chain::Yoshinoya => "吉野家",
            Chain::Subway => "サブウェイ",
            Chain::Ootoya => "大戸屋",
            Chain::Yayoiken => "やよい軒",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            Chain::Yoshinoya => include_str!("../../../data/chains/yoshinoya.json"),
            Chain::Subway => include_str!("../../../data/chains/subway.json"),
            Chain::Ootoya => include_str!("../../../data/chains/ootoya.json"),
            Chain::Yayoiken => include_str!("../../../data/chains/yayoiken.json"),
        }
    }

    /// Parse the embedded batch
    pub fn batch(&self) -> Result<ChainBatch, serde_json::Error> {
        serde_json::from_str(self.source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_batch_parses_and_belongs_to_its_chain() {
        for chain in Chain::all() {
            let batch = chain.batch().unwrap();
            assert_eq!(batch.restaurant.id.0, chain.restaurant_id());
            assert_eq!(batch.restaurant.name, chain.label());
            assert!(!batch.menus.is_empty());
            assert!(batch
                .menus
                .iter()
                .all(|m| m.restaurant_id.0 == chain.restaurant_id()));
        }
    }

    #[test]
    fn test_known_literals() {
        let yoshinoya = Chain::Yoshinoya.batch().unwrap();
        let gyudon = yoshinoya
            .menus
            .iter()
            .find(|m| m.id.0 == "yoshinoya_gyudon_regular")
            .unwrap();
        assert_eq!(gyudon.price, 426);
        assert_eq!(gyudon.nutrition.calories, 633);
        assert_eq!(gyudon.nutrition.protein, 19.6);
        assert_eq!(gyudon.nutrition.sodium, 2500);

        let subway = Chain::Subway.batch().unwrap();
        let blt = subway.menus.iter().find(|m| m.id.0 == "subway_blt").unwrap();
        assert_eq!(blt.allergens, vec!["卵", "乳", "小麦", "豚肉"]);

        let ootoya = Chain::Ootoya.batch().unwrap();
        assert_eq!(ootoya.restaurant.category, "定食・丼");
        let power = ootoya.menus.iter().find(|m| m.id.0 == "ootoya_karasuno_power").unwrap();
        assert!(power.seasonal);
    }

    #[test]
    fn test_menu_ids_unique_within_batch() {
        for chain in Chain::all() {
            let batch = chain.batch().unwrap();
            let mut ids: Vec<&str> = batch.menus.iter().map(|m| m.id.0.as_str()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), batch.menus.len(), "{:?}", chain);
        }
    }
}
