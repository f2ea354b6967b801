use super::aggregate::Menu;
use crate::domain::common::parse_timestamp;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// Bands
// ============================================================================

/// Protein band: low < 10 g ≤ medium < 20 g ≤ high
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProteinBand {
    Low,
    Medium,
    High,
}

impl ProteinBand {
    pub fn of(protein: f64) -> Self {
        if protein >= 20.0 {
            ProteinBand::High
        } else if protein >= 10.0 {
            ProteinBand::Medium
        } else {
            ProteinBand::Low
        }
    }

    pub fn all() -> [Self; 3] {
        [ProteinBand::High, ProteinBand::Medium, ProteinBand::Low]
    }

    pub fn key(&self) -> &'static str {
        match self {
            ProteinBand::Low => "low",
            ProteinBand::Medium => "medium",
            ProteinBand::High => "high",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|b| b.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProteinBand::Low => "低タンパク（10g未満）",
            ProteinBand::Medium => "中タンパク（10-20g）",
            ProteinBand::High => "高タンパク（20g以上）",
        }
    }
}

/// Calorie band: low < 300 kcal ≤ medium < 500 kcal ≤ high
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieBand {
    Low,
    Medium,
    High,
}

impl CalorieBand {
    pub fn of(calories: u32) -> Self {
        if calories >= 500 {
            CalorieBand::High
        } else if calories >= 300 {
            CalorieBand::Medium
        } else {
            CalorieBand::Low
        }
    }

    pub fn all() -> [Self; 3] {
        [CalorieBand::Low, CalorieBand::Medium, CalorieBand::High]
    }

    pub fn key(&self) -> &'static str {
        match self {
            CalorieBand::Low => "low",
            CalorieBand::Medium => "medium",
            CalorieBand::High => "high",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|b| b.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CalorieBand::Low => "低カロリー（300kcal未満）",
            CalorieBand::Medium => "中カロリー（300-500kcal）",
            CalorieBand::High => "高カロリー（500kcal以上）",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryFlag {
    Vegetarian,
    Vegan,
    GlutenFree,
}

impl DietaryFlag {
    pub fn all() -> [Self; 3] {
        [DietaryFlag::Vegetarian, DietaryFlag::Vegan, DietaryFlag::GlutenFree]
    }

    pub fn key(&self) -> &'static str {
        match self {
            DietaryFlag::Vegetarian => "vegetarian",
            DietaryFlag::Vegan => "vegan",
            DietaryFlag::GlutenFree => "gluten_free",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|f| f.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DietaryFlag::Vegetarian => "ベジタリアン",
            DietaryFlag::Vegan => "ヴィーガン",
            DietaryFlag::GlutenFree => "グルテンフリー",
        }
    }

    pub fn holds(&self, m: &Menu) -> bool {
        match self {
            DietaryFlag::Vegetarian => m.is_vegetarian,
            DietaryFlag::Vegan => m.is_vegan,
            DietaryFlag::GlutenFree => m.is_gluten_free,
        }
    }
}

// ============================================================================
// Filter
// ============================================================================

/// Conjunctive menu filter; unset criteria match everything
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuFilter {
    pub search: String,
    pub restaurant_id: String,
    pub category: String,
    pub protein: Option<ProteinBand>,
    pub calories: Option<CalorieBand>,
    pub dietary: Option<DietaryFlag>,
}

impl MenuFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, m: &Menu) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty()
            && !m.name.to_lowercase().contains(&search)
            && !m.description.to_lowercase().contains(&search)
        {
            return false;
        }
        if !self.restaurant_id.is_empty() && m.restaurant_id.0 != self.restaurant_id {
            return false;
        }
        if !self.category.is_empty() && m.category != self.category {
            return false;
        }
        if let Some(band) = self.protein {
            if ProteinBand::of(m.nutrition.protein) != band {
                return false;
            }
        }
        if let Some(band) = self.calories {
            if CalorieBand::of(m.nutrition.calories) != band {
                return false;
            }
        }
        if let Some(flag) = self.dietary {
            if !flag.holds(m) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, items: &'a [Menu]) -> Vec<&'a Menu> {
        items.iter().filter(|m| self.matches(m)).collect()
    }
}

// ============================================================================
// Sort
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuSort {
    #[default]
    Name,
    ProteinDesc,
    ProteinAsc,
    CaloriesDesc,
    CaloriesAsc,
    PriceDesc,
    PriceAsc,
    Updated,
}

impl MenuSort {
    pub fn all() -> [Self; 8] {
        [
            MenuSort::Name,
            MenuSort::ProteinDesc,
            MenuSort::ProteinAsc,
            MenuSort::CaloriesDesc,
            MenuSort::CaloriesAsc,
            MenuSort::PriceDesc,
            MenuSort::PriceAsc,
            MenuSort::Updated,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            MenuSort::Name => "name",
            MenuSort::ProteinDesc => "protein_desc",
            MenuSort::ProteinAsc => "protein_asc",
            MenuSort::CaloriesDesc => "calories_desc",
            MenuSort::CaloriesAsc => "calories_asc",
            MenuSort::PriceDesc => "price_desc",
            MenuSort::PriceAsc => "price_asc",
            MenuSort::Updated => "updated",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuSort::Name => "名前順",
            MenuSort::ProteinDesc => "タンパク質（多い順）",
            MenuSort::ProteinAsc => "タンパク質（少ない順）",
            MenuSort::CaloriesDesc => "カロリー（高い順）",
            MenuSort::CaloriesAsc => "カロリー（低い順）",
            MenuSort::PriceDesc => "価格（高い順）",
            MenuSort::PriceAsc => "価格（安い順）",
            MenuSort::Updated => "更新日（新しい順）",
        }
    }

    pub fn compare(&self, a: &Menu, b: &Menu) -> Ordering {
        match self {
            MenuSort::Name => compare_names(&a.name, &b.name),
            MenuSort::ProteinDesc => b.nutrition.protein.total_cmp(&a.nutrition.protein),
            MenuSort::ProteinAsc => a.nutrition.protein.total_cmp(&b.nutrition.protein),
            MenuSort::CaloriesDesc => b.nutrition.calories.cmp(&a.nutrition.calories),
            MenuSort::CaloriesAsc => a.nutrition.calories.cmp(&b.nutrition.calories),
            MenuSort::PriceDesc => b.price.cmp(&a.price),
            MenuSort::PriceAsc => a.price.cmp(&b.price),
            // newest first, records without a timestamp last
            MenuSort::Updated => {
                let ta = a.updated_key().and_then(parse_timestamp);
                let tb = b.updated_key().and_then(parse_timestamp);
                tb.cmp(&ta)
            }
        }
    }
}

/// Case-insensitive name order with a byte-order tie break
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Stable sort of a filtered view
pub fn sort_menus(items: &mut [&Menu], sort: MenuSort) {
    items.sort_by(|a, b| sort.compare(a, b));
}

/// Distinct non-empty menu categories in first-seen order
pub fn distinct_categories(items: &[Menu]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for m in items {
        if !m.category.is_empty() && !out.contains(&m.category) {
            out.push(m.category.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_menu::aggregate::MenuDto;

    fn menu(id: &str, restaurant: &str, protein: f64, calories: u32, price: u32) -> Menu {
        let mut m = Menu::from_dto(
            &MenuDto {
                id: Some(id.into()),
                restaurant_id: restaurant.into(),
                name: id.into(),
                ..Default::default()
            },
            "2024-01-01",
        );
        m.nutrition.protein = protein;
        m.nutrition.calories = calories;
        m.price = price;
        m
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ProteinBand::of(9.9), ProteinBand::Low);
        assert_eq!(ProteinBand::of(10.0), ProteinBand::Medium);
        assert_eq!(ProteinBand::of(20.0), ProteinBand::High);
        assert_eq!(CalorieBand::of(299), CalorieBand::Low);
        assert_eq!(CalorieBand::of(300), CalorieBand::Medium);
        assert_eq!(CalorieBand::of(500), CalorieBand::High);
    }

    #[test]
    fn test_high_protein_filter_only_returns_twenty_and_above() {
        let items = vec![
            menu("a", "r", 19.6, 633, 426),
            menu("b", "r", 20.0, 400, 500),
            menu("c", "r", 54.4, 1209, 1480),
            menu("d", "r", 5.0, 200, 300),
        ];
        let f = MenuFilter { protein: Some(ProteinBand::High), ..Default::default() };
        let hits = f.apply(&items);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|m| m.nutrition.protein >= 20.0));
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let items = vec![menu("a", "r1", 25.0, 600, 1), menu("b", "r2", 25.0, 250, 1)];
        let f = MenuFilter {
            restaurant_id: "r2".into(),
            calories: Some(CalorieBand::Low),
            protein: Some(ProteinBand::High),
            ..Default::default()
        };
        let hits = f.apply(&items);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.0, "b");
    }

    #[test]
    fn test_dietary_flag() {
        let mut v = menu("veg", "r", 5.0, 100, 1);
        v.is_vegan = true;
        let items = vec![v, menu("meat", "r", 30.0, 600, 1)];
        let f = MenuFilter { dietary: Some(DietaryFlag::Vegan), ..Default::default() };
        assert_eq!(f.apply(&items)[0].id.0, "veg");
    }

    #[test]
    fn test_sorts() {
        let items = vec![menu("b", "r", 10.0, 500, 300), menu("a", "r", 30.0, 200, 900), menu("c", "r", 20.0, 800, 100)];
        let mut view: Vec<&Menu> = items.iter().collect();

        sort_menus(&mut view, MenuSort::ProteinDesc);
        assert_eq!(view.iter().map(|m| m.id.0.as_str()).collect::<Vec<_>>(), ["a", "c", "b"]);

        sort_menus(&mut view, MenuSort::PriceAsc);
        assert_eq!(view.iter().map(|m| m.id.0.as_str()).collect::<Vec<_>>(), ["c", "b", "a"]);

        sort_menus(&mut view, MenuSort::Name);
        assert_eq!(view.iter().map(|m| m.id.0.as_str()).collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn test_updated_sort_puts_newest_first() {
        let mut old = menu("old", "r", 1.0, 1, 1);
        old.last_updated = Some("2024-01-01".into());
        let mut new = menu("new", "r", 1.0, 1, 1);
        new.last_updated = Some("2024-06-01T10:00:00.000Z".into());
        let mut none = menu("none", "r", 1.0, 1, 1);
        none.last_updated = None;
        none.added_date = None;

        let items = vec![old, none, new];
        let mut view: Vec<&Menu> = items.iter().collect();
        sort_menus(&mut view, MenuSort::Updated);
        assert_eq!(view.iter().map(|m| m.id.0.as_str()).collect::<Vec<_>>(), ["new", "old", "none"]);
    }

    #[test]
    fn test_sort_keys_round_trip() {
        for s in MenuSort::all() {
            assert_eq!(MenuSort::from_key(s.key()), Some(s));
        }
        assert_eq!(ProteinBand::from_key("high"), Some(ProteinBand::High));
        assert_eq!(DietaryFlag::from_key("gluten_free"), Some(DietaryFlag::GlutenFree));
    }
}
