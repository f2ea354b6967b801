//! Derived figures for the public menu pages: statistics, PFC split and
//! daily-value percentages.

use super::aggregate::Menu;
use super::nutrition::Nutrition;
use crate::domain::a001_restaurant::Restaurant;
use std::collections::HashMap;

/// Adult daily reference values: (key, label, unit, amount)
pub const DAILY_VALUES: &[(&str, &str, &str, f64)] = &[
    ("calories", "エネルギー", "kcal", 2650.0),
    ("protein", "タンパク質", "g", 65.0),
    ("fat", "脂質", "g", 74.0),
    ("carbs", "炭水化物", "g", 396.0),
    ("fiber", "食物繊維", "g", 21.0),
    ("sodium", "ナトリウム", "mg", 2700.0),
    ("calcium", "カルシウム", "mg", 750.0),
    ("iron", "鉄", "mg", 7.5),
    ("vitamin_c", "ビタミンC", "mg", 100.0),
    ("vitamin_a", "ビタミンA", "μg", 900.0),
    ("vitamin_d", "ビタミンD", "μg", 8.5),
    ("vitamin_e", "ビタミンE", "mg", 6.5),
    ("vitamin_k", "ビタミンK", "μg", 150.0),
    ("thiamin", "ビタミンB1", "mg", 1.4),
    ("riboflavin", "ビタミンB2", "mg", 1.6),
    ("niacin", "ナイアシン", "mg", 15.0),
    ("vitamin_b6", "ビタミンB6", "mg", 1.4),
    ("folate", "葉酸", "μg", 240.0),
    ("vitamin_b12", "ビタミンB12", "μg", 2.4),
    ("potassium", "カリウム", "mg", 3000.0),
    ("phosphorus", "リン", "mg", 1000.0),
    ("magnesium", "マグネシウム", "mg", 370.0),
    ("zinc", "亜鉛", "mg", 11.0),
    ("selenium", "セレン", "μg", 30.0),
];

/// One decimal, half away from zero
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyValueRow {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub amount: f64,
    /// Percent of the reference value, one decimal
    pub percent: f64,
}

/// Daily-value rows for a menu: core nutrients always, extended ones when present
pub fn daily_value_rows(n: &Nutrition) -> Vec<DailyValueRow> {
    DAILY_VALUES
        .iter()
        .filter_map(|(key, label, unit, reference)| {
            let amount = match *key {
                "calories" => Some(n.calories as f64),
                "protein" => Some(n.protein),
                "fat" => Some(n.fat),
                "carbs" => Some(n.carbs),
                "fiber" => Some(n.fiber),
                "sodium" => Some(n.sodium as f64),
                other => n.micro.get(other),
            }?;
            Some(DailyValueRow {
                key,
                label,
                unit,
                amount,
                percent: round1(amount / reference * 100.0),
            })
        })
        .collect()
}

/// Calories contributed by protein, carbs and fat (4/4/9 kcal per g)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PfcBreakdown {
    pub protein_kcal: f64,
    pub carbs_kcal: f64,
    pub fat_kcal: f64,
}

impl PfcBreakdown {
    pub fn of(n: &Nutrition) -> Self {
        Self {
            protein_kcal: n.protein * 4.0,
            carbs_kcal: n.carbs * 4.0,
            fat_kcal: n.fat * 9.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.protein_kcal + self.carbs_kcal + self.fat_kcal
    }

    /// (protein, carbs, fat) shares in percent, one decimal; zeros when empty
    pub fn percentages(&self) -> (f64, f64, f64) {
        let total = self.total();
        if total <= 0.0 {
            return (0.0, 0.0, 0.0);
        }
        (
            round1(self.protein_kcal / total * 100.0),
            round1(self.carbs_kcal / total * 100.0),
            round1(self.fat_kcal / total * 100.0),
        )
    }
}

/// Header figures of the public menu page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MenuStatistics {
    pub restaurant_count: usize,
    pub menu_count: usize,
    /// One decimal
    pub avg_protein: f64,
    pub avg_calories: u32,
}

impl MenuStatistics {
    pub fn compute(restaurants: &[Restaurant], menus: &[Menu]) -> Self {
        let menu_count = menus.len();
        if menu_count == 0 {
            return Self {
                restaurant_count: restaurants.len(),
                ..Default::default()
            };
        }
        let protein: f64 = menus.iter().map(|m| m.nutrition.protein).sum();
        let calories: f64 = menus.iter().map(|m| m.nutrition.calories as f64).sum();
        Self {
            restaurant_count: restaurants.len(),
            menu_count,
            avg_protein: round1(protein / menu_count as f64),
            avg_calories: (calories / menu_count as f64).round() as u32,
        }
    }
}

/// Average PFC grams per menu category, categories in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAverage {
    pub category: String,
    pub avg_protein: f64,
    pub avg_carbs: f64,
    pub avg_fat: f64,
}

pub fn category_averages(menus: &[Menu]) -> Vec<CategoryAverage> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, (f64, f64, f64, usize)> = HashMap::new();
    for m in menus {
        let key = if m.category.is_empty() { "その他".to_string() } else { m.category.clone() };
        let entry = sums.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            (0.0, 0.0, 0.0, 0)
        });
        entry.0 += m.nutrition.protein;
        entry.1 += m.nutrition.carbs;
        entry.2 += m.nutrition.fat;
        entry.3 += 1;
    }
    order
        .into_iter()
        .filter_map(|category| {
            let (p, c, f, n) = sums.get(&category).copied()?;
            let n = n as f64;
            Some(CategoryAverage {
                category,
                avg_protein: round1(p / n),
                avg_carbs: round1(c / n),
                avg_fat: round1(f / n),
            })
        })
        .collect()
}

/// Number of menus per restaurant id
pub fn menu_counts(menus: &[Menu]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for m in menus {
        *counts.entry(m.restaurant_id.0.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_menu::aggregate::MenuDto;

    fn menu(restaurant: &str, category: &str, protein: f64, calories: u32) -> Menu {
        let mut m = Menu::from_dto(
            &MenuDto {
                restaurant_id: restaurant.into(),
                name: "x".into(),
                category: category.into(),
                ..Default::default()
            },
            "now",
        );
        m.nutrition.protein = protein;
        m.nutrition.calories = calories;
        m
    }

    #[test]
    fn test_statistics_rounding() {
        let menus = vec![menu("a", "丼", 19.6, 633), menu("a", "丼", 17.6, 376), menu("b", "定食", 54.4, 1209)];
        let s = MenuStatistics::compute(&[], &menus);
        assert_eq!(s.menu_count, 3);
        assert_eq!(s.avg_protein, 30.5);
        assert_eq!(s.avg_calories, 739);
    }

    #[test]
    fn test_statistics_empty() {
        let s = MenuStatistics::compute(&[], &[]);
        assert_eq!(s.avg_protein, 0.0);
        assert_eq!(s.avg_calories, 0);
    }

    #[test]
    fn test_pfc_split() {
        let n = Nutrition { protein: 19.6, carbs: 88.2, fat: 23.6, ..Default::default() };
        let pfc = PfcBreakdown::of(&n);
        assert!((pfc.protein_kcal - 78.4).abs() < 1e-9);
        assert!((pfc.fat_kcal - 212.4).abs() < 1e-9);
        let (p, c, f) = pfc.percentages();
        assert!((p + c + f - 100.0).abs() <= 0.2);
    }

    #[test]
    fn test_daily_values() {
        let mut n = Nutrition { calories: 633, protein: 19.6, sodium: 2500, ..Default::default() };
        n.micro.calcium = Some(75.0);
        let rows = daily_value_rows(&n);
        let by_key = |k: &str| rows.iter().find(|r| r.key == k).map(|r| r.percent);
        assert_eq!(by_key("calories"), Some(23.9));
        assert_eq!(by_key("protein"), Some(30.2));
        assert_eq!(by_key("calcium"), Some(10.0));
        assert_eq!(by_key("zinc"), None);
    }

    #[test]
    fn test_menu_counts_and_category_averages() {
        let menus = vec![menu("a", "丼", 20.0, 1), menu("a", "丼", 10.0, 1), menu("b", "", 5.0, 1)];
        let counts = menu_counts(&menus);
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("c"), None);

        let avgs = category_averages(&menus);
        assert_eq!(avgs.len(), 2);
        assert_eq!(avgs[0].category, "丼");
        assert_eq!(avgs[0].avg_protein, 15.0);
        assert_eq!(avgs[1].category, "その他");
    }
}
