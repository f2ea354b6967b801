use super::plan::{MealPlan, MealSlot, PlanItem};
use crate::domain::a003_food::Food;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// Quick presets
// ============================================================================

/// One-click fills that keep the current target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Balanced,
    Convenient,
    Vegetarian,
}

impl Preset {
    pub fn all() -> [Preset; 3] {
        [Preset::Balanced, Preset::Convenient, Preset::Vegetarian]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Preset::Balanced => "バランス型",
            Preset::Convenient => "手軽さ重視",
            Preset::Vegetarian => "ベジタリアン",
        }
    }

    /// (slot, food id, quantity)
    fn lines(&self) -> &'static [(MealSlot, &'static str, u32)] {
        use MealSlot::*;
        match self {
            Preset::Balanced => &[
                (Breakfast, "chicken_egg", 1),
                (Breakfast, "yogurt", 1),
                (Lunch, "chicken_breast", 1),
                (Lunch, "tofu", 1),
                (Dinner, "grilled_mackerel", 1),
                (Dinner, "natto", 1),
            ],
            Preset::Convenient => &[
                (Breakfast, "protein_powder", 1),
                (Breakfast, "milk", 1),
                (Lunch, "canned_tuna", 1),
                (Lunch, "protein_bar", 1),
                (Dinner, "chicken_breast", 1),
                (Dinner, "cheese", 2),
            ],
            Preset::Vegetarian => &[
                (Breakfast, "soymilk", 1),
                (Breakfast, "almonds", 1),
                (Lunch, "tofu", 2),
                (Lunch, "kidney_beans", 1),
                (Dinner, "natto", 2),
                (Dinner, "peanuts", 1),
            ],
        }
    }
}

// ============================================================================
// Templates
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateItem {
    pub slot: MealSlot,
    pub food_id: &'static str,
    pub quantity: u32,
    pub serving_weight: &'static str,
}

/// Named day plan that also sets the daily target
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub target_protein: u32,
    pub difficulty: &'static str,
    pub time: &'static str,
    pub tags: &'static [&'static str],
    pub items: Vec<TemplateItem>,
}

const fn item(slot: MealSlot, food_id: &'static str, quantity: u32, serving_weight: &'static str) -> TemplateItem {
    TemplateItem { slot, food_id, quantity, serving_weight }
}

static TEMPLATES: Lazy<Vec<PlanTemplate>> = Lazy::new(|| {
    use MealSlot::*;
    vec![
        PlanTemplate {
            id: "balanced",
            name: "バランス型",
            subtitle: "Balanced Diet",
            description: "動物性と植物性タンパク質をバランス良く組み合わせた基本プラン",
            target_protein: 75,
            difficulty: "簡単",
            time: "30分",
            tags: &["初心者向け", "バランス", "和食"],
            items: vec![
                item(Breakfast, "chicken_egg", 1, "50g"),
                item(Breakfast, "greek_yogurt", 1, "100g"),
                item(Lunch, "chicken_breast", 1, "120g"),
                item(Lunch, "tofu", 1, "100g"),
                item(Dinner, "grilled_mackerel", 1, "80g"),
                item(Dinner, "natto", 1, "40g"),
            ],
        },
        PlanTemplate {
            id: "convenient",
            name: "忙しい人向け",
            subtitle: "Quick & Easy",
            description: "調理の手間が少なく、コンビニでも揃う食材中心のプラン",
            target_protein: 80,
            difficulty: "とても簡単",
            time: "10分",
            tags: &["時短", "コンビニ", "手軽"],
            items: vec![
                item(Breakfast, "protein_powder", 1, "25g"),
                item(Breakfast, "milk", 1, "200ml"),
                item(Lunch, "canned_tuna", 1, "70g"),
                item(Lunch, "protein_bar", 1, "40g"),
                item(Dinner, "chicken_breast", 1, "120g"),
                item(Dinner, "cheese", 2, "36g"),
            ],
        },
        PlanTemplate {
            id: "vegetarian",
            name: "ベジタリアン",
            subtitle: "Plant Based",
            description: "大豆製品とナッツで必要量を確保する植物性中心のプラン",
            target_protein: 70,
            difficulty: "普通",
            time: "20分",
            tags: &["植物性", "ヘルシー", "大豆"],
            items: vec![
                item(Breakfast, "soymilk", 1, "200ml"),
                item(Breakfast, "almonds", 1, "20g"),
                item(Lunch, "tofu", 2, "200g"),
                item(Lunch, "kidney_beans", 1, "50g"),
                item(Dinner, "natto", 2, "80g"),
                item(Dinner, "peanuts", 1, "20g"),
            ],
        },
        PlanTemplate {
            id: "muscle_building",
            name: "筋肉増強",
            subtitle: "Muscle Building",
            description: "トレーニングをする人向けの高タンパクプラン",
            target_protein: 120,
            difficulty: "普通",
            time: "40分",
            tags: &["高タンパク", "筋トレ", "増量"],
            items: vec![
                item(Breakfast, "chicken_egg", 2, "100g"),
                item(Breakfast, "protein_powder", 1, "25g"),
                item(Lunch, "chicken_breast", 1, "120g"),
                item(Lunch, "canned_tuna", 1, "70g"),
                item(Dinner, "beef_sirloin", 1, "120g"),
                item(Dinner, "cottage_cheese", 2, "60g"),
            ],
        },
    ]
});

impl PlanTemplate {
    pub fn all() -> &'static [PlanTemplate] {
        &TEMPLATES
    }

    pub fn find(id: &str) -> Option<&'static PlanTemplate> {
        Self::all().iter().find(|t| t.id == id)
    }

    /// Rounded protein of the items present in the catalog
    pub fn protein(&self, catalog: &[Food]) -> u32 {
        let total: f64 = self
            .items
            .iter()
            .filter_map(|it| {
                find_food(catalog, it.food_id).map(|f| f.protein_per_serving * it.quantity as f64)
            })
            .sum();
        total.round() as u32
    }

    pub fn items_for(&self, slot: MealSlot) -> impl Iterator<Item = &TemplateItem> {
        self.items.iter().filter(move |it| it.slot == slot)
    }
}

fn find_food<'a>(catalog: &'a [Food], id: &str) -> Option<&'a Food> {
    catalog.iter().find(|f| f.id.0 == id)
}

// ============================================================================
// Applying to a plan
// ============================================================================

impl MealPlan {
    /// Replace all slots with the preset. Returns the ids missing from the catalog.
    pub fn apply_preset(&mut self, preset: Preset, catalog: &[Food]) -> Vec<String> {
        self.clear();
        let mut skipped = Vec::new();
        for (slot, food_id, quantity) in preset.lines() {
            match find_food(catalog, food_id) {
                Some(food) => self.push_item(*slot, PlanItem::from_food(food, *quantity)),
                None => {
                    log::warn!("preset {:?}: food '{}' not found, skipped", preset, food_id);
                    skipped.push(food_id.to_string());
                }
            }
        }
        skipped
    }

    /// Replace all slots with the template and adopt its target.
    /// Returns the ids missing from the catalog.
    pub fn apply_template(&mut self, template: &PlanTemplate, catalog: &[Food]) -> Vec<String> {
        self.clear();
        if self.set_target(template.target_protein).is_err() {
            log::warn!("template '{}' has no target", template.id);
        }
        let mut skipped = Vec::new();
        for it in &template.items {
            match find_food(catalog, it.food_id) {
                Some(food) => {
                    let mut line = PlanItem::from_food(food, it.quantity);
                    line.template_serving_weight = Some(it.serving_weight.to_string());
                    self.push_item(it.slot, line);
                }
                None => {
                    log::warn!("template '{}': food '{}' not found, skipped", template.id, it.food_id);
                    skipped.push(it.food_id.to_string());
                }
            }
        }
        skipped
    }
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
            ..Default::default()
        })
    }

    fn catalog() -> Vec<Food> {
        vec![
            food("chicken_egg", "6.2"),
            food("yogurt", "3.6"),
            food("chicken_breast", "28"),
            food("tofu", "7"),
            food("natto", "6.6"),
        ]
    }

    #[test]
    fn test_preset_skips_unknown_ids() {
        let mut plan = MealPlan::default();
        let skipped = plan.apply_preset(Preset::Balanced, &catalog());
        assert_eq!(skipped, vec!["grilled_mackerel"]);
        assert_eq!(plan.items(MealSlot::Breakfast).len(), 2);
        assert_eq!(plan.items(MealSlot::Dinner).len(), 1);
        assert_eq!(plan.target(), 70);
    }

    #[test]
    fn test_preset_replaces_previous_lines() {
        let mut plan = MealPlan::default();
        plan.add_food(MealSlot::Lunch, &food("beef_sirloin", "20.4"));
        plan.apply_preset(Preset::Vegetarian, &catalog());
        let lunch = plan.items(MealSlot::Lunch);
        assert_eq!(lunch.len(), 1);
        assert_eq!(lunch[0].id.0, "tofu");
        assert_eq!(lunch[0].quantity, 2);
    }

    #[test]
    fn test_template_sets_target_and_serving_weight() {
        let template = PlanTemplate::find("muscle_building").unwrap();
        let mut plan = MealPlan::default();
        let skipped = plan.apply_template(template, &catalog());
        assert_eq!(plan.target(), 120);
        assert_eq!(plan.meal_targets().total(), 120);
        assert!(skipped.contains(&"canned_tuna".to_string()));
        let breakfast = plan.items(MealSlot::Breakfast);
        assert_eq!(breakfast[0].quantity, 2);
        assert_eq!(breakfast[0].serving_label(), "100g × 2");
    }

    #[test]
    fn test_template_protein_counts_found_items_only() {
        let template = PlanTemplate::find("balanced").unwrap();
        // chicken_egg 6.2 + chicken_breast 28 + tofu 7 + natto 6.6 = 47.8
        assert_eq!(template.protein(&catalog()), 48);
    }

    #[test]
    fn test_templates_have_unique_ids() {
        let all = PlanTemplate::all();
        assert_eq!(all.len(), 4);
        for t in all {
            assert_eq!(all.iter().filter(|o| o.id == t.id).count(), 1);
        }
    }
}
