use super::aggregate::Food;
use crate::domain::a002_menu::filter::compare_names;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Admin list filter: free text over name and description, exact category
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FoodFilter {
    pub search: String,
    pub category: String,
}

impl FoodFilter {
    pub fn matches(&self, f: &Food) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty()
            && !f.name.to_lowercase().contains(&search)
            && !f.description.to_lowercase().contains(&search)
        {
            return false;
        }
        self.category.is_empty() || f.category == self.category
    }

    pub fn apply<'a>(&self, items: &'a [Food]) -> Vec<&'a Food> {
        items.iter().filter(|f| self.matches(f)).collect()
    }
}

/// Public browse filter
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecommendedFilter {
    pub search: String,
    pub category: String,
    pub price_range: String,
    pub min_rating: Option<u32>,
}

impl RecommendedFilter {
    pub fn matches(&self, f: &Food) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty() && !f.name.to_lowercase().contains(&search) {
            return false;
        }
        if !self.category.is_empty() && f.category != self.category {
            return false;
        }
        if !self.price_range.is_empty() && f.price_range != self.price_range {
            return false;
        }
        match self.min_rating {
            Some(min) => f.rating >= min,
            None => true,
        }
    }

    pub fn apply<'a>(&self, items: &'a [Food]) -> Vec<&'a Food> {
        items.iter().filter(|f| self.matches(f)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodSort {
    #[default]
    Name,
    ProteinDesc,
    ProteinAsc,
    ServingDesc,
    ServingAsc,
}

impl FoodSort {
    pub fn all() -> [Self; 5] {
        [
            FoodSort::Name,
            FoodSort::ProteinDesc,
            FoodSort::ProteinAsc,
            FoodSort::ServingDesc,
            FoodSort::ServingAsc,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            FoodSort::Name => "name",
            FoodSort::ProteinDesc => "protein_desc",
            FoodSort::ProteinAsc => "protein_asc",
            FoodSort::ServingDesc => "serving_desc",
            FoodSort::ServingAsc => "serving_asc",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FoodSort::Name => "名前順",
            FoodSort::ProteinDesc => "タンパク質/100g（多い順）",
            FoodSort::ProteinAsc => "タンパク質/100g（少ない順）",
            FoodSort::ServingDesc => "1食あたり（多い順）",
            FoodSort::ServingAsc => "1食あたり（少ない順）",
        }
    }

    pub fn compare(&self, a: &Food, b: &Food) -> Ordering {
        match self {
            FoodSort::Name => compare_names(&a.name, &b.name),
            FoodSort::ProteinDesc => b.protein_per_100g.total_cmp(&a.protein_per_100g),
            FoodSort::ProteinAsc => a.protein_per_100g.total_cmp(&b.protein_per_100g),
            FoodSort::ServingDesc => b.protein_per_serving.total_cmp(&a.protein_per_serving),
            FoodSort::ServingAsc => a.protein_per_serving.total_cmp(&b.protein_per_serving),
        }
    }
}

pub fn sort_foods(items: &mut [&Food], sort: FoodSort) {
    items.sort_by(|a, b| sort.compare(a, b));
}

/// Distinct non-empty food categories in first-seen order
pub fn distinct_categories(items: &[Food]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for f in items {
        if !f.category.is_empty() && !out.contains(&f.category) {
            out.push(f.category.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_food::aggregate::FoodDto;

    fn food(id: &str, category: &str, p100: &str, serving: &str, rating: &str, price: &str) -> Food {
        Food::from_dto(&FoodDto {
            id: Some(id.into()),
            name: id.into(),
            category: category.into(),
            protein_per_100g: p100.into(),
            protein_per_serving: serving.into(),
            rating: rating.into(),
            price_range: price.into(),
            ..Default::default()
        })
    }

    fn catalog() -> Vec<Food> {
        vec![
            food("tofu", "大豆製品", "7", "7", "5", "安価"),
            food("chicken_breast", "肉類", "23.3", "28", "5", "普通"),
            food("beef_sirloin", "肉類", "17", "20.4", "3", "高価"),
        ]
    }

    #[test]
    fn test_admin_filter() {
        let items = catalog();
        let f = FoodFilter { category: "肉類".into(), ..Default::default() };
        assert_eq!(f.apply(&items).len(), 2);
        let f = FoodFilter { search: "TOFU".into(), ..Default::default() };
        assert_eq!(f.apply(&items)[0].id.0, "tofu");
    }

    #[test]
    fn test_recommended_filter_min_rating_and_price() {
        let items = catalog();
        let f = RecommendedFilter { min_rating: Some(4), ..Default::default() };
        assert_eq!(f.apply(&items).len(), 2);
        let f = RecommendedFilter { price_range: "高価".into(), ..Default::default() };
        assert_eq!(f.apply(&items)[0].id.0, "beef_sirloin");
    }

    #[test]
    fn test_sorts() {
        let items = catalog();
        let mut view: Vec<&Food> = items.iter().collect();
        sort_foods(&mut view, FoodSort::ProteinDesc);
        assert_eq!(view[0].id.0, "chicken_breast");
        sort_foods(&mut view, FoodSort::ServingAsc);
        assert_eq!(view[0].id.0, "tofu");
        sort_foods(&mut view, FoodSort::Name);
        assert_eq!(view[0].id.0, "beef_sirloin");
    }

    #[test]
    fn test_distinct_categories() {
        assert_eq!(distinct_categories(&catalog()), vec!["大豆製品", "肉類"]);
    }
}
