use super::aggregate::Restaurant;
use serde::{Deserialize, Serialize};

/// Admin list filter for restaurants
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RestaurantFilter {
    pub search: String,
    pub category: String,
}

impl RestaurantFilter {
    pub fn matches(&self, r: &Restaurant) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty()
            && !r.name.to_lowercase().contains(&search)
            && !r.description.to_lowercase().contains(&search)
        {
            return false;
        }
        if !self.category.is_empty() && r.category != self.category {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, items: &'a [Restaurant]) -> Vec<&'a Restaurant> {
        items.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Distinct non-empty categories in first-seen order
pub fn distinct_categories(items: &[Restaurant]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for r in items {
        if !r.category.is_empty() && !out.contains(&r.category) {
            out.push(r.category.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_restaurant::aggregate::RestaurantId;
    use crate::domain::common::ImageSource;

    fn r(id: &str, name: &str, category: &str, description: &str) -> Restaurant {
        Restaurant {
            id: RestaurantId(id.into()),
            name: name.into(),
            category: category.into(),
            description: description.into(),
            logo: ImageSource::None,
            website: String::new(),
            established: String::new(),
            locations: vec![],
            last_updated: None,
        }
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_description() {
        let items = vec![
            r("subway", "SUBWAY", "サンドイッチ", "野菜たっぷり"),
            r("ootoya", "大戸屋", "定食・丼", "和風の定食"),
        ];
        let f = RestaurantFilter { search: "subway".into(), ..Default::default() };
        assert_eq!(f.apply(&items).len(), 1);
        let f = RestaurantFilter { search: "定食".into(), ..Default::default() };
        assert_eq!(f.apply(&items)[0].id.0, "ootoya");
    }

    #[test]
    fn test_category_exact_match() {
        let items = vec![r("a", "A", "定食", ""), r("b", "B", "定食・丼", "")];
        let f = RestaurantFilter { category: "定食".into(), ..Default::default() };
        let hits = f.apply(&items);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.0, "a");
    }

    #[test]
    fn test_distinct_categories() {
        let items = vec![r("a", "A", "定食", ""), r("b", "B", "", ""), r("c", "C", "定食", "")];
        assert_eq!(distinct_categories(&items), vec!["定食"]);
    }
}
