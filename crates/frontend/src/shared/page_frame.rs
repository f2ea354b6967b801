//! PageFrame: standard root wrapper for every page rendered inside a tab.
//!
//! The root element carries `id="{entity}--{category}"` and
//! `data-page-category`, so a page found in the DOM inspector maps straight
//! back to its module (`a002_menu--list` lives in `domain/a002_menu/`).

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCategory {
    /// Admin table with create/edit/delete
    List,
    /// Edit form for one record
    Detail,
    /// Public card/table browsing
    Browse,
    /// Action page (imports, planner, data management)
    UseCase,
}

impl PageCategory {
    pub fn key(&self) -> &'static str {
        match self {
            PageCategory::List => "list",
            PageCategory::Detail => "detail",
            PageCategory::Browse => "browse",
            PageCategory::UseCase => "usecase",
        }
    }

    fn class(&self) -> &'static str {
        match self {
            PageCategory::Detail => "page page--detail",
            PageCategory::Browse => "page page--browse",
            PageCategory::List | PageCategory::UseCase => "page",
        }
    }
}

#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, e.g. `"a002_menu--list"`
    page_id: &'static str,
    category: PageCategory,
    children: Children,
) -> impl IntoView {
    if !is_valid_page_id(page_id) {
        log::warn!("page id '{}' is not in the entity--category form", page_id);
    }
    view! {
        <div id=page_id class=category.class() data-page-category=category.key()>
            {children()}
        </div>
    }
}

/// Whether an id follows the `{entity}--{category}` form
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, category)) if !entity.is_empty() && !category.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a001_restaurant--list"));
        assert!(!is_valid_page_id("a001_restaurant"));
        assert!(!is_valid_page_id("--list"));
    }
}
