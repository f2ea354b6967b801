use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use crate::layout::tabs::tab_label_for_key;

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
    pub right_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
            right_open: RwSignal::new(true),
        }
    }

    /// Restores the tab named in `?active=` and keeps the query in sync afterwards.
    ///
    /// Returns `true` when a tab was restored from the address bar.
    pub fn init_router_integration(&self) -> bool {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let restored = match active_from_query(&search) {
            Some(active_key) if !tab_label_for_key(&active_key).is_empty() => {
                self.open_tab(&active_key, tab_label_for_key(&active_key));
                true
            }
            Some(stale) => {
                log::warn!("ignoring unknown tab in address bar: {}", stale);
                false
            }
            None => false,
        };

        let this = *self;
        Effect::new(move |_| {
            let Some(active_key) = this.active.get() else {
                return;
            };
            let query_string =
                serde_qs::to_string(&HashMap::from([("active".to_string(), active_key)]))
                    .unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        });

        restored
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        log::debug!("open_tab: key='{}', title='{}'", key, title);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            let tab = Tab {
                key: key.to_string(),
                title: title.to_string(),
            };
            self.opened.update(|tabs| tabs.push(tab));
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        log::debug!("close_tab: key='{}'", key);
        let was_active = self
            .active
            .with_untracked(|active| active.as_deref() == Some(key));
        let next = self
            .opened
            .with_untracked(|tabs| next_after_close(tabs, key));
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if was_active {
            self.active.set(next);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }

    pub fn toggle_right(&self) {
        self.right_open.update(|val| *val = !*val);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// Reads the `active` parameter from a `?a=b` query string.
pub fn active_from_query(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").filter(|k| !k.is_empty()).cloned()
}

/// Tab that takes focus when `closing` goes away: its right neighbour, else the left one.
pub fn next_after_close(tabs: &[Tab], closing: &str) -> Option<String> {
    let pos = tabs.iter().position(|t| t.key == closing)?;
    tabs.get(pos + 1)
        .or_else(|| pos.checked_sub(1).and_then(|p| tabs.get(p)))
        .map(|t| t.key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(keys: &[&str]) -> Vec<Tab> {
        keys.iter()
            .map(|k| Tab {
                key: k.to_string(),
                title: k.to_string(),
            })
            .collect()
    }

    #[test]
    fn closing_middle_tab_focuses_right_neighbour() {
        let t = tabs(&["a", "b", "c"]);
        assert_eq!(next_after_close(&t, "b"), Some("c".to_string()));
    }

    #[test]
    fn closing_last_tab_focuses_left_neighbour() {
        let t = tabs(&["a", "b", "c"]);
        assert_eq!(next_after_close(&t, "c"), Some("b".to_string()));
    }

    #[test]
    fn closing_only_tab_leaves_nothing_active() {
        let t = tabs(&["a"]);
        assert_eq!(next_after_close(&t, "a"), None);
        assert_eq!(next_after_close(&t, "missing"), None);
    }

    #[test]
    fn active_key_is_read_from_query() {
        assert_eq!(
            active_from_query("?active=a002_menu_browse"),
            Some("a002_menu_browse".to_string())
        );
        assert_eq!(active_from_query("?active="), None);
        assert_eq!(active_from_query(""), None);
    }
}
