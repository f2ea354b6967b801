use super::error::DomainError;
use crate::shared::storage::KeyValueStore;

/// Favourite menu ids, persisted as a JSON array
#[derive(Debug, Clone)]
pub struct Favorites<S> {
    store: S,
    key: String,
    ids: Vec<String>,
}

impl<S: KeyValueStore> Favorites<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into(), ids: Vec::new() }
    }

    pub fn load(&mut self) {
        self.ids = self.store.read_json(&self.key).unwrap_or_default();
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, menu_id: &str) -> bool {
        self.ids.iter().any(|id| id == menu_id)
    }

    /// Returns `Ok(false)` when the id was already a favourite
    pub fn add(&mut self, menu_id: &str) -> Result<bool, DomainError> {
        if self.contains(menu_id) {
            return Ok(false);
        }
        self.ids.push(menu_id.to_string());
        self.persist()?;
        Ok(true)
    }

    pub fn remove(&mut self, menu_id: &str) -> Result<(), DomainError> {
        self.ids.retain(|id| id != menu_id);
        self.persist()
    }

    pub fn clear(&mut self) -> Result<(), DomainError> {
        self.ids.clear();
        self.store.remove(&self.key)?;
        Ok(())
    }

    fn persist(&self) -> Result<(), DomainError> {
        Ok(self.store.write_json(&self.key, &self.ids)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;

    #[test]
    fn test_duplicate_add_is_reported() {
        let store = MemoryStorage::new();
        let mut f = Favorites::new(store.clone(), "favoriteMenus");
        assert!(f.add("matsuya_gyumeshi").unwrap());
        assert!(!f.add("matsuya_gyumeshi").unwrap());
        assert_eq!(f.ids().len(), 1);
        assert_eq!(store.read("favoriteMenus").as_deref(), Some(r#"["matsuya_gyumeshi"]"#));
    }

    #[test]
    fn test_load_and_remove() {
        let store = MemoryStorage::new().with_entry("favoriteMenus", r#"["a","b"]"#);
        let mut f = Favorites::new(store, "favoriteMenus");
        f.load();
        assert!(f.contains("b"));
        f.remove("a").unwrap();
        assert_eq!(f.ids(), ["b".to_string()]);
    }

    #[test]
    fn test_broken_entry_loads_empty() {
        let store = MemoryStorage::new().with_entry("favoriteMenus", "{");
        let mut f = Favorites::new(store, "favoriteMenus");
        f.load();
        assert!(f.ids().is_empty());
    }
}
