use super::{AggregateId, AggregateRoot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors of the in-memory CRUD layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrudError {
    #[error("入力エラー: {0}")]
    Validation(String),

    #[error("{collection} に ID '{id}' が見つかりません")]
    NotFound { collection: &'static str, id: String },

    #[error("{collection} に ID '{id}' は既に存在します")]
    Duplicate { collection: &'static str, id: String },

    #[error("参照先の {collection} '{id}' が存在しません")]
    DanglingReference { collection: &'static str, id: String },
}

/// Ordered in-memory collection of one aggregate type.
///
/// Lookups are linear scans by id; update replaces the record wholesale,
/// delete removes the first match. Serialized as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: AggregateRoot> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id().as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Validate and append
    pub fn insert(&mut self, item: T) -> Result<(), CrudError> {
        item.validate().map_err(CrudError::Validation)?;
        if self.contains(item.id().as_str()) {
            return Err(CrudError::Duplicate {
                collection: T::collection_name(),
                id: item.id().as_string(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Validate and replace the record with the same id, returning the old one
    pub fn replace(&mut self, item: T) -> Result<T, CrudError> {
        item.validate().map_err(CrudError::Validation)?;
        let pos = self.position(item.id().as_str())?;
        Ok(std::mem::replace(&mut self.items[pos], item))
    }

    /// Remove the first record with this id
    pub fn remove(&mut self, id: &str) -> Result<T, CrudError> {
        let pos = self.position(id)?;
        Ok(self.items.remove(pos))
    }

    /// Keep only records matching the predicate, returns how many were dropped
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, f: F) -> usize {
        let before = self.items.len();
        self.items.retain(f);
        before - self.items.len()
    }

    /// Append without validation; used for trusted literal batches
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }

    fn position(&self, id: &str) -> Result<usize, CrudError> {
        self.items
            .iter()
            .position(|item| item.id().as_str() == id)
            .ok_or_else(|| CrudError::NotFound {
                collection: T::collection_name(),
                id: id.to_string(),
            })
    }
}

impl<T: AggregateRoot> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_food_category::aggregate::{Category, CategoryId};

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: CategoryId(id.to_string()),
            name: name.to_string(),
            description: String::new(),
            emoji: "🥩".to_string(),
        }
    }

    #[test]
    fn test_insert_rejects_blank_name() {
        let mut c = Collection::default();
        let err = c.insert(category("meat", "  ")).unwrap_err();
        assert!(matches!(err, CrudError::Validation(_)));
        assert!(c.is_empty());
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut c = Collection::default();
        c.insert(category("meat", "肉類")).unwrap();
        let err = c.insert(category("meat", "肉")).unwrap_err();
        assert!(matches!(err, CrudError::Duplicate { .. }));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut c = Collection::new(vec![category("a", "A"), category("b", "B")]);
        let old = c.replace(category("a", "A2")).unwrap();
        assert_eq!(old.name, "A");
        assert_eq!(c.as_slice()[0].name, "A2");
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_replace_and_remove_missing_id() {
        let mut c: Collection<Category> = Collection::default();
        assert!(matches!(
            c.replace(category("x", "X")),
            Err(CrudError::NotFound { .. })
        ));
        assert!(matches!(c.remove("x"), Err(CrudError::NotFound { .. })));
    }

    #[test]
    fn test_retain_reports_removed_count() {
        let mut c = Collection::new(vec![category("a", "A"), category("b", "B"), category("c", "C")]);
        assert_eq!(c.retain(|x| x.id.0 != "b"), 1);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let c = Collection::new(vec![category("a", "A")]);
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.is_array());
    }
}
