//! Record Store - in-memory entities keyed by identifier

use std::collections::HashMap;
use std::path::Path;
use parking_lot::{RwLock, RwLockReadGuard};
use crate::core::{Error, Result};
use crate::types::{Entity, EntityId};

/// In-memory collection of entities of one kind
///
/// Reads share the lock; every mutation holds the write lock for its whole
/// read-modify-write, so concurrent updates cannot be lost. Iteration order
/// is unspecified: callers sort when order matters.
pub struct Store<E: Entity> {
    entities: RwLock<HashMap<EntityId, E>>,
}

/// Live read view over a store
///
/// Holds the read lock until dropped; writers wait for it.
pub struct StoreView<'a, E: Entity> {
    guard: RwLockReadGuard<'a, HashMap<EntityId, E>>,
}

impl<'a, E: Entity> StoreView<'a, E> {
    /// Iterate over all entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &E)> {
        self.guard.iter()
    }

    /// Number of entities in the view
    pub fn len(&self) -> usize {
        self.guard.len()
    }

    /// Whether the view is empty
    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<E: Entity> Default for Store<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Store<E> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Load a store from a JSON document on disk
    ///
    /// The document is an object mapping identifiers to entity objects.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::load(path, e))?;
        let store = Self::parse(&contents).map_err(|e| Error::load(path, e))?;
        tracing::info!("Loaded {} {} records from {:?}", store.len(), E::KIND, path);
        Ok(store)
    }

    /// Load a store from an in-memory JSON document
    pub fn from_json_str(document: &str) -> Result<Self> {
        Self::parse(document).map_err(|e| Error::load("<memory>", e))
    }

    fn parse(document: &str) -> std::result::Result<Self, String> {
        let entities: HashMap<EntityId, E> =
            serde_json::from_str(document).map_err(|e| e.to_string())?;

        for (id, entity) in &entities {
            if id.as_str().is_empty() {
                return Err("empty identifier".to_string());
            }
            entity
                .validate()
                .map_err(|e| format!("record {}: {}", id, e))?;
        }

        Ok(Self {
            entities: RwLock::new(entities),
        })
    }

    /// Fetch a copy of the entity stored under `id`
    pub fn get(&self, id: &str) -> Result<E> {
        self.entities
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(E::KIND, id))
    }

    /// Check whether `id` is present
    pub fn contains(&self, id: &str) -> bool {
        self.entities.read().contains_key(id)
    }

    /// Insert an entity under a caller-chosen identifier
    pub fn insert(&self, id: EntityId, entity: E) -> Result<()> {
        let mut entities = self.entities.write();
        if entities.contains_key(&id) {
            return Err(Error::DuplicateKey(id.to_string()));
        }
        entities.insert(id, entity);
        Ok(())
    }

    /// Insert an entity under a freshly generated identifier
    ///
    /// Draws up to `max_attempts` identifiers, skipping ones already taken.
    pub fn insert_new(&self, entity: E, max_attempts: u32) -> Result<EntityId> {
        self.insert_with(entity, max_attempts, EntityId::random)
    }

    pub(crate) fn insert_with<F>(&self, entity: E, max_attempts: u32, mut next_id: F) -> Result<EntityId>
    where
        F: FnMut() -> EntityId,
    {
        let mut entities = self.entities.write();
        for attempt in 1..=max_attempts {
            let id = next_id();
            if entities.contains_key(&id) {
                tracing::warn!("Identifier {} already taken (attempt {}/{})", id, attempt, max_attempts);
                continue;
            }
            entities.insert(id.clone(), entity);
            return Ok(id);
        }
        Err(Error::IdSpaceExhausted { attempts: max_attempts })
    }

    /// Mutate the entity stored under `id` in place
    ///
    /// The mutator runs under the write lock. It must leave the entity
    /// untouched when it returns an error.
    pub fn update<F, R>(&self, id: &str, mutator: F) -> Result<R>
    where
        F: FnOnce(&mut E) -> Result<R>,
    {
        let mut entities = self.entities.write();
        let entity = entities
            .get_mut(id)
            .ok_or_else(|| Error::not_found(E::KIND, id))?;
        mutator(entity)
    }

    /// Live view of every entity
    pub fn all(&self) -> StoreView<'_, E> {
        StoreView {
            guard: self.entities.read(),
        }
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Business, Category, HelpRequest, UpdateHelpRequest};
    use std::io::Write;
    use std::sync::Arc;

    const DOCUMENT: &str = r#"{
        "a1b2c3": {"name": "Joe's", "description": "diner", "category": "restaurant"},
        "d4e5f6": {"name": "Lux", "description": "dance club", "category": "nightlife"}
    }"#;

    #[test]
    fn test_load_from_str() {
        let store: Store<Business> = Store::from_json_str(DOCUMENT).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a1b2c3").unwrap().name, "Joe's");
        assert!(store.contains("d4e5f6"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();
        let store: Store<Business> = Store::load(file.path()).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Store::<Business>::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(Error::Load { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let result = Store::<Business>::from_json_str("{ not json");
        assert!(matches!(result, Err(Error::Load { .. })));
    }

    #[test]
    fn test_load_rejects_empty_required_field() {
        let doc = r#"{"aaaaaa": {"from": "", "title": "t", "description": "d"}}"#;
        match Store::<HelpRequest>::from_json_str(doc) {
            Err(Error::Load { reason, .. }) => assert!(reason.contains("'from'")),
            other => panic!("expected load error, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_load_rejects_out_of_range_priority() {
        let doc = r#"{"req009": {"from": "ann", "title": "t", "description": "d", "priority": 9}}"#;
        match Store::<HelpRequest>::from_json_str(doc) {
            Err(Error::Load { reason, .. }) => {
                assert!(reason.contains("req009"));
                assert!(reason.contains("'priority'"));
            }
            other => panic!("expected load error, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_get_unknown_id() {
        let store: Store<Business> = Store::from_json_str(DOCUMENT).unwrap();
        let err = store.get("zzzzzz").unwrap_err();
        assert_eq!(err.to_string(), "Business zzzzzz doesn't exist");
    }

    #[test]
    fn test_insert_duplicate_key() {
        let store: Store<Business> = Store::from_json_str(DOCUMENT).unwrap();
        let result = store.insert("a1b2c3".into(), Business::new("New", "", Category::Shopping));
        assert!(matches!(result, Err(Error::DuplicateKey(id)) if id == "a1b2c3"));
        assert_eq!(store.get("a1b2c3").unwrap().name, "Joe's");
    }

    #[test]
    fn test_insert_new_retries_on_collision() {
        let store: Store<Business> = Store::from_json_str(DOCUMENT).unwrap();
        let mut draws = vec!["a1b2c3", "d4e5f6", "zzz999"].into_iter();
        let id = store
            .insert_with(Business::new("New", "", Category::Shopping), 3, || {
                EntityId::from(draws.next().unwrap())
            })
            .unwrap();
        assert_eq!(id.as_str(), "zzz999");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_insert_new_gives_up() {
        let store: Store<Business> = Store::from_json_str(DOCUMENT).unwrap();
        let result = store.insert_with(Business::new("New", "", Category::Shopping), 4, || {
            EntityId::from("a1b2c3")
        });
        assert!(matches!(result, Err(Error::IdSpaceExhausted { attempts: 4 })));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_missing_id() {
        let store: Store<HelpRequest> = Store::new();
        let result = store.update("nope00", |_| Ok(()));
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let store: Arc<Store<HelpRequest>> = Arc::new(Store::new());
        let id = store.insert_new(HelpRequest::new("a", "b", "c"), 8).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = store.clone();
                let id = id.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        let update = UpdateHelpRequest {
                            priority: None,
                            comment: Some(format!("{}-{}", n, i)),
                        };
                        store.update(id.as_str(), |r| r.apply_update(&update)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get(id.as_str()).unwrap().comments.len(), 200);
    }
}
