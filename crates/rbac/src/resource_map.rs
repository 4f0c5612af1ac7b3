//! Resource key → permission ID map

use serde_json::Value;
use std::collections::BTreeMap;
use store::{keys, LocalStore, StoreResult};

/// Which backend permission unlocks each client resource.
///
/// Persisted as a JSON object under `resource-permissions`. Keys without an
/// entry are denied to every non-admin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePermissionMap {
    entries: BTreeMap<String, i64>,
}

impl ResourcePermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the map from the store.
    ///
    /// Unreadable or non-object JSON loads as empty; entries whose value is
    /// not a positive ID are skipped.
    pub fn load(store: &dyn LocalStore) -> Self {
        let Some(Value::Object(raw)) = keys::read_json::<Value>(store, keys::RESOURCE_PERMISSIONS)
        else {
            return Self::new();
        };

        let entries = raw
            .into_iter()
            .filter_map(|(key, value)| permission_id(&value).map(|id| (key, id)))
            .collect();
        Self { entries }
    }

    pub fn save(&self, store: &dyn LocalStore) -> StoreResult<()> {
        keys::write_json(store, keys::RESOURCE_PERMISSIONS, &self.entries)
    }

    /// Permission ID required for `resource_key`
    pub fn get(&self, resource_key: &str) -> Option<i64> {
        self.entries.get(resource_key).copied()
    }

    /// Map a resource to a permission, replacing any previous mapping
    pub fn assign(&mut self, resource_key: impl Into<String>, permission_id: i64) -> Option<i64> {
        self.entries.insert(resource_key.into(), permission_id)
    }

    pub fn unassign(&mut self, resource_key: &str) -> Option<i64> {
        self.entries.remove(resource_key)
    }

    /// Drop every resource that pointed at a deleted permission.
    ///
    /// Returns whether anything was removed.
    pub fn forget_permission(&mut self, permission_id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|_, id| *id != permission_id);
        self.entries.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn permission_id(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    (id > 0).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    #[test]
    fn test_missing_or_invalid_map_is_empty() {
        let store = MemoryStore::new();
        assert!(ResourcePermissionMap::load(&store).is_empty());

        store.set_item(keys::RESOURCE_PERMISSIONS, "not json").unwrap();
        assert!(ResourcePermissionMap::load(&store).is_empty());

        store.set_item(keys::RESOURCE_PERMISSIONS, "[1, 2]").unwrap();
        assert!(ResourcePermissionMap::load(&store).is_empty());
    }

    #[test]
    fn test_load_skips_unusable_values() {
        let store = MemoryStore::new();
        store
            .set_item(
                keys::RESOURCE_PERMISSIONS,
                r#"{"events.create": 99, "a": "12", "b": 0, "c": null, "d": "x"}"#,
            )
            .unwrap();

        let map = ResourcePermissionMap::load(&store);
        assert_eq!(map.get("events.create"), Some(99));
        assert_eq!(map.get("a"), Some(12));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_assign_save_reload() {
        let store = MemoryStore::new();
        let mut map = ResourcePermissionMap::new();
        assert_eq!(map.assign("events.create", 99), None);
        assert_eq!(map.assign("events.create", 100), Some(99));
        map.save(&store).unwrap();

        let raw = store.get_item(keys::RESOURCE_PERMISSIONS).unwrap().unwrap();
        assert_eq!(raw, r#"{"events.create":100}"#);
        assert_eq!(ResourcePermissionMap::load(&store), map);
    }

    #[test]
    fn test_forget_permission() {
        let mut map = ResourcePermissionMap::new();
        map.assign("events.create", 99);
        map.assign("events.edit", 99);
        map.assign("reports.view", 5);

        assert!(map.forget_permission(99));
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("reports.view", 5)]);
        assert!(!map.forget_permission(99));
    }

    #[test]
    fn test_unassign() {
        let mut map = ResourcePermissionMap::new();
        map.assign("events.create", 99);
        assert_eq!(map.unassign("events.create"), Some(99));
        assert_eq!(map.unassign("events.create"), None);
    }
}
