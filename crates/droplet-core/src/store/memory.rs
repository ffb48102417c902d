//! In-memory reference store for tests and embedding.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::profile::HydrationProfile;

use super::ProfileStore;

/// Keyed in-memory profile store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: Mutex<BTreeMap<String, HydrationProfile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProfileStore for MemoryStore {
    fn get(&self, user_id: &str) -> Result<Option<HydrationProfile>, StoreError> {
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }

    fn upsert(&self, user_id: &str, profile: &HydrationProfile) -> Result<(), StoreError> {
        self.profiles
            .lock()
            .unwrap()
            .insert(user_id.to_string(), profile.clone());
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<(String, HydrationProfile)>, StoreError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .map(|(id, profile)| (id.clone(), profile.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_upsert_list() {
        let store = MemoryStore::new();
        assert!(store.get("u1").unwrap().is_none());

        let mut profile = HydrationProfile::new();
        profile.increment = Some(250.0);
        store.upsert("u1", &profile).unwrap();
        store.upsert("u2", &HydrationProfile::new()).unwrap();

        assert_eq!(store.get("u1").unwrap().unwrap().increment, Some(250.0));
        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].0, "u1");

        // Upsert replaces the whole profile.
        profile.increment = Some(500.0);
        store.upsert("u1", &profile).unwrap();
        assert_eq!(store.get("u1").unwrap().unwrap().increment, Some(500.0));
        assert_eq!(store.len(), 2);
    }
}
