//! Immutable mapping from reference-image ids to content descriptors

use std::collections::HashMap;

use crate::error::{FiducialError, Result};

/// Registry of known markers, built once at startup
///
/// Maps a reference-image id to whatever content descriptor `D` the host
/// associates with it. The registry never changes after construction;
/// detections whose id is not in here are silently ignored by the
/// session, which is how foreign markers stay inert.
#[derive(Debug, Clone)]
pub struct MarkerRegistry<D> {
    entries: HashMap<String, D>,
}

impl<D> MarkerRegistry<D> {
    /// Builds the registry from `(id, descriptor)` pairs
    ///
    /// A repeated id replaces the earlier descriptor, matching the
    /// last-wins behaviour of filling a dictionary from an authored
    /// list. Empty ids are rejected because no backend can report them.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, D)>) -> Result<Self> {
        let mut map = HashMap::new();
        for (id, descriptor) in entries {
            if id.is_empty() {
                return Err(FiducialError::InvalidMarkerId(
                    "empty marker id".to_string(),
                ));
            }
            map.insert(id, descriptor);
        }
        Ok(Self { entries: map })
    }

    /// Looks up the descriptor for `id`
    pub fn get(&self, id: &str) -> Option<&D> {
        self.entries.get(id)
    }

    /// Whether `id` names a registered marker
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of registered markers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no markers
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(id, descriptor)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &D)> {
        self.entries.iter().map(|(id, d)| (id.as_str(), d))
    }
}

impl<D> Default for MarkerRegistry<D> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_ids_take_the_last_descriptor() {
        let registry = MarkerRegistry::from_entries([
            ("poster".to_string(), 1),
            ("statue".to_string(), 2),
            ("poster".to_string(), 3),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("poster"), Some(&3));
    }

    #[test]
    fn rejects_empty_ids() {
        let result = MarkerRegistry::from_entries([(String::new(), 1)]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_ids_are_absent() {
        let registry = MarkerRegistry::from_entries([("poster".to_string(), 1)]).unwrap();
        assert!(registry.contains("poster"));
        assert!(!registry.contains("unrelated"));
        assert_eq!(registry.get("unrelated"), None);
    }
}
