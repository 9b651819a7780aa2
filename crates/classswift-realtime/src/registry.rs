//! Class registry — live viewer connections grouped by class.
//!
//! Owned exclusively by the hub loop; never shared across tasks, so no
//! locking is needed around reads or writes.

use std::collections::HashMap;
use std::sync::Arc;

use crate::connection::{ConnectionHandle, ConnectionId};

/// Mapping from class identifier to that class's live connections.
///
/// A class entry is created on the first register and deleted when its
/// last connection leaves, so memory stays bounded by live classes.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, HashMap<ConnectionId, Arc<ConnectionHandle>>>,
}

impl ClassRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection under its class.
    pub fn add(&mut self, conn: Arc<ConnectionHandle>) {
        self.classes
            .entry(conn.class_id.clone())
            .or_default()
            .insert(conn.id, conn);
    }

    /// Remove a connection; returns `true` if it was present.
    ///
    /// Deletes the class entry when its set becomes empty.
    pub fn remove(&mut self, conn: &ConnectionHandle) -> bool {
        let Some(members) = self.classes.get_mut(&conn.class_id) else {
            return false;
        };
        let removed = members.remove(&conn.id).is_some();
        if members.is_empty() {
            self.classes.remove(&conn.class_id);
        }
        removed
    }

    /// All connections currently registered to a class.
    pub fn class_connections(&self, class_id: &str) -> Vec<Arc<ConnectionHandle>> {
        self.classes
            .get(class_id)
            .map(|members| members.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether a class has any live viewers.
    pub fn contains_class(&self, class_id: &str) -> bool {
        self.classes.contains_key(class_id)
    }

    /// Number of connections registered to a class.
    pub fn class_count(&self, class_id: &str) -> usize {
        self.classes.get(class_id).map(HashMap::len).unwrap_or(0)
    }

    /// Total number of registered connections.
    pub fn total_connections(&self) -> usize {
        self.classes.values().map(HashMap::len).sum()
    }

    /// Per-class connection counts.
    pub fn class_counts(&self) -> HashMap<String, usize> {
        self.classes
            .iter()
            .map(|(class_id, members)| (class_id.clone(), members.len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::Receiver;

    use crate::connection::OutboundFrame;

    fn conn(class_id: &str) -> (Arc<ConnectionHandle>, Receiver<OutboundFrame>) {
        ConnectionHandle::channel(class_id, 4)
    }

    #[test]
    fn test_add_and_remove() {
        let mut registry = ClassRegistry::new();
        let (a, _rx_a) = conn("c1");
        let (b, _rx_b) = conn("c1");

        registry.add(a.clone());
        registry.add(b);
        assert_eq!(registry.class_count("c1"), 2);

        assert!(registry.remove(&a));
        assert_eq!(registry.class_count("c1"), 1);
        assert!(registry.contains_class("c1"));
    }

    #[test]
    fn test_empty_class_entry_is_deleted() {
        let mut registry = ClassRegistry::new();
        let (a, _rx_a) = conn("c1");

        registry.add(a.clone());
        assert!(registry.remove(&a));
        assert!(!registry.contains_class("c1"));
        assert_eq!(registry.total_connections(), 0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut registry = ClassRegistry::new();
        let (a, _rx_a) = conn("c1");

        registry.add(a.clone());
        assert!(registry.remove(&a));
        assert!(!registry.remove(&a));
    }

    #[test]
    fn test_classes_are_isolated() {
        let mut registry = ClassRegistry::new();
        let (a, _rx_a) = conn("c1");
        let (b, _rx_b) = conn("c2");
        registry.add(a);
        registry.add(b);

        assert_eq!(registry.class_count("c1"), 1);
        assert_eq!(registry.class_count("c2"), 1);
        assert_eq!(registry.total_connections(), 2);
        assert!(registry.class_connections("c3").is_empty());
    }
}
