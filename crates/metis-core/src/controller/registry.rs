use std::sync::Arc;

use crate::agent::Agent;

/// Insertion-ordered name -> agent map.
///
/// Registration order is the enumeration order the dispatcher relies on;
/// re-registering a name replaces the agent in place, keeping its slot.
#[derive(Default)]
pub struct Registry {
    entries: Vec<(String, Arc<dyn Agent>)>,
}

impl Registry {
    /// Insert or replace (silent last-write-wins). Returns true when an
    /// existing registration was replaced.
    pub fn insert(&mut self, name: String, agent: Arc<dyn Agent>) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = agent;
            true
        } else {
            self.entries.push((name, agent));
            false
        }
    }

    /// Remove a registration. Returns false if the name was unknown.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(n, _)| n != name);
        self.entries.len() < before
    }

    /// Look up an agent by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Agent>> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    /// Whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Registered agent count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Iterate entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Agent>)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::EchoAgent;

    fn agent(name: &str) -> Arc<dyn Agent> {
        Arc::new(EchoAgent::new(name))
    }

    #[test]
    fn test_insert_preserves_registration_order() {
        let mut registry = Registry::default();
        registry.insert("B".into(), agent("B"));
        registry.insert("A".into(), agent("A"));
        registry.insert("C".into(), agent("C"));

        assert_eq!(registry.names(), ["B", "A", "C"]);
    }

    #[test]
    fn test_replace_keeps_slot_and_wins() {
        let mut registry = Registry::default();
        registry.insert("A".into(), agent("A"));
        registry.insert("B".into(), agent("B"));

        let replacement = agent("A");
        let replaced = registry.insert("A".into(), replacement.clone());

        assert!(replaced);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), ["A", "B"]);
        assert!(Arc::ptr_eq(registry.get("A").unwrap(), &replacement));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut registry = Registry::default();
        registry.insert("A".into(), agent("A"));

        assert!(!registry.remove("missing"));
        assert!(registry.remove("A"));
        assert!(registry.is_empty());
    }
}
