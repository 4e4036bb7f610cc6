//! Lookup table from intent id to behavior.

use std::collections::HashMap;
use std::sync::Arc;

use super::{
    AutoAdvanceIntent, CollectCriteriaIntent, CollectItemsIntent, Intent, RankCriteriaPairsIntent,
    RankItemPairsIntent, ResetIntent, RunIntent, SelectMenuIntent,
};
use crate::domain::conversation::IntentKind;

/// Maps each [`IntentKind`] to the intent implementing it.
#[derive(Clone)]
pub struct IntentRegistry {
    intents: HashMap<IntentKind, Arc<dyn Intent>>,
}

impl IntentRegistry {
    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            intents: HashMap::new(),
        }
    }

    /// A registry with every built-in intent.
    pub fn standard() -> Self {
        Self::empty()
            .with(Arc::new(AutoAdvanceIntent))
            .with(Arc::new(SelectMenuIntent))
            .with(Arc::new(CollectItemsIntent))
            .with(Arc::new(CollectCriteriaIntent))
            .with(Arc::new(RankItemPairsIntent))
            .with(Arc::new(RankCriteriaPairsIntent))
            .with(Arc::new(RunIntent))
            .with(Arc::new(ResetIntent))
    }

    /// Registers `intent` under its own kind, replacing any previous entry.
    pub fn register(&mut self, intent: Arc<dyn Intent>) {
        self.intents.insert(intent.kind(), intent);
    }

    pub fn with(mut self, intent: Arc<dyn Intent>) -> Self {
        self.register(intent);
        self
    }

    pub fn get(&self, kind: IntentKind) -> Option<Arc<dyn Intent>> {
        self.intents.get(&kind).cloned()
    }

    pub fn contains(&self, kind: IntentKind) -> bool {
        self.intents.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

impl Default for IntentRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for IntentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.intents.keys().map(IntentKind::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("IntentRegistry").field("intents", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_every_kind() {
        let registry = IntentRegistry::standard();
        assert_eq!(registry.len(), IntentKind::ALL.len());
        for kind in IntentKind::ALL {
            let intent = registry.get(kind).unwrap();
            assert_eq!(intent.kind(), kind);
        }
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let registry = IntentRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.get(IntentKind::Run).is_none());
    }

    #[test]
    fn register_replaces_by_kind() {
        let mut registry = IntentRegistry::empty().with(Arc::new(RunIntent));
        registry.register(Arc::new(RunIntent));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(IntentKind::Run));
    }
}
