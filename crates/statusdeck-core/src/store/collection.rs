// ── Generic reactive entity collection ──
//
// Concurrent storage keyed by EntityId with push-based change
// notification via `watch` channels. Snapshots keep the order in which
// entities were first inserted, since grouping and listings depend on
// backend order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::watch;

use crate::model::{EntityId, Keyed};

struct Slot<T> {
    seq: u64,
    value: Arc<T>,
}

/// A reactive collection for a single entity type.
///
/// Every mutation bumps a version counter and rebuilds the ordered
/// snapshot that subscribers receive.
pub(crate) struct EntityCollection<T: Keyed + Send + Sync + 'static> {
    by_id: DashMap<EntityId, Slot<T>>,
    next_seq: AtomicU64,
    version: watch::Sender<u64>,
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Keyed + Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            next_seq: AtomicU64::new(0),
            version,
            snapshot,
        }
    }

    /// Insert or replace an entity. Returns `true` if the id was new.
    /// A replaced entity keeps its original position.
    pub(crate) fn upsert(&self, entity: T) -> bool {
        let is_new = self.insert_quiet(entity);
        self.publish();
        is_new
    }

    /// Replace the whole collection, keeping the iteration order of `entities`.
    pub(crate) fn replace_all(&self, entities: impl IntoIterator<Item = T>) {
        self.by_id.clear();
        self.next_seq.store(0, Ordering::Relaxed);
        for entity in entities {
            self.insert_quiet(entity);
        }
        self.publish();
    }

    /// Remove an entity by id. Returns the removed entity if it existed.
    pub(crate) fn remove(&self, id: &EntityId) -> Option<Arc<T>> {
        let removed = self.by_id.remove(id).map(|(_, slot)| slot.value);
        if removed.is_some() {
            self.publish();
        }
        removed
    }

    pub(crate) fn get(&self, id: &EntityId) -> Option<Arc<T>> {
        self.by_id.get(id).map(|slot| Arc::clone(&slot.value))
    }

    pub(crate) fn contains(&self, id: &EntityId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    /// Ids in snapshot order.
    pub(crate) fn ids(&self) -> Vec<EntityId> {
        self.snapshot().iter().map(|e| e.id().clone()).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn insert_quiet(&self, entity: T) -> bool {
        let id = entity.id().clone();
        let value = Arc::new(entity);

        match self.by_id.entry(id) {
            Entry::Occupied(mut existing) => {
                existing.get_mut().value = value;
                false
            }
            Entry::Vacant(vacant) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                vacant.insert(Slot { seq, value });
                true
            }
        }
    }

    /// Rebuild the ordered snapshot and broadcast it.
    fn publish(&self) {
        let mut slots: Vec<(u64, Arc<T>)> = self
            .by_id
            .iter()
            .map(|r| (r.value().seq, Arc::clone(&r.value().value)))
            .collect();
        slots.sort_unstable_by_key(|(seq, _)| *seq);
        let values: Vec<Arc<T>> = slots.into_iter().map(|(_, v)| v).collect();

        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: EntityId,
        label: &'static str,
    }

    impl Keyed for Item {
        fn id(&self) -> &EntityId {
            &self.id
        }
    }

    fn item(id: &str, label: &'static str) -> Item {
        Item {
            id: id.into(),
            label,
        }
    }

    fn labels(col: &EntityCollection<Item>) -> Vec<&'static str> {
        col.snapshot().iter().map(|i| i.label).collect()
    }

    #[test]
    fn upsert_reports_new_ids() {
        let col = EntityCollection::new();
        assert!(col.upsert(item("a", "first")));
        assert!(!col.upsert(item("a", "second")));
        assert_eq!(col.len(), 1);
        assert_eq!(col.get(&"a".into()).unwrap().label, "second");
    }

    #[test]
    fn snapshot_keeps_insertion_order() {
        let col = EntityCollection::new();
        for (id, label) in [("z", "z"), ("a", "a"), ("m", "m")] {
            col.upsert(item(id, label));
        }
        col.upsert(item("a", "a2"));
        assert_eq!(labels(&col), vec!["z", "a2", "m"]);
        assert_eq!(
            col.ids(),
            vec![EntityId::from("z"), EntityId::from("a"), EntityId::from("m")]
        );
    }

    #[test]
    fn replace_all_resets_order_and_contents() {
        let col = EntityCollection::new();
        col.upsert(item("old", "old"));
        col.replace_all([item("b", "b"), item("a", "a")]);
        assert!(!col.contains(&"old".into()));
        assert_eq!(labels(&col), vec!["b", "a"]);
    }

    #[test]
    fn remove_publishes_only_when_present() {
        let col = EntityCollection::new();
        col.upsert(item("a", "a"));
        let before = col.version();

        assert!(col.remove(&"missing".into()).is_none());
        assert_eq!(col.version(), before);

        assert_eq!(col.remove(&"a".into()).unwrap().label, "a");
        assert_eq!(col.version(), before + 1);
        assert!(col.snapshot().is_empty());
    }

    #[test]
    fn subscribers_see_changes() {
        let col = EntityCollection::new();
        let mut rx = col.subscribe();
        col.upsert(item("a", "a"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }
}
