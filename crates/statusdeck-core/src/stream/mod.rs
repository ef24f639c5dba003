// ── Reactive entity streams ──
//
// Subscription handles over the DataStore's collections.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::{EntityId, Keyed};

type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// A subscription to one entity collection.
///
/// Holds the snapshot seen at creation, can be polled for the latest one,
/// and can wait for the next change.
pub struct EntityStream<T: Send + Sync + 'static> {
    current: Snapshot<T>,
    receiver: watch::Receiver<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> EntityStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<Snapshot<T>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    pub fn current(&self) -> &Snapshot<T> {
        &self.current
    }

    pub fn latest(&self) -> Snapshot<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change and return the new snapshot.
    /// `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    pub fn into_stream(self) -> EntityWatchStream<T> {
        EntityWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

impl<T: Keyed + Send + Sync + 'static> EntityStream<T> {
    /// Look up one entity in the latest snapshot.
    pub fn find(&self, id: &EntityId) -> Option<Arc<T>> {
        self.receiver
            .borrow()
            .iter()
            .find(|e| e.id() == id)
            .map(Arc::clone)
    }
}

/// `Stream` adapter yielding a fresh snapshot after every mutation.
pub struct EntityWatchStream<T: Send + Sync + 'static> {
    inner: WatchStream<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> Stream for EntityWatchStream<T> {
    type Item = Snapshot<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures_util::StreamExt;

    use crate::model::{Service, ServiceStatus};
    use crate::store::DataStore;

    fn svc(id: &str, status: ServiceStatus) -> Service {
        Service {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            status,
            group: None,
            uptime: None,
            last_updated: None,
        }
    }

    #[tokio::test]
    async fn changed_yields_new_snapshot() {
        let store = DataStore::new();
        let mut stream = store.subscribe_services();
        assert!(stream.current().is_empty());

        store.upsert_service(svc("api", ServiceStatus::Operational));
        let snap = stream.changed().await.unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(stream.current().len(), 1);
    }

    #[tokio::test]
    async fn find_sees_latest_value() {
        let store = DataStore::new();
        store.upsert_service(svc("api", ServiceStatus::Operational));
        let stream = store.subscribe_services();

        store.upsert_service(svc("api", ServiceStatus::MajorOutage));
        let found = stream.find(&"api".into()).unwrap();
        assert_eq!(found.status, ServiceStatus::MajorOutage);
        assert!(stream.find(&"nope".into()).is_none());
    }

    #[tokio::test]
    async fn into_stream_emits_current_then_updates() {
        let store = DataStore::new();
        let mut stream = store.subscribe_services().into_stream();

        let first = stream.next().await.unwrap();
        assert!(first.is_empty());

        store.upsert_service(svc("db", ServiceStatus::PartialOutage));
        let second = stream.next().await.unwrap();
        assert_eq!(second.len(), 1);
    }
}
