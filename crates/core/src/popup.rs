use crate::error::Result;
use futures::future::BoxFuture;
use std::future::Future;
use tokio::sync::Mutex;

/// A transient child surface spawned by a block (e.g. a track-info panel).
pub trait Popup: Send + Sync {
    /// Re-render the popup with fresh data.
    fn refresh(&self) -> BoxFuture<'_, Result<()>>;

    /// Tear the popup down.
    fn destroy(self: Box<Self>) -> BoxFuture<'static, Result<()>>;
}

/// The optional popup owned by a block. Toggled from click actions.
#[derive(Default)]
pub struct PopupSlot {
    inner: Mutex<Option<Box<dyn Popup>>>,
}

impl PopupSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_open(&self) -> bool {
        self.inner.lock().await.is_some()
    }

    /// Destroy the popup if one is open, otherwise create it with `create`.
    pub async fn toggle<F, Fut>(&self, create: F) -> Result<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Box<dyn Popup>>>,
    {
        let mut slot = self.inner.lock().await;
        match slot.take() {
            Some(popup) => popup.destroy().await,
            None => {
                *slot = Some(create().await?);
                Ok(())
            }
        }
    }

    /// Destroy the open popup. A no-op when none is open.
    pub async fn destroy(&self) -> Result<()> {
        let popup = self.inner.lock().await.take();
        match popup {
            Some(popup) => popup.destroy().await,
            None => Ok(()),
        }
    }

    /// Refresh the open popup, if any.
    pub async fn refresh(&self) -> Result<()> {
        match self.inner.lock().await.as_ref() {
            Some(popup) => popup.refresh().await,
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for PopupSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let open = self.inner.try_lock().map(|p| p.is_some()).ok();
        f.debug_struct("PopupSlot").field("open", &open).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        refreshed: Arc<AtomicUsize>,
        destroyed: Arc<AtomicUsize>,
    }

    impl Popup for Counting {
        fn refresh(&self) -> BoxFuture<'_, Result<()>> {
            self.refreshed.fetch_add(1, Ordering::SeqCst);
            Box::pin(async { Ok(()) })
        }

        fn destroy(self: Box<Self>) -> BoxFuture<'static, Result<()>> {
            self.destroyed.fetch_add(1, Ordering::SeqCst);
            Box::pin(async { Ok(()) })
        }
    }

    fn counting(refreshed: &Arc<AtomicUsize>, destroyed: &Arc<AtomicUsize>) -> Box<dyn Popup> {
        Box::new(Counting {
            refreshed: refreshed.clone(),
            destroyed: destroyed.clone(),
        })
    }

    #[tokio::test]
    async fn toggle_creates_then_destroys() {
        let refreshed = Arc::new(AtomicUsize::new(0));
        let destroyed = Arc::new(AtomicUsize::new(0));
        let slot = PopupSlot::new();

        slot.toggle(|| async { Ok::<_, crate::BarError>(counting(&refreshed, &destroyed)) })
            .await
            .unwrap();
        assert!(slot.is_open().await);

        slot.refresh().await.unwrap();
        assert_eq!(refreshed.load(Ordering::SeqCst), 1);

        slot.toggle(|| async { Ok::<_, crate::BarError>(counting(&refreshed, &destroyed)) })
            .await
            .unwrap();
        assert!(!slot.is_open().await);
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn destroying_absent_popup_is_noop() {
        let slot = PopupSlot::new();
        slot.destroy().await.unwrap();
        slot.destroy().await.unwrap();
        slot.refresh().await.unwrap();
        assert!(!slot.is_open().await);
    }

    #[tokio::test]
    async fn failed_create_leaves_slot_empty() {
        let slot = PopupSlot::new();
        let res = slot
            .toggle(|| async { Err::<Box<dyn Popup>, _>(crate::BarError::Action("no daemon".into())) })
            .await;
        assert!(res.is_err());
        assert!(!slot.is_open().await);
    }
}
