//! View staleness tracking.
//!
//! A successful mutation marks the affected views stale; the next successful
//! fetch of a view marks it fresh again. The host owns the cache and hands
//! it to [`ChatService`](crate::service::chat::ChatService).

use std::sync::Arc;

use dashmap::DashSet;

use coffeechat_types::view::View;

/// Port for whatever the hosting surface uses to remember stale views.
pub trait ViewCache: Send + Sync {
    /// Mark a view stale so its next render re-fetches.
    fn invalidate(&self, view: View);

    /// Clear the stale marker after a successful fetch.
    fn mark_fresh(&self, view: View);

    fn is_stale(&self, view: View) -> bool;
}

impl<T: ViewCache + ?Sized> ViewCache for Arc<T> {
    fn invalidate(&self, view: View) {
        (**self).invalidate(view)
    }

    fn mark_fresh(&self, view: View) {
        (**self).mark_fresh(view)
    }

    fn is_stale(&self, view: View) -> bool {
        (**self).is_stale(view)
    }
}

/// Process-local set of stale views.
#[derive(Debug, Default)]
pub struct InMemoryViewCache {
    stale: DashSet<View>,
}

impl InMemoryViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the views currently marked stale.
    pub fn stale_views(&self) -> Vec<View> {
        self.stale.iter().map(|v| *v).collect()
    }
}

impl ViewCache for InMemoryViewCache {
    fn invalidate(&self, view: View) {
        tracing::debug!(%view, "view invalidated");
        self.stale.insert(view);
    }

    fn mark_fresh(&self, view: View) {
        self.stale.remove(&view);
    }

    fn is_stale(&self, view: View) -> bool {
        self.stale.contains(&view)
    }
}
