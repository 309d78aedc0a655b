//! Cached list pages and the interface for marking them stale.
//!
//! Each entity has one list page on the dashboard. Rendering it needs a full
//! table scan, so the rendered HTML is kept until a mutation says otherwise.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::endpoints;

/// The dashboard sections whose rendered pages are cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachedView {
    /// The category list.
    Categories,
    /// The tag list.
    Tags,
    /// The expense list.
    Expenses,
}

impl CachedView {
    /// The route the view is served from, which doubles as its cache key.
    pub fn path(self) -> &'static str {
        match self {
            CachedView::Categories => endpoints::CATEGORIES_VIEW,
            CachedView::Tags => endpoints::TAGS_VIEW,
            CachedView::Expenses => endpoints::EXPENSES_VIEW,
        }
    }

    /// The views that show data from this view's entity, including itself.
    ///
    /// The expense list shows category and tag names, so it goes stale
    /// whenever either of those change.
    fn dependents(self) -> &'static [CachedView] {
        match self {
            CachedView::Categories => &[CachedView::Categories, CachedView::Expenses],
            CachedView::Tags => &[CachedView::Tags, CachedView::Expenses],
            CachedView::Expenses => &[CachedView::Expenses],
        }
    }
}

/// Something that can be told a view is stale and must be recomputed on the
/// next read.
pub trait InvalidateView {
    /// Mark `view` as stale.
    fn invalidate(&self, view: CachedView);
}

/// An in-process store of rendered list pages.
///
/// Clones share the same underlying pages.
#[derive(Debug, Clone, Default)]
pub struct PageCache {
    pages: Arc<Mutex<Pages>>,
}

#[derive(Debug, Default)]
struct Pages {
    html: HashMap<CachedView, String>,
    /// Bumped on every invalidation so a render that started before it is
    /// not cached.
    generations: HashMap<CachedView, u64>,
}

impl Pages {
    fn generation(&self, view: CachedView) -> u64 {
        self.generations.get(&view).copied().unwrap_or_default()
    }
}

impl PageCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached HTML for `view`, if it is fresh.
    pub fn get(&self, view: CachedView) -> Option<String> {
        self.lock().html.get(&view).cloned()
    }

    /// Store the rendered HTML for `view`.
    pub fn insert(&self, view: CachedView, html: String) {
        self.lock().html.insert(view, html);
    }

    /// The cached HTML for `view`, or the output of `render` if the view is
    /// stale. Successful renders are cached, failures are not.
    ///
    /// The lock is not held while rendering. If `view` is invalidated while
    /// `render` runs, the result is returned but not cached.
    pub fn get_or_render<E>(
        &self,
        view: CachedView,
        render: impl FnOnce() -> Result<String, E>,
    ) -> Result<String, E> {
        let generation = {
            let pages = self.lock();

            if let Some(html) = pages.html.get(&view) {
                return Ok(html.clone());
            }

            pages.generation(view)
        };

        let html = render()?;

        let mut pages = self.lock();
        if pages.generation(view) == generation {
            pages.html.insert(view, html.clone());
        } else {
            tracing::debug!("Not caching {}, it was invalidated during render", view.path());
        }

        Ok(html)
    }

    // The cache only holds data derived from the database, so a panic while
    // holding the lock cannot leave it in a state worse than stale.
    fn lock(&self) -> MutexGuard<'_, Pages> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InvalidateView for PageCache {
    fn invalidate(&self, view: CachedView) {
        let mut pages = self.lock();

        for &dependent in view.dependents() {
            *pages.generations.entry(dependent).or_default() += 1;

            if pages.html.remove(&dependent).is_some() {
                tracing::debug!("Invalidated cached page {}", dependent.path());
            }
        }
    }
}
