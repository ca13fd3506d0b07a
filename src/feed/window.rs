use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;

/// Tuning for the scroll trigger and the append step.
#[derive(Debug, Clone)]
pub struct ScrollOptions {
    /// Fraction of the trailing sentinel that must be visible before a
    /// sighting triggers a load.
    pub threshold: f64,
    /// Extra pixels of viewport the embedder extends its sentinel observer
    /// by, so the next page starts loading before the reader hits the end.
    pub prefetch_margin: u32,
    /// Delay between accepting a load and appending the slice, so the
    /// loading affordance is actually visible.
    pub load_delay: Duration,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            prefetch_margin: 100,
            load_delay: Duration::from_millis(500),
        }
    }
}

/// Outcome of one `load_more` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMore {
    /// A non-empty slice was appended.
    Appended(usize),
    /// The next slice was empty; the window is now exhausted.
    Exhausted,
    /// Dropped: a load was already in flight, the window was exhausted, or
    /// the sentinel was not visible enough.
    Skipped,
}

struct WindowState<T> {
    displayed: Vec<T>,
    page: usize,
    has_more: bool,
}

/// A progressively-grown window over an already-fetched candidate
/// sequence. Built once per filter; a filter change means discarding the
/// window and building a new one; the window is never re-targeted in
/// place.
///
/// Appended slices are taken by position, not identity: if the underlying
/// collection mutates between fetches of the candidate sequence, repeated
/// or skipped items are possible. That gap is inherited from the original
/// contract and intentionally not papered over with de-duplication.
pub struct ScrollWindow<T> {
    items: Vec<T>,
    page_size: usize,
    opts: ScrollOptions,
    state: RwLock<WindowState<T>>,
    loading: AtomicBool,
}

impl<T: Clone> ScrollWindow<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self::with_options(items, page_size, ScrollOptions::default())
    }

    pub fn with_options(items: Vec<T>, page_size: usize, opts: ScrollOptions) -> Self {
        let displayed: Vec<T> = items.iter().take(page_size).cloned().collect();
        let has_more = items.len() > page_size;

        Self {
            items,
            page_size,
            opts,
            state: RwLock::new(WindowState {
                displayed,
                page: 1,
                has_more,
            }),
            loading: AtomicBool::new(false),
        }
    }

    /// Appends the next page slice after the configured delay. A call that
    /// arrives while another is in flight, or after the window is
    /// exhausted, is dropped, not queued.
    pub async fn load_more(&self) -> LoadMore {
        if self.loading.swap(true, Ordering::SeqCst) {
            return LoadMore::Skipped;
        }
        if !self.state.read().await.has_more {
            self.loading.store(false, Ordering::SeqCst);
            return LoadMore::Skipped;
        }

        tokio::time::sleep(self.opts.load_delay).await;

        let outcome = {
            let mut state = self.state.write().await;
            let start = state.page * self.page_size;
            let end = (start + self.page_size).min(self.items.len());

            if start < end {
                state.displayed.extend_from_slice(&self.items[start..end]);
                state.page += 1;
                state.has_more = state.page * self.page_size < self.items.len();
                LoadMore::Appended(end - start)
            } else {
                state.has_more = false;
                LoadMore::Exhausted
            }
        };

        self.loading.store(false, Ordering::SeqCst);
        outcome
    }

    /// The automatic trigger: the embedder reports how much of the
    /// trailing sentinel is visible, and the window loads once the
    /// configured threshold is reached.
    pub async fn sentinel_visible(&self, visible_ratio: f64) -> LoadMore {
        if visible_ratio < self.opts.threshold {
            return LoadMore::Skipped;
        }
        self.load_more().await
    }

    pub async fn displayed(&self) -> Vec<T> {
        self.state.read().await.displayed.clone()
    }

    pub async fn displayed_len(&self) -> usize {
        self.state.read().await.displayed.len()
    }

    pub async fn page(&self) -> usize {
        self.state.read().await.page
    }

    pub async fn has_more(&self) -> bool {
        self.state.read().await.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn total_len(&self) -> usize {
        self.items.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.opts
    }
}
