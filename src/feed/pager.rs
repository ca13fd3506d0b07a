/// Discrete pagination over a fully-fetched sequence. No network
/// dependency: page changes only re-slice the items already in hand.
pub struct Pager<T> {
    items: Vec<T>,
    page_size: usize,
    current_page: usize,
    scroll_reset: bool,
}

impl<T> Pager<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            page_size,
            current_page: 1,
            scroll_reset: false,
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        (self.items.len() + self.page_size - 1) / self.page_size
    }

    /// Clamps the requested page into `[1, total_pages]` and latches a
    /// scroll-to-top reset. Every call resets scroll, including one that
    /// lands on the page already shown.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.current_page = page.min(self.total_pages()).max(1);
        self.scroll_reset = true;
        self.current_page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.current_page.saturating_sub(1))
    }

    pub fn current_items(&self) -> &[T] {
        let start = (self.current_page - 1) * self.page_size;
        if start >= self.items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    /// True once after any page change; the embedder consumes this to
    /// return the reader to the top.
    pub fn take_scroll_reset(&mut self) -> bool {
        std::mem::take(&mut self.scroll_reset)
    }
}
