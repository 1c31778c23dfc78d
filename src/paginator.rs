//! Pagination state and the pagination bar.
//!
//! This component tracks the current page, the page size and the total the
//! bar reports, and renders the bar itself: total count, page-size selector,
//! previous/next controls and page buttons collapsed with ellipses. It does
//! not slice rows; the grid hands the page and size to the derivation
//! pipeline.
//!
//! Pages are one-based. Changing the page size always returns to page 1.

use crate::error::GridError;
use crate::key::{self, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use log::debug;

/// Page sizes offered by default.
pub const DEFAULT_PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

/// Up to this many pages every page gets a button.
const MAX_UNCOLLAPSED: usize = 7;

/// One entry of the page-button strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A button for a page number.
    Page(usize),
    /// A gap between non-adjacent page buttons.
    Ellipsis,
}

/// Key bindings for pagination.
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Previous page.
    pub prev_page: key::Binding,
    /// Next page.
    pub next_page: key::Binding,
    /// Cycle to the next allowed page size.
    pub next_page_size: key::Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            prev_page: key::new_binding(vec![
                key::with_keys_str(&["pgup", "["]),
                key::with_help("pgup/[", "prev page"),
            ]),
            next_page: key::new_binding(vec![
                key::with_keys_str(&["pgdown", "]"]),
                key::with_help("pgdn/]", "next page"),
            ]),
            next_page_size: key::new_binding(vec![
                key::with_keys_str(&["z"]),
                key::with_help("z", "page size"),
            ]),
        }
    }
}

impl KeyMapTrait for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.prev_page, &self.next_page, &self.next_page_size]]
    }
}

/// Pagination state.
///
/// ```rust
/// use bubbletea_datagrid::paginator::{Model, PageItem};
///
/// let mut pager = Model::new().with_total_items(200);
/// assert_eq!(pager.total_pages(), 20);
///
/// pager.go_to(10);
/// assert_eq!(
///     pager.page_items(),
///     vec![
///         PageItem::Page(1),
///         PageItem::Ellipsis,
///         PageItem::Page(8),
///         PageItem::Page(9),
///         PageItem::Page(10),
///         PageItem::Page(11),
///         PageItem::Page(12),
///         PageItem::Ellipsis,
///         PageItem::Page(20),
///     ]
/// );
///
/// pager.set_page_size(25).unwrap();
/// assert_eq!(pager.page(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    page: usize,
    page_size: usize,
    page_sizes: Vec<usize>,
    total_items: usize,
    /// Label after the total count, e.g. "total".
    pub total_label: String,
    /// Key bindings.
    pub keymap: PaginatorKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZES[0],
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            total_items: 0,
            total_label: "total".to_string(),
            keymap: PaginatorKeyMap::default(),
        }
    }
}

impl Model {
    /// Page 1 of nothing, ten per page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total the bar reports (builder pattern).
    pub fn with_total_items(mut self, items: usize) -> Self {
        self.total_items = items;
        self
    }

    /// Replaces the allowed page sizes (builder pattern).
    ///
    /// Zero sizes are dropped; an empty list keeps the defaults. The current
    /// size becomes the first allowed size if it is no longer allowed.
    pub fn with_page_sizes(mut self, sizes: &[usize]) -> Self {
        let sizes: Vec<usize> = sizes.iter().copied().filter(|&s| s > 0).collect();
        if !sizes.is_empty() {
            if !sizes.contains(&self.page_size) {
                self.page_size = sizes[0];
            }
            self.page_sizes = sizes;
        }
        self
    }

    /// Sets the page size (builder pattern). Sizes outside the allowed set are ignored.
    pub fn with_page_size(mut self, size: usize) -> Self {
        let _ = self.set_page_size(size);
        self
    }

    /// Current one-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Allowed page sizes.
    pub fn page_sizes(&self) -> &[usize] {
        &self.page_sizes
    }

    /// Total the bar reports.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Updates the reported total. The page is left alone.
    pub fn set_total_items(&mut self, items: usize) {
        self.total_items = items;
    }

    /// Number of pages for the reported total; zero when there is nothing.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Jumps to `page` without bounds checks. Pages past the end show nothing.
    pub fn go_to(&mut self, page: usize) {
        let page = page.max(1);
        if page != self.page {
            debug!("page {} -> {}", self.page, page);
            self.page = page;
        }
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), GridError> {
        if !self.page_sizes.contains(&size) {
            return Err(GridError::PageSizeNotAllowed(size));
        }
        debug!("page size {} -> {}", self.page_size, size);
        self.page_size = size;
        self.page = 1;
        Ok(())
    }

    /// Moves to the next allowed page size, wrapping around.
    pub fn cycle_page_size(&mut self) {
        let next = self
            .page_sizes
            .iter()
            .position(|&s| s == self.page_size)
            .map_or(0, |i| (i + 1) % self.page_sizes.len());
        self.page_size = self.page_sizes[next];
        self.page = 1;
        debug!("page size cycled to {}", self.page_size);
    }

    /// Pulls the page back inside `1..=total_pages`.
    pub fn clamp_page(&mut self) {
        let last = self.total_pages().max(1);
        if self.page > last {
            self.go_to(last);
        }
    }

    /// Whether the previous control is disabled.
    pub fn on_first_page(&self) -> bool {
        self.page <= 1
    }

    /// Whether the next control is disabled.
    pub fn on_last_page(&self) -> bool {
        self.page >= self.total_pages()
    }

    /// Goes back one page, stopping at page 1.
    pub fn prev_page(&mut self) {
        if !self.on_first_page() {
            self.go_to(self.page - 1);
        }
    }

    /// Goes forward one page, stopping at the last page.
    pub fn next_page(&mut self) {
        if !self.on_last_page() {
            self.go_to(self.page + 1);
        }
    }

    /// The page-button strip.
    ///
    /// With seven pages or fewer every page is listed. Otherwise the first
    /// and last pages are always listed around a window of pages near the
    /// current one, and an ellipsis marks each gap.
    pub fn page_items(&self) -> Vec<PageItem> {
        let total = self.total_pages();
        if total <= MAX_UNCOLLAPSED {
            return (1..=total).map(PageItem::Page).collect();
        }

        let current = self.page.clamp(1, total);
        let (start, end) = if current <= 4 {
            (2, 5)
        } else if current >= total - 3 {
            (total - 4, total - 1)
        } else {
            (current - 2, current + 2)
        };

        let mut items = vec![PageItem::Page(1)];
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
        items.extend((start..=end).map(PageItem::Page));
        if end < total - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total));
        items
    }

    /// Handles pagination keys. Returns true when the state changed.
    pub fn handle_key(&mut self, msg: &KeyMsg) -> bool {
        let before = (self.page, self.page_size);
        if self.keymap.next_page.matches(msg) {
            self.next_page();
        } else if self.keymap.prev_page.matches(msg) {
            self.prev_page();
        } else if self.keymap.next_page_size.matches(msg) {
            self.cycle_page_size();
        }
        before != (self.page, self.page_size)
    }

    /// Forwards a message to [`Model::handle_key`].
    pub fn update(&mut self, msg: &Msg) -> bool {
        msg.downcast_ref::<KeyMsg>()
            .is_some_and(|key_msg| self.handle_key(key_msg))
    }

    /// Renders the bar without styling, e.g.
    /// `"200 total   Per page: 10   ‹ 1 … 8 9 [10] 11 12 … 20 ›"`.
    pub fn view(&self) -> String {
        let mut strip = Vec::new();
        strip.push(if self.on_first_page() { " " } else { "‹" }.to_string());
        for item in self.page_items() {
            strip.push(match item {
                PageItem::Page(p) if p == self.page => format!("[{p}]"),
                PageItem::Page(p) => p.to_string(),
                PageItem::Ellipsis => "…".to_string(),
            });
        }
        strip.push(if self.on_last_page() { " " } else { "›" }.to_string());

        format!(
            "{} {}   Per page: {}   {}",
            self.total_items,
            self.total_label,
            self.page_size,
            strip.join(" ")
        )
    }
}
