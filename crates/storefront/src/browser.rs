//! Catalog browsing and pagination state.
//!
//! Two pagination modes drive the catalog grid:
//!
//! - **Server-driven**: one page fetched per navigation; the page count
//!   comes from server metadata when the envelope carried any, else 1.
//! - **Static**: a fixed 10-page superset fetched once, then sliced
//!   locally with a viewport-dependent page size. A viewport resize
//!   recomputes the page size and re-slices the already-fetched
//!   superset without re-fetching.
//!
//! The browser itself is a synchronous state machine; the session
//! fetches pages and feeds them in via [`CatalogBrowser::apply_page`] /
//! [`CatalogBrowser::apply_superset`].

use tracing::warn;

use crate::catalog::types::{Book, BookPage};

/// Viewport width breakpoints, mirroring the storefront grid: two rows
/// of 4 / 3 / 2 / 1 columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// Width >= 1024px.
    Wide,
    /// Width >= 768px.
    Medium,
    /// Width >= 640px.
    Narrow,
    /// Anything narrower.
    Mobile,
}

impl Breakpoint {
    /// Classify a viewport width in pixels.
    #[must_use]
    pub const fn from_width(width: u32) -> Self {
        if width >= 1024 {
            Self::Wide
        } else if width >= 768 {
            Self::Medium
        } else if width >= 640 {
            Self::Narrow
        } else {
            Self::Mobile
        }
    }

    /// Items shown per page at this breakpoint.
    #[must_use]
    pub const fn page_size(self) -> usize {
        match self {
            Self::Wide => 8,
            Self::Medium => 6,
            Self::Narrow => 4,
            Self::Mobile => 2,
        }
    }
}

/// Position within a browsing context. Never persisted; recomputed on
/// viewport resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// 1-based current page.
    pub current_page: u32,
    /// Always >= 1.
    pub total_pages: u32,
    /// Derived from the viewport breakpoint.
    pub items_per_page: usize,
}

#[derive(Debug, Clone)]
enum BrowseMode {
    /// One fetched page at a time.
    Server { page: Vec<Book> },
    /// The whole superset, sliced locally.
    Static { superset: Vec<Book> },
}

/// Pagination state machine for one browsing context.
#[derive(Debug, Clone)]
pub struct CatalogBrowser {
    mode: BrowseMode,
    cursor: PageCursor,
}

impl CatalogBrowser {
    /// Create a server-driven browser for the given viewport width.
    #[must_use]
    pub fn server_paged(viewport_width: u32) -> Self {
        Self::with_mode(BrowseMode::Server { page: Vec::new() }, viewport_width)
    }

    /// Create a static (client-driven) browser for the given viewport
    /// width.
    #[must_use]
    pub fn static_paged(viewport_width: u32) -> Self {
        Self::with_mode(
            BrowseMode::Static {
                superset: Vec::new(),
            },
            viewport_width,
        )
    }

    fn with_mode(mode: BrowseMode, viewport_width: u32) -> Self {
        Self {
            mode,
            cursor: PageCursor {
                current_page: 1,
                total_pages: 1,
                items_per_page: Breakpoint::from_width(viewport_width).page_size(),
            },
        }
    }

    /// Feed a fetched page into a server-driven browser.
    ///
    /// The page count is taken from server metadata when present, else 1.
    pub fn apply_page(&mut self, page: BookPage) {
        match &mut self.mode {
            BrowseMode::Server { page: current } => {
                *current = page.books;
                self.cursor.total_pages = page.total_pages.unwrap_or(1).max(1);
                self.clamp_page();
            }
            BrowseMode::Static { .. } => {
                warn!("apply_page called on a static browser; ignoring");
            }
        }
    }

    /// Feed the fetched superset into a static browser.
    pub fn apply_superset(&mut self, books: Vec<Book>) {
        match &mut self.mode {
            BrowseMode::Static { superset } => {
                *superset = books;
                self.recompute_static_pages();
            }
            BrowseMode::Server { .. } => {
                warn!("apply_superset called on a server browser; ignoring");
            }
        }
    }

    /// React to a viewport resize.
    ///
    /// Recomputes the page size; in static mode the page count is
    /// re-derived from the superset and the cursor clamped, with no
    /// re-fetch.
    pub fn set_viewport_width(&mut self, width: u32) {
        self.cursor.items_per_page = Breakpoint::from_width(width).page_size();
        if matches!(self.mode, BrowseMode::Static { .. }) {
            self.recompute_static_pages();
        }
    }

    /// The items visible on the current page.
    ///
    /// Server mode shows the whole fetched page; static mode slices the
    /// superset by the current cursor.
    #[must_use]
    pub fn visible(&self) -> &[Book] {
        match &self.mode {
            BrowseMode::Server { page } => page,
            BrowseMode::Static { superset } => {
                let start = (self.cursor.current_page as usize - 1) * self.cursor.items_per_page;
                let end = (start + self.cursor.items_per_page).min(superset.len());
                superset.get(start..end).unwrap_or(&[])
            }
        }
    }

    /// Advance one page. Returns whether the cursor moved; in server
    /// mode a move means the caller should fetch the new page.
    pub fn next_page(&mut self) -> bool {
        self.set_page(self.cursor.current_page + 1)
    }

    /// Go back one page. Returns whether the cursor moved.
    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.cursor.current_page.saturating_sub(1))
    }

    /// Jump to a page, clamped into `1..=total_pages`. Returns whether
    /// the cursor moved.
    pub fn set_page(&mut self, page: u32) -> bool {
        let clamped = page.clamp(1, self.cursor.total_pages);
        if clamped == self.cursor.current_page {
            return false;
        }
        self.cursor.current_page = clamped;
        true
    }

    /// Current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> PageCursor {
        self.cursor
    }

    fn recompute_static_pages(&mut self) {
        if let BrowseMode::Static { superset } = &self.mode {
            self.cursor.total_pages =
                u32::try_from(superset.len().div_ceil(self.cursor.items_per_page))
                    .unwrap_or(u32::MAX)
                    .max(1);
        }
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        self.cursor.current_page = self.cursor.current_page.clamp(1, self.cursor.total_pages);
    }
}
