//! Windowed paginator.
//!
//! Pure function of `(current_page, page_count)`: no internal state, every
//! render derives from those two numbers. Selection is validated here so
//! out-of-range pages are never emitted to the list state.

use notehub_core::defaults::{PAGE_MARGIN_DISPLAYED, PAGE_RANGE_DISPLAYED};

use crate::node::{Node, NodeKind};

pub const PAGINATION_ID: &str = "pagination";
pub const PREV_ID: &str = "page-prev";
pub const NEXT_ID: &str = "page-next";

const PREV_LABEL: &str = "<";
const NEXT_LABEL: &str = ">";
const BREAK_LABEL: &str = "...";

/// One slot in the rendered page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current_page: u32,
    page_count: u32,
}

impl Paginator {
    /// `page_count` is treated as at least one; `current_page` is clamped
    /// into range so a stale page never renders an impossible strip.
    pub fn new(current_page: u32, page_count: u32) -> Self {
        let page_count = page_count.max(1);
        Self {
            current_page: current_page.clamp(1, page_count),
            page_count,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Validate a page selection.
    ///
    /// Returns the page only when it is inside `[1, page_count]` and
    /// differs from the current page; anything else is `None` and must not
    /// trigger a fetch.
    pub fn select(&self, page: u32) -> Option<u32> {
        if page >= 1 && page <= self.page_count && page != self.current_page {
            Some(page)
        } else {
            None
        }
    }

    /// The windowed item strip: a window of pages around the current one,
    /// margin pages at both ends, and breaks for the gaps. Consecutive
    /// breaks collapse into one.
    pub fn page_items(&self) -> Vec<PageItem> {
        let n = i64::from(self.page_count);
        let s = i64::from(self.current_page) - 1;
        let range = i64::from(PAGE_RANGE_DISPLAYED);
        let margin = i64::from(PAGE_MARGIN_DISPLAYED);

        // Window half-widths, scaled by two so the halves of an odd range
        // stay exact in integer math.
        let mut left2 = range;
        let mut right2 = range;
        if 2 * s > 2 * n - range {
            right2 = 2 * (n - s);
            left2 = 2 * range - right2;
        } else if 2 * s < range {
            left2 = 2 * s;
            right2 = 2 * range - left2;
        }

        let mut items: Vec<PageItem> = Vec::new();
        for index in 0..n {
            let page = index + 1;
            let in_margin = page <= margin || page > n - margin;
            let in_window = 2 * index >= 2 * s - left2 && 2 * index <= 2 * s + right2;
            if in_margin || in_window {
                items.push(PageItem::Page(page as u32));
            } else if items.last() != Some(&PageItem::Break) {
                items.push(PageItem::Break);
            }
        }
        items
    }

    pub fn render(&self) -> Node {
        let mut strip = Node::new(NodeKind::Pagination).with_id(PAGINATION_ID).child(
            Node::new(NodeKind::Button)
                .with_id(PREV_ID)
                .with_text(PREV_LABEL)
                .disabled(self.current_page == 1),
        );
        for item in self.page_items() {
            strip = strip.child(match item {
                PageItem::Page(page) => Node::new(NodeKind::Button)
                    .with_id(format!("page-{}", page))
                    .with_text(page.to_string())
                    .active(page == self.current_page),
                PageItem::Break => Node::new(NodeKind::Label).with_text(BREAK_LABEL),
            });
        }
        strip.child(
            Node::new(NodeKind::Button)
                .with_id(NEXT_ID)
                .with_text(NEXT_LABEL)
                .disabled(self.current_page == self.page_count),
        )
    }
}
