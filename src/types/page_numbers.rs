use std::fmt;

use serde::{Serialize, Serializer};

pub const DEFAULT_MAX_VISIBLE: usize = 5;
/// Widest window a page control is ever asked to render.
pub const MAX_VISIBLE_CAP: usize = 100;

const ELLIPSIS: &str = "...";

/// A slot in a rendered page control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLabel {
    Page(usize),
    Ellipsis,
}

impl PageLabel {
    pub fn page(&self) -> Option<usize> {
        match self {
            PageLabel::Page(page) => Some(*page),
            PageLabel::Ellipsis => None,
        }
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self, PageLabel::Ellipsis)
    }
}

impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLabel::Page(page) => write!(f, "{}", page),
            PageLabel::Ellipsis => f.write_str(ELLIPSIS),
        }
    }
}

/// Pages render as JSON numbers, the ellipsis as the string `"..."`.
impl Serialize for PageLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageLabel::Page(page) => serializer.serialize_u64(*page as u64),
            PageLabel::Ellipsis => serializer.serialize_str(ELLIPSIS),
        }
    }
}

/// Builds the labels of a page control showing at most `max_visible`
/// consecutive pages around `current_page`.
///
/// The first and last page are always reachable. A gap between them and the
/// window is shown as an ellipsis only when it hides two or more pages; a lone
/// hidden page is shown as itself. `max_visible` is clamped into
/// `[1, MAX_VISIBLE_CAP]`, so the result never holds more than
/// `MAX_VISIBLE_CAP + 4` labels.
pub fn generate_page_numbers(
    current_page: usize,
    total_pages: usize,
    max_visible: usize,
) -> Vec<PageLabel> {
    let max_visible = max_visible.clamp(1, MAX_VISIBLE_CAP);
    if total_pages <= max_visible {
        return (1..=total_pages).map(PageLabel::Page).collect();
    }

    let current_page = current_page.clamp(1, total_pages);
    let half_visible = max_visible / 2;

    // total_pages > max_visible, so the last window start is at least 2
    let last_start = total_pages - (max_visible - 1);
    let start_page = current_page.saturating_sub(half_visible).clamp(1, last_start);
    let end_page = start_page + (max_visible - 1);

    let mut labels = Vec::with_capacity(max_visible.min(total_pages) + 4);
    if start_page > 1 {
        labels.push(PageLabel::Page(1));
        push_gap(&mut labels, 2, start_page - 1);
    }
    labels.extend((start_page..=end_page).map(PageLabel::Page));
    if end_page < total_pages {
        push_gap(&mut labels, end_page + 1, total_pages - 1);
        labels.push(PageLabel::Page(total_pages));
    }
    labels
}

/// Fills the hidden pages `first..=last` (possibly empty).
fn push_gap(labels: &mut Vec<PageLabel>, first: usize, last: usize) {
    match last.checked_sub(first) {
        None => {}
        Some(0) => labels.push(PageLabel::Page(first)),
        Some(_) => labels.push(PageLabel::Ellipsis),
    }
}
