//! Customs item pagination: splits a line-item list across fixed-capacity sheets.
//!
//! The first sheet of a declaration holds only a few lines because it also
//! carries the address, barcode and signature blocks; continuation sheets
//! hold many more. The partition is exhaustive and order-preserving, and
//! the paginator knows nothing about totals: the renderer asks
//! [`PaginationResult::is_last`] to decide where the totals row goes.

use serde::Serialize;
use thiserror::Error;

use crate::customs::line_item::LineItem;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Primary,
    Supplementary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub kind: PageKind,
    /// 1 for the primary page; supplementary pages count up from 2.
    pub sequence_number: u32,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PaginationResult {
    pages: Vec<Page>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("{field} must be a positive integer, got {value}")]
    InvalidCapacity { field: &'static str, value: i64 },
}

/// Validated pair of per-sheet capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCapacities {
    first: usize,
    later: usize,
}

impl PageCapacities {
    pub fn new(first_page_capacity: i64, later_page_capacity: i64) -> Result<Self, PaginationError> {
        Ok(PageCapacities {
            first: positive("first_page_capacity", first_page_capacity)?,
            later: positive("later_page_capacity", later_page_capacity)?,
        })
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn later(&self) -> usize {
        self.later
    }

    pub fn paginate(&self, items: &[LineItem]) -> PaginationResult {
        if items.is_empty() {
            return PaginationResult::default();
        }

        let split = self.first.min(items.len());
        let (head, rest) = items.split_at(split);

        let mut pages = Vec::with_capacity(1 + rest.len().div_ceil(self.later));
        pages.push(Page {
            kind: PageKind::Primary,
            sequence_number: 1,
            items: head.to_vec(),
        });
        pages.extend(rest.chunks(self.later).zip(2u32..).map(|(chunk, n)| Page {
            kind: PageKind::Supplementary,
            sequence_number: n,
            items: chunk.to_vec(),
        }));

        PaginationResult { pages }
    }
}

fn positive(field: &'static str, value: i64) -> Result<usize, PaginationError> {
    match usize::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(PaginationError::InvalidCapacity { field, value }),
    }
}

/// Partitions `items` into a primary page of up to `first_page_capacity`
/// lines followed by supplementary pages of up to `later_page_capacity`.
///
/// Fails only when a capacity is not positive; an empty list yields no pages.
pub fn paginate(
    items: &[LineItem],
    first_page_capacity: i64,
    later_page_capacity: i64,
) -> Result<PaginationResult, PaginationError> {
    let capacities = PageCapacities::new(first_page_capacity, later_page_capacity)?;
    Ok(capacities.paginate(items))
}

impl PaginationResult {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// True when `index` (0-based) is the final page, i.e. the one that takes the totals row.
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.pages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }
}
