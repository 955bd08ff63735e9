//! Page selection
//!
//! Resolves a [`RangeMode`] against a document's page count into the set of
//! zero-based page indices that receive a margin.

use crate::types::RangeMode;
use std::collections::BTreeSet;

/// Ordered, deduplicated zero-based page indices, all below the page count
/// they were resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSelection {
    indices: Vec<usize>,
}

impl PageSelection {
    /// No pages selected
    pub fn none() -> Self {
        Self::default()
    }

    /// Every page of a `total_pages` document
    pub fn all(total_pages: usize) -> Self {
        Self {
            indices: (0..total_pages).collect(),
        }
    }

    /// 1-based odd pages (zero-based indices 0, 2, 4, ...)
    pub fn odd(total_pages: usize) -> Self {
        Self {
            indices: (0..total_pages).filter(|i| (i + 1) % 2 != 0).collect(),
        }
    }

    /// 1-based even pages (zero-based indices 1, 3, 5, ...)
    pub fn even(total_pages: usize) -> Self {
        Self {
            indices: (0..total_pages).filter(|i| (i + 1) % 2 == 0).collect(),
        }
    }

    /// Parse a range expression such as `"1-3, 5"`.
    ///
    /// Tokens are separated by commas. A token is either a 1-based page
    /// number or an inclusive `start-end` range. Pages outside
    /// `1..=total_pages`, non-numeric tokens and reversed ranges contribute
    /// nothing; parsing itself never fails.
    pub fn parse(expression: &str, total_pages: usize) -> Self {
        let mut pages = BTreeSet::new();

        for token in expression.split(',').map(str::trim) {
            if token.is_empty() {
                continue;
            }

            if token.contains('-') {
                let mut bounds = token.split('-');
                let start = bounds.next().and_then(parse_page_number);
                let end = bounds.next().and_then(parse_page_number);
                let (Some(start), Some(end)) = (start, end) else {
                    log::debug!("Ignoring malformed page range '{}'", token);
                    continue;
                };

                // Clamp before iterating so huge ranges stay cheap
                let first = start.max(1);
                let last = end.min(total_pages);
                for page in first..=last {
                    pages.insert(page - 1);
                }
            } else if let Some(page) = parse_page_number(token) {
                if (1..=total_pages).contains(&page) {
                    pages.insert(page - 1);
                }
            } else {
                log::debug!("Ignoring malformed page number '{}'", token);
            }
        }

        Self {
            indices: pages.into_iter().collect(),
        }
    }

    /// Resolve a selection mode for a document with `total_pages` pages.
    ///
    /// A blank custom expression selects every page.
    pub fn resolve(mode: &RangeMode, total_pages: usize) -> Self {
        match mode {
            RangeMode::All => Self::all(total_pages),
            RangeMode::Odd => Self::odd(total_pages),
            RangeMode::Even => Self::even(total_pages),
            RangeMode::Custom(expression) if expression.trim().is_empty() => {
                Self::all(total_pages)
            }
            RangeMode::Custom(expression) => Self::parse(expression, total_pages),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

fn parse_page_number(text: &str) -> Option<usize> {
    text.trim().parse().ok()
}
