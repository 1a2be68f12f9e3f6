//! Static sample items served by the data-listing endpoint.
//!
//! The list is a `const` slice: it is never mutated and every request
//! observes the same three records in the same order.

use serde::Serialize;

/// An immutable sample record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Item {
    /// Stable numeric identifier, starting at 1.
    pub id: u32,
    /// Display name (e.g. `"Item 1"`).
    pub name: &'static str,
    /// Short human-readable description.
    pub description: &'static str,
}

const SAMPLE_ITEMS: &[Item] = &[
    Item {
        id: 1,
        name: "Item 1",
        description: "First item",
    },
    Item {
        id: 2,
        name: "Item 2",
        description: "Second item",
    },
    Item {
        id: 3,
        name: "Item 3",
        description: "Third item",
    },
];

/// Returns the three canonical sample items.
#[must_use]
pub fn sample_items() -> &'static [Item] {
    SAMPLE_ITEMS
}
