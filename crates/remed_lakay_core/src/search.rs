//! Name search over catalogue collections.

use crate::domain::{Disease, Plant};

/// Anything listed with a display name.
pub trait Named {
    fn display_name(&self) -> &str;
}

impl Named for Plant {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Named for Disease {
    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Items whose display name contains `query`, ignoring case, in their original order.
/// An empty query matches everything.
pub fn filter_by_name<'a, T: Named>(items: &'a [T], query: &str) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.display_name().to_lowercase().contains(&needle))
        .collect()
}
