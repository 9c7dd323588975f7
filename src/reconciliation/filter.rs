//! Hierarchy slice descriptors passed to the repositories

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Which slice of the chart of accounts a repository query should return
///
/// The ranges bound the code windows a repository uses to decide which accounts
/// belong to a level. The engine only substitutes `parent_key`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountFilter {
    /// Window of the code that forms the group key at this level
    pub group_key_range: Range<usize>,
    /// Window of the code that must match the parent, if any
    pub detail_key_range: Option<Range<usize>>,
    /// Group key of the parent aggregate being drilled into
    pub parent_key: Option<String>,
}

impl AccountFilter {
    /// Create a filter template without a parent
    pub fn new(group_key_range: Range<usize>, detail_key_range: Option<Range<usize>>) -> Self {
        Self {
            group_key_range,
            detail_key_range,
            parent_key: None,
        }
    }

    /// The four level templates, outermost first
    pub fn defaults() -> Vec<AccountFilter> {
        vec![
            AccountFilter::new(5..15, None),
            AccountFilter::new(5..25, Some(5..15)),
            AccountFilter::new(0..25, Some(5..25)),
            AccountFilter::new(0..30, Some(0..25)),
        ]
    }

    /// Copy of this filter scoped to `parent`
    pub fn with_parent(&self, parent: Option<&str>) -> Self {
        Self {
            parent_key: parent.map(str::to_string),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_parent_leaves_template_untouched() {
        let template = AccountFilter::defaults()[1].clone();
        let scoped = template.with_parent(Some("AAAAABBBBB"));

        assert_eq!(template.parent_key, None);
        assert_eq!(scoped.parent_key.as_deref(), Some("AAAAABBBBB"));
        assert_eq!(scoped.group_key_range, 5..25);
        assert_eq!(scoped.detail_key_range, Some(5..15));
        assert_eq!(scoped.with_parent(None), template);
    }

    #[test]
    fn test_default_templates() {
        let filters = AccountFilter::defaults();
        assert_eq!(filters.len(), 4);
        assert_eq!(filters[0].group_key_range, 5..15);
        assert_eq!(filters[0].detail_key_range, None);
        assert_eq!(filters[3].group_key_range, 0..30);
        assert_eq!(filters[3].detail_key_range, Some(0..25));
    }
}
