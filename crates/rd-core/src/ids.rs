//! ID prefixes for every persisted entity.
//!
//! IDs are generated by the database as `{prefix}-{8 hex chars}`, e.g.
//! `prj-a3f8b2c1`. The prefix makes an ID self-describing in logs and URLs.

pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_PHASE: &str = "phs";
pub const PREFIX_MILESTONE: &str = "mst";
pub const PREFIX_METRIC: &str = "met";
pub const PREFIX_DOCUMENT: &str = "doc";
pub const PREFIX_EVALUATOR: &str = "evr";
pub const PREFIX_EVALUATION: &str = "evl";

/// Every prefix, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_PROJECT,
    PREFIX_PHASE,
    PREFIX_MILESTONE,
    PREFIX_METRIC,
    PREFIX_DOCUMENT,
    PREFIX_EVALUATOR,
    PREFIX_EVALUATION,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn prefixes_are_unique_and_three_chars() {
        let unique: HashSet<_> = ALL_PREFIXES.iter().collect();
        assert_eq!(unique.len(), ALL_PREFIXES.len());
        assert!(ALL_PREFIXES.iter().all(|p| p.len() == 3));
    }
}
