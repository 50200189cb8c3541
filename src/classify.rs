//! SQL intent classification.
//!
//! # Design Decisions
//! - Only the leading verb is inspected; no parsing beyond that
//! - `select` is a read unless it carries the write hint, which covers
//!   stored functions invoked through `select`
//! - Anything unrecognised is [`Mode::Unclassified`], never a guessed role

use std::fmt::Debug;

use crate::cluster::Mode;

/// Hint that marks a `select` statement as needing the writer.
pub const WRITE_HINT: &str = "/* mode: write */";

/// Derives read/write intent from query text.
pub trait SqlClassifier: Send + Sync + Debug {
    fn classify(&self, sql: &str) -> Mode;
}

/// Classifies by the first six characters of the query.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrefixClassifier;

impl PrefixClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl SqlClassifier for PrefixClassifier {
    fn classify(&self, sql: &str) -> Mode {
        let normalized = sql.trim_start().to_lowercase();
        let Some(verb) = normalized.get(..6) else {
            return Mode::Unclassified;
        };

        match verb {
            "select" if normalized.contains(WRITE_HINT) => Mode::Write,
            "select" => Mode::Read,
            "update" | "insert" | "delete" => Mode::Write,
            _ => Mode::Unclassified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_verbs() {
        let c = PrefixClassifier::new();
        assert_eq!(c.classify("select * from t"), Mode::Read);
        assert_eq!(c.classify("select /* mode: read */ * from dummy"), Mode::Read);
        assert_eq!(c.classify("select /* mode: write */ f()"), Mode::Write);
        assert_eq!(c.classify("insert into t values (1)"), Mode::Write);
        assert_eq!(c.classify("update t set x=1"), Mode::Write);
        assert_eq!(c.classify("delete from t"), Mode::Write);
    }

    #[test]
    fn test_classify_normalizes_case_and_whitespace() {
        let c = PrefixClassifier::new();
        assert_eq!(c.classify("  \n\tSELECT 1"), Mode::Read);
        assert_eq!(c.classify("Select /* MODE: WRITE */ f()"), Mode::Write);
        assert_eq!(c.classify("UPDATE t SET x = 1"), Mode::Write);
    }

    #[test]
    fn test_classify_unrecognized() {
        let c = PrefixClassifier::new();
        assert_eq!(c.classify("truncate t"), Mode::Unclassified);
        assert_eq!(c.classify("with x as (select 1) select * from x"), Mode::Unclassified);
        assert_eq!(c.classify("sel"), Mode::Unclassified);
        assert_eq!(c.classify(""), Mode::Unclassified);
        assert_eq!(c.classify("séléct 1"), Mode::Unclassified);
    }
}
