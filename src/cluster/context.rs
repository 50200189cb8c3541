//! Per-request acquisition context.

use std::collections::HashMap;

use crate::cluster::Mode;

/// Client intent supplied when acquiring a connection.
///
/// The classifying strategy overwrites `mode` with the mode it derived from
/// `sql`, so a context reused across calls reflects the last classification.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Mode the client wants.
    pub mode: Mode,
    /// Query the client intends to send. Only read by classifying strategies.
    pub sql: Option<String>,
    values: HashMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read() -> Self {
        Self::with_mode(Mode::Read)
    }

    pub fn write() -> Self {
        Self::with_mode(Mode::Write)
    }

    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_sql(sql: impl Into<String>) -> Self {
        Self {
            sql: Some(sql.into()),
            ..Self::default()
        }
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_constructors() {
        assert_eq!(Context::new().mode, Mode::Unspecified);
        assert_eq!(Context::read().mode, Mode::Read);
        assert_eq!(Context::write().mode, Mode::Write);

        let ctx = Context::with_sql("select 1");
        assert_eq!(ctx.sql.as_deref(), Some("select 1"));
        assert_eq!(ctx.mode, Mode::Unspecified);
    }

    #[test]
    fn test_context_values() {
        let mut ctx = Context::new();
        assert_eq!(ctx.value("tenant"), None);
        ctx.set_value("tenant", "acme");
        assert_eq!(ctx.value("tenant"), Some("acme"));
    }
}
