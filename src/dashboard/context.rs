use std::collections::BTreeMap;

use serde::Serialize;

/// Flat key/value map fed to one template substitution pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    values: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.values.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in key order, which is also the substitution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_stringifies_values() {
        let mut ctx = RenderContext::new();
        ctx.insert("process_total_count", 42);
        ctx.insert("system_hostname", "box");
        assert_eq!(ctx.get("process_total_count"), Some("42"));
        assert_eq!(ctx.get("system_hostname"), Some("box"));
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn later_insert_replaces() {
        let mut ctx = RenderContext::new();
        ctx.insert("k", "a");
        ctx.insert("k", "b");
        assert_eq!(ctx.get("k"), Some("b"));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut ctx = RenderContext::new();
        ctx.insert("a", 1);
        let json = serde_json::to_string(&ctx).unwrap();
        assert_eq!(json, r#"{"a":"1"}"#);
    }
}
