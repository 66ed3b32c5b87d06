use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::context::RenderContext;
use crate::error::{DashboardError, Result};

/// A document with `{{ key }}` placeholders. Everything outside the
/// placeholders is literal text.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

pub fn placeholder(key: &str) -> String {
    format!("{{{{ {key} }}}}")
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Template {
            source: source.into(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(source) => Ok(Template { source }),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(DashboardError::TemplateMissing {
                path: path.to_path_buf(),
            }),
            Err(source) => Err(DashboardError::TemplateRead {
                path: PathBuf::from(path),
                source,
            }),
        }
    }

    /// Replaces every occurrence of each known placeholder with its value.
    /// Values are inserted unescaped; unknown placeholders are left as-is.
    pub fn render(&self, ctx: &RenderContext) -> String {
        let mut out = self.source.clone();
        for (key, value) in ctx.iter() {
            let marker = placeholder(key);
            if out.contains(&marker) {
                out = out.replace(&marker, value);
            }
        }
        out
    }
}

/// Keys of `{{ ... }}` markers still present in `text`.
pub fn unresolved_placeholders(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find("{{ ") {
        let after = &rest[start + 3..];
        let Some(end) = after.find(" }}") else {
            break;
        };
        let key = &after[..end];
        if !key.is_empty() && !key.contains(char::is_whitespace) {
            found.push(key);
        }
        rest = &after[end + 3..];
    }
    found
}
