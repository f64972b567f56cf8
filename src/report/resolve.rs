//! Lookup capabilities the ingester needs from its host.
//!
//! Both are single-method traits. Closures implement them directly, so tests
//! and embedders can pass `|path| ...` instead of building a registry.

use crate::core::{FileHandle, RuleKey, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A rule enabled in the current analysis, with its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveRule {
    pub key: RuleKey,
    pub severity: Severity,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl ActiveRule {
    pub fn new(key: RuleKey) -> Self {
        Self {
            key,
            severity: Severity::default(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Maps a path as written in a report onto a file the host can address.
pub trait FileResolver: Sync {
    fn resolve_file(&self, path: &str) -> Option<FileHandle>;
}

/// Looks up an active rule by its qualified key.
pub trait RuleResolver: Sync {
    fn resolve_rule(&self, key: &RuleKey) -> Option<ActiveRule>;
}

impl<F> FileResolver for F
where
    F: Fn(&str) -> Option<FileHandle> + Sync,
{
    fn resolve_file(&self, path: &str) -> Option<FileHandle> {
        self(path)
    }
}

impl<F> RuleResolver for F
where
    F: Fn(&RuleKey) -> Option<ActiveRule> + Sync,
{
    fn resolve_rule(&self, key: &RuleKey) -> Option<ActiveRule> {
        self(key)
    }
}
