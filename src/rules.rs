//! Active rule registry.
//!
//! Holds the rules enabled for a run: the built-in nesting check plus every
//! external rule id the configuration activates. Serves as the
//! [`RuleResolver`] for report ingestion.

use crate::analyzers::{NESTED_CONTROL_FLOW_DEPTH, PYTHON_REPOSITORY};
use crate::config::PyqualConfig;
use crate::core::RuleKey;
use crate::report::{ActiveRule, RuleResolver};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<RuleKey, ActiveRule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PyqualConfig) -> Self {
        let mut registry = Self::new();

        if config.nesting.enabled {
            registry.activate(
                ActiveRule::new(nesting_rule_key())
                    .with_severity(config.nesting.severity)
                    .with_param("max", config.nesting.max_depth.to_string()),
            );
        }

        for rule in &config.report.rules {
            registry.activate(
                ActiveRule::new(RuleKey::of(config.report.repository.as_str(), rule.id.trim()))
                    .with_severity(rule.severity),
            );
        }

        registry
    }

    /// Enable a rule, replacing any earlier activation of the same key.
    pub fn activate(&mut self, rule: ActiveRule) {
        self.rules.insert(rule.key.clone(), rule);
    }

    pub fn get(&self, key: &RuleKey) -> Option<&ActiveRule> {
        self.rules.get(key)
    }

    pub fn find_by_repository<'a>(
        &'a self,
        repository: &'a str,
    ) -> impl Iterator<Item = &'a ActiveRule> + 'a {
        self.rules
            .values()
            .filter(move |rule| rule.key.repository == repository)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleResolver for RuleRegistry {
    fn resolve_rule(&self, key: &RuleKey) -> Option<ActiveRule> {
        self.rules.get(key).cloned()
    }
}

pub fn nesting_rule_key() -> RuleKey {
    RuleKey::of(PYTHON_REPOSITORY, NESTED_CONTROL_FLOW_DEPTH)
}
