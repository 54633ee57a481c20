//! Threshold rules and their evaluation against a snapshot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, WarlockError};

use super::metrics::{Metric, MetricSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = ">", alias = "gt")]
    GreaterThan,
    #[serde(rename = "<", alias = "lt")]
    LessThan,
}

impl Comparator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::GreaterThan => ">",
            Comparator::LessThan => "<",
        }
    }

    /// Strict comparison; equality never triggers.
    pub fn holds(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparator::GreaterThan => value > threshold,
            Comparator::LessThan => value < threshold,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Comparator {
    type Err = WarlockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            ">" | "gt" => Ok(Comparator::GreaterThan),
            "<" | "lt" => Ok(Comparator::LessThan),
            other => Err(WarlockError::invalid_rule(format!(
                "comparator must be '>' or '<', got '{}'",
                other
            ))),
        }
    }
}

/// A rule as persisted in the config file.
///
/// The metric stays a plain string so that records naming an unknown metric
/// survive a load/save cycle; they are dropped when converted into a [`Rule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub id: String,
    pub name: String,
    pub metric: String,
    pub comparator: Comparator,
    pub threshold: f64,
}

/// A validated threshold rule over one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub metric: Metric,
    pub comparator: Comparator,
    pub threshold: f64,
}

impl Rule {
    /// Create a rule with a freshly generated id
    pub fn new<S: Into<String>>(
        name: S,
        metric: Metric,
        comparator: Comparator,
        threshold: f64,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(WarlockError::invalid_rule("rule name must not be empty"));
        }
        if !threshold.is_finite() {
            return Err(WarlockError::invalid_rule(format!(
                "threshold must be a finite number, got {}",
                threshold
            )));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            metric,
            comparator,
            threshold,
        })
    }

    pub fn condition(&self) -> String {
        format!("{} {} {}", self.metric, self.comparator, self.threshold)
    }
}

impl TryFrom<&RuleRecord> for Rule {
    type Error = WarlockError;

    fn try_from(record: &RuleRecord) -> Result<Self> {
        let metric = record.metric.parse::<Metric>()?;
        Ok(Self {
            id: record.id.clone(),
            name: record.name.clone(),
            metric,
            comparator: record.comparator,
            threshold: record.threshold,
        })
    }
}

impl From<&Rule> for RuleRecord {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id.clone(),
            name: rule.name.clone(),
            metric: rule.metric.as_str().to_string(),
            comparator: rule.comparator,
            threshold: rule.threshold,
        }
    }
}

/// Convert persisted records into rules, skipping those that name an unknown metric.
pub fn rules_from_records(records: &[RuleRecord]) -> Vec<Rule> {
    records
        .iter()
        .filter_map(|record| match Rule::try_from(record) {
            Ok(rule) => Some(rule),
            Err(e) => {
                log::warn!("Skipping alert '{}' ({}): {}", record.name, record.id, e);
                None
            }
        })
        .collect()
}

/// A rule whose condition held at the current tick, with the value that tripped it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggeredRule<'a> {
    pub rule: &'a Rule,
    pub value: f64,
}

/// Lazily yield the rules triggered by `snapshot`, in rule order.
pub fn evaluate_rules<'a>(
    snapshot: &'a MetricSnapshot,
    rules: &'a [Rule],
) -> impl Iterator<Item = TriggeredRule<'a>> + 'a {
    rules.iter().filter_map(move |rule| {
        let Some(value) = snapshot.get(rule.metric) else {
            log::warn!(
                "Metric '{}' not found for alert '{}'",
                rule.metric,
                rule.name
            );
            return None;
        };

        rule.comparator
            .holds(value, rule.threshold)
            .then_some(TriggeredRule { rule, value })
    })
}
