//! Candidate metrics documents.
//!
//! Training jobs emit one JSON metrics blob per trained artifact. Two
//! shapes are in the wild and both are accepted:
//!
//! ```json
//! {"metrics": {"pr_auc": 0.12}, "artifact": "candidate_hgb.bin"}
//! {"pr_auc": 0.12, "artifact": "candidate_hgb.bin"}
//! ```

use serde_json::Value;

/// A parsed metrics blob.
#[derive(Debug, Clone)]
pub struct MetricsDocument {
    value: Value,
}

impl MetricsDocument {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// The underlying JSON document.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Look up a named metric, preferring the nested `metrics` object
    /// over a flat top-level key.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.value
            .get("metrics")
            .and_then(|m| m.get(name))
            .or_else(|| self.value.get(name))
            .and_then(Value::as_f64)
    }

    /// The artifact filename this blob describes.
    pub fn artifact(&self) -> Option<&str> {
        self.value.get("artifact").and_then(Value::as_str)
    }
}
