use serde::{Deserialize, Serialize};

use crate::core::error::LineageResult;

/// Knobs a host may set per run. Everything else (the `"Yes"` enabled literal,
/// the `Context` key suffix, the direct-fallback match mode) is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    /// 1-based occurrence of the `CONTEXT TYPE || CONTEXT NAME` header to read.
    pub context_type_name_occurrence: usize,
    /// Emit vocabulary terms no rule uses (count 0) in keyword usage.
    pub include_zero_count_keywords: bool,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            context_type_name_occurrence: 2,
            include_zero_count_keywords: false,
        }
    }
}

impl LineageConfig {
    pub fn from_json_str(text: &str) -> LineageResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = LineageConfig::from_json_str(r#"{"include_zero_count_keywords": true}"#).unwrap();
        assert!(cfg.include_zero_count_keywords);
        assert_eq!(cfg.context_type_name_occurrence, 2);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(LineageConfig::from_json_str("{").is_err());
    }
}
