// governance model + the lookup indexes the resolver consults
use std::collections::HashMap;

use tracing::debug;

use crate::config::LineageConfig;
use crate::core::error::LineageResult;
use crate::core::table::Workbook;
use crate::core::types::{Condition, Context, GovernanceMapping, Rule, cell_contains};
use crate::workbook::loader;

/// The four governance tables of one workbook, read-only after construction.
///
/// Two hash indexes replace the repeated linear scans of the heuristic joins:
/// FOR CONTEXT -> mapping rows, and CONTEXT NAME -> context rows. Both keep row
/// positions in sheet order so output order never depends on hashing.
#[derive(Debug, Clone, Default)]
pub struct GovernanceModel {
    rules: Vec<Rule>,
    conditions: Vec<Condition>,
    mappings: Vec<GovernanceMapping>,
    contexts: Vec<Context>,
    by_for_context: HashMap<String, Vec<usize>>,
    contexts_by_name: HashMap<String, Vec<usize>>,
}

impl GovernanceModel {
    pub fn new(
        rules: Vec<Rule>,
        conditions: Vec<Condition>,
        mappings: Vec<GovernanceMapping>,
        contexts: Vec<Context>,
    ) -> Self {
        let mut by_for_context: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, m) in mappings.iter().enumerate() {
            if let Some(key) = m.for_context.as_deref() {
                by_for_context.entry(key.to_string()).or_default().push(i);
            }
        }

        let mut contexts_by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, c) in contexts.iter().enumerate() {
            if let Some(name) = c.name.as_deref() {
                contexts_by_name.entry(name.to_string()).or_default().push(i);
            }
        }

        Self {
            rules,
            conditions,
            mappings,
            contexts,
            by_for_context,
            contexts_by_name,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn mappings(&self) -> &[GovernanceMapping] {
        &self.mappings
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    /// Load all four governance sheets; each one is required.
    pub fn from_workbook(workbook: &Workbook, config: &LineageConfig) -> LineageResult<Self> {
        let rules = loader::load_rules(workbook)?;
        let conditions = loader::load_conditions(workbook)?;
        let mappings = loader::load_mappings(workbook)?;
        let contexts = loader::load_contexts(workbook, config.context_type_name_occurrence)?;

        debug!(
            rules = rules.len(),
            conditions = conditions.len(),
            mappings = mappings.len(),
            contexts = contexts.len(),
            "loaded governance model"
        );
        Ok(Self::new(rules, conditions, mappings, contexts))
    }

    //conditions whose MAPPED BUSINESS RULE(s) mention the rule name anywhere
    pub fn conditions_for_rule(&self, rule_name: &str) -> Vec<&Condition> {
        self.conditions
            .iter()
            .filter(|c| cell_contains(&c.mapped_rules, rule_name))
            .collect()
    }

    /// Mappings whose FOR CONTEXT is one of `keys`, in sheet order.
    pub fn mappings_for_keys(&self, keys: &[String]) -> Vec<&GovernanceMapping> {
        let mut rows: Vec<usize> = keys
            .iter()
            .filter_map(|k| self.by_for_context.get(k))
            .flatten()
            .copied()
            .collect();
        rows.sort_unstable();
        rows.dedup();
        rows.into_iter().filter_map(|i| self.mappings.get(i)).collect()
    }

    /// Contexts whose name equals `name` exactly, in sheet order.
    pub fn contexts_named(&self, name: &str) -> Vec<&Context> {
        self.contexts_by_name
            .get(name)
            .map(|rows| rows.iter().filter_map(|&i| self.contexts.get(i)).collect())
            .unwrap_or_default()
    }

    //last tier: the rule name appears inside MAPPED BUSINESS RULE
    pub fn mappings_naming_rule(&self, rule_name: &str) -> Vec<&GovernanceMapping> {
        self.mappings
            .iter()
            .filter(|m| cell_contains(&m.mapped_rule, rule_name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keys::synthesize_keys;

    fn mk_mapping(entity: &str, rule: &str, ctx: &str) -> GovernanceMapping {
        GovernanceMapping {
            entity: Some(entity.to_string()),
            mapped_rule: if rule.is_empty() { None } else { Some(rule.to_string()) },
            mapped_condition: None,
            for_context: if ctx.is_empty() { None } else { Some(ctx.to_string()) },
        }
    }

    fn mk_context(name: &str) -> Context {
        Context {
            name: Some(name.to_string()),
            ..Context::default()
        }
    }

    #[test]
    fn key_lookup_returns_rows_in_sheet_order() {
        let g = GovernanceModel::new(
            vec![],
            vec![],
            vec![
                mk_mapping("a", "", "C2Context"),
                mk_mapping("b", "", "Other"),
                mk_mapping("c", "", "CContext"),
                mk_mapping("d", "", ""),
            ],
            vec![],
        );

        let hits = g.mappings_for_keys(&synthesize_keys("C"));
        let entities: Vec<&str> = hits.iter().map(|m| m.entity.as_deref().unwrap()).collect();
        assert_eq!(entities, vec!["a", "c"]);
        assert_eq!(g.mappings().len(), 4);
    }

    #[test]
    fn lookups_skip_rows_missing_behind_the_index() {
        let mut g = GovernanceModel::new(
            vec![],
            vec![],
            vec![mk_mapping("a", "R1", "R1Context")],
            vec![mk_context("R1Context")],
        );
        g.mappings.clear();
        g.contexts.clear();

        assert!(g.mappings_for_keys(&synthesize_keys("R1")).is_empty());
        assert!(g.contexts_named("R1Context").is_empty());
    }

    #[test]
    fn context_lookup_is_exact_and_keeps_duplicates() {
        let g = GovernanceModel::new(
            vec![],
            vec![],
            vec![],
            vec![mk_context("C1Context"), mk_context("C1Context2"), mk_context("C1Context")],
        );

        assert_eq!(g.contexts_named("C1Context").len(), 2);
        assert!(g.contexts_named("c1context").is_empty());
    }

    #[test]
    fn rule_name_substring_lookups_ignore_nulls() {
        let g = GovernanceModel::new(
            vec![],
            vec![
                Condition {
                    name: Some("C1".into()),
                    mapped_rules: Some("R1||R2".into()),
                    ..Condition::default()
                },
                Condition::default(),
            ],
            vec![mk_mapping("a", "R10", ""), mk_mapping("b", "", "")],
            vec![],
        );

        assert_eq!(g.conditions_for_rule("R2").len(), 1);
        assert_eq!(g.conditions_for_rule("R3").len(), 0);
        //substring containment: "R1" is inside "R10"
        assert_eq!(g.mappings_naming_rule("R1").len(), 1);
    }
}
