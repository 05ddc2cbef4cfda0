// lineage resolver: propagate each enabled rule through the governance tables
//tiers tried in order, first non-empty wins:
//1) ConditionMediated: conditions naming the rule -> their context keys -> mappings -> contexts
//2) RuleMediated: the rule's own context keys -> mappings -> contexts
//3) DirectFallback: mappings whose MAPPED BUSINESS RULE contains the rule name
//a rule whose tiers all come up empty is dropped

use serde::Serialize;
use tracing::{debug, info};

use crate::core::keys::synthesize_keys;
use crate::core::mapping::GovernanceModel;
use crate::core::table::Table;
use crate::core::types::{GOVERNANCE_COLUMNS, GovernanceMapping, LineageRecord, Rule, Strategy};

/// Everything one rule contributed, and which tier produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleTrace {
    pub rule_name: String,
    /// `None` when no tier produced a record.
    pub strategy: Option<Strategy>,
    pub records: Vec<LineageRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GovernanceLineage {
    pub traces: Vec<RuleTrace>,
}

impl GovernanceLineage {
    pub fn records(&self) -> impl Iterator<Item = &LineageRecord> + '_ {
        self.traces.iter().flat_map(|t| t.records.iter())
    }

    pub fn len(&self) -> usize {
        self.traces.iter().map(|t| t.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rules that produced nothing under any tier.
    pub fn dropped_rules(&self) -> Vec<&str> {
        self.traces
            .iter()
            .filter(|t| t.strategy.is_none())
            .map(|t| t.rule_name.as_str())
            .collect()
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new(
            "Lineage",
            GOVERNANCE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        );
        for rec in self.records() {
            table.push_row(rec.values().into_iter().map(Some).collect());
        }
        table
    }
}

impl GovernanceModel {
    //attach a mapping reached through a context key, then lift it onto every
    //context of that exact name; an unknown name still yields one padded record
    fn lift_through_contexts(&self, base: LineageRecord, m: &GovernanceMapping, out: &mut Vec<LineageRecord>) {
        let base = base.with_mapping(m, true);
        let contexts = m
            .for_context
            .as_deref()
            .map(|name| self.contexts_named(name))
            .unwrap_or_default();

        if contexts.is_empty() {
            out.push(base);
            return;
        }
        for ctx in contexts {
            out.push(base.clone().with_context(ctx));
        }
    }

    /// Tier 1. `None` when no condition mentions the rule at all; `Some(empty)`
    /// when conditions matched but none of them reached a mapping.
    pub fn resolve_condition_mediated(&self, rule: &Rule) -> Option<Vec<LineageRecord>> {
        let conditions = self.conditions_for_rule(&rule.name);
        if conditions.is_empty() {
            return None;
        }

        let mut out = Vec::new();
        for cond in conditions {
            let Some(cond_name) = cond.name.as_deref() else {
                continue;
            };
            let keys = synthesize_keys(cond_name);
            for m in self.mappings_for_keys(&keys) {
                let base = LineageRecord::for_rule(rule).with_condition(cond);
                self.lift_through_contexts(base, m, &mut out);
            }
        }
        Some(out)
    }

    /// Tier 2: look up mappings with the rule's own context keys.
    pub fn resolve_rule_mediated(&self, rule: &Rule) -> Vec<LineageRecord> {
        let keys = synthesize_keys(&rule.name);
        let mut out = Vec::new();
        for m in self.mappings_for_keys(&keys) {
            self.lift_through_contexts(LineageRecord::for_rule(rule), m, &mut out);
        }
        out
    }

    /// Tier 3: substring match on MAPPED BUSINESS RULE, no context resolution.
    pub fn resolve_direct(&self, rule: &Rule) -> Vec<LineageRecord> {
        self.mappings_naming_rule(&rule.name)
            .into_iter()
            .map(|m| LineageRecord::for_rule(rule).with_mapping(m, false))
            .collect()
    }

    /// Run the tiers for one rule, stopping at the first that yields records.
    pub fn resolve_rule(&self, rule: &Rule) -> RuleTrace {
        //a condition match that dead-ends counts as no match
        let (strategy, records) = match self.resolve_condition_mediated(rule) {
            Some(records) if !records.is_empty() => (Some(Strategy::ConditionMediated), records),
            _ => {
                let records = self.resolve_rule_mediated(rule);
                if !records.is_empty() {
                    (Some(Strategy::RuleMediated), records)
                } else {
                    let records = self.resolve_direct(rule);
                    let strategy = (!records.is_empty()).then_some(Strategy::DirectFallback);
                    (strategy, records)
                }
            }
        };

        match strategy {
            Some(s) => debug!(rule = %rule.name, strategy = s.as_str(), records = records.len(), "resolved rule"),
            None => debug!(rule = %rule.name, "no lineage found, rule dropped"),
        }

        RuleTrace {
            rule_name: rule.name.clone(),
            strategy,
            records,
        }
    }

    /// Resolve every enabled rule, in sheet order.
    pub fn resolve(&self) -> GovernanceLineage {
        let traces: Vec<RuleTrace> = self.rules().iter().map(|r| self.resolve_rule(r)).collect();
        let lineage = GovernanceLineage { traces };

        info!(
            rules = self.rules().len(),
            records = lineage.len(),
            dropped = lineage.dropped_rules().len(),
            "governance lineage resolved"
        );
        lineage
    }
}
