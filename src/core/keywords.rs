// keyword usage: which vocabulary terms the enabled rule definitions actually use
use std::collections::HashSet;

use serde::Serialize;
use tracing::info;

use crate::core::table::Table;
use crate::core::types::Rule;

pub const KEYWORD_COLUMNS: [&str; 2] = ["Keyword", "Count of Matching Rules"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordUsage {
    pub keyword: String,
    /// Distinct rule names whose definition mentions the keyword.
    pub count: usize,
}

/// Count, per vocabulary term, the distinct rules whose definition contains it
/// (case-insensitive). Sorted by count descending; ties keep vocabulary order.
/// Zero-count terms are dropped unless `include_zero` is set.
pub fn keyword_usage(rules: &[Rule], vocabulary: &[&str], include_zero: bool) -> Vec<KeywordUsage> {
    let definitions: Vec<(&str, String)> = rules
        .iter()
        .filter_map(|r| Some((r.name.as_str(), r.definition.as_deref()?.to_lowercase())))
        .collect();

    let mut usage: Vec<KeywordUsage> = vocabulary
        .iter()
        .map(|term| {
            let needle = term.to_lowercase();
            let matching: HashSet<&str> = definitions
                .iter()
                .filter(|(_, def)| def.contains(&needle))
                .map(|(name, _)| *name)
                .collect();
            KeywordUsage {
                keyword: term.to_string(),
                count: matching.len(),
            }
        })
        .filter(|u| include_zero || u.count > 0)
        .collect();

    usage.sort_by(|a, b| b.count.cmp(&a.count));

    info!(
        rules = rules.len(),
        terms = vocabulary.len(),
        emitted = usage.len(),
        "keyword usage scanned"
    );
    usage
}

pub fn keyword_usage_table(usage: &[KeywordUsage]) -> Table {
    let mut table = Table::new(
        "Keyword Usage",
        KEYWORD_COLUMNS.iter().map(|c| c.to_string()).collect(),
    );
    for u in usage {
        table.push_row(vec![Some(u.keyword.clone()), Some(u.count.to_string())]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vocabulary::VOCABULARY;

    fn mk_rule(name: &str, definition: &str) -> Rule {
        Rule {
            name: name.to_string(),
            definition: Some(definition.to_string()),
            ..Rule::default()
        }
    }

    fn sample() -> Vec<Rule> {
        vec![
            mk_rule("A", "calls GetEntityId twice: GetEntityId()"),
            mk_rule("B", "calls getentityid once"),
            mk_rule("C", "no match"),
        ]
    }

    #[test]
    fn counts_distinct_rules_not_occurrences() {
        let usage = keyword_usage(&sample(), &["GetEntityId"], false);
        assert_eq!(
            usage,
            vec![KeywordUsage {
                keyword: "GetEntityId".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn duplicate_rule_rows_count_once() {
        let mut rules = sample();
        rules.push(mk_rule("A", "GetEntityId again"));
        let usage = keyword_usage(&rules, &["GetEntityId"], false);
        assert_eq!(usage[0].count, 2);
    }

    #[test]
    fn zero_counts_are_filtered_by_default() {
        let filtered = keyword_usage(&sample(), &["GetEntityId", "SendEmail"], false);
        assert_eq!(filtered.len(), 1);

        let full = keyword_usage(&sample(), &["SendEmail", "GetEntityId"], true);
        let got: Vec<(&str, usize)> = full.iter().map(|u| (u.keyword.as_str(), u.count)).collect();
        assert_eq!(got, vec![("GetEntityId", 2), ("SendEmail", 0)]);
    }

    #[test]
    fn sorted_by_count_then_vocabulary_order() {
        let rules = vec![
            mk_rule("A", "SetAttributeValue(GetAttributeValue(x))"),
            mk_rule("B", "GetAttributeValue(y)"),
            mk_rule("C", "SaveEntity()"),
        ];
        let usage = keyword_usage(&rules, VOCABULARY, false);

        assert_eq!(usage[0].keyword, "GetAttributeValue");
        assert_eq!(usage[0].count, 2);
        assert!(usage.windows(2).all(|w| w[0].count >= w[1].count));
        assert!(usage.iter().all(|u| u.count > 0));
    }

    #[test]
    fn prose_definitions_yield_no_keywords() {
        let rules = vec![
            mk_rule("A", "nothing to do here for an order"),
            mk_rule("B", "if any value is missing, or not in the list, copy the first one"),
        ];
        assert!(keyword_usage(&rules, VOCABULARY, false).is_empty());
    }

    #[test]
    fn rules_without_definition_match_nothing() {
        let rules = vec![Rule {
            name: "Empty".to_string(),
            ..Rule::default()
        }];
        assert!(keyword_usage(&rules, VOCABULARY, false).is_empty());
        assert_eq!(keyword_usage_table(&keyword_usage(&rules, VOCABULARY, true)).len(), VOCABULARY.len());
    }
}
