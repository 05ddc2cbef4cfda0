// typed rows read from the workbook + the flattened records produced from them
use serde::Serialize;

use crate::core::table::Cell;

//substring test used by every heuristic join: null never matches
pub(crate) fn cell_contains(field: &Cell, needle: &str) -> bool {
    field.as_deref().is_some_and(|f| f.contains(needle))
}

pub(crate) fn text(cell: &Cell) -> String {
    cell.clone().unwrap_or_default()
}

/// An enabled BUSINESS RULES row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Rule {
    pub name: String,
    pub rule_type: Cell,
    pub definition: Cell,
    pub display_name: Cell,
}

/// An enabled BUSINESS CONDITIONS row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Condition {
    pub name: Cell,
    /// Free text that mentions the rules this condition applies to, e.g. `R1||R2`.
    pub mapped_rules: Cell,
    pub impacted_roles: Cell,
    pub impacted_attributes: Cell,
    pub impacted_relationships: Cell,
    pub display_name: Cell,
}

/// An enabled GOVERNANCE MAPPING row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GovernanceMapping {
    pub entity: Cell,
    pub mapped_rule: Cell,
    pub mapped_condition: Cell,
    /// Always text, even when the sheet stored a number.
    pub for_context: Cell,
}

/// A CONTEXTS row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Context {
    pub name: Cell,
    pub type_and_name: Cell,
    pub workflow_activity: Cell,
    pub workflow_activity_actions: Cell,
    pub workflow_activity_criteria: Cell,
}

/// Which resolution tier produced a rule's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strategy {
    ConditionMediated,
    RuleMediated,
    DirectFallback,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::ConditionMediated => "condition-mediated",
            Strategy::RuleMediated => "rule-mediated",
            Strategy::DirectFallback => "direct-fallback",
        }
    }
}

pub const GOVERNANCE_COLUMNS: [&str; 18] = [
    "RULE NAME",
    "TYPE",
    "DEFINITION",
    "RULE DISPLAY NAME",
    "CONDITION NAME",
    "IMPACTED ROLES",
    "IMPACTED ATTRIBUTES",
    "IMPACTED RELATIONSHIPS",
    "CONDITION DISPLAY NAME",
    "ENTITY",
    "MAPPED BUSINESS RULE",
    "MAPPED BUSINESS CONDITION",
    "FOR CONTEXT",
    "CONTEXT NAME",
    "CONTEXT TYPE AND NAME",
    "WORKFLOW ACTIVITY",
    "WORKFLOW ACTIVITY ACTION(s)",
    "WORKFLOW ACTIVITY CRITERIA",
];

/// One denormalized governance lineage row. Unmatched segments are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LineageRecord {
    pub rule_name: String,
    pub rule_type: String,
    pub definition: String,
    pub rule_display_name: String,
    pub condition_name: String,
    pub impacted_roles: String,
    pub impacted_attributes: String,
    pub impacted_relationships: String,
    pub condition_display_name: String,
    pub entity: String,
    pub mapped_business_rule: String,
    pub mapped_business_condition: String,
    pub for_context: String,
    pub context_name: String,
    pub context_type_and_name: String,
    pub workflow_activity: String,
    pub workflow_activity_actions: String,
    pub workflow_activity_criteria: String,
}

impl LineageRecord {
    /// Start a record from the rule segment; every other field is empty.
    pub fn for_rule(rule: &Rule) -> Self {
        Self {
            rule_name: rule.name.clone(),
            rule_type: text(&rule.rule_type),
            definition: text(&rule.definition),
            rule_display_name: text(&rule.display_name),
            ..Self::default()
        }
    }

    pub fn with_condition(mut self, c: &Condition) -> Self {
        self.condition_name = text(&c.name);
        self.impacted_roles = text(&c.impacted_roles);
        self.impacted_attributes = text(&c.impacted_attributes);
        self.impacted_relationships = text(&c.impacted_relationships);
        self.condition_display_name = text(&c.display_name);
        self
    }

    //FOR CONTEXT is only carried when the mapping was reached through a context key
    pub fn with_mapping(mut self, m: &GovernanceMapping, keep_context: bool) -> Self {
        self.entity = text(&m.entity);
        self.mapped_business_rule = text(&m.mapped_rule);
        self.mapped_business_condition = text(&m.mapped_condition);
        if keep_context {
            self.for_context = text(&m.for_context);
        }
        self
    }

    pub fn with_context(mut self, ctx: &Context) -> Self {
        self.context_name = text(&ctx.name);
        self.context_type_and_name = text(&ctx.type_and_name);
        self.workflow_activity = text(&ctx.workflow_activity);
        self.workflow_activity_actions = text(&ctx.workflow_activity_actions);
        self.workflow_activity_criteria = text(&ctx.workflow_activity_criteria);
        self
    }

    /// Field values in `GOVERNANCE_COLUMNS` order.
    pub fn values(&self) -> Vec<String> {
        vec![
            self.rule_name.clone(),
            self.rule_type.clone(),
            self.definition.clone(),
            self.rule_display_name.clone(),
            self.condition_name.clone(),
            self.impacted_roles.clone(),
            self.impacted_attributes.clone(),
            self.impacted_relationships.clone(),
            self.condition_display_name.clone(),
            self.entity.clone(),
            self.mapped_business_rule.clone(),
            self.mapped_business_condition.clone(),
            self.for_context.clone(),
            self.context_name.clone(),
            self.context_type_and_name.clone(),
            self.workflow_activity.clone(),
            self.workflow_activity_actions.clone(),
            self.workflow_activity_criteria.clone(),
        ]
    }
}

/// An enabled POLICY row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Policy {
    pub name: String,
    pub entity_type: Cell,
    pub condition: Cell,
}

/// A POLICY MAPPING row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PolicyMapping {
    pub policy: Cell,
    pub role: Cell,
    pub permission_set: Cell,
}

/// A POLICY PERMISSIONS row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Permission {
    pub permission_set: Cell,
    pub attribute: Cell,
    pub relationship: Cell,
    pub permission: Cell,
}

pub const AUTHORIZATION_COLUMNS: [&str; 8] = [
    "POLICY",
    "ENTITY TYPE",
    "CONDITION",
    "ROLE",
    "PERMISSION SET",
    "ATTRIBUTE",
    "RELATIONSHIP",
    "PERMISSION",
];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AuthorizationRecord {
    pub policy: String,
    pub entity_type: String,
    pub condition: String,
    pub role: String,
    pub permission_set: String,
    pub attribute: String,
    pub relationship: String,
    pub permission: String,
}

impl AuthorizationRecord {
    pub fn values(&self) -> Vec<String> {
        vec![
            self.policy.clone(),
            self.entity_type.clone(),
            self.condition.clone(),
            self.role.clone(),
            self.permission_set.clone(),
            self.attribute.clone(),
            self.relationship.clone(),
            self.permission.clone(),
        ]
    }
}

/// An ATTRIBUTES row of the data-model workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Attribute {
    pub name: Cell,
    pub display_name: Cell,
    pub data_type: Cell,
    pub uses_reference_data: Cell,
    pub path_root_node: Cell,
    pub group: Cell,
    pub display_type: Cell,
    pub is_nested_group_identifier: Cell,
}

/// An E-A-R MODEL junction row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EarLink {
    pub mapped_attribute: Cell,
    pub entity: Cell,
    pub mapped_relationship: Cell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_fields_never_match_and_render_empty() {
        assert!(!cell_contains(&None, "R1"));
        assert!(cell_contains(&Some("R1||R2".into()), "R2"));
        assert!(!cell_contains(&Some("r1".into()), "R1"));
        assert_eq!(text(&None), "");
    }

    #[test]
    fn rule_only_record_pads_everything_else() {
        let rule = Rule {
            name: "R1".into(),
            rule_type: Some("Validation".into()),
            definition: None,
            display_name: Some("Rule One".into()),
        };
        let rec = LineageRecord::for_rule(&rule);
        let values = rec.values();

        assert_eq!(values.len(), GOVERNANCE_COLUMNS.len());
        assert_eq!(values[0], "R1");
        assert_eq!(values[2], "");
        assert!(values[4..].iter().all(|v| v.is_empty()));
    }

    #[test]
    fn direct_mapping_drops_for_context() {
        let m = GovernanceMapping {
            entity: Some("product".into()),
            mapped_rule: Some("R1".into()),
            mapped_condition: None,
            for_context: Some("R1Context".into()),
        };
        let rec = LineageRecord::default().with_mapping(&m, false);
        assert_eq!(rec.entity, "product");
        assert_eq!(rec.for_context, "");
    }
}
