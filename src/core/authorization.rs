// authorization lineage: policy -> policy mapping -> permissions, single tier
use serde::Serialize;
use tracing::{debug, info};

use crate::core::error::LineageResult;
use crate::core::table::{Table, Workbook};
use crate::core::types::{
    AUTHORIZATION_COLUMNS, AuthorizationRecord, Permission, Policy, PolicyMapping, cell_contains,
    text,
};
use crate::workbook::loader;

#[derive(Debug, Clone, Default)]
pub struct AuthorizationModel {
    pub policies: Vec<Policy>,
    pub mappings: Vec<PolicyMapping>,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyTrace {
    pub policy: String,
    pub records: Vec<AuthorizationRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AuthorizationLineage {
    pub traces: Vec<PolicyTrace>,
}

impl AuthorizationLineage {
    pub fn records(&self) -> impl Iterator<Item = &AuthorizationRecord> + '_ {
        self.traces.iter().flat_map(|t| t.records.iter())
    }

    pub fn len(&self) -> usize {
        self.traces.iter().map(|t| t.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new(
            "Lineage",
            AUTHORIZATION_COLUMNS.iter().map(|c| c.to_string()).collect(),
        );
        for rec in self.records() {
            table.push_row(rec.values().into_iter().map(Some).collect());
        }
        table
    }
}

impl AuthorizationModel {
    pub fn new(policies: Vec<Policy>, mappings: Vec<PolicyMapping>, permissions: Vec<Permission>) -> Self {
        Self {
            policies,
            mappings,
            permissions,
        }
    }

    pub fn from_workbook(workbook: &Workbook) -> LineageResult<Self> {
        Ok(Self::new(
            loader::load_policies(workbook)?,
            loader::load_policy_mappings(workbook)?,
            loader::load_permissions(workbook)?,
        ))
    }

    /// Full cross product of mappings naming the policy and the permissions
    /// whose set contains each mapping's permission set.
    pub fn resolve_policy(&self, policy: &Policy) -> PolicyTrace {
        let mut records = Vec::new();

        for m in self.mappings.iter().filter(|m| cell_contains(&m.policy, &policy.name)) {
            //a mapping without a permission set reference can't match anything
            let Some(set) = m.permission_set.as_deref() else {
                continue;
            };
            for p in self.permissions.iter().filter(|p| cell_contains(&p.permission_set, set)) {
                records.push(AuthorizationRecord {
                    policy: policy.name.clone(),
                    entity_type: text(&policy.entity_type),
                    condition: text(&policy.condition),
                    role: text(&m.role),
                    permission_set: text(&p.permission_set),
                    attribute: text(&p.attribute),
                    relationship: text(&p.relationship),
                    permission: text(&p.permission),
                });
            }
        }

        debug!(policy = %policy.name, records = records.len(), "resolved policy");
        PolicyTrace {
            policy: policy.name.clone(),
            records,
        }
    }

    pub fn resolve(&self) -> AuthorizationLineage {
        let lineage = AuthorizationLineage {
            traces: self.policies.iter().map(|p| self.resolve_policy(p)).collect(),
        };
        info!(
            policies = self.policies.len(),
            records = lineage.len(),
            "authorization lineage resolved"
        );
        lineage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_policy(name: &str) -> Policy {
        Policy {
            name: name.to_string(),
            entity_type: Some("product".to_string()),
            condition: None,
        }
    }

    fn mk_mapping(policy: &str, role: &str, set: &str) -> PolicyMapping {
        PolicyMapping {
            policy: Some(policy.to_string()),
            role: Some(role.to_string()),
            permission_set: Some(set.to_string()),
        }
    }

    fn mk_permission(set: &str, attribute: &str, permission: &str) -> Permission {
        Permission {
            permission_set: Some(set.to_string()),
            attribute: Some(attribute.to_string()),
            relationship: None,
            permission: Some(permission.to_string()),
        }
    }

    #[test]
    fn policy_expands_to_every_mapping_permission_pair() {
        let model = AuthorizationModel::new(
            vec![mk_policy("P1")],
            vec![
                mk_mapping("P1", "buyer", "PS_A"),
                mk_mapping("P1, P2", "admin", "PS_B"),
                mk_mapping("P3", "guest", "PS_A"),
            ],
            vec![
                mk_permission("PS_A", "price", "view"),
                mk_permission("PS_A_EXT", "cost", "edit"),
                mk_permission("PS_B", "name", "edit"),
            ],
        );

        let lineage = model.resolve();
        let got: Vec<(&str, &str, &str)> = lineage
            .records()
            .map(|r| (r.role.as_str(), r.permission_set.as_str(), r.attribute.as_str()))
            .collect();

        assert_eq!(
            got,
            vec![
                ("buyer", "PS_A", "price"),
                ("buyer", "PS_A_EXT", "cost"),
                ("admin", "PS_B", "name"),
            ]
        );
        let first = lineage.records().next().unwrap();
        assert_eq!(first.entity_type, "product");
        assert_eq!(first.condition, "");
        assert_eq!(first.relationship, "");
    }

    #[test]
    fn unmapped_policy_contributes_nothing() {
        let model = AuthorizationModel::new(vec![mk_policy("P9")], vec![mk_mapping("P1", "r", "S")], vec![]);
        let lineage = model.resolve();
        assert!(lineage.is_empty());
        assert_eq!(lineage.traces.len(), 1);
        assert_eq!(lineage.to_table().columns().len(), 8);
    }
}
