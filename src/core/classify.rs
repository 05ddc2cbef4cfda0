// audit classification: declared vs referenced
//unused entity / relationship: declared, never referenced by E-A-R
//unmapped attribute: declared (outside nested groups), never referenced by E-A-R
//nestedgrid without identifier: nested parent whose children carry no identifier flag
use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use crate::core::error::LineageResult;
use crate::core::table::{Table, Workbook};
use crate::core::types::{Attribute, Condition, EarLink, GovernanceMapping, Rule, cell_contains};
use crate::workbook::loader;

pub const NESTED_GRID_DISPLAY_TYPE: &str = "nestedgrid";

/// The data-model workbook: ENTITIES, RELATIONSHIPS, ATTRIBUTES and the E-A-R junction.
#[derive(Debug, Clone, Default)]
pub struct DataModel {
    pub entities: Vec<String>,
    pub relationships: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub links: Vec<EarLink>,
}

/// Four labeled, sorted sections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AuditReport {
    pub unused_entities: Vec<String>,
    pub unused_relationships: Vec<String>,
    pub unmapped_attributes: Vec<String>,
    pub nestedgrid_without_identifier: Vec<String>,
}

impl AuditReport {
    pub fn sections(&self) -> [(&'static str, &[String]); 4] {
        [
            ("Unused Entities", self.unused_entities.as_slice()),
            ("Unused Relationships", self.unused_relationships.as_slice()),
            ("Unmapped Attributes", self.unmapped_attributes.as_slice()),
            (
                "Nestedgrid Attributes Without Identifier",
                self.nestedgrid_without_identifier.as_slice(),
            ),
        ]
    }

    pub fn is_clean(&self) -> bool {
        self.sections().iter().all(|(_, items)| items.is_empty())
    }
}

//set difference, returned sorted ascending
fn difference<'a>(
    declared: impl Iterator<Item = &'a str>,
    referenced: &BTreeSet<&'a str>,
) -> Vec<String> {
    declared
        .filter(|d| !referenced.contains(d))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn is_yes(cell: &Option<String>) -> bool {
    cell.as_deref().is_some_and(|v| v.trim().eq_ignore_ascii_case("yes"))
}

impl DataModel {
    pub fn new(
        entities: Vec<String>,
        relationships: Vec<String>,
        attributes: Vec<Attribute>,
        links: Vec<EarLink>,
    ) -> Self {
        Self {
            entities,
            relationships,
            attributes,
            links,
        }
    }

    pub fn from_workbook(workbook: &Workbook) -> LineageResult<Self> {
        Ok(Self::new(
            loader::load_names(workbook, loader::ENTITIES)?,
            loader::load_names(workbook, loader::RELATIONSHIPS)?,
            loader::load_attributes(workbook)?,
            loader::load_ear_links(workbook)?,
        ))
    }

    pub fn unused_entities(&self) -> Vec<String> {
        let referenced: BTreeSet<&str> = self.links.iter().filter_map(|l| l.entity.as_deref()).collect();
        difference(self.entities.iter().map(String::as_str), &referenced)
    }

    pub fn unused_relationships(&self) -> Vec<String> {
        let referenced: BTreeSet<&str> = self
            .links
            .iter()
            .filter_map(|l| l.mapped_relationship.as_deref())
            .collect();
        difference(self.relationships.iter().map(String::as_str), &referenced)
    }

    fn is_nested_parent(a: &Attribute) -> bool {
        a.display_type
            .as_deref()
            .is_some_and(|t| t.trim().eq_ignore_ascii_case(NESTED_GRID_DISPLAY_TYPE))
    }

    /// Names of the attributes displayed as a nested grid.
    pub fn nested_parents(&self) -> BTreeSet<&str> {
        self.attributes
            .iter()
            .filter(|a| Self::is_nested_parent(a))
            .filter_map(|a| a.name.as_deref())
            .collect()
    }

    /// Attributes never referenced by E-A-R. Children grouped under a nested
    /// parent are left out of the declared side; the parent itself is not.
    pub fn unmapped_attributes(&self) -> Vec<String> {
        let parents = self.nested_parents();
        let referenced: BTreeSet<&str> = self
            .links
            .iter()
            .filter_map(|l| l.mapped_attribute.as_deref())
            .collect();

        let declared = self
            .attributes
            .iter()
            .filter(|a| !a.group.as_deref().is_some_and(|g| parents.contains(g)))
            .filter_map(|a| a.name.as_deref());
        difference(declared, &referenced)
    }

    pub fn nestedgrid_without_identifier(&self) -> Vec<String> {
        let mut flagged = BTreeSet::new();
        for parent in self.nested_parents() {
            let has_identifier = self
                .attributes
                .iter()
                .filter(|a| a.group.as_deref() == Some(parent))
                .any(|a| is_yes(&a.is_nested_group_identifier));
            if !has_identifier {
                flagged.insert(parent.to_string());
            }
        }
        flagged.into_iter().collect()
    }

    pub fn audit(&self) -> AuditReport {
        let report = AuditReport {
            unused_entities: self.unused_entities(),
            unused_relationships: self.unused_relationships(),
            unmapped_attributes: self.unmapped_attributes(),
            nestedgrid_without_identifier: self.nestedgrid_without_identifier(),
        };
        info!(
            unused_entities = report.unused_entities.len(),
            unused_relationships = report.unused_relationships.len(),
            unmapped_attributes = report.unmapped_attributes.len(),
            nestedgrid_without_identifier = report.nestedgrid_without_identifier.len(),
            "data model audit finished"
        );
        report
    }
}

/// Enabled rule names no enabled condition or mapping mentions, sorted.
pub fn unused_rules(rules: &[Rule], conditions: &[Condition], mappings: &[GovernanceMapping]) -> Vec<String> {
    rules
        .iter()
        .map(|r| r.name.as_str())
        .filter(|name| {
            !conditions.iter().any(|c| cell_contains(&c.mapped_rules, name))
                && !mappings.iter().any(|m| cell_contains(&m.mapped_rule, name))
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn unused_rules_table(names: &[String]) -> Table {
    let mut table = Table::new("Unused Rules", vec!["Unused Rule Name".to_string()]);
    for n in names {
        table.push_row(vec![Some(n.clone())]);
    }
    table
}
