// data-model lineage: ATTRIBUTES joined to E-A-R on attribute name
use serde::Serialize;
use tracing::info;

use crate::core::error::LineageResult;
use crate::core::table::{Table, Workbook};
use crate::core::types::{Attribute, EarLink, text};
use crate::workbook::loader;

pub const DATA_MODEL_COLUMNS: [&str; 6] = [
    "NAME",
    "ENTITY",
    "DISPLAY NAME",
    "DATA TYPE",
    "USES REFERENCE DATA",
    "PATH ROOT NODE",
];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AttributeLineage {
    pub name: String,
    pub entity: String,
    pub display_name: String,
    pub data_type: String,
    pub uses_reference_data: String,
    pub path_root_node: String,
}

impl AttributeLineage {
    pub fn values(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.entity.clone(),
            self.display_name.clone(),
            self.data_type.clone(),
            self.uses_reference_data.clone(),
            self.path_root_node.clone(),
        ]
    }
}

/// Inner join on NAME == MAPPED ATTRIBUTE, stably sorted by NAME.
/// Null names on either side never join.
pub fn attribute_lineage(attributes: &[Attribute], links: &[EarLink]) -> Vec<AttributeLineage> {
    let mut rows = Vec::new();
    for a in attributes {
        let Some(name) = a.name.as_deref() else {
            continue;
        };
        for l in links.iter().filter(|l| l.mapped_attribute.as_deref() == Some(name)) {
            rows.push(AttributeLineage {
                name: name.to_string(),
                entity: text(&l.entity),
                display_name: text(&a.display_name),
                data_type: text(&a.data_type),
                uses_reference_data: text(&a.uses_reference_data),
                path_root_node: text(&a.path_root_node),
            });
        }
    }
    rows.sort_by(|x, y| x.name.cmp(&y.name));
    rows
}

/// Load ATTRIBUTES and E-A-R MODEL (the only two sheets needed) and join them.
pub fn data_model_lineage(workbook: &Workbook) -> LineageResult<Vec<AttributeLineage>> {
    let attributes = loader::load_attributes(workbook)?;
    let links = loader::load_ear_links(workbook)?;
    let rows = attribute_lineage(&attributes, &links);
    info!(attributes = attributes.len(), links = links.len(), rows = rows.len(), "data model lineage joined");
    Ok(rows)
}

pub fn attribute_lineage_table(rows: &[AttributeLineage]) -> Table {
    let mut table = Table::new(
        "Lineage",
        DATA_MODEL_COLUMNS.iter().map(|c| c.to_string()).collect(),
    );
    for r in rows {
        table.push_row(r.values().into_iter().map(Some).collect());
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_attr(name: &str, display: &str) -> Attribute {
        Attribute {
            name: Some(name.to_string()),
            display_name: Some(display.to_string()),
            data_type: Some("string".to_string()),
            ..Attribute::default()
        }
    }

    fn mk_link(attribute: &str, entity: &str) -> EarLink {
        EarLink {
            mapped_attribute: Some(attribute.to_string()),
            entity: Some(entity.to_string()),
            mapped_relationship: None,
        }
    }

    #[test]
    fn inner_join_sorted_by_name() {
        let rows = attribute_lineage(
            &[mk_attr("weight", "Weight"), mk_attr("color", "Color"), mk_attr("orphan", "Orphan")],
            &[mk_link("weight", "product"), mk_link("color", "sku"), mk_link("weight", "sku")],
        );

        let got: Vec<(&str, &str)> = rows.iter().map(|r| (r.name.as_str(), r.entity.as_str())).collect();
        assert_eq!(got, vec![("color", "sku"), ("weight", "product"), ("weight", "sku")]);
        assert_eq!(rows[0].display_name, "Color");
        assert_eq!(rows[0].path_root_node, "");
    }

    #[test]
    fn table_has_six_columns() {
        let table = attribute_lineage_table(&attribute_lineage(&[mk_attr("a", "A")], &[mk_link("a", "e")]));
        assert_eq!(table.columns(), DATA_MODEL_COLUMNS.map(String::from).as_slice());
        assert_eq!(table.cell(0, 1), Some("e"));
    }
}
