// table loader: sheet specs, column aliasing, the enabled filter, typed row loaders

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::core::error::{LineageError, LineageResult};
use crate::core::table::{Cell, Table, Workbook};
use crate::core::types::{
    Attribute, Condition, Context, EarLink, GovernanceMapping, Permission, Policy, PolicyMapping,
    Rule,
};

/// The only value of an enabled column that lets a row through.
pub const ENABLED_FLAG: &str = "Yes";

pub const BUSINESS_RULES: &str = "BUSINESS RULES";
pub const BUSINESS_CONDITIONS: &str = "BUSINESS CONDITIONS";
pub const GOVERNANCE_MAPPING: &str = "GOVERNANCE MAPPING";
pub const CONTEXTS: &str = "CONTEXTS";
pub const POLICY: &str = "POLICY";
pub const POLICY_MAPPING: &str = "POLICY MAPPING";
pub const POLICY_PERMISSIONS: &str = "POLICY PERMISSIONS";
pub const ENTITIES: &str = "ENTITIES";
pub const RELATIONSHIPS: &str = "RELATIONSHIPS";
pub const ATTRIBUTES: &str = "ATTRIBUTES";
pub const EAR_MODEL: &str = "E-A-R MODEL";

pub const CONTEXT_TYPE_NAME_HEADER: &str = "CONTEXT TYPE || CONTEXT NAME";
pub const CONTEXT_TYPE_NAME_ALIAS: &str = "CONTEXT TYPE AND NAME";

/// How a sheet is normalized before typed rows are read from it.
#[derive(Debug, Clone, Copy)]
pub struct SheetSpec {
    pub sheet: &'static str,
    pub aliases: &'static [(&'static str, &'static str)],
    pub enabled_column: Option<&'static str>,
}

pub const SHEET_SPECS: &[SheetSpec] = &[
    SheetSpec {
        sheet: BUSINESS_RULES,
        aliases: &[("NAME", "RULE NAME"), ("DISPLAY NAME", "RULE DISPLAY NAME")],
        enabled_column: Some("IS ENABLED?"),
    },
    SheetSpec {
        sheet: BUSINESS_CONDITIONS,
        aliases: &[("NAME", "CONDITION NAME"), ("DISPLAY NAME", "CONDITION DISPLAY NAME")],
        enabled_column: Some("IS ENABLED?"),
    },
    SheetSpec {
        sheet: GOVERNANCE_MAPPING,
        aliases: &[],
        enabled_column: Some("IS ENABLED?"),
    },
    SheetSpec {
        sheet: CONTEXTS,
        aliases: &[("NAME", "CONTEXT NAME")],
        enabled_column: None,
    },
    SheetSpec {
        sheet: POLICY,
        aliases: &[],
        enabled_column: Some("ENABLED"),
    },
    SheetSpec {
        sheet: POLICY_MAPPING,
        aliases: &[("POLICY", "MAPPING POLICY"), ("PERMISSION SET", "MAPPING PERMISSION SET")],
        enabled_column: None,
    },
];

pub fn spec_for(sheet: &str) -> Option<&'static SheetSpec> {
    SHEET_SPECS.iter().find(|s| s.sheet == sheet)
}

/// Apply a sheet spec's aliases and enabled filter to a copy of `table`.
pub fn prepare_sheet(table: &Table, spec: &SheetSpec) -> LineageResult<Table> {
    let mut prepared = table.clone();
    for (from, to) in spec.aliases {
        prepared.alias(from, to);
    }

    if let Some(flag_col) = spec.enabled_column {
        let idx = prepared.column_index(flag_col)?;
        prepared.retain_rows(|row| row[idx].as_deref() == Some(ENABLED_FLAG));
    }
    Ok(prepared)
}

/// Normalize the named sheets that are present; absent ones are skipped.
/// Every typed loader below reads its sheet through here.
pub fn load_sheets(workbook: &Workbook, names: &[&str]) -> LineageResult<BTreeMap<String, Table>> {
    let mut out = BTreeMap::new();
    for &name in names {
        let Some(table) = workbook.sheet(name) else {
            debug!(sheet = name, "sheet not present in workbook, skipping");
            continue;
        };
        let prepared = match spec_for(name) {
            Some(spec) => prepare_sheet(table, spec)?,
            None => table.clone(),
        };
        out.insert(name.to_string(), prepared);
    }
    Ok(out)
}

fn prepared(workbook: &Workbook, sheet: &str) -> LineageResult<Table> {
    load_sheets(workbook, &[sheet])?
        .remove(sheet)
        .ok_or_else(|| LineageError::missing_sheet(sheet))
}

//resolves a fixed list of headers to positions once per sheet
fn indices<const N: usize>(table: &Table, names: [&str; N]) -> LineageResult<[usize; N]> {
    let mut out = [0usize; N];
    for (slot, name) in out.iter_mut().zip(names) {
        *slot = table.column_index(name)?;
    }
    Ok(out)
}

//identity cell must be non-empty text, otherwise the row is dropped
fn identity(sheet: &str, row: usize, cell: &Cell) -> Option<String> {
    match cell.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => cell.clone(),
        _ => {
            warn!(sheet, row, "enabled row has an empty identity cell, skipping");
            None
        }
    }
}

pub fn load_rules(workbook: &Workbook) -> LineageResult<Vec<Rule>> {
    let t = prepared(workbook, BUSINESS_RULES)?;
    let [name, ty, def, display] =
        indices(&t, ["RULE NAME", "TYPE", "DEFINITION", "RULE DISPLAY NAME"])?;

    Ok(t.rows()
        .iter()
        .enumerate()
        .filter_map(|(i, r)| {
            Some(Rule {
                name: identity(BUSINESS_RULES, i + 1, &r[name])?,
                rule_type: r[ty].clone(),
                definition: r[def].clone(),
                display_name: r[display].clone(),
            })
        })
        .collect())
}

pub fn load_conditions(workbook: &Workbook) -> LineageResult<Vec<Condition>> {
    let t = prepared(workbook, BUSINESS_CONDITIONS)?;
    let [name, mapped, roles, attrs, rels, display] = indices(
        &t,
        [
            "CONDITION NAME",
            "MAPPED BUSINESS RULE(s)",
            "IMPACTED ROLES",
            "IMPACTED ATTRIBUTES",
            "IMPACTED RELATIONSHIPS",
            "CONDITION DISPLAY NAME",
        ],
    )?;

    Ok(t.rows()
        .iter()
        .map(|r| Condition {
            name: r[name].clone(),
            mapped_rules: r[mapped].clone(),
            impacted_roles: r[roles].clone(),
            impacted_attributes: r[attrs].clone(),
            impacted_relationships: r[rels].clone(),
            display_name: r[display].clone(),
        })
        .collect())
}

pub fn load_mappings(workbook: &Workbook) -> LineageResult<Vec<GovernanceMapping>> {
    let t = prepared(workbook, GOVERNANCE_MAPPING)?;
    let [entity, rule, cond, ctx] = indices(
        &t,
        ["ENTITY", "MAPPED BUSINESS RULE", "MAPPED BUSINESS CONDITION", "FOR CONTEXT"],
    )?;

    Ok(t.rows()
        .iter()
        .map(|r| GovernanceMapping {
            entity: r[entity].clone(),
            mapped_rule: r[rule].clone(),
            mapped_condition: r[cond].clone(),
            for_context: r[ctx].clone(),
        })
        .collect())
}

/// Load CONTEXTS, reading the composite type/name column from its
/// `occurrence`-th header (1-based).
pub fn load_contexts(workbook: &Workbook, occurrence: usize) -> LineageResult<Vec<Context>> {
    let mut t = prepared(workbook, CONTEXTS)?;
    let composite = t.nth_column_index(CONTEXT_TYPE_NAME_HEADER, occurrence)?;
    t.rename_column_at(composite, CONTEXT_TYPE_NAME_ALIAS);

    let [name, activity, actions, criteria] = indices(
        &t,
        [
            "CONTEXT NAME",
            "WORKFLOW ACTIVITY",
            "WORKFLOW ACTIVITY ACTION(s)",
            "WORKFLOW ACTIVITY CRITERIA",
        ],
    )?;

    Ok(t.rows()
        .iter()
        .map(|r| Context {
            name: r[name].clone(),
            type_and_name: r[composite].clone(),
            workflow_activity: r[activity].clone(),
            workflow_activity_actions: r[actions].clone(),
            workflow_activity_criteria: r[criteria].clone(),
        })
        .collect())
}

pub fn load_policies(workbook: &Workbook) -> LineageResult<Vec<Policy>> {
    let t = prepared(workbook, POLICY)?;
    let [name, entity_type, condition] = indices(&t, ["POLICY", "ENTITY TYPE", "CONDITION"])?;

    Ok(t.rows()
        .iter()
        .enumerate()
        .filter_map(|(i, r)| {
            Some(Policy {
                name: identity(POLICY, i + 1, &r[name])?,
                entity_type: r[entity_type].clone(),
                condition: r[condition].clone(),
            })
        })
        .collect())
}

pub fn load_policy_mappings(workbook: &Workbook) -> LineageResult<Vec<PolicyMapping>> {
    let t = prepared(workbook, POLICY_MAPPING)?;
    let [policy, role, set] = indices(&t, ["MAPPING POLICY", "ROLE", "MAPPING PERMISSION SET"])?;

    Ok(t.rows()
        .iter()
        .map(|r| PolicyMapping {
            policy: r[policy].clone(),
            role: r[role].clone(),
            permission_set: r[set].clone(),
        })
        .collect())
}

pub fn load_permissions(workbook: &Workbook) -> LineageResult<Vec<Permission>> {
    let t = prepared(workbook, POLICY_PERMISSIONS)?;
    let [set, attribute, relationship, permission] =
        indices(&t, ["PERMISSION SET", "ATTRIBUTE", "RELATIONSHIP", "PERMISSION"])?;

    Ok(t.rows()
        .iter()
        .map(|r| Permission {
            permission_set: r[set].clone(),
            attribute: r[attribute].clone(),
            relationship: r[relationship].clone(),
            permission: r[permission].clone(),
        })
        .collect())
}

/// The NAME column of ENTITIES or RELATIONSHIPS, nulls dropped.
pub fn load_names(workbook: &Workbook, sheet: &str) -> LineageResult<Vec<String>> {
    let t = prepared(workbook, sheet)?;
    let name = t.column_index("NAME")?;
    Ok(t.rows().iter().filter_map(|r| r[name].clone()).collect())
}

pub fn load_attributes(workbook: &Workbook) -> LineageResult<Vec<Attribute>> {
    let t = prepared(workbook, ATTRIBUTES)?;
    let [name, display, data_type, uses_ref, root, group, display_type, identifier] = indices(
        &t,
        [
            "NAME",
            "DISPLAY NAME",
            "DATA TYPE",
            "USES REFERENCE DATA",
            "PATH ROOT NODE",
            "GROUP",
            "DISPLAY TYPE",
            "IS NESTED GROUP IDENTIFIER?",
        ],
    )?;

    Ok(t.rows()
        .iter()
        .map(|r| Attribute {
            name: r[name].clone(),
            display_name: r[display].clone(),
            data_type: r[data_type].clone(),
            uses_reference_data: r[uses_ref].clone(),
            path_root_node: r[root].clone(),
            group: r[group].clone(),
            display_type: r[display_type].clone(),
            is_nested_group_identifier: r[identifier].clone(),
        })
        .collect())
}

pub fn load_ear_links(workbook: &Workbook) -> LineageResult<Vec<EarLink>> {
    let t = prepared(workbook, EAR_MODEL)?;
    let [attribute, entity, relationship] =
        indices(&t, ["MAPPED ATTRIBUTE", "ENTITY", "MAPPED RELATIONSHIP"])?;

    Ok(t.rows()
        .iter()
        .map(|r| EarLink {
            mapped_attribute: r[attribute].clone(),
            entity: r[entity].clone(),
            mapped_relationship: r[relationship].clone(),
        })
        .collect())
}

/// Load a sheet only used as an optional input; absent means empty.
pub fn load_optional<T, F>(workbook: &Workbook, sheet: &str, load: F) -> LineageResult<Vec<T>>
where
    F: FnOnce(&Workbook) -> LineageResult<Vec<T>>,
{
    match load(workbook) {
        Err(LineageError::MissingSheet { sheet: missing }) if missing == sheet => {
            warn!(sheet, "optional sheet not present, treating as empty");
            Ok(Vec::new())
        }
        other => other,
    }
}
