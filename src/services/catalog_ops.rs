use crate::catalog::{self, Catalog};
use crate::domain::constants::{INDEX_SCHEMA_VERSION, INDEX_SUBPATH};
use crate::domain::models::{CheckItem, DoctorReport};
use crate::services::storage::unix_timestamp;
use std::collections::HashSet;
use std::path::PathBuf;

pub fn index_path(catalog: &Catalog) -> PathBuf {
    catalog.root.join(INDEX_SUBPATH)
}

pub fn build_index(catalog: &Catalog) -> serde_json::Value {
    let rules: Vec<serde_json::Value> = catalog
        .rules
        .iter()
        .map(|r| {
            let s = catalog::summarize(r);
            serde_json::json!({
                "name": s.name,
                "category": s.category,
                "description": s.description,
                "globs": s.globs,
                "alwaysApply": s.always_apply,
            })
        })
        .collect();

    serde_json::json!({
        "managedBy": "rulekit",
        "schemaVersion": INDEX_SCHEMA_VERSION,
        "generatedAt": unix_timestamp(),
        "catalog": catalog.name,
        "rules": rules,
    })
}

pub fn write_index(catalog: &Catalog) -> anyhow::Result<(PathBuf, usize)> {
    let index = build_index(catalog);
    let path = index_path(catalog);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, serde_json::to_string_pretty(&index)?)?;
    Ok((path, catalog.rules.len()))
}

/// An index is fresh when it lists exactly the current rule ids.
pub fn index_is_fresh(catalog: &Catalog) -> bool {
    let path = index_path(catalog);
    let Ok(raw) = std::fs::read_to_string(path) else {
        return false;
    };
    let Ok(v) = serde_json::from_str::<serde_json::Value>(&raw) else {
        return false;
    };
    let indexed: HashSet<String> = v
        .get("rules")
        .and_then(|x| x.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|r| {
                    let category = r.get("category").and_then(|x| x.as_str())?;
                    let name = r.get("name").and_then(|x| x.as_str())?;
                    Some(format!("{}/{}", category, name))
                })
                .collect()
        })
        .unwrap_or_default();
    let current: HashSet<String> = catalog.rules.iter().map(|r| r.id()).collect();
    indexed == current
}

pub fn catalog_doctor(source: &str) -> DoctorReport {
    let root = PathBuf::from(source);
    let mut checks = vec![CheckItem {
        name: "catalog_dir_exists".to_string(),
        status: if root.is_dir() { "ok" } else { "missing" }.to_string(),
    }];

    match catalog::load_catalog(source) {
        Ok(catalog) => {
            checks.push(CheckItem {
                name: "rules_found".to_string(),
                status: if catalog.rules.is_empty() {
                    "missing"
                } else {
                    "ok"
                }
                .to_string(),
            });

            let unparsed = catalog
                .rules
                .iter()
                .filter(|r| !r.has_frontmatter || r.frontmatter_error.is_some())
                .count();
            checks.push(CheckItem {
                name: "frontmatter_parses".to_string(),
                status: if unparsed == 0 { "ok" } else { "failed" }.to_string(),
            });

            let mut seen = HashSet::new();
            let duplicated = catalog.rules.iter().any(|r| !seen.insert(&r.name));
            checks.push(CheckItem {
                name: "unique_rule_names".to_string(),
                status: if duplicated { "failed" } else { "ok" }.to_string(),
            });

            let index_status = if !index_path(&catalog).exists() {
                "missing"
            } else if index_is_fresh(&catalog) {
                "ok"
            } else {
                "stale"
            };
            checks.push(CheckItem {
                name: "index_fresh".to_string(),
                status: index_status.to_string(),
            });
        }
        Err(e) => checks.push(CheckItem {
            name: "catalog_load".to_string(),
            status: format!("failed: {}", e),
        }),
    }

    let overall = if checks.iter().all(|c| c.status == "ok") {
        "ok"
    } else {
        "needs_attention"
    }
    .to_string();

    DoctorReport { overall, checks }
}
