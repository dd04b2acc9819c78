use crate::domain::models::RuleSummary;
use crate::services::frontmatter::{self, Frontmatter};
use std::path::{Path, PathBuf};

pub const RULES_SUBDIR: &str = "rules";
pub const RULE_EXTENSION: &str = "mdc";
pub const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, Clone)]
pub struct RuleDoc {
    /// File name including the `.mdc` extension.
    pub name: String,
    /// First path component under the rules directory, or `general` for
    /// rules placed directly in it.
    pub category: String,
    pub path: PathBuf,
    pub has_frontmatter: bool,
    pub frontmatter: Option<Frontmatter>,
    pub frontmatter_error: Option<String>,
    pub body: String,
    pub raw: String,
}

impl RuleDoc {
    pub fn id(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub name: String,
    pub root: PathBuf,
    pub rules_dir: PathBuf,
    pub rules: Vec<RuleDoc>,
}

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("catalog not found: {0}")]
    CatalogNotFound(String),
    #[error("rule not found: {0}")]
    RuleNotFound(String),
}

pub fn resolve_rules_dir(root: &Path) -> PathBuf {
    let nested = root.join(RULES_SUBDIR);
    if nested.is_dir() {
        nested
    } else {
        root.to_path_buf()
    }
}

pub fn load_catalog(source: &str) -> anyhow::Result<Catalog> {
    let root = PathBuf::from(source);
    if !root.is_dir() {
        return Err(CatalogError::CatalogNotFound(source.to_string()).into());
    }
    let root = match root.canonicalize() {
        Ok(c) => c,
        Err(_) => root,
    };
    let rules_dir = resolve_rules_dir(&root);

    let mut rules = Vec::new();
    for entry in walkdir::WalkDir::new(&rules_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some(RULE_EXTENSION) {
            continue;
        }
        rules.push(load_rule(&rules_dir, entry.path())?);
    }
    rules.sort_by(|a, b| a.category.cmp(&b.category).then(a.name.cmp(&b.name)));

    let name = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("catalog")
        .to_string();
    Ok(Catalog {
        name,
        root,
        rules_dir,
        rules,
    })
}

fn load_rule(rules_dir: &Path, path: &Path) -> anyhow::Result<RuleDoc> {
    let raw = std::fs::read_to_string(path)?;
    let rel = path.strip_prefix(rules_dir).unwrap_or(path);
    let category = rel
        .parent()
        .and_then(|p| p.iter().next())
        .and_then(|c| c.to_str())
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let (has_frontmatter, fm, fm_error, body) = match frontmatter::split(&raw) {
        Some((yaml, body)) => match frontmatter::parse(yaml) {
            Ok(fm) => (true, Some(fm), None, body.to_string()),
            Err(e) => (true, None, Some(e.to_string()), body.to_string()),
        },
        None => (false, None, None, raw.clone()),
    };

    Ok(RuleDoc {
        name,
        category,
        path: path.to_path_buf(),
        has_frontmatter,
        frontmatter: fm,
        frontmatter_error: fm_error,
        body,
        raw,
    })
}

pub fn discover<'a>(catalog: &'a Catalog, query: Option<&str>) -> Vec<&'a RuleDoc> {
    match query {
        None => catalog.rules.iter().collect(),
        Some(q) => {
            let q = q.to_ascii_lowercase();
            catalog
                .rules
                .iter()
                .filter(|r| {
                    r.name.to_ascii_lowercase().contains(&q)
                        || r.category.to_ascii_lowercase().contains(&q)
                        || description_of(r).to_ascii_lowercase().contains(&q)
                        || globs_of(r).iter().any(|g| g.to_ascii_lowercase().contains(&q))
                })
                .collect()
        }
    }
}

/// Looks a rule up by `name`, `name.mdc`, or `category/name`.
pub fn get<'a>(catalog: &'a Catalog, id: &str) -> anyhow::Result<&'a RuleDoc> {
    let (category, name) = match id.split_once('/') {
        Some((c, n)) => (Some(c), n),
        None => (None, id),
    };
    let want = if name.ends_with(".mdc") {
        name.to_string()
    } else {
        format!("{}.{}", name, RULE_EXTENSION)
    };
    catalog
        .rules
        .iter()
        .find(|r| r.name == want && category.map(|c| c == r.category).unwrap_or(true))
        .ok_or_else(|| CatalogError::RuleNotFound(id.to_string()).into())
}

pub fn summarize(rule: &RuleDoc) -> RuleSummary {
    RuleSummary {
        name: rule.name.clone(),
        category: rule.category.clone(),
        description: description_of(rule),
        globs: globs_of(rule),
        always_apply: rule.frontmatter.as_ref().and_then(|f| f.always_apply),
        path: rule.path.to_string_lossy().to_string(),
    }
}

fn description_of(rule: &RuleDoc) -> String {
    rule.frontmatter
        .as_ref()
        .and_then(|f| f.description.clone())
        .unwrap_or_default()
}

fn globs_of(rule: &RuleDoc) -> Vec<String> {
    rule.frontmatter
        .as_ref()
        .and_then(|f| f.globs.as_ref())
        .map(|g| g.as_vec())
        .unwrap_or_default()
}
