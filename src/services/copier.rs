use crate::catalog::{Catalog, RuleDoc};
use crate::domain::models::{CopyReport, FileAction};
use std::collections::HashMap;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum CopyError {
    #[error("flatten collision: {name} exists in both {first} and {second}")]
    FlattenCollision {
        name: String,
        first: String,
        second: String,
    },
}

pub struct CopyOptions {
    pub flatten: bool,
    pub dry_run: bool,
    pub force: bool,
    pub category: Option<String>,
}

/// Fails when flattening would write two different rules to the same file.
pub fn check_flatten_collisions(rules: &[&RuleDoc]) -> Result<(), CopyError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for rule in rules {
        if let Some(first) = seen.insert(rule.name.as_str(), rule.category.as_str()) {
            return Err(CopyError::FlattenCollision {
                name: rule.name.clone(),
                first: first.to_string(),
                second: rule.category.clone(),
            });
        }
    }
    Ok(())
}

pub fn copy_rules(catalog: &Catalog, dest: &Path, opts: &CopyOptions) -> anyhow::Result<CopyReport> {
    let selected: Vec<&RuleDoc> = catalog
        .rules
        .iter()
        .filter(|r| opts.category.as_deref().map(|c| c == r.category).unwrap_or(true))
        .collect();

    if opts.flatten {
        check_flatten_collisions(&selected)?;
    }

    let mut actions = Vec::new();
    let mut copied = 0usize;
    let mut skipped = 0usize;
    let mut unchanged = 0usize;

    for rule in &selected {
        let dest_path = if opts.flatten {
            dest.join(&rule.name)
        } else {
            dest.join(&rule.category).join(&rule.name)
        };

        let action = if !dest_path.exists() {
            "create"
        } else {
            let existing = std::fs::read_to_string(&dest_path)?;
            if existing == rule.raw {
                "unchanged"
            } else if opts.force {
                "update"
            } else {
                "skipped"
            }
        };

        match action {
            "create" | "update" => {
                if !opts.dry_run {
                    if let Some(parent) = dest_path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&dest_path, &rule.raw)?;
                }
                copied += 1;
            }
            "unchanged" => unchanged += 1,
            _ => skipped += 1,
        }

        actions.push(FileAction {
            rule: rule.id(),
            dest: dest_path.to_string_lossy().to_string(),
            action: action.to_string(),
        });
    }

    Ok(CopyReport {
        copied,
        skipped,
        unchanged,
        dry_run: opts.dry_run,
        actions,
    })
}

#[cfg(test)]
mod tests {
    use super::check_flatten_collisions;
    use crate::catalog::RuleDoc;
    use std::path::PathBuf;

    fn doc(category: &str, name: &str) -> RuleDoc {
        RuleDoc {
            name: name.to_string(),
            category: category.to_string(),
            path: PathBuf::from(name),
            has_frontmatter: false,
            frontmatter: None,
            frontmatter_error: None,
            body: String::new(),
            raw: String::new(),
        }
    }

    #[test]
    fn collision_detected_across_categories() {
        let a = doc("git", "base.mdc");
        let b = doc("typescript", "base.mdc");
        assert!(check_flatten_collisions(&[&a, &b]).is_err());
    }

    #[test]
    fn distinct_names_pass() {
        let a = doc("git", "commit-style.mdc");
        let b = doc("typescript", "strict-types.mdc");
        assert!(check_flatten_collisions(&[&a, &b]).is_ok());
    }
}
