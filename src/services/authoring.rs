use crate::catalog::{resolve_rules_dir, RULE_EXTENSION};
use crate::services::frontmatter::{self, Frontmatter, Globs};
use crate::services::validator::is_valid_rule_name;
use std::path::{Path, PathBuf};

fn rule_file_name(name: &str) -> String {
    if name.ends_with(".mdc") {
        name.to_string()
    } else {
        format!("{}.{}", name, RULE_EXTENSION)
    }
}

fn rule_path(catalog_dir: &str, category: &str, name: &str) -> PathBuf {
    resolve_rules_dir(Path::new(catalog_dir))
        .join(category)
        .join(rule_file_name(name))
}

fn title_from(name: &str) -> String {
    let stem = name.trim_end_matches(".mdc").replace('-', " ");
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => stem,
    }
}

fn render(fm: &Frontmatter, body: &str) -> anyhow::Result<String> {
    let yaml = serde_yaml::to_string(fm)?;
    Ok(format!("---\n{}---\n\n{}", yaml, body))
}

pub fn rule_create(
    catalog_dir: &str,
    category: &str,
    name: &str,
    description: &str,
    globs: &[String],
    always_apply: bool,
) -> anyhow::Result<PathBuf> {
    let file_name = rule_file_name(name);
    if !is_valid_rule_name(&file_name) {
        anyhow::bail!("rule name must be kebab-case: {}", file_name);
    }
    let path = rule_path(catalog_dir, category, name);
    if path.exists() {
        anyhow::bail!("rule exists: {}", path.display());
    }

    let fm = Frontmatter {
        description: Some(description.to_string()),
        globs: if globs.is_empty() {
            None
        } else {
            Some(Globs::Many(globs.to_vec()))
        },
        always_apply: Some(always_apply),
        extra: Default::default(),
    };
    let body = format!("# {}\n\n{}\n", title_from(&file_name), description);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, render(&fm, &body)?)?;
    Ok(path)
}

pub fn rule_update(
    catalog_dir: &str,
    category: &str,
    name: &str,
    description: Option<String>,
    globs: Vec<String>,
    always_apply: Option<bool>,
) -> anyhow::Result<PathBuf> {
    let path = rule_path(catalog_dir, category, name);
    if !path.exists() {
        anyhow::bail!("rule not found: {}", path.display());
    }
    let raw = std::fs::read_to_string(&path)?;
    let (mut fm, body) = match frontmatter::split(&raw) {
        Some((yaml, body)) => (frontmatter::parse(yaml)?, body.to_string()),
        None => (Frontmatter::default(), raw),
    };

    if let Some(d) = description {
        fm.description = Some(d);
    }
    if !globs.is_empty() {
        fm.globs = Some(Globs::Many(globs));
    }
    if let Some(a) = always_apply {
        fm.always_apply = Some(a);
    }

    std::fs::write(&path, render(&fm, &body)?)?;
    Ok(path)
}

pub fn rule_remove(catalog_dir: &str, category: &str, name: &str) -> anyhow::Result<PathBuf> {
    let path = rule_path(catalog_dir, category, name);
    if !path.exists() {
        anyhow::bail!("rule not found: {}", path.display());
    }
    std::fs::remove_file(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::title_from;

    #[test]
    fn titles_from_file_names() {
        assert_eq!(title_from("strict-types.mdc"), "Strict types");
        assert_eq!(title_from("api.mdc"), "Api");
    }
}
