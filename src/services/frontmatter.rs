use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `globs` accepts both a single pattern and a list of patterns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Globs {
    One(String),
    Many(Vec<String>),
}

impl Globs {
    pub fn as_vec(&self) -> Vec<String> {
        match self {
            Globs::One(s) => vec![s.clone()],
            Globs::Many(v) => v.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Globs::One(s) => s.trim().is_empty(),
            Globs::Many(v) => v.iter().all(|s| s.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frontmatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub globs: Option<Globs>,
    #[serde(
        default,
        rename = "alwaysApply",
        skip_serializing_if = "Option::is_none"
    )]
    pub always_apply: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Splits a rule document into its YAML frontmatter and Markdown body.
///
/// Returns `None` when the document does not start with a `---` fence or the
/// closing fence is missing. The body is returned with leading newlines
/// stripped.
pub fn split(raw: &str) -> Option<(&str, &str)> {
    let doc = raw.trim_start_matches('\u{feff}');
    if !doc.starts_with("---") {
        return None;
    }
    let after = &doc[3..];
    let after = after
        .strip_prefix("\r\n")
        .or_else(|| after.strip_prefix('\n'))?;

    for (idx, _) in after.match_indices("---") {
        let at_line_start = idx == 0 || after.as_bytes()[idx - 1] == b'\n';
        if !at_line_start {
            continue;
        }
        let end = idx + 3;
        let rest = &after[end..];
        let fence_alone = rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n");
        if !fence_alone {
            continue;
        }
        let yaml = &after[..idx];
        let body = rest.trim_start_matches(|c| c == '\r' || c == '\n');
        return Some((yaml, body));
    }
    None
}

pub fn parse(yaml: &str) -> anyhow::Result<Frontmatter> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

#[cfg(test)]
mod tests {
    use super::{parse, split};

    #[test]
    fn split_separates_yaml_and_body() {
        let doc = "---\ndescription: use tabs\nalwaysApply: true\n---\n\n# Body\n";
        let (yaml, body) = split(doc).expect("frontmatter present");
        assert!(yaml.contains("description: use tabs"));
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn split_rejects_documents_without_fence() {
        assert!(split("# Just markdown\n").is_none());
        assert!(split("--- inline dashes are not a fence").is_none());
    }

    #[test]
    fn split_requires_closing_fence() {
        assert!(split("---\ndescription: x\n").is_none());
    }

    #[test]
    fn parse_accepts_string_or_list_globs() {
        let single = parse("globs: \"**/*.ts\"\n").expect("single glob");
        assert_eq!(single.globs.expect("globs").as_vec(), vec!["**/*.ts"]);

        let many = parse("globs:\n  - \"**/*.ts\"\n  - \"**/*.tsx\"\n").expect("glob list");
        assert_eq!(many.globs.expect("globs").as_vec().len(), 2);
    }

    #[test]
    fn parse_collects_unknown_keys() {
        let fm = parse("description: x\npriority: high\n").expect("parse");
        assert!(fm.extra.contains_key("priority"));
    }

    #[test]
    fn parse_of_empty_block_yields_defaults() {
        let fm = parse("  \n").expect("empty frontmatter");
        assert!(fm.description.is_none());
        assert!(fm.always_apply.is_none());
    }
}
