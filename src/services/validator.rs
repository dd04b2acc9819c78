use crate::catalog::{Catalog, RuleDoc};
use crate::domain::constants::PLACEHOLDER_MARKERS;
use crate::domain::models::{Finding, Severity, ValidationConfig, ValidationReport};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// kebab-case, digits allowed, `.mdc` extension.
fn rule_name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*\.mdc$").expect("static rule name pattern")
    })
}

pub fn is_valid_rule_name(name: &str) -> bool {
    rule_name_pattern().is_match(name)
}

pub fn validate_catalog(
    catalog: &Catalog,
    config: &ValidationConfig,
    category: Option<&str>,
    strict: bool,
) -> ValidationReport {
    let markers: Vec<String> = PLACEHOLDER_MARKERS
        .iter()
        .map(|m| m.to_string())
        .chain(config.placeholder_markers.iter().map(|m| m.to_ascii_lowercase()))
        .collect();

    let selected: Vec<&RuleDoc> = catalog
        .rules
        .iter()
        .filter(|r| category.map(|c| c == r.category).unwrap_or(true))
        .collect();

    let mut findings = Vec::new();
    let mut seen_names = HashSet::new();

    for rule in &selected {
        check_rule(rule, config, &markers, &mut findings);
        if !seen_names.insert(rule.name.clone()) {
            findings.push(Finding {
                rule: rule.id(),
                check: "duplicate_name".to_string(),
                severity: Severity::Error,
                message: format!("rule file name {} appears in more than one category", rule.name),
            });
        }
    }

    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    let warnings = findings.len() - errors;

    ValidationReport {
        checked: selected.len(),
        errors,
        warnings,
        strict,
        findings,
    }
}

fn check_rule(
    rule: &RuleDoc,
    config: &ValidationConfig,
    markers: &[String],
    findings: &mut Vec<Finding>,
) {
    let mut push = |check: &str, severity: Severity, message: String| {
        findings.push(Finding {
            rule: rule.id(),
            check: check.to_string(),
            severity,
            message,
        });
    };

    if !is_valid_rule_name(&rule.name) {
        push(
            "file_naming",
            Severity::Error,
            format!("{} is not kebab-case with a .mdc extension", rule.name),
        );
    }

    if !rule.has_frontmatter {
        push(
            "frontmatter_missing",
            Severity::Error,
            "no YAML frontmatter block at the top of the file".to_string(),
        );
    } else if let Some(err) = &rule.frontmatter_error {
        push(
            "frontmatter_invalid",
            Severity::Error,
            format!("frontmatter is not valid YAML: {}", err),
        );
    } else if let Some(fm) = &rule.frontmatter {
        match fm.description.as_deref().map(str::trim) {
            None | Some("") => push(
                "missing_description",
                Severity::Error,
                "frontmatter must carry a non-empty description".to_string(),
            ),
            Some(desc) => {
                if let Some(marker) = first_marker(desc, markers) {
                    push(
                        "placeholder_description",
                        Severity::Warning,
                        format!("description contains placeholder text ({})", marker),
                    );
                }
            }
        }

        if fm.always_apply.is_none() {
            push(
                "missing_always_apply",
                Severity::Error,
                "frontmatter must set alwaysApply".to_string(),
            );
        }

        let globs_missing = fm.globs.as_ref().map(|g| g.is_empty()).unwrap_or(true);
        if globs_missing && fm.always_apply != Some(true) {
            push(
                "missing_globs",
                Severity::Error,
                "globs are required unless alwaysApply is true".to_string(),
            );
        }

        for key in fm.extra.keys() {
            push(
                "unknown_field",
                Severity::Warning,
                format!("unknown frontmatter key: {}", key),
            );
        }
    }

    if rule.body.trim().is_empty() {
        push(
            "empty_body",
            Severity::Error,
            "rule body is empty".to_string(),
        );
    } else {
        if let Some(marker) = first_marker(&rule.body, markers) {
            push(
                "placeholder_text",
                Severity::Warning,
                format!("body contains placeholder text ({})", marker),
            );
        }

        let long = rule
            .body
            .lines()
            .filter(|l| l.chars().count() > config.max_line_length)
            .count();
        if long > 0 {
            push(
                "long_lines",
                Severity::Warning,
                format!(
                    "{} line(s) exceed {} characters",
                    long, config.max_line_length
                ),
            );
        }
    }
}

fn first_marker<'a>(text: &str, markers: &'a [String]) -> Option<&'a str> {
    let lower = text.to_ascii_lowercase();
    markers
        .iter()
        .find(|m| lower.contains(m.as_str()))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::services::frontmatter::{Frontmatter, Globs};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn doc(name: &str, fm: Option<Frontmatter>, body: &str) -> RuleDoc {
        RuleDoc {
            name: name.to_string(),
            category: "general".to_string(),
            path: PathBuf::from(name),
            has_frontmatter: fm.is_some(),
            frontmatter: fm,
            frontmatter_error: None,
            body: body.to_string(),
            raw: String::new(),
        }
    }

    fn fm(description: &str, globs: Option<Globs>, always_apply: Option<bool>) -> Frontmatter {
        Frontmatter {
            description: Some(description.to_string()),
            globs,
            always_apply,
            extra: BTreeMap::new(),
        }
    }

    fn catalog_of(rules: Vec<RuleDoc>) -> Catalog {
        Catalog {
            name: "test".to_string(),
            root: PathBuf::from("."),
            rules_dir: PathBuf::from("rules"),
            rules,
        }
    }

    fn checks(report: &ValidationReport) -> Vec<&str> {
        report.findings.iter().map(|f| f.check.as_str()).collect()
    }

    #[test]
    fn clean_rule_produces_no_findings() {
        let c = catalog_of(vec![doc(
            "strict-types.mdc",
            Some(fm(
                "Enforce strict compiler flags",
                Some(Globs::One("**/*.ts".to_string())),
                Some(false),
            )),
            "# Strict types\n\nAlways enable strict mode.\n",
        )]);
        let report = validate_catalog(&c, &ValidationConfig::default(), None, false);
        assert!(report.findings.is_empty(), "unexpected: {:?}", report.findings);
        assert!(report.passed());
    }

    #[test]
    fn missing_frontmatter_is_an_error() {
        let c = catalog_of(vec![doc("no-frontmatter.mdc", None, "# body\n")]);
        let report = validate_catalog(&c, &ValidationConfig::default(), None, false);
        assert!(checks(&report).contains(&"frontmatter_missing"));
        assert_eq!(report.errors, 1);
    }

    #[test]
    fn globs_optional_when_always_apply() {
        let c = catalog_of(vec![doc(
            "commit-style.mdc",
            Some(fm("Commit message style", None, Some(true))),
            "# Commits\n",
        )]);
        let report = validate_catalog(&c, &ValidationConfig::default(), None, false);
        assert!(!checks(&report).contains(&"missing_globs"));
    }

    #[test]
    fn globs_required_otherwise() {
        let c = catalog_of(vec![doc(
            "needs-globs.mdc",
            Some(fm("Something scoped", None, Some(false))),
            "# Scoped\n",
        )]);
        let report = validate_catalog(&c, &ValidationConfig::default(), None, false);
        assert!(checks(&report).contains(&"missing_globs"));
    }

    #[test]
    fn bad_file_name_is_flagged() {
        let c = catalog_of(vec![doc(
            "Bad_Name.mdc",
            Some(fm("desc", None, Some(true))),
            "# x\n",
        )]);
        let report = validate_catalog(&c, &ValidationConfig::default(), None, false);
        assert!(checks(&report).contains(&"file_naming"));
    }

    #[test]
    fn placeholder_and_long_lines_warn_and_strict_escalates() {
        let long_line = "x".repeat(200);
        let c = catalog_of(vec![doc(
            "draft-rule.mdc",
            Some(fm("Draft rule", None, Some(true))),
            &format!("TODO: finish this\n{}\n", long_line),
        )]);
        let relaxed = validate_catalog(&c, &ValidationConfig::default(), None, false);
        assert_eq!(relaxed.errors, 0);
        assert_eq!(relaxed.warnings, 2);
        assert!(relaxed.passed());

        let strict = validate_catalog(&c, &ValidationConfig::default(), None, true);
        assert!(!strict.passed());
    }

    #[test]
    fn duplicate_names_across_categories_error() {
        let mut a = doc(
            "same-name.mdc",
            Some(fm("a", None, Some(true))),
            "# a\n",
        );
        a.category = "git".to_string();
        let mut b = doc(
            "same-name.mdc",
            Some(fm("b", None, Some(true))),
            "# b\n",
        );
        b.category = "typescript".to_string();
        let report = validate_catalog(&catalog_of(vec![a, b]), &ValidationConfig::default(), None, false);
        assert!(checks(&report).contains(&"duplicate_name"));
    }

    #[test]
    fn valid_rule_names() {
        assert!(is_valid_rule_name("use-strict-types.mdc"));
        assert!(is_valid_rule_name("001-base.mdc"));
        assert!(!is_valid_rule_name("UseStrictTypes.mdc"));
        assert!(!is_valid_rule_name("strict_types.mdc"));
        assert!(!is_valid_rule_name("strict-types.md"));
        assert!(!is_valid_rule_name("-leading.mdc"));
    }
}
