use crate::cli::RuleTarget;
use crate::domain::constants::DEFAULT_MAX_LINE_LENGTH;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize, Clone)]
pub struct RuleSummary {
    pub name: String,
    pub category: String,
    pub description: String,
    pub globs: Vec<String>,
    pub always_apply: Option<bool>,
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// `category/name` of the offending rule.
    pub rule: String,
    pub check: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Serialize)]
pub struct ValidationReport {
    pub checked: usize,
    pub errors: usize,
    pub warnings: usize,
    pub strict: bool,
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.errors == 0 && (!self.strict || self.warnings == 0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileAction {
    pub rule: String,
    pub dest: String,
    pub action: String,
}

#[derive(Serialize)]
pub struct CopyReport {
    pub copied: usize,
    pub skipped: usize,
    pub unchanged: usize,
    pub dry_run: bool,
    pub actions: Vec<FileAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallManifest {
    pub version: u32,
    pub catalog: String,
    pub files: Vec<ManifestEntry>,
}

#[derive(Serialize)]
pub struct TargetReport {
    pub target: String,
    pub dir: String,
    pub status: String,
    pub installed: usize,
    pub skipped: usize,
    pub removed: usize,
    pub kept: usize,
    pub actions: Vec<FileAction>,
}

#[derive(Serialize)]
pub struct InstallReport {
    pub project: String,
    pub uninstall: bool,
    pub dry_run: bool,
    pub rule_count: usize,
    pub targets: Vec<TargetReport>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct State {
    pub installs: Vec<InstallRecord>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InstallRecord {
    pub project: String,
    pub target: RuleTarget,
    pub catalog: String,
    pub rule_count: usize,
}

#[derive(Serialize)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct DoctorReport {
    pub overall: String,
    pub checks: Vec<CheckItem>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub install: InstallConfig,
}

#[derive(Debug, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
    /// Extra placeholder markers on top of the built-in set.
    #[serde(default)]
    pub placeholder_markers: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            placeholder_markers: Vec::new(),
        }
    }
}

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}

#[derive(Debug, Deserialize, Default)]
pub struct InstallConfig {
    #[serde(default)]
    pub default_target: Option<RuleTarget>,
}
