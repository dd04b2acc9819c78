use crate::catalog::{Catalog, RuleDoc};
use crate::cli::RuleTarget;
use crate::domain::constants::{MANIFEST_FILE, MANIFEST_SCHEMA_VERSION};
use crate::domain::models::{FileAction, InstallManifest, InstallReport, ManifestEntry, TargetReport};
use crate::services::copier::check_flatten_collisions;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum InstallError {
    #[error("no rulekit manifest found in {0}")]
    ManifestMissing(String),
}

pub struct InstallOptions {
    pub dry_run: bool,
    pub force: bool,
}

pub fn target_rules_dir(project: &Path, target: RuleTarget) -> PathBuf {
    match target {
        RuleTarget::Cursor => project.join(".cursor/rules"),
        RuleTarget::Claude => project.join(".claude/rules"),
        RuleTarget::Windsurf => project.join(".windsurf/rules"),
        RuleTarget::All => PathBuf::new(),
    }
}

pub fn expand_targets(target: RuleTarget) -> Vec<RuleTarget> {
    match target {
        RuleTarget::All => vec![RuleTarget::Cursor, RuleTarget::Claude, RuleTarget::Windsurf],
        t => vec![t],
    }
}

pub fn target_name(target: RuleTarget) -> String {
    format!("{:?}", target).to_ascii_lowercase()
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn load_manifest(dir: &Path) -> anyhow::Result<Option<InstallManifest>> {
    let path = dir.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&raw)?))
}

fn write_manifest(dir: &Path, catalog: &str, entries: Vec<ManifestEntry>) -> anyhow::Result<()> {
    let mut entries = entries;
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    let manifest = InstallManifest {
        version: MANIFEST_SCHEMA_VERSION,
        catalog: catalog.to_string(),
        files: entries,
    };
    std::fs::write(
        dir.join(MANIFEST_FILE),
        serde_json::to_string_pretty(&manifest)?,
    )?;
    Ok(())
}

pub fn install_rules(
    catalog: &Catalog,
    project: &Path,
    target: RuleTarget,
    category: Option<&str>,
    opts: &InstallOptions,
) -> anyhow::Result<InstallReport> {
    let selected: Vec<&RuleDoc> = catalog
        .rules
        .iter()
        .filter(|r| category.map(|c| c == r.category).unwrap_or(true))
        .collect();
    check_flatten_collisions(&selected)?;

    let mut targets = Vec::new();
    for t in expand_targets(target) {
        targets.push(install_into(catalog, &selected, project, t, opts)?);
    }

    Ok(InstallReport {
        project: project.to_string_lossy().to_string(),
        uninstall: false,
        dry_run: opts.dry_run,
        rule_count: selected.len(),
        targets,
    })
}

fn install_into(
    catalog: &Catalog,
    rules: &[&RuleDoc],
    project: &Path,
    target: RuleTarget,
    opts: &InstallOptions,
) -> anyhow::Result<TargetReport> {
    let dir = target_rules_dir(project, target);
    let previous: HashMap<String, String> = load_manifest(&dir)?
        .map(|m| m.files.into_iter().map(|f| (f.name, f.sha256)).collect())
        .unwrap_or_default();

    let mut actions = Vec::new();
    let mut entries = Vec::new();
    let mut installed = 0usize;
    let mut skipped = 0usize;

    for rule in rules {
        let dest = dir.join(&rule.name);
        let digest = sha256_hex(rule.raw.as_bytes());

        let action = if !dest.exists() {
            "install"
        } else {
            let existing = std::fs::read_to_string(&dest)?;
            if existing == rule.raw {
                "unchanged"
            } else if opts.force || previous.contains_key(&rule.name) {
                // A file we wrote earlier is ours to replace; anything else
                // needs --force.
                "update"
            } else {
                "skipped"
            }
        };

        match action {
            "install" | "update" => {
                if !opts.dry_run {
                    std::fs::create_dir_all(&dir)?;
                    std::fs::write(&dest, &rule.raw)?;
                }
                installed += 1;
                entries.push(ManifestEntry {
                    name: rule.name.clone(),
                    sha256: digest,
                });
            }
            "unchanged" => {
                entries.push(ManifestEntry {
                    name: rule.name.clone(),
                    sha256: digest,
                });
            }
            _ => skipped += 1,
        }

        actions.push(FileAction {
            rule: rule.id(),
            dest: dest.to_string_lossy().to_string(),
            action: action.to_string(),
        });
    }

    // A scoped install must not orphan files from earlier installs: carry
    // forward manifest entries for files still on disk.
    for (name, sha256) in &previous {
        if entries.iter().any(|e| &e.name == name) {
            continue;
        }
        if dir.join(name).exists() {
            entries.push(ManifestEntry {
                name: name.clone(),
                sha256: sha256.clone(),
            });
        }
    }

    if !opts.dry_run {
        std::fs::create_dir_all(&dir)?;
        write_manifest(&dir, &catalog.name, entries)?;
    }

    Ok(TargetReport {
        target: target_name(target),
        dir: dir.to_string_lossy().to_string(),
        status: "ok".to_string(),
        installed,
        skipped,
        removed: 0,
        kept: 0,
        actions,
    })
}

pub fn uninstall_rules(
    project: &Path,
    target: RuleTarget,
    opts: &InstallOptions,
) -> anyhow::Result<InstallReport> {
    let explicit = !matches!(target, RuleTarget::All);
    let mut targets = Vec::new();

    for t in expand_targets(target) {
        let dir = target_rules_dir(project, t);
        let Some(manifest) = load_manifest(&dir)? else {
            if explicit {
                return Err(
                    InstallError::ManifestMissing(dir.to_string_lossy().to_string()).into(),
                );
            }
            targets.push(TargetReport {
                target: target_name(t),
                dir: dir.to_string_lossy().to_string(),
                status: "no_manifest".to_string(),
                installed: 0,
                skipped: 0,
                removed: 0,
                kept: 0,
                actions: Vec::new(),
            });
            continue;
        };
        targets.push(uninstall_from(&dir, t, &manifest, opts)?);
    }

    Ok(InstallReport {
        project: project.to_string_lossy().to_string(),
        uninstall: true,
        dry_run: opts.dry_run,
        rule_count: 0,
        targets,
    })
}

fn uninstall_from(
    dir: &Path,
    target: RuleTarget,
    manifest: &InstallManifest,
    opts: &InstallOptions,
) -> anyhow::Result<TargetReport> {
    let mut actions = Vec::new();
    let mut removed = 0usize;
    let mut kept = 0usize;
    let mut kept_entries = Vec::new();

    for entry in &manifest.files {
        let path = dir.join(&entry.name);
        let action = if !path.exists() {
            "already_absent"
        } else {
            let current = sha256_hex(std::fs::read(&path)?.as_slice());
            if current == entry.sha256 || opts.force {
                "removed"
            } else {
                "kept_modified"
            }
        };

        match action {
            "removed" => {
                if !opts.dry_run {
                    std::fs::remove_file(&path)?;
                }
                removed += 1;
            }
            "kept_modified" => {
                kept += 1;
                kept_entries.push(entry.clone());
            }
            _ => {}
        }

        actions.push(FileAction {
            rule: entry.name.clone(),
            dest: path.to_string_lossy().to_string(),
            action: action.to_string(),
        });
    }

    if !opts.dry_run {
        if kept_entries.is_empty() {
            let manifest_path = dir.join(MANIFEST_FILE);
            if manifest_path.exists() {
                std::fs::remove_file(manifest_path)?;
            }
        } else {
            // Keep ownership of drifted files so a later --force uninstall
            // can still find them.
            write_manifest(dir, &manifest.catalog, kept_entries)?;
        }
    }

    Ok(TargetReport {
        target: target_name(target),
        dir: dir.to_string_lossy().to_string(),
        status: "ok".to_string(),
        installed: 0,
        skipped: 0,
        removed,
        kept,
        actions,
    })
}
