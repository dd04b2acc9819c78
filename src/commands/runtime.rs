use crate::*;
use std::path::Path;

pub fn handle_runtime_commands(
    cli: &Cli,
    catalog: &catalog::Catalog,
    state: &mut State,
    config: &ConfigFile,
) -> anyhow::Result<()> {
    match &cli.command {
        Commands::List { category } => {
            let items: Vec<RuleSummary> = catalog
                .rules
                .iter()
                .filter(|r| category.as_deref().map(|c| c == r.category).unwrap_or(true))
                .map(catalog::summarize)
                .collect();
            print_out(cli.json, &items, |r| {
                format!("{}\t{}\t{}", r.category, r.name, r.description)
            })?;
        }
        Commands::Search { query } => {
            let items: Vec<RuleSummary> = catalog::discover(catalog, query.as_deref())
                .into_iter()
                .map(catalog::summarize)
                .collect();
            print_out(cli.json, &items, |r| {
                format!("{}\t{}\t{}", r.category, r.name, r.description)
            })?;
        }
        Commands::Show { rule } => {
            let summary = catalog::summarize(catalog::get(catalog, rule)?);
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: &summary
                    })?
                );
            } else {
                println!("category: {}", summary.category);
                println!("name: {}", summary.name);
                println!("description: {}", summary.description);
                println!(
                    "alwaysApply: {}",
                    summary
                        .always_apply
                        .map(|a| a.to_string())
                        .unwrap_or_else(|| "n/a".to_string())
                );
                if !summary.globs.is_empty() {
                    println!("globs: {}", summary.globs.join(", "));
                }
                println!("path: {}", summary.path);
            }
        }
        Commands::Validate { strict, category } => {
            let report =
                validate_catalog(catalog, &config.validation, category.as_deref(), *strict);
            let passed = report.passed();
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: passed,
                        data: &report
                    })?
                );
            } else {
                if report.findings.is_empty() {
                    println!("catalog valid");
                }
                for f in &report.findings {
                    println!(
                        "{}\t{}\t{}\t{}",
                        f.severity.as_str(),
                        f.rule,
                        f.check,
                        f.message
                    );
                }
                println!(
                    "checked {} rules: {} errors, {} warnings",
                    report.checked, report.errors, report.warnings
                );
            }
            if !passed {
                std::process::exit(1);
            }
        }
        Commands::Copy {
            dest,
            flatten,
            dry_run,
            force,
            category,
        } => {
            let opts = CopyOptions {
                flatten: *flatten,
                dry_run: *dry_run,
                force: *force,
                category: category.clone(),
            };
            let report = copy_rules(catalog, Path::new(dest), &opts)?;
            if !report.dry_run {
                audit(
                    "copy",
                    serde_json::json!({"dest": dest, "copied": report.copied}),
                );
            }
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: &report
                    })?
                );
            } else {
                for a in &report.actions {
                    println!("{}\t{} -> {}", a.action, a.rule, a.dest);
                }
                println!(
                    "copied {} skipped {} unchanged {}{}",
                    report.copied,
                    report.skipped,
                    report.unchanged,
                    if report.dry_run { " (dry run)" } else { "" }
                );
            }
        }
        Commands::Install {
            project,
            target,
            dry_run,
            uninstall,
            force,
            category,
        } => {
            let resolved = target
                .or(config.install.default_target)
                .unwrap_or(RuleTarget::All);
            let opts = InstallOptions {
                dry_run: *dry_run,
                force: *force,
            };
            let report = if *uninstall {
                let report = uninstall_rules(Path::new(project), resolved, &opts)?;
                if !report.dry_run {
                    remove_install(state, project, resolved);
                    save_state(state)?;
                    audit("uninstall", serde_json::json!({"project": project}));
                }
                report
            } else {
                let report = install_rules(
                    catalog,
                    Path::new(project),
                    resolved,
                    category.as_deref(),
                    &opts,
                )?;
                if !report.dry_run {
                    upsert_install(
                        state,
                        InstallRecord {
                            project: project.clone(),
                            target: resolved,
                            catalog: catalog.name.clone(),
                            rule_count: report.rule_count,
                        },
                    );
                    save_state(state)?;
                    audit(
                        "install",
                        serde_json::json!({"project": project, "rules": report.rule_count}),
                    );
                }
                report
            };

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: &report
                    })?
                );
            } else {
                for t in &report.targets {
                    println!(
                        "{}\t{}\tinstalled={} removed={} skipped={} kept={}",
                        t.target, t.status, t.installed, t.removed, t.skipped, t.kept
                    );
                }
                let verb = if report.uninstall {
                    "uninstalled"
                } else {
                    "installed"
                };
                println!(
                    "{} rules for {}{}",
                    verb,
                    report.project,
                    if report.dry_run { " (dry run)" } else { "" }
                );
            }
        }
        Commands::Installs => {
            print_out(cli.json, &state.installs, |i| {
                format!(
                    "{}\t{:?}\t{}\t{}",
                    i.project, i.target, i.catalog, i.rule_count
                )
            })?;
        }
        Commands::Doctor | Commands::Index | Commands::Author { .. } => {
            unreachable!("handled before catalog loading")
        }
    }

    Ok(())
}
