use crate::*;

/// Handles commands that do not need a loaded catalog or state.
/// Returns `Ok(false)` when the command belongs to the runtime layer.
pub fn handle_admin_commands(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Doctor => {
            let report = catalog_doctor(&cli.catalog);
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: report.overall == "ok",
                        data: &report
                    })?
                );
            } else {
                println!("catalog doctor: {}", report.overall);
                for c in &report.checks {
                    println!("{}\t{}", c.name, c.status);
                }
            }
            Ok(true)
        }
        Commands::Index => {
            let catalog = catalog::load_catalog(&cli.catalog)?;
            let (path, count) = write_index(&catalog)?;
            audit("index", serde_json::json!({"catalog": catalog.name, "rules": count}));
            print_one(
                cli.json,
                serde_json::json!({"path": path, "rules": count}),
                |_| format!("indexed {} rules", count),
            )?;
            Ok(true)
        }
        Commands::Author { command } => {
            handle_author_commands(cli, command)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn handle_author_commands(cli: &Cli, command: &AuthorCommands) -> anyhow::Result<()> {
    let AuthorCommands::Rule { command } = command;
    match command {
        RuleCommands::Create {
            category,
            name,
            description,
            globs,
            always_apply,
        } => {
            let path = rule_create(
                &cli.catalog,
                category,
                name,
                description,
                globs,
                *always_apply,
            )?;
            audit("rule_create", serde_json::json!({"rule": format!("{}/{}", category, name)}));
            print_one(cli.json, path.to_string_lossy().to_string(), |p| {
                format!("created {}", p)
            })?;
        }
        RuleCommands::Update {
            category,
            name,
            description,
            globs,
            always_apply,
        } => {
            let path = rule_update(
                &cli.catalog,
                category,
                name,
                description.clone(),
                globs.clone(),
                *always_apply,
            )?;
            audit("rule_update", serde_json::json!({"rule": format!("{}/{}", category, name)}));
            print_one(cli.json, path.to_string_lossy().to_string(), |p| {
                format!("updated {}", p)
            })?;
        }
        RuleCommands::Remove { category, name } => {
            let path = rule_remove(&cli.catalog, category, name)?;
            audit("rule_remove", serde_json::json!({"rule": format!("{}/{}", category, name)}));
            print_one(cli.json, path.to_string_lossy().to_string(), |p| {
                format!("removed {}", p)
            })?;
        }
    }
    Ok(())
}
