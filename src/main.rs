use clap::Parser;

mod catalog;
mod cli;
mod commands;
mod domain;
mod services;

pub use cli::*;
pub use domain::constants::*;
pub use domain::models::*;
pub use services::authoring::*;
pub use services::catalog_ops::*;
pub use services::copier::*;
pub use services::installer::*;
pub use services::output::*;
pub use services::storage::*;
pub use services::validator::*;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    if let Err(e) = run(cli) {
        print_error(json, &e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if commands::handle_admin_commands(&cli)? {
        return Ok(());
    }

    let catalog = catalog::load_catalog(&cli.catalog)?;
    let config = load_config()?;
    let mut state = load_state()?;
    commands::handle_runtime_commands(&cli, &catalog, &mut state, &config)
}
