use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATALOG_DIR: &str = ".";

#[derive(Parser, Debug)]
#[command(name = "rulekit", version, about = "Markdown rule catalog toolkit")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_CATALOG_DIR,
        help = "Catalog root (a directory containing rules/, or a rules directory itself)"
    )]
    pub catalog: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    List {
        #[arg(long)]
        category: Option<String>,
    },
    Search {
        query: Option<String>,
    },
    Show {
        rule: String,
    },
    Validate {
        #[arg(long, default_value_t = false, help = "Treat warnings as failures")]
        strict: bool,
        #[arg(long)]
        category: Option<String>,
    },
    Copy {
        dest: String,
        #[arg(
            long,
            default_value_t = false,
            help = "Drop category directories at the destination"
        )]
        flatten: bool,
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        #[arg(long, default_value_t = false, help = "Overwrite destination files that differ")]
        force: bool,
        #[arg(long)]
        category: Option<String>,
    },
    Install {
        project: String,
        #[arg(long, value_enum, help = "Editor to install for (defaults to config, then all)")]
        target: Option<RuleTarget>,
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        #[arg(
            long,
            default_value_t = false,
            help = "Remove previously installed rules instead of installing"
        )]
        uninstall: bool,
        #[arg(long, default_value_t = false, help = "Also overwrite or remove drifted files")]
        force: bool,
        #[arg(long)]
        category: Option<String>,
    },
    Installs,
    Doctor,
    Index,
    Author {
        #[command(subcommand)]
        command: AuthorCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthorCommands {
    Rule {
        #[command(subcommand)]
        command: RuleCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum RuleCommands {
    Create {
        category: String,
        name: String,
        #[arg(long, default_value = "New rule")]
        description: String,
        #[arg(long)]
        globs: Vec<String>,
        #[arg(long, default_value_t = false)]
        always_apply: bool,
    },
    Update {
        category: String,
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        globs: Vec<String>,
        #[arg(long)]
        always_apply: Option<bool>,
    },
    Remove {
        category: String,
        name: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RuleTarget {
    All,
    Cursor,
    Claude,
    Windsurf,
}
