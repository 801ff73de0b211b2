//! postdesk: a terminal console over a remote collection of posts
//!
//! Lists, searches, filters, sorts and pages posts, and creates, edits and
//! deletes them according to the signed-in user's role.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use postdesk::{
    ConsoleError,
    cli::{self, ListQuery, OutputFormat, PostFields},
    config::{AppConfig, ConfigOverrides, ConfigPreset, Validatable},
    console::{Console, ErrorNotice},
    model::{Post, Role},
    source::{CollectionSource, MemorySource, demo_posts},
    table::{SortOrder, StructuredFilter},
};
use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit code for any failure
const EXIT_FAILURE: i32 = 3;
/// Exit code when the role gate refuses an action
const EXIT_ACCESS_DENIED: i32 = 4;

#[derive(Parser)]
#[command(name = "postdesk")]
#[command(version, about = "Browse and manage a remote collection of posts", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    3  Error occurred
    4  Access denied for the current role

EXAMPLES:
    # First page of posts, newest first
    postdesk list --sort id --desc

    # Posts of users 1 and 2 whose title mentions 'qui'
    postdesk list --filter userId=1 --filter userId=2 --match title=qui

    # Edit a post as an editor
    postdesk --role editor --user-id 2 update 7 --title \"New title\"")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Role of the signed-in user
    #[arg(long, global = true, env = "POSTDESK_ROLE")]
    role: Option<Role>,

    /// Id of the signed-in user (written as the owner of saved posts)
    #[arg(long, global = true, env = "POSTDESK_USER_ID")]
    user_id: Option<u64>,

    /// Base URL of the REST API
    #[arg(long, global = true, env = "POSTDESK_BASE_URL")]
    base_url: Option<String>,

    /// Use built-in demo posts instead of the network
    #[arg(long, global = true)]
    offline: bool,

    /// Start from a named preset instead of the config file
    /// (default, local, offline, strict)
    #[arg(long, global = true, value_parser = parse_preset)]
    preset: Option<ConfigPreset>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `list` subcommand
#[derive(Args)]
struct ListArgs {
    /// Search term for the search box
    #[arg(short, long)]
    search: Option<String>,

    /// Field the search looks at (defaults to the configured key)
    #[arg(long, conflicts_with = "all_fields")]
    search_key: Option<String>,

    /// Search every field instead of one key
    #[arg(long)]
    all_fields: bool,

    /// Exact filter `key=value`; repeat to OR several values
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = cli::parse_exact_filter)]
    filters: Vec<StructuredFilter>,

    /// Free-text filter `key=text`
    #[arg(long = "match", value_name = "KEY=TEXT", value_parser = cli::parse_text_filter)]
    matches: Vec<StructuredFilter>,

    /// Column to sort by
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Page to show (1-based)
    #[arg(short, long, default_value = "1")]
    page: usize,

    /// Rows per page (overrides config)
    #[arg(long)]
    page_size: Option<NonZeroUsize>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of posts
    List(ListArgs),

    /// Show one post
    Show {
        /// Post id
        id: u64,
    },

    /// Create a post (admin only)
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        body: String,
    },

    /// Update a post (admin or editor)
    Update {
        /// Post id
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },

    /// Delete a post (admin only)
    Delete {
        /// Post id
        id: u64,
    },

    /// Print the JSON schema of the config file
    ConfigSchema {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print an example config file
    ConfigExample,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match &cli.command {
        Commands::ConfigSchema { output } => {
            let schema = postdesk::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            return Ok(());
        }
        Commands::ConfigExample => {
            print!("{}", postdesk::config::generate_full_example_config());
            return Ok(());
        }
        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "postdesk", &mut io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let config = load_config(&cli)?;
    let source = build_source(&config)?;
    let options = config
        .table
        .to_options()
        .context("invalid table configuration")?;
    let mut console = Console::new(source, config.user.to_user(), options, config.table.truncate_at)
        .context("failed to set up the post table")?;

    match run_command(&mut console, cli.command) {
        Ok(output) => {
            print!("{output}");
            Ok(())
        }
        Err(err) => {
            let notice = console
                .notice()
                .cloned()
                .unwrap_or_else(|| ErrorNotice::from_error(&err));
            eprintln!("{notice}");
            tracing::debug!("{err}");
            let code = if err.is_access_denied() {
                EXIT_ACCESS_DENIED
            } else {
                EXIT_FAILURE
            };
            std::process::exit(code);
        }
    }
}

/// File config, then environment and flags on top.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let overrides = ConfigOverrides {
        base_url: cli.base_url.clone(),
        offline: cli.offline,
        page_size: match &cli.command {
            Commands::List(args) => args.page_size.map(NonZeroUsize::get),
            _ => None,
        },
        user_id: cli.user_id,
        role: cli.role,
    };

    let (mut config, loaded_from) = match cli.preset {
        Some(preset) => {
            let mut config = AppConfig::from_preset(preset);
            config.apply_overrides(&overrides);
            (config, None)
        }
        None => AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides),
    };
    if let Commands::List(args) = &cli.command {
        if args.all_fields {
            config.table.search_key = None;
        } else if let Some(key) = &args.search_key {
            config.table.search_key = Some(key.clone());
        }
    }
    match (&loaded_from, cli.preset) {
        (Some(path), _) => tracing::debug!("Loaded config from {}", path.display()),
        (None, Some(preset)) => tracing::debug!("Using preset '{preset}'"),
        (None, None) => tracing::debug!("No config file found; using defaults"),
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let lines: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", lines.join("\n  "));
    }
    Ok(config)
}

fn parse_preset(name: &str) -> std::result::Result<ConfigPreset, String> {
    ConfigPreset::from_name(name).ok_or_else(|| format!("unknown preset '{name}'"))
}

fn build_source(config: &AppConfig) -> Result<Box<dyn CollectionSource<Post>>> {
    if config.remote.offline {
        tracing::debug!("Using built-in demo posts");
        return Ok(Box::new(MemorySource::new(demo_posts())));
    }
    remote_source(config)
}

#[cfg(feature = "remote")]
fn remote_source(config: &AppConfig) -> Result<Box<dyn CollectionSource<Post>>> {
    let source = postdesk::source::HttpSource::<Post>::new(config.remote.to_source_config())
        .context("failed to create HTTP client")?;
    Ok(Box::new(source))
}

#[cfg(not(feature = "remote"))]
fn remote_source(_config: &AppConfig) -> Result<Box<dyn CollectionSource<Post>>> {
    anyhow::bail!("built without the `remote` feature; use --offline")
}

fn run_command<S: CollectionSource<Post>>(
    console: &mut Console<S>,
    command: Commands,
) -> std::result::Result<String, ConsoleError> {
    match command {
        Commands::List(args) => {
            let mut filters = args.filters;
            filters.extend(args.matches);
            let query = ListQuery {
                search: args.search,
                filters,
                sort: args.sort.map(|key| {
                    let order = if args.desc {
                        SortOrder::Descending
                    } else {
                        SortOrder::Ascending
                    };
                    (key, order)
                }),
                page: args.page,
                page_size: args.page_size,
                format: args.format,
            };
            cli::run_list(console, &query)
        }
        Commands::Show { id } => cli::run_show(console, id),
        Commands::Create { title, body } => cli::run_create(
            console,
            PostFields {
                title: Some(title),
                body: Some(body),
            },
        ),
        Commands::Update { id, title, body } => {
            cli::run_update(console, id, PostFields { title, body })
        }
        Commands::Delete { id } => cli::run_delete(console, id),
        Commands::ConfigSchema { .. } | Commands::ConfigExample | Commands::Completions { .. } => {
            Ok(String::new())
        }
    }
}
