use anyhow::{Context, Result, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use fieldops_config::loader::local_config_path;
use fieldops_config::writer::write_pretty_json_atomic;
use fieldops_config::{FieldOpsConfig, LoadedFieldOpsConfig, load_merged, schema_json_pretty};
use fieldops_tool_core::{TextOptions, ToolContext, ToolOutcome};
use fieldops_tools::{FieldOpsTools, build_registry};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fieldops-tools")]
#[command(about = "FieldOps field-service tools: territory coverage, scheduling and records")]
#[command(version)]
struct Args {
    /// Directory holding the local fieldops.json
    #[arg(long, global = true, default_value = ".")]
    config_dir: PathBuf,
    /// Print the JSON result instead of the text rendering
    #[arg(long, global = true)]
    json: bool,
    /// Show at most this many items in text output
    #[arg(long, global = true)]
    max_items: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether an address is inside a service territory
    Coverage {
        #[arg(long)]
        address: String,
    },
    /// List territories near an address
    Adjacent {
        #[arg(long)]
        address: String,
        #[arg(long)]
        radius_miles: Option<f64>,
    },
    /// Find open appointment slots near an address
    Appointments {
        #[arg(long)]
        address: String,
        /// First day to search, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        duration_minutes: Option<u32>,
        #[arg(long)]
        days: Option<u32>,
    },
    /// Territory records
    #[command(subcommand)]
    Territories(RecordCommand),
    /// Job records
    #[command(subcommand)]
    Jobs(RecordCommand),
    /// Customer records
    #[command(subcommand)]
    Customers(RecordCommand),
    /// Invoice records
    #[command(subcommand)]
    Invoices(RecordCommand),
    /// Print the tool manifest (names, descriptions, input schemas)
    Manifest,
    /// Inspect or create configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum RecordCommand {
    /// List one page
    List(ListArgs),
    /// Get one record by id
    Get {
        #[arg(long)]
        id: String,
    },
}

#[derive(ClapArgs)]
struct ListArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    per_page: Option<u32>,
    #[arg(long)]
    search: Option<String>,
    /// Status filter (jobs and invoices)
    #[arg(long)]
    status: Option<String>,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the merged configuration and where it was loaded from
    Show,
    /// Print the configuration JSON schema
    Schema,
    /// Write a default fieldops.json into the config directory
    Init {
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(config: &FieldOpsConfig) {
    let level = config.logging.level.trim();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("fieldops_tools={level},territory_coverage={level}").into()
    });
    let registry = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    if config.logging.json {
        registry.with(fmt_layer.json()).init();
    } else {
        registry.with(fmt_layer).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = load_merged(&args.config_dir).context("failed to load configuration")?;
    init_tracing(&loaded.config);
    for warning in &loaded.warnings {
        tracing::warn!(code = warning.code, path = warning.path, "{}", warning.message);
    }

    match args.command {
        Commands::Manifest => {
            let registry = build_registry(Arc::new(FieldOpsTools::from_config(&loaded.config)));
            println!("{}", serde_json::to_string_pretty(&registry.manifest())?);
            Ok(())
        }
        Commands::Config(cmd) => run_config(cmd, &loaded, &args.config_dir),
        command => {
            let (tool, input) = tool_call(command)?;
            run_tool(&loaded.config, tool, input, args.json, args.max_items).await
        }
    }
}

/// Tool name and JSON arguments for a tool-backed subcommand.
fn tool_call(command: Commands) -> Result<(&'static str, Value)> {
    Ok(match command {
        Commands::Coverage { address } => ("check_territory_coverage", json!({ "address": address })),
        Commands::Adjacent {
            address,
            radius_miles,
        } => (
            "check_adjacent_territories",
            json!({ "address": address, "radius_miles": radius_miles }),
        ),
        Commands::Appointments {
            address,
            date,
            duration_minutes,
            days,
        } => (
            "get_available_appointments",
            json!({
                "address": address,
                "date": date,
                "duration_minutes": duration_minutes,
                "days": days,
            }),
        ),
        Commands::Territories(cmd) => record_call(cmd, "list_territories", "get_territory"),
        Commands::Jobs(cmd) => record_call(cmd, "list_jobs", "get_job"),
        Commands::Customers(cmd) => record_call(cmd, "list_customers", "get_customer"),
        Commands::Invoices(cmd) => record_call(cmd, "list_invoices", "get_invoice"),
        Commands::Manifest | Commands::Config(_) => bail!("not a tool command"),
    })
}

fn record_call(
    cmd: RecordCommand,
    list: &'static str,
    get: &'static str,
) -> (&'static str, Value) {
    match cmd {
        RecordCommand::List(a) => {
            let mut input = json!({ "page": a.page, "per_page": a.per_page, "search": a.search });
            // Territory and customer inputs have no status field.
            if a.status.is_some() {
                input["status"] = json!(a.status);
            }
            (list, input)
        }
        RecordCommand::Get { id } => (get, json!({ "id": id })),
    }
}

async fn run_tool(
    config: &FieldOpsConfig,
    tool: &str,
    input: Value,
    as_json: bool,
    max_items: Option<usize>,
) -> Result<()> {
    let registry = build_registry(Arc::new(FieldOpsTools::from_config(config)));
    let ctx = ToolContext::new()
        .credential(config.services.api.api_key.clone())
        .with_request_id(format!("cli-{}", std::process::id()));
    let opts = TextOptions::new().with_max_items(max_items);

    match registry.dispatch(tool, input, &ctx, &opts).await {
        ToolOutcome::Success { data, text } => {
            if as_json {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                println!("{text}");
            }
            Ok(())
        }
        ToolOutcome::Error { kind, message } => bail!("{kind}: {message}"),
    }
}

fn run_config(cmd: ConfigCommand, loaded: &LoadedFieldOpsConfig, dir: &std::path::Path) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let out = json!({
                "config": loaded.config,
                "paths": {
                    "global": loaded.paths.global,
                    "local": loaded.paths.local,
                },
                "warnings": loaded.warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        ConfigCommand::Schema => println!("{}", schema_json_pretty()?),
        ConfigCommand::Init { force } => {
            let path = local_config_path(dir);
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            let value = serde_json::to_value(FieldOpsConfig::default())?;
            write_pretty_json_atomic(&path, &value)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
