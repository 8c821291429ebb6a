//! Meridian admin CLI
//!
//! Administration tooling for FHIR projects: documentation generation,
//! resource CRUD and search against a configured server, dashboard counts,
//! and capability inspection.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meridian_client::{user_message, ClientConfig, FhirClient, SearchQuery};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "meridian", version, about = "Administration tooling for Meridian FHIR projects")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate reference documentation from conformance artifacts
    Generate {
        /// Generator to run; only `fhir` is defined
        #[arg(value_parser = ["fhir"])]
        generator: String,

        /// Directory holding the FHIR JSON artifacts
        #[arg(long)]
        artifacts: PathBuf,

        /// Directory the documentation is written to
        #[arg(long)]
        out: PathBuf,
    },

    /// Work with individual resources on the configured server
    Resource {
        #[command(subcommand)]
        command: ResourceCommand,
    },

    /// Count instances of the given resource types in one batch
    Counts {
        #[arg(required = true)]
        types: Vec<String>,
    },

    /// Show the server's FHIR version and advertised resource types
    Capabilities,
}

#[derive(Subcommand)]
enum ResourceCommand {
    /// Read one resource instance and print it
    Get { resource_type: String, id: String },

    /// Create a resource from a JSON file and print the server's copy
    Create {
        resource_type: String,

        /// Path to the resource JSON
        #[arg(long)]
        file: PathBuf,
    },

    /// Delete a resource instance (asks for confirmation twice)
    Delete { resource_type: String, id: String },

    /// Type-level search
    Search {
        resource_type: String,

        /// Search parameter as name=value, repeatable
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Page size (_count)
        #[arg(long)]
        count: Option<u32>,

        /// Page offset (_offset)
        #[arg(long)]
        offset: Option<u32>,
    },
}

fn parse_param(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{raw}'")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { generator, artifacts, out } => {
            tracing::info!(%generator, "running documentation generator");
            let pages = meridian_docgen::generate_fhir_docs(&artifacts, &out)?;
            println!("Generated {pages} pages under {}", out.display());
        }
        Command::Resource { command } => run_resource(command).await?,
        Command::Counts { types } => {
            let client = client()?;
            let names: Vec<&str> = types.iter().map(String::as_str).collect();
            let counts = client.resource_counts(&names).await.map_err(report)?;
            for count in counts {
                match count.total {
                    Some(total) => println!("{}: {}", count.resource_type, total),
                    None => println!("{}: unavailable", count.resource_type),
                }
            }
        }
        Command::Capabilities => {
            let client = client()?;
            let caps = client.capabilities().await.map_err(report)?;
            println!(
                "FHIR version: {}",
                caps.fhir_version.as_deref().unwrap_or("unknown")
            );
            for resource_type in caps.resource_types() {
                println!("  {resource_type}");
            }
        }
    }

    Ok(())
}

async fn run_resource(command: ResourceCommand) -> Result<()> {
    let client = client()?;

    match command {
        ResourceCommand::Get { resource_type, id } => {
            let resource = client.read(&resource_type, &id).await.map_err(report)?;
            println!("{}", serde_json::to_string_pretty(&resource)?);
        }
        ResourceCommand::Create { resource_type, file } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let resource: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", file.display()))?;

            let created = client
                .create(&resource_type, &resource)
                .await
                .map_err(report)?;
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        ResourceCommand::Delete { resource_type, id } => {
            if !confirm_delete(&resource_type, &id)? {
                println!("Aborted.");
                return Ok(());
            }
            client.delete(&resource_type, &id).await.map_err(report)?;
            println!("Deleted {resource_type}/{id}");
        }
        ResourceCommand::Search { resource_type, params, count, offset } => {
            let mut query = SearchQuery::new();
            for (name, value) in params {
                query = query.param(name, value);
            }
            if let Some(count) = count {
                query = query.count(count);
            }
            if let Some(offset) = offset {
                query = query.offset(offset);
            }

            let bundle = client
                .search_type(&resource_type, query)
                .await
                .map_err(report)?;
            if let Some(total) = bundle.total {
                println!("Total: {total}");
            }
            for resource in bundle.resources() {
                let id = resource.get("id").and_then(|v| v.as_str()).unwrap_or("?");
                println!("{resource_type}/{id}");
            }
        }
    }

    Ok(())
}

/// Destructive operations require the same answer twice.
fn confirm_delete(resource_type: &str, id: &str) -> Result<bool> {
    let prompts = [
        format!("Delete {resource_type}/{id}? [y/N] "),
        "This cannot be undone. Confirm again? [y/N] ".to_string(),
    ];

    let stdin = io::stdin();
    for prompt in prompts {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        stdin.lock().read_line(&mut line)?;
        let answer = line.trim().to_ascii_lowercase();
        if answer != "y" && answer != "yes" {
            return Ok(false);
        }
    }
    Ok(true)
}

fn client() -> Result<FhirClient> {
    let config = ClientConfig::from_env()?;
    Ok(FhirClient::new(config)?)
}

/// Log the full error, surface the user-facing message.
fn report(error: meridian_client::Error) -> anyhow::Error {
    tracing::error!(%error, "FHIR request failed");
    anyhow::anyhow!("{}", user_message(&error))
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meridian=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
