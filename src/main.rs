//! `tracectl`: inspect and exercise a configured trace registry.
//!
//! ```text
//! tracectl --config tracer.toml show app.payments.Processor
//! tracectl --config tracer.toml emit app.payments.Processor warning "card declined"
//! tracectl --config tracer.toml watch app.payments.Processor
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;

use tracer::config::{apply_updates, load_config, ConfigApplier, ConfigWatcher, TracerConfig};
use tracer::observability::logging;
use tracer::{CompositeSource, EventType, SourceIdentity, TraceRegistry, TracingListener};

#[derive(Parser)]
#[command(name = "tracectl")]
#[command(about = "Inspect and emit through composed trace sources", long_about = None)]
struct Cli {
    /// Tracer configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the channels composing a source
    Show {
        /// Qualifying name, e.g. app.payments.Processor
        identity: String,
    },
    /// Emit one event through a source
    Emit {
        identity: String,
        /// critical, error, warning, information, verbose, start, stop, ...
        event_type: EventType,
        message: String,
        #[arg(long, default_value_t = 0)]
        id: i32,
    },
    /// Re-apply the configuration whenever the file changes
    Watch {
        identity: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging("tracectl=info,tracer=info");

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => TracerConfig::default(),
    };

    let registry = TraceRegistry::new(config.registry_settings());
    let applier = ConfigApplier::new();
    applier.apply(&registry, &config)?;

    match cli.command {
        Commands::Show { identity } => {
            let source = registry.get_source_for(&SourceIdentity::new(&identity))?;
            print_source(&source)?;
        }
        Commands::Emit { identity, event_type, message, id } => {
            let identity = SourceIdentity::new(&identity);
            if config.listeners.is_empty() {
                // Nothing configured: echo through the tracing subscriber from the root.
                let root = identity.cumulative_names().remove(0);
                registry.add_listener(&root, Arc::new(TracingListener::new("console")));
            }
            let source = registry.get_source_for(&identity)?;
            source.trace_event_message(event_type, id, &message);
            source.flush();
        }
        Commands::Watch { identity } => {
            let Some(path) = cli.config else {
                return Err("watch requires --config".into());
            };
            let source = registry.get_source_for(&SourceIdentity::new(&identity))?;
            print_source(&source)?;

            let mut reloads = ConfigWatcher::new(&path).spawn()?;
            tokio::select! {
                applied = apply_updates(&registry, &applier, &mut reloads, |summary| {
                    tracing::info!(
                        path = %path.display(),
                        levels = summary.levels_set,
                        bindings = summary.bindings_added,
                        "Tracer config reapplied"
                    );
                    if let Err(e) = print_source(&source) {
                        tracing::error!(error = %e, "Failed to render source");
                    }
                }) => {
                    tracing::info!(applied, "Config watch closed");
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, exiting");
                }
            }
            registry.flush_all();
        }
    }

    Ok(())
}

fn print_source(source: &CompositeSource) -> Result<(), serde_json::Error> {
    let channels: Vec<_> = source
        .channels()
        .iter()
        .map(|c| {
            json!({
                "name": c.name(),
                "level": c.level().to_string(),
                "listeners": c.listener_count(),
            })
        })
        .collect();
    let view = json!({
        "identity": source.identity().name(),
        "channels": channels,
    });
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
