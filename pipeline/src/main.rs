use anyhow::Context;
use bridge::server::Bridge;
use clap::Parser;
use generator::profile::{build_events, GeneratorConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::event::load_events;
use workflow::runner::Runner;
use workflow::sink::open_sink;

mod bridge;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Locates detected people from sensor imagery metadata")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// JSON array of ingest events to process offline
    #[arg(long)]
    events: Option<PathBuf>,
    /// Generate this many synthetic ingest events instead of reading a file
    #[arg(long)]
    synthetic: Option<usize>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = geotarget_core::prelude::DEFAULT_CONE_RADIUS_M)]
    cone_radius: f64,
    #[arg(long, default_value_t = 50.0)]
    min_confidence: f32,
    /// Append index documents to this JSON-lines file
    #[arg(long)]
    sink: Option<PathBuf>,
    /// Keep the HTTP bridge alive for incoming ingest events
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.cone_radius, args.min_confidence, args.sink)
    };

    let runner = Arc::new(Runner::new(workflow_config.clone()));
    let sink = open_sink(workflow_config.sink_path.as_deref())?;
    let bridge = Bridge::new(runner, sink);

    let events = match (args.events, args.synthetic) {
        (Some(path), _) => Some(load_events(path)?),
        (None, Some(count)) => Some(build_events(&GeneratorConfig {
            events: count,
            seed: args.seed,
            ..Default::default()
        })),
        (None, None) => None,
    };

    if let Some(events) = events {
        let report = bridge.ingest(&events).context("running offline batch")?;

        println!(
            "Offline run -> images {}, ignored {}, skipped {}, targets {}",
            report.processed,
            report.ignored,
            report.skipped.len(),
            report.targets.len()
        );
        for skipped in &report.skipped {
            println!("  skipped {}: {}", skipped.object_key, skipped.reason);
        }
        if workflow_config.sink_path.is_none() {
            println!("{}", serde_json::to_string_pretty(&report.targets)?);
        }
    }

    if args.serve {
        let address = SocketAddr::from(([127, 0, 0, 1], workflow_config.bind_port));
        bridge.serve(address);
        log::info!("HTTP bridge listening on {} (Ctrl+C to stop)", address);
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
