use crate::bridge::model::BridgeModel;
use crate::generator::profile::{build_events, GeneratorConfig};
use crate::workflow::event::IngestEvent;
use crate::workflow::runner::{BatchReport, Runner};
use crate::workflow::sink::SharedSink;
use anyhow::{anyhow, Result};
use log::{error, info};
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

#[derive(Debug)]
struct BatchRejected;

impl warp::reject::Reject for BatchRejected {}

/// HTTP front end that accepts ingest events and serves the latest targets.
#[derive(Clone)]
pub struct Bridge {
    runner: Arc<Runner>,
    sink: SharedSink,
    state: Arc<RwLock<BridgeModel>>,
}

impl Bridge {
    pub fn new(runner: Arc<Runner>, sink: SharedSink) -> Self {
        Self {
            runner,
            sink,
            state: Arc::new(RwLock::new(BridgeModel::default())),
        }
    }

    /// Runs a batch into the configured sink and replaces the served
    /// targets with its result.
    pub fn ingest(&self, events: &[IngestEvent]) -> Result<BatchReport> {
        let report = {
            let mut sink = self
                .sink
                .lock()
                .map_err(|_| anyhow!("target sink lock poisoned"))?;
            self.runner.execute(events, &mut **sink)?
        };
        self.publish(&report);
        Ok(report)
    }

    pub fn publish(&self, report: &BatchReport) {
        if let Ok(mut guard) = self.state.write() {
            *guard = BridgeModel {
                targets: report.targets.clone(),
                skipped: report.skipped.len(),
                metrics: self.runner.metrics().snapshot(),
                status: format!(
                    "{} images, {} targets",
                    report.processed,
                    report.targets.len()
                ),
            };
        }
        info!(
            "[bridge] targets: {}, skipped: {}",
            report.targets.len(),
            report.skipped.len()
        );
    }

    pub fn snapshot(&self) -> BridgeModel {
        self.state
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Serves the bridge on a background thread with its own runtime.
    pub fn serve(&self, address: SocketAddr) {
        let bridge_filter = {
            let bridge = self.clone();
            warp::any().map(move || bridge.clone())
        };

        let targets_route = warp::path("targets")
            .and(warp::get())
            .and(bridge_filter.clone())
            .map(|bridge: Bridge| warp::reply::json(&bridge.snapshot().targets));

        let metrics_route = warp::path("metrics")
            .and(warp::get())
            .and(bridge_filter.clone())
            .map(|bridge: Bridge| warp::reply::json(&bridge.runner.metrics().snapshot()));

        let ingest_route = warp::path("ingest")
            .and(warp::post())
            .and(warp::body::json())
            .and(bridge_filter.clone())
            .and_then(|event: IngestEvent, bridge: Bridge| async move {
                match bridge.ingest(std::slice::from_ref(&event)) {
                    Ok(report) => Ok::<_, warp::Rejection>(warp::reply::with_status(
                        warp::reply::json(&json!({
                            "status": "ok",
                            "targets": report.targets.len(),
                            "skipped": report.skipped,
                        })),
                        StatusCode::OK,
                    )),
                    Err(err) => {
                        error!("ingest error: {:#}", err);
                        Err(warp::reject::custom(BatchRejected))
                    }
                }
            });

        let generate_route = warp::path("generate")
            .and(warp::post())
            .and(warp::body::json())
            .and(bridge_filter)
            .and_then(|config: GeneratorConfig, bridge: Bridge| async move {
                match bridge.ingest(&build_events(&config)) {
                    Ok(report) => {
                        if let Some(name) = config.scenario.as_ref() {
                            info!("[bridge] scenario {} -> targets {}", name, report.targets.len());
                        }
                        Ok::<_, warp::Rejection>(warp::reply::with_status(
                            warp::reply::json(&json!({
                                "status": "ok",
                                "images": report.processed,
                                "targets": report.targets.len(),
                            })),
                            StatusCode::OK,
                        ))
                    }
                    Err(err) => {
                        error!("generate error: {:#}", err);
                        Err(warp::reject::custom(BatchRejected))
                    }
                }
            });

        thread::spawn(move || {
            let routes = targets_route
                .or(metrics_route)
                .or(ingest_route)
                .or(generate_route);
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        });
    }
}
