use crate::workflow::config::WorkflowConfig;
use crate::workflow::event::IngestEvent;
use crate::workflow::sink::{TargetSink, SENSOR_INDEX, TARGET_INDEX};
use anyhow::anyhow;
use geotarget_core::interface::{Provenance, SensorMetadata, SensorRecord, TargetRecord};
use geotarget_core::prelude::{SensorKind, TargetLocator};
use geotarget_core::telemetry::{LogManager, MetricsRecorder};
use geotarget_core::{Disposition, IngestError, IngestResult, LocatorConfig};
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the unix epoch, used for provenance stamps.
pub type Clock = fn() -> u64;

pub fn system_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedImage {
    pub object_key: String,
    pub reason: String,
}

#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub ignored: usize,
    pub skipped: Vec<SkippedImage>,
    pub targets: Vec<TargetRecord>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    locator_config: LocatorConfig,
    metrics: Arc<MetricsRecorder>,
    clock: Clock,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self::with_clock(config, system_clock)
    }

    pub fn with_clock(config: WorkflowConfig, clock: Clock) -> Self {
        let locator_config = config.to_locator_config();
        Self {
            config,
            locator_config,
            metrics: Arc::new(MetricsRecorder::new()),
            clock,
        }
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    /// Runs a batch in order. Images that fail with a skip-class error are
    /// reported and passed over; an abort-class error ends the batch.
    pub fn execute(
        &self,
        events: &[IngestEvent],
        sink: &mut dyn TargetSink,
    ) -> anyhow::Result<BatchReport> {
        let logger = LogManager::new("runner");
        let mut report = BatchReport::default();

        for event in events {
            match self.process_event(event, sink) {
                Ok(Some(records)) => {
                    logger.record(&format!(
                        "{} -> {} targets",
                        event.object_key,
                        records.len()
                    ));
                    self.metrics.record_processed(records.len());
                    report.processed += 1;
                    report.targets.extend(records);
                }
                Ok(None) => {
                    logger.trace(format_args!("ignoring {}", event.object_key));
                    report.ignored += 1;
                }
                Err(err) => match err.disposition() {
                    Disposition::SkipImage => {
                        logger.warn(&format!("skipping {}: {}", event.object_key, err));
                        self.metrics.record_skipped();
                        report.skipped.push(SkippedImage {
                            object_key: event.object_key.clone(),
                            reason: err.to_string(),
                        });
                    }
                    Disposition::AbortBatch => {
                        self.metrics.record_sink_error();
                        return Err(anyhow!(err)
                            .context(format!("aborting batch at {}", event.object_key)));
                    }
                },
            }
        }

        Ok(report)
    }

    /// Runs one image through metadata, detection filtering and location.
    /// `Ok(None)` means the object is not a sensor upload.
    pub fn process_event(
        &self,
        event: &IngestEvent,
        sink: &mut dyn TargetSink,
    ) -> IngestResult<Option<Vec<TargetRecord>>> {
        let Some(kind) = SensorKind::from_object_key(&event.object_key)? else {
            return Ok(None);
        };
        let metadata = SensorMetadata::from_user_metadata(kind, &event.user_metadata)?;
        let provenance = Provenance::new()
            .append("Captured", &metadata.timestamp)
            .append("Received at S3", event.received_at_ms);

        let sensor_record = SensorRecord::from_metadata(
            &metadata,
            &provenance.append("Sent to Elasticsearch", (self.clock)()),
        );
        post(sink, SENSOR_INDEX, &sensor_record)?;

        let provenance = provenance.append("Sent to Rekognition", (self.clock)());
        if let Some(reason) = &event.detector_error {
            return Err(IngestError::Detector(reason.clone()));
        }
        let provenance = provenance.append("Received from Rekognition", (self.clock)());
        let boxes = event
            .detections
            .target_boxes(&self.config.target_labels, self.config.min_confidence);

        let locator = TargetLocator::from_metadata(&metadata, &self.locator_config)?;
        let mut records = Vec::with_capacity(boxes.len());
        for fix in locator.locate_all(&boxes) {
            let stamped = provenance.append("Sent to Elasticsearch", (self.clock)());
            let record = TargetRecord::from_fix(&metadata, &fix, &stamped);
            post(sink, TARGET_INDEX, &record)?;
            records.push(record);
        }
        Ok(Some(records))
    }
}

fn post<T: Serialize>(sink: &mut dyn TargetSink, index: &str, record: &T) -> IngestResult<()> {
    let document =
        serde_json::to_value(record).map_err(|err| IngestError::Sink(err.to_string()))?;
    sink.post(index, &document)
}
