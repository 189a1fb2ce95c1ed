use crate::workflow::event::IngestEvent;
use geotarget_core::interface::{BoundingBox, DetectedLabel, DetectionResponse, LabelInstance};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;

/// Configuration for generating synthetic ingest events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub events: usize,
    pub seed: u64,
    /// Fraction of events coming from aerial sensors.
    pub aerial_share: f64,
    pub max_targets: usize,
    pub origin_latitude: f64,
    pub origin_longitude: f64,
    pub horizontal_fov_deg: f64,
    pub scenario: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            events: 8,
            seed: 0,
            aerial_share: 0.5,
            max_targets: 4,
            origin_latitude: 38.8977,
            origin_longitude: -77.0365,
            horizontal_fov_deg: 75.5,
            scenario: None,
        }
    }
}

fn random_box(rng: &mut StdRng) -> BoundingBox {
    let width = rng.gen_range(0.02..0.2);
    let height = rng.gen_range(0.05..0.4);
    BoundingBox::new(
        rng.gen_range(0.0..1.0 - width),
        rng.gen_range(0.0..1.0 - height),
        width,
        height,
    )
}

fn build_event(config: &GeneratorConfig, rng: &mut StdRng, index: usize) -> IngestEvent {
    let aerial = rng.gen_bool(config.aerial_share.clamp(0.0, 1.0));
    let timestamp = 1_592_399_997_905_u64 + index as u64 * 1_000;

    let mut user_metadata = HashMap::new();
    let mut insert = |key: &str, value: String| {
        user_metadata.insert(key.to_string(), value);
    };
    insert(
        "latitude",
        (config.origin_latitude + rng.gen_range(-0.01..0.01)).to_string(),
    );
    insert(
        "longitude",
        (config.origin_longitude + rng.gen_range(-0.01..0.01)).to_string(),
    );
    insert("sensor_id", format!("{}", index % 4 + 1));
    insert("timestamp", timestamp.to_string());
    insert("yaw", rng.gen_range(-PI..PI).to_string());
    if aerial {
        insert("fov", config.horizontal_fov_deg.to_string());
        insert("sensor_type", "drone".to_string());
        insert("altitude", rng.gen_range(30.0..120.0_f64).to_string());
    } else {
        insert("fov", config.horizontal_fov_deg.to_radians().to_string());
        insert("sensor_type", "handheld".to_string());
    }

    let instances = (0..rng.gen_range(0..=config.max_targets))
        .map(|_| LabelInstance {
            bounding_box: random_box(rng),
            confidence: rng.gen_range(60.0..99.0),
        })
        .collect();

    let (prefix, extension) = if aerial {
        ("droneIngest", "jpg")
    } else {
        ("groundIngest", "png")
    };
    IngestEvent {
        object_key: format!("{prefix}/synthetic-{index}.{extension}"),
        user_metadata,
        received_at_ms: timestamp + 250,
        detections: DetectionResponse {
            labels: vec![DetectedLabel {
                name: "Person".to_string(),
                confidence: 95.0,
                instances,
            }],
        },
        detector_error: None,
    }
}

/// Builds a reproducible batch of events for offline runs.
pub fn build_events(config: &GeneratorConfig) -> Vec<IngestEvent> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    (0..config.events)
        .map(|index| build_event(config, &mut rng, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_builds_requested_event_count() {
        let events = build_events(&GeneratorConfig {
            events: 5,
            ..Default::default()
        });
        assert_eq!(events.len(), 5);
        for event in &events {
            let boxes = &event.detections.labels[0].instances;
            assert!(boxes.len() <= 4);
            for instance in boxes {
                let bbox = instance.bounding_box;
                assert!(bbox.left + bbox.width <= 1.0);
                assert!(bbox.top + bbox.height <= 1.0);
            }
        }
    }

    #[test]
    fn same_seed_reproduces_batch() {
        let config = GeneratorConfig {
            seed: 42,
            ..Default::default()
        };
        let first = build_events(&config);
        let second = build_events(&config);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.object_key, b.object_key);
            assert_eq!(a.user_metadata, b.user_metadata);
            assert_eq!(a.detections, b.detections);
        }
    }

    #[test]
    fn aerial_share_controls_sensor_mix() {
        let all_aerial = build_events(&GeneratorConfig {
            aerial_share: 1.0,
            ..Default::default()
        });
        assert!(all_aerial
            .iter()
            .all(|event| event.object_key.starts_with("droneIngest/")
                && event.user_metadata.contains_key("altitude")));
    }
}
