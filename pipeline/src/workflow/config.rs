use anyhow::Context;
use geotarget_core::math::EARTH_RADIUS_KM;
use geotarget_core::prelude::DEFAULT_CONE_RADIUS_M;
use geotarget_core::LocatorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub cone_radius_m: f64,
    pub earth_radius_km: f64,
    /// Detector label names treated as people.
    pub target_labels: Vec<String>,
    pub min_confidence: f32,
    /// JSON-lines file receiving index documents; kept in memory when unset.
    pub sink_path: Option<PathBuf>,
    pub bind_port: u16,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            cone_radius_m: DEFAULT_CONE_RADIUS_M,
            earth_radius_km: EARTH_RADIUS_KM,
            target_labels: vec!["Human".to_string(), "Person".to_string()],
            min_confidence: 50.0,
            sink_path: None,
            bind_port: 9000,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(cone_radius_m: f64, min_confidence: f32, sink_path: Option<PathBuf>) -> Self {
        Self {
            cone_radius_m,
            min_confidence,
            sink_path,
            ..Default::default()
        }
    }

    pub fn to_locator_config(&self) -> LocatorConfig {
        LocatorConfig {
            cone_radius_m: self.cone_radius_m,
            earth_radius_km: self.earth_radius_km,
        }
    }
}
