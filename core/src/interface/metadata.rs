use crate::math::{GeoPoint, MathAngle};
use crate::prelude::{IngestError, IngestResult, LocatorConfig};
use crate::sensor::{SensorKind, SensorModel, SensorTelemetry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Still images from the reference cameras are 4:3.
const STILL_ASPECT_RATIO: f64 = 0.75;

const COMMON_FIELDS: [&str; 7] = [
    "fov",
    "latitude",
    "longitude",
    "sensor_id",
    "timestamp",
    "yaw",
    "sensor_type",
];

impl SensorKind {
    /// Classifies an object by its ingest prefix (`droneIngest/...`,
    /// `groundIngest/...`). Keys without a prefix are not sensor uploads.
    pub fn from_object_key(key: &str) -> IngestResult<Option<SensorKind>> {
        let Some((prefix, _)) = key.split_once('/') else {
            return Ok(None);
        };
        match prefix {
            "droneIngest" => Ok(Some(SensorKind::Aerial)),
            "groundIngest" => Ok(Some(SensorKind::Ground)),
            other => Err(IngestError::InvalidIndex(format!(
                "unsupported ingest prefix `{other}` in {key}"
            ))),
        }
    }
}

/// Validated per-image metadata attached by the capturing sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorMetadata {
    pub kind: SensorKind,
    pub sensor_id: String,
    pub sensor_type: String,
    pub timestamp: String,
    pub telemetry: SensorTelemetry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_m: Option<f64>,
}

impl SensorMetadata {
    /// Parses the string user-metadata stored with an uploaded image.
    pub fn from_user_metadata(
        kind: SensorKind,
        fields: &HashMap<String, String>,
    ) -> IngestResult<Self> {
        if let Some(missing) = COMMON_FIELDS.iter().find(|key| !fields.contains_key(**key)) {
            return Err(IngestError::InvalidTelemetry(format!(
                "missing field `{missing}`"
            )));
        }

        // Drone uploads carry their field of view in degrees, ground cameras in radians.
        let to_radians = |value: f64| match kind {
            SensorKind::Aerial => value.to_radians(),
            SensorKind::Ground => value,
        };
        let horizontal_fov = to_radians(positive(fields, "fov")?);
        let vertical_fov = match fields.get("vertical_fov") {
            Some(_) => to_radians(positive(fields, "vertical_fov")?),
            None => horizontal_fov * STILL_ASPECT_RATIO,
        };
        let altitude_m = match kind {
            SensorKind::Aerial => Some(positive(fields, "altitude")?),
            SensorKind::Ground => None,
        };

        Ok(Self {
            kind,
            sensor_id: text(fields, "sensor_id")?,
            sensor_type: text(fields, "sensor_type")?,
            timestamp: text(fields, "timestamp")?,
            telemetry: SensorTelemetry {
                position: GeoPoint::new(number(fields, "latitude")?, number(fields, "longitude")?),
                yaw: MathAngle::new(number(fields, "yaw")?),
                horizontal_fov,
                vertical_fov,
            },
            altitude_m,
        })
    }

    pub fn to_sensor_model(&self, config: &LocatorConfig) -> IngestResult<SensorModel> {
        match self.kind {
            SensorKind::Aerial => {
                let altitude = self.altitude_m.ok_or_else(|| {
                    IngestError::InvalidTelemetry("aerial metadata without altitude".into())
                })?;
                Ok(SensorModel::aerial(self.telemetry, altitude, config))
            }
            SensorKind::Ground => Ok(SensorModel::ground(self.telemetry, config)),
        }
    }
}

fn text(fields: &HashMap<String, String>, key: &str) -> IngestResult<String> {
    fields
        .get(key)
        .cloned()
        .ok_or_else(|| IngestError::InvalidTelemetry(format!("missing field `{key}`")))
}

fn number(fields: &HashMap<String, String>, key: &str) -> IngestResult<f64> {
    let raw = text(fields, key)?;
    let value: f64 = raw.trim().parse().map_err(|_| {
        IngestError::InvalidTelemetry(format!("field `{key}` is not numeric: {raw:?}"))
    })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(IngestError::InvalidTelemetry(format!(
            "field `{key}` is not finite"
        )))
    }
}

fn positive(fields: &HashMap<String, String>, key: &str) -> IngestResult<f64> {
    let value = number(fields, key)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(IngestError::InvalidTelemetry(format!(
            "field `{key}` must be positive, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::BoundingBox;
    use crate::sensor::TargetFix;

    fn drone_fields() -> HashMap<String, String> {
        [
            ("fov", "75.5"),
            ("latitude", "38.8977"),
            ("longitude", "-77.0365"),
            ("sensor_id", "3"),
            ("timestamp", "1592399997905"),
            ("yaw", "0.25"),
            ("sensor_type", "drone"),
            ("altitude", "100"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn object_key_prefix_selects_sensor() {
        assert_eq!(
            SensorKind::from_object_key("droneIngest/person_center.jpg").unwrap(),
            Some(SensorKind::Aerial)
        );
        assert_eq!(
            SensorKind::from_object_key("groundIngest/thermal-1592399997905.png").unwrap(),
            Some(SensorKind::Ground)
        );
        assert_eq!(SensorKind::from_object_key("loose.jpg").unwrap(), None);
        assert!(matches!(
            SensorKind::from_object_key("satIngest/a.jpg"),
            Err(IngestError::InvalidIndex(_))
        ));
    }

    #[test]
    fn parses_drone_metadata() {
        let metadata = SensorMetadata::from_user_metadata(SensorKind::Aerial, &drone_fields()).unwrap();
        assert_eq!(metadata.sensor_id, "3");
        assert_eq!(metadata.altitude_m, Some(100.0));
        assert_eq!(metadata.telemetry.position, GeoPoint::new(38.8977, -77.0365));
        assert!((metadata.telemetry.horizontal_fov - 75.5_f64.to_radians()).abs() < 1e-12);
        assert!((metadata.telemetry.vertical_fov - 56.625_f64.to_radians()).abs() < 1e-12);
        assert_eq!(
            metadata.to_sensor_model(&LocatorConfig::default()).unwrap().kind(),
            SensorKind::Aerial
        );
    }

    #[test]
    fn explicit_vertical_fov_wins() {
        let mut fields = drone_fields();
        fields.insert("vertical_fov".into(), "50".into());
        let metadata = SensorMetadata::from_user_metadata(SensorKind::Aerial, &fields).unwrap();
        assert!((metadata.telemetry.vertical_fov - 50.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn drone_fov_in_degrees_gives_a_realistic_footprint() {
        let metadata = SensorMetadata::from_user_metadata(SensorKind::Aerial, &drone_fields()).unwrap();
        let model = metadata.to_sensor_model(&LocatorConfig::default()).unwrap();
        let fix = model.locate(&BoundingBox::new(0.85, 0.4, 0.1, 0.2));
        let TargetFix::Aerial(target) = fix else {
            panic!("aerial model produced {fix:?}");
        };
        // 0.4 of a 131.8 m wide footprint at 100 m altitude.
        assert!((target.distance_m - 52.7).abs() < 0.1, "{}", target.distance_m);
    }

    #[test]
    fn ground_fov_stays_in_radians() {
        let mut fields = drone_fields();
        fields.remove("altitude");
        fields.insert("fov".into(), "1.3177".into());
        let metadata = SensorMetadata::from_user_metadata(SensorKind::Ground, &fields).unwrap();
        assert_eq!(metadata.telemetry.horizontal_fov, 1.3177);
    }

    #[test]
    fn ground_metadata_ignores_altitude() {
        let mut fields = drone_fields();
        fields.remove("altitude");
        let metadata = SensorMetadata::from_user_metadata(SensorKind::Ground, &fields).unwrap();
        assert_eq!(metadata.altitude_m, None);
    }

    #[test]
    fn missing_or_malformed_fields_are_rejected() {
        let mut fields = drone_fields();
        fields.remove("yaw");
        let err = SensorMetadata::from_user_metadata(SensorKind::Aerial, &fields).unwrap_err();
        assert!(err.to_string().contains("yaw"));

        let mut fields = drone_fields();
        fields.remove("altitude");
        assert!(SensorMetadata::from_user_metadata(SensorKind::Aerial, &fields).is_err());

        let mut fields = drone_fields();
        fields.insert("latitude".into(), "north".into());
        assert!(matches!(
            SensorMetadata::from_user_metadata(SensorKind::Aerial, &fields),
            Err(IngestError::InvalidTelemetry(_))
        ));

        let mut fields = drone_fields();
        fields.insert("fov".into(), "0".into());
        assert!(SensorMetadata::from_user_metadata(SensorKind::Aerial, &fields).is_err());
    }
}
