use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use derive_more::{Deref, From};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{LensError, Result};

/// Pixel-space bounding box of one detection, as reported by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
    #[serde(rename = "box", default)]
    pub bbox: Option<DetectionBox>,
}

/// Label to occurrence count, kept in the order the service emitted the keys.
#[derive(Debug, Clone, Default, PartialEq, Deref, From)]
pub struct ObjectCounts(Vec<(String, u32)>);

impl ObjectCounts {
    pub fn get(&self, label: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, count)| *count)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for ObjectCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

struct ObjectCountsVisitor;

impl<'de> Visitor<'de> for ObjectCountsVisitor {
    type Value = ObjectCounts;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of object label to count")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, u32)> =
            Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((label, count)) = access.next_entry::<String, u32>()? {
            // Duplicate keys in JSON: the last value wins, position of the first is kept.
            match entries.iter_mut().find(|(name, _)| *name == label) {
                Some(entry) => entry.1 = count,
                None => entries.push((label, count)),
            }
        }
        Ok(ObjectCounts(entries))
    }
}

impl<'de> Deserialize<'de> for ObjectCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ObjectCountsVisitor)
    }
}

/// The object-detection payload returned by the service. Counts are taken as
/// given and never recomputed from `detections`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionResult {
    pub total_objects: u32,
    pub summary: String,
    pub object_counts: ObjectCounts,
    pub detections: Vec<Detection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub filename: String,
    pub created_at: DateTime<FixedOffset>,
    pub detection: DetectionResult,
}

impl AnalysisRecord {
    pub fn new(
        filename: impl Into<String>,
        created_at: DateTime<FixedOffset>,
        detection: DetectionResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            created_at,
            detection,
        }
    }

    /// Sortable form, e.g. `2026-10-16T12:00:00.000Z`.
    pub fn iso_timestamp(&self) -> String {
        self.created_at
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Human form, e.g. `10/16/2026, 2:05:09 PM`.
    pub fn display_timestamp(&self) -> String {
        display_timestamp(&self.created_at)
    }
}

pub fn display_timestamp(at: &DateTime<FixedOffset>) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

// Wire shapes of POST /analyze.

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    object_detection: Option<ObjectDetection>,
}

#[derive(Debug, Deserialize)]
struct ObjectDetection {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    result: DetectionResult,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

const FALLBACK_SERVICE_MESSAGE: &str = "Analysis failed";

/// Maps a raw `/analyze` response to the client's view of it.
///
/// `Ok(None)` means the transport succeeded but the detection step reported
/// failure: there is nothing to show, and it is not an error.
pub fn interpret_response(status: u16, body: &str) -> Result<Option<DetectionResult>> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.detail)
            .map(|detail| match detail {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            })
            .unwrap_or_else(|| FALLBACK_SERVICE_MESSAGE.to_string());
        return Err(LensError::Service { status, message });
    }

    let response: AnalyzeResponse =
        serde_json::from_str(body).map_err(|e| LensError::MalformedResponse(e.to_string()))?;

    match response.object_detection {
        Some(detection) if detection.success => Ok(Some(detection.result)),
        Some(detection) => {
            log::warn!(
                "Detection step reported failure: {}",
                detection.error.as_deref().unwrap_or("no reason given")
            );
            Ok(None)
        }
        None => {
            log::warn!("Response carried no object_detection section");
            Ok(None)
        }
    }
}
