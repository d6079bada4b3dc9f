//! Vital signs DTOs and validation schema

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::VitalSigns;
use crate::shared::validation::{ConstraintKind, FieldConstraint, Schema};

/// Request to record a vital-signs reading
///
/// Bodies are checked and coerced by the vitals schema before
/// deserialization, so numeric strings arrive here already typed.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "heart_rate": 72,
    "blood_pressure_systolic": 120,
    "blood_pressure_diastolic": 80,
    "oxygen_saturation": 98.5,
    "temperature": 36.6,
    "recorded_at": "2024-03-01T10:30:00Z"
}))]
pub struct RecordVitalsRequest {
    /// Beats per minute (30–250)
    pub heart_rate: i32,
    /// Systolic pressure, mmHg (70–250)
    pub blood_pressure_systolic: Option<i32>,
    /// Diastolic pressure, mmHg (40–150)
    pub blood_pressure_diastolic: Option<i32>,
    /// SpO2 percentage (0–100)
    pub oxygen_saturation: Option<f64>,
    /// Body temperature, °C (35–43)
    pub temperature: Option<f64>,
    /// When the reading was taken (ISO 8601). Defaults to now
    pub recorded_at: Option<String>,
}

/// Vital-signs reading response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VitalSignsDto {
    pub id: String,
    pub heart_rate: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure_systolic: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure_diastolic: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// ISO 8601
    pub recorded_at: String,
    /// ISO 8601
    pub created_at: String,
}

impl VitalSignsDto {
    pub fn from_domain(v: VitalSigns) -> Self {
        Self {
            id: v.id.to_string(),
            heart_rate: v.heart_rate,
            blood_pressure_systolic: v.blood_pressure_systolic,
            blood_pressure_diastolic: v.blood_pressure_diastolic,
            oxygen_saturation: v.oxygen_saturation,
            temperature: v.temperature,
            recorded_at: v.recorded_at.to_rfc3339(),
            created_at: v.created_at.to_rfc3339(),
        }
    }
}

impl RecordVitalsRequest {
    /// Build the domain entity; `recorded_at` has already passed the
    /// ISO-8601 constraint so the parse only guards against handlers
    /// mounted without the schema middleware.
    pub fn into_domain(self) -> Result<VitalSigns, String> {
        let recorded_at = match self.recorded_at {
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map_err(|e| format!("recorded_at: {e}"))?
                .with_timezone(&Utc),
            None => Utc::now(),
        };
        Ok(VitalSigns {
            id: Uuid::new_v4(),
            heart_rate: self.heart_rate,
            blood_pressure_systolic: self.blood_pressure_systolic,
            blood_pressure_diastolic: self.blood_pressure_diastolic,
            oxygen_saturation: self.oxygen_saturation,
            temperature: self.temperature,
            recorded_at,
            created_at: Utc::now(),
        })
    }
}

/// Validation schema for `POST /api/v1/vitals`. Compiled once at startup.
pub fn vitals_schema() -> Schema {
    Schema::compile(vec![
        FieldConstraint::required(
            "heart_rate",
            ConstraintKind::Integer {
                min: Some(30),
                max: Some(250),
            },
        ),
        FieldConstraint::optional(
            "blood_pressure_systolic",
            ConstraintKind::Integer {
                min: Some(70),
                max: Some(250),
            },
        ),
        FieldConstraint::optional(
            "blood_pressure_diastolic",
            ConstraintKind::Integer {
                min: Some(40),
                max: Some(150),
            },
        ),
        FieldConstraint::optional(
            "oxygen_saturation",
            ConstraintKind::Number {
                min: Some(0.0),
                max: Some(100.0),
            },
        ),
        FieldConstraint::optional(
            "temperature",
            ConstraintKind::Number {
                min: Some(35.0),
                max: Some(43.0),
            },
        ),
        FieldConstraint::optional("recorded_at", ConstraintKind::IsoDateTime),
    ])
}
