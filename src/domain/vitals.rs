//! Patient vital signs

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One vital-signs reading for a patient.
///
/// Bounds on the measurements are enforced at the API edge by the vitals
/// validation schema; values reaching the domain are already range-checked.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalSigns {
    pub id: Uuid,
    /// Beats per minute
    pub heart_rate: i32,
    /// mmHg
    pub blood_pressure_systolic: Option<i32>,
    /// mmHg
    pub blood_pressure_diastolic: Option<i32>,
    /// SpO2 percentage
    pub oxygen_saturation: Option<f64>,
    /// Degrees Celsius
    pub temperature: Option<f64>,
    /// When the reading was taken (defaults to submission time)
    pub recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
