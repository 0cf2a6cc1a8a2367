use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{validate_cpf, Patient, ValidationError};

/// A scheduled appointment. Identified by the server-assigned opaque `id`.
///
/// `date_time` is a naive local wall-clock instant — the service applies no
/// timezone conversion and neither do we.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_cpf: String,
    /// Denormalized snapshot for display, present on some list responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<Patient>,
    pub date_time: NaiveDateTime,
    pub description: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Payload for creating or editing an appointment. On update the API layer
/// injects the path `id` into the body (the service expects it in both).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload {
    pub patient_cpf: String,
    pub date_time: NaiveDateTime,
    pub description: String,
    pub is_active: bool,
}

impl AppointmentPayload {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_cpf(&self.patient_cpf)?;
        if self.description.chars().count() < 5 {
            return Err(ValidationError::DescriptionRequired);
        }
        Ok(())
    }
}

/// Aggregate counts for the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDashboard {
    pub total_appointments: u64,
    pub today_appointments: u64,
}
