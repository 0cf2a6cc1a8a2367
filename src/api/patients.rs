//! Patient operations.
//!
//! Thin typed wrappers over [`ApiClient`]: list-with-filters, create,
//! update, soft-deactivate and the dashboard aggregate. Soft-deactivation
//! is the only removal mechanism — there is no hard delete.

use serde::Serialize;

use super::client::ApiClient;
use super::error::ApiError;
use crate::models::{NewPatient, Patient, PatientDashboard, PatientFilter, PatientUpdate};

/// PUT body: the path `cpf` is authoritative and must be echoed.
#[derive(Serialize)]
struct PatientUpdateBody<'a> {
    cpf: &'a str,
    #[serde(flatten)]
    update: &'a PatientUpdate,
}

impl ApiClient {
    /// List patients, optionally filtered. Order as returned by the
    /// service — not re-sorted client-side.
    pub async fn list_patients(&self, filter: &PatientFilter) -> Result<Vec<Patient>, ApiError> {
        self.get("/patients", &filter.query_pairs()).await
    }

    pub async fn create_patient(&self, patient: &NewPatient) -> Result<Patient, ApiError> {
        self.post("/patients", patient).await
    }

    /// Update every field except `cpf`; the key travels in the path and is
    /// injected into the body here.
    pub async fn update_patient(
        &self,
        cpf: &str,
        update: &PatientUpdate,
    ) -> Result<Patient, ApiError> {
        self.put(&format!("/patients/{cpf}"), &PatientUpdateBody { cpf, update })
            .await
    }

    /// Soft-deactivate: sets `isActive = false` server-side, answers 204.
    pub async fn deactivate_patient(&self, cpf: &str) -> Result<(), ApiError> {
        self.patch(&format!("/patients/{cpf}/deactivate")).await
    }

    pub async fn patient_dashboard(&self) -> Result<PatientDashboard, ApiError> {
        self.get("/patients/dashboard", &[]).await
    }
}
