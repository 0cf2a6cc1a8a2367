//! Composition root of the data layer.
//!
//! [`ClinicStore`] routes reads through the [`QueryCache`] and sequences
//! writes strictly: validate, call the service, and only after the
//! response resolves invalidate the affected resource — so no stale list
//! ever survives a write.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::cache::{QueryCache, QueryKey, Resource};
use crate::models::{
    Appointment, AppointmentDashboard, AppointmentFilter, AppointmentPayload, NewPatient, Patient,
    PatientDashboard, PatientFilter, PatientUpdate, ValidationError,
};

/// Errors from store-level operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A patient with this CPF already exists; creation refused before any
    /// create call reaches the service.
    #[error("CPF já cadastrado")]
    DuplicateCpf,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Client-side data access for the clinic front end: typed reads with
/// caching, writes with resource-wide invalidation.
pub struct ClinicStore {
    api: ApiClient,
    cache: QueryCache,
}

impl ClinicStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
        }
    }

    /// Store wired to the environment-configured service.
    pub fn from_env() -> Self {
        Self::new(ApiClient::from_env())
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // ── Cache keys ───────────────────────────────────────

    pub fn patients_key(filter: &PatientFilter) -> QueryKey {
        QueryKey::new(Resource::Patients, filter.criteria())
    }

    pub fn appointments_key(filter: &AppointmentFilter) -> QueryKey {
        QueryKey::new(Resource::Appointments, filter.criteria())
    }

    pub fn patient_dashboard_key() -> QueryKey {
        QueryKey::new(Resource::PatientDashboard, "")
    }

    pub fn appointment_dashboard_key() -> QueryKey {
        QueryKey::new(Resource::AppointmentDashboard, "")
    }

    /// Recent-active reads live under the appointments resource so that
    /// appointment writes invalidate them too.
    pub fn recent_appointments_key(hours: i64) -> QueryKey {
        QueryKey::new(Resource::Appointments, format!("recent={hours}h"))
    }

    // ── Cached reads ─────────────────────────────────────

    pub async fn patients(
        &self,
        filter: &PatientFilter,
    ) -> Result<Arc<Vec<Patient>>, Arc<ApiError>> {
        let api = self.api.clone();
        let filter = filter.clone();
        self.cache
            .fetch(&Self::patients_key(&filter), move || async move {
                api.list_patients(&filter).await
            })
            .await
    }

    pub async fn appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Arc<Vec<Appointment>>, Arc<ApiError>> {
        let api = self.api.clone();
        let filter = filter.clone();
        self.cache
            .fetch(&Self::appointments_key(&filter), move || async move {
                api.list_appointments(&filter).await
            })
            .await
    }

    pub async fn patient_dashboard(&self) -> Result<Arc<PatientDashboard>, Arc<ApiError>> {
        let api = self.api.clone();
        self.cache
            .fetch(&Self::patient_dashboard_key(), move || async move {
                api.patient_dashboard().await
            })
            .await
    }

    pub async fn appointment_dashboard(&self) -> Result<Arc<AppointmentDashboard>, Arc<ApiError>> {
        let api = self.api.clone();
        self.cache
            .fetch(&Self::appointment_dashboard_key(), move || async move {
                api.appointment_dashboard().await
            })
            .await
    }

    pub async fn recent_active_appointments(
        &self,
        hours: i64,
    ) -> Result<Arc<Vec<Appointment>>, Arc<ApiError>> {
        let api = self.api.clone();
        self.cache
            .fetch(&Self::recent_appointments_key(hours), move || async move {
                api.recent_active_appointments(hours).await
            })
            .await
    }

    // ── Writes ───────────────────────────────────────────

    /// Register a patient. Refuses duplicates by CPF before calling the
    /// service; new patients always start active.
    pub async fn create_patient(&self, patient: &NewPatient) -> Result<Patient, StoreError> {
        patient.validate()?;
        let existing = self
            .api
            .list_patients(&PatientFilter::by_cpf(patient.cpf.clone()))
            .await?;
        if !existing.is_empty() {
            return Err(StoreError::DuplicateCpf);
        }

        let mut payload = patient.clone();
        payload.is_active = true;
        let created = self.api.create_patient(&payload).await?;
        self.cache.invalidate(Resource::Patients);
        Ok(created)
    }

    pub async fn update_patient(
        &self,
        cpf: &str,
        update: &PatientUpdate,
    ) -> Result<Patient, StoreError> {
        update.validate()?;
        let updated = self.api.update_patient(cpf, update).await?;
        self.cache.invalidate(Resource::Patients);
        Ok(updated)
    }

    pub async fn deactivate_patient(&self, cpf: &str) -> Result<(), StoreError> {
        self.api.deactivate_patient(cpf).await?;
        self.cache.invalidate(Resource::Patients);
        Ok(())
    }

    /// Schedule an appointment; new appointments always start active.
    pub async fn create_appointment(
        &self,
        payload: &AppointmentPayload,
    ) -> Result<Appointment, StoreError> {
        payload.validate()?;
        let mut payload = payload.clone();
        payload.is_active = true;
        let created = self.api.create_appointment(&payload).await?;
        self.cache.invalidate(Resource::Appointments);
        Ok(created)
    }

    pub async fn update_appointment(
        &self,
        id: &str,
        payload: &AppointmentPayload,
    ) -> Result<Appointment, StoreError> {
        payload.validate()?;
        let updated = self.api.update_appointment(id, payload).await?;
        self.cache.invalidate(Resource::Appointments);
        Ok(updated)
    }

    pub async fn deactivate_appointment(&self, id: &str) -> Result<(), StoreError> {
        self.api.deactivate_appointment(id).await?;
        self.cache.invalidate(Resource::Appointments);
        Ok(())
    }
}
