//! Prontua — client-side data access for a clinic management front end.
//!
//! The remote REST service owns every patient and appointment record; this
//! crate owns the typed operations against it and a transient,
//! invalidatable query cache. Presentation code consumes [`ClinicStore`]:
//! reads come back cached and deduplicated, writes invalidate the affected
//! resource so the next read refetches.

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod store;

pub use api::{ApiClient, ApiError};
pub use cache::{QueryCache, QueryKey, QueryStatus, Resource};
pub use models::{
    Appointment, AppointmentDashboard, AppointmentFilter, AppointmentPayload, NewPatient, Patient,
    PatientDashboard, PatientFilter, PatientUpdate, ValidationError,
};
pub use store::{ClinicStore, StoreError};
