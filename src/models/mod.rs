//! Domain records exchanged with the clinic service.
//!
//! Pure data contracts: the remote service owns the authoritative copy of
//! every entity, these types only describe the wire shape (camelCase JSON)
//! plus the required-field checks run before a payload leaves the client.

pub mod appointment;
pub mod filters;
pub mod patient;

pub use appointment::{Appointment, AppointmentDashboard, AppointmentPayload};
pub use filters::{AppointmentFilter, PatientFilter};
pub use patient::{NewPatient, Patient, PatientDashboard, PatientUpdate};

/// Required-field validation failures, message text as shown to staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("CPF obrigatório")]
    CpfRequired,
    #[error("CPF inválido")]
    CpfTooLong,
    #[error("Nome obrigatório")]
    NameRequired,
    #[error("Descrição obrigatória")]
    DescriptionRequired,
}

/// CPF must be 11 digits, up to 14 chars with punctuation (000.000.000-00).
pub(crate) fn validate_cpf(cpf: &str) -> Result<(), ValidationError> {
    let len = cpf.chars().count();
    if len < 11 {
        return Err(ValidationError::CpfRequired);
    }
    if len > 14 {
        return Err(ValidationError::CpfTooLong);
    }
    Ok(())
}
