use serde::{Deserialize, Serialize};

use super::{validate_cpf, ValidationError};

/// A registered patient. Identified by `cpf`, the unique natural key —
/// never blank, never changed by an update.
///
/// `birth_date` and the server-set timestamps stay as strings: the service
/// returns mixed date-only and date-time forms and the client never
/// computes with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub cpf: String,
    pub name: String,
    pub birth_date: String,
    pub gender: String,
    pub zip_code: String,
    pub city: String,
    pub district: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Payload for registering a patient: the full record minus the
/// server-assigned timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub cpf: String,
    pub name: String,
    pub birth_date: String,
    pub gender: String,
    pub zip_code: String,
    pub city: String,
    pub district: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub is_active: bool,
}

impl NewPatient {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_cpf(&self.cpf)?;
        if self.name.chars().count() < 2 {
            return Err(ValidationError::NameRequired);
        }
        Ok(())
    }
}

/// Payload for editing a patient. Deliberately has no `cpf` field — the
/// key travels in the request path and is injected into the body by the
/// API layer, so an update can never rename a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientUpdate {
    pub name: String,
    pub birth_date: String,
    pub gender: String,
    pub zip_code: String,
    pub city: String,
    pub district: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
}

impl PatientUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.chars().count() < 2 {
            return Err(ValidationError::NameRequired);
        }
        Ok(())
    }
}

/// Aggregate counts for the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDashboard {
    pub total_patients: u64,
    pub active_patients: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_patient() -> NewPatient {
        NewPatient {
            cpf: "12345678901".into(),
            name: "Ana Souza".into(),
            birth_date: "1990-04-12".into(),
            gender: "F".into(),
            zip_code: "01310-100".into(),
            city: "São Paulo".into(),
            district: "Bela Vista".into(),
            address: "Av. Paulista, 1000".into(),
            complement: None,
            is_active: true,
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(new_patient().validate().is_ok());
    }

    #[test]
    fn short_name_is_rejected() {
        let mut p = new_patient();
        p.name = "A".into();
        assert_eq!(p.validate(), Err(ValidationError::NameRequired));
    }

    #[test]
    fn short_cpf_is_rejected() {
        let mut p = new_patient();
        p.cpf = "123".into();
        assert_eq!(p.validate(), Err(ValidationError::CpfRequired));
    }

    #[test]
    fn wire_fields_are_camel_case() {
        let json = serde_json::to_value(new_patient()).unwrap();
        assert_eq!(json["birthDate"], "1990-04-12");
        assert_eq!(json["zipCode"], "01310-100");
        assert_eq!(json["isActive"], true);
        assert!(json.get("birth_date").is_none());
    }

    #[test]
    fn absent_complement_is_omitted_from_wire() {
        let json = serde_json::to_value(new_patient()).unwrap();
        assert!(json.get("complement").is_none());
    }

    #[test]
    fn patient_parses_without_timestamps() {
        let patient: Patient = serde_json::from_str(
            r#"{"cpf":"12345678901","name":"Ana","birthDate":"1990-04-12",
                "gender":"F","zipCode":"01310-100","city":"São Paulo",
                "district":"Bela Vista","address":"Av. Paulista, 1000",
                "isActive":true}"#,
        )
        .unwrap();
        assert_eq!(patient.cpf, "12345678901");
        assert!(patient.created_at.is_none());
        assert!(patient.complement.is_none());
    }

    #[test]
    fn update_payload_carries_no_cpf() {
        let update = PatientUpdate {
            name: "Ana Souza".into(),
            birth_date: "1990-04-12".into(),
            gender: "F".into(),
            zip_code: "01310-100".into(),
            city: "São Paulo".into(),
            district: "Bela Vista".into(),
            address: "Av. Paulista, 1000".into(),
            complement: Some("Apto 42".into()),
        };
        let json = serde_json::to_value(update).unwrap();
        assert!(json.get("cpf").is_none());
        assert_eq!(json["complement"], "Apto 42");
    }

    #[test]
    fn dashboard_parses_wire_shape() {
        let dash: PatientDashboard =
            serde_json::from_str(r#"{"totalPatients":120,"activePatients":97}"#).unwrap();
        assert_eq!(dash.total_patients, 120);
        assert_eq!(dash.active_patients, 97);
    }
}
