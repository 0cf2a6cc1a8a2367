use chrono::NaiveDateTime;

/// Wire format for date-time query parameters: naive local wall-clock,
/// zero-padded, no timezone suffix.
pub const QUERY_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Filter criteria for patient lists. All fields optional; the default
/// value is the unfiltered list. Doubles as the cache-key criteria, so
/// equality is by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PatientFilter {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub is_active: Option<bool>,
}

impl PatientFilter {
    pub fn by_cpf(cpf: impl Into<String>) -> Self {
        Self {
            cpf: Some(cpf.into()),
            ..Self::default()
        }
    }

    pub fn active_only() -> Self {
        Self {
            is_active: Some(true),
            ..Self::default()
        }
    }

    /// Query parameters, present fields only, in declaration order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(cpf) = &self.cpf {
            pairs.push(("cpf", cpf.clone()));
        }
        if let Some(is_active) = self.is_active {
            pairs.push(("isActive", is_active.to_string()));
        }
        pairs
    }

    /// Canonical criteria string: equal filters yield equal strings.
    pub fn criteria(&self) -> String {
        join_pairs(&self.query_pairs())
    }
}

/// Filter criteria for appointment lists. `start`/`end` bound `dateTime`
/// as naive local instants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AppointmentFilter {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub patient_cpf: Option<String>,
    pub is_active: Option<bool>,
}

impl AppointmentFilter {
    pub fn for_patient(cpf: impl Into<String>) -> Self {
        Self {
            patient_cpf: Some(cpf.into()),
            ..Self::default()
        }
    }

    /// Query parameters, present fields only, in declaration order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start {
            pairs.push(("start", start.format(QUERY_DATETIME_FORMAT).to_string()));
        }
        if let Some(end) = self.end {
            pairs.push(("end", end.format(QUERY_DATETIME_FORMAT).to_string()));
        }
        if let Some(cpf) = &self.patient_cpf {
            pairs.push(("patientCpf", cpf.clone()));
        }
        if let Some(is_active) = self.is_active {
            pairs.push(("isActive", is_active.to_string()));
        }
        pairs
    }

    /// Canonical criteria string: equal filters yield equal strings.
    pub fn criteria(&self) -> String {
        join_pairs(&self.query_pairs())
    }
}

fn join_pairs(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}
