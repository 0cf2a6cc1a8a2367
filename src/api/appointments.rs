//! Appointment operations.
//!
//! Same wrapper shape as the patient operations, plus the one place with
//! embedded business logic: "recent" appointments are those active and
//! started after now-minus-N-hours, with the lower bound computed from the
//! client clock at call time.

use chrono::{Duration, Local, NaiveDateTime};
use serde::Serialize;

use super::client::ApiClient;
use super::error::ApiError;
use crate::models::filters::QUERY_DATETIME_FORMAT;
use crate::models::{Appointment, AppointmentDashboard, AppointmentFilter, AppointmentPayload};

/// PUT body: the service expects `id` present in both path and body.
#[derive(Serialize)]
struct AppointmentUpdateBody<'a> {
    id: &'a str,
    #[serde(flatten)]
    payload: &'a AppointmentPayload,
}

/// Lower bound of the recent-appointments window, as the naive local
/// wall-clock string the service expects.
pub(crate) fn recent_window_start(now: NaiveDateTime, hours: i64) -> String {
    (now - Duration::hours(hours))
        .format(QUERY_DATETIME_FORMAT)
        .to_string()
}

impl ApiClient {
    /// List appointments, optionally filtered. Order as returned by the
    /// service.
    pub async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, ApiError> {
        self.get("/appointments", &filter.query_pairs()).await
    }

    pub async fn create_appointment(
        &self,
        payload: &AppointmentPayload,
    ) -> Result<Appointment, ApiError> {
        self.post("/appointments", payload).await
    }

    pub async fn update_appointment(
        &self,
        id: &str,
        payload: &AppointmentPayload,
    ) -> Result<Appointment, ApiError> {
        self.put(
            &format!("/appointments/{id}"),
            &AppointmentUpdateBody { id, payload },
        )
        .await
    }

    /// Soft-deactivate: sets `isActive = false` server-side, answers 204.
    pub async fn deactivate_appointment(&self, id: &str) -> Result<(), ApiError> {
        self.patch(&format!("/appointments/{id}/deactivate")).await
    }

    pub async fn appointment_dashboard(&self) -> Result<AppointmentDashboard, ApiError> {
        self.get("/appointments/dashboard", &[]).await
    }

    /// Active appointments that started within the last `hours` hours.
    /// The window is anchored to the client clock, not the server's.
    pub async fn recent_active_appointments(
        &self,
        hours: i64,
    ) -> Result<Vec<Appointment>, ApiError> {
        let start = recent_window_start(Local::now().naive_local(), hours);
        let query = [("start", start), ("isActive", "true".to_string())];
        self.get("/appointments", &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use serde_json::json;

    fn sample_appointment_json() -> serde_json::Value {
        json!({
            "id": "a-17",
            "patientCpf": "12345678901",
            "dateTime": "2026-08-25T14:30:00",
            "description": "Consulta de rotina",
            "isActive": true
        })
    }

    fn sample_payload() -> AppointmentPayload {
        AppointmentPayload {
            patient_cpf: "12345678901".into(),
            date_time: NaiveDate::from_ymd_opt(2026, 8, 25)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            description: "Consulta de rotina".into(),
            is_active: true,
        }
    }

    #[test]
    fn window_start_is_now_minus_hours_zero_padded() {
        let now = NaiveDate::from_ymd_opt(2026, 8, 25)
            .unwrap()
            .and_hms_opt(10, 5, 3)
            .unwrap();
        assert_eq!(recent_window_start(now, 2), "2026-08-25T08:05:03");
    }

    #[test]
    fn window_start_crosses_midnight() {
        let now = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap();
        assert_eq!(recent_window_start(now, 2), "2025-12-31T23:00:00");
    }

    #[tokio::test]
    async fn list_sends_datetime_bounds_in_wire_format() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/appointments")
                .query_param("start", "2026-08-25T08:00:00")
                .query_param("patientCpf", "12345678901");
            then.status(200).json_body(json!([sample_appointment_json()]));
        });

        let client = ApiClient::new(&server.base_url());
        let filter = AppointmentFilter {
            start: NaiveDate::from_ymd_opt(2026, 8, 25)
                .unwrap()
                .and_hms_opt(8, 0, 0),
            patient_cpf: Some("12345678901".into()),
            ..AppointmentFilter::default()
        };
        let appointments = client.list_appointments(&filter).await.unwrap();

        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].id, "a-17");
        mock.assert();
    }

    #[tokio::test]
    async fn update_body_includes_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/appointments/a-17")
                .json_body_partial(r#"{ "id": "a-17", "patientCpf": "12345678901" }"#);
            then.status(200).json_body(sample_appointment_json());
        });

        let client = ApiClient::new(&server.base_url());
        client
            .update_appointment("a-17", &sample_payload())
            .await
            .unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn recent_requests_active_with_a_start_bound() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/appointments")
                .query_param("isActive", "true")
                .query_param_exists("start");
            then.status(200).json_body(json!([]));
        });

        let client = ApiClient::new(&server.base_url());
        let recent = client.recent_active_appointments(2).await.unwrap();
        assert!(recent.is_empty());
        mock.assert();
    }

    #[tokio::test]
    async fn create_posts_payload_and_parses_created() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/appointments")
                .json_body_partial(r#"{ "patientCpf": "12345678901", "isActive": true }"#);
            then.status(201).json_body(sample_appointment_json());
        });

        let client = ApiClient::new(&server.base_url());
        let created = client.create_appointment(&sample_payload()).await.unwrap();
        assert_eq!(created.id, "a-17");
        mock.assert();
    }

    #[tokio::test]
    async fn dashboard_parses_counts() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/appointments/dashboard");
            then.status(200)
                .json_body(json!({"totalAppointments": 40, "todayAppointments": 6}));
        });

        let client = ApiClient::new(&server.base_url());
        let dash = client.appointment_dashboard().await.unwrap();
        assert_eq!(dash.total_appointments, 40);
        assert_eq!(dash.today_appointments, 6);
    }
}
