//! Asynchronous external-API client implementation.

use crate::models::{
    BookingConfirmation, CheckinRequest, ConfirmBookingRequest, ConfirmationReply, Exam,
    ExamResult, ExternalResponse, HealthPlan, PatientIdentification, PhoneListAppointment, Price,
    Professional, Reservation, ReserveSlotRequest, ScheduleBlock, Slot, SlotQuery, Specialty,
    Voucher,
};
use crate::Result;
use bytes::Bytes;
use chrono::NaiveDate;
use klingo_core::Error;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, ClientBuilder, Method};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("klingo-external/", env!("CARGO_PKG_VERSION"));

/// Default external API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api-externa.klingo.app";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builder for [`ExternalClient`].
#[derive(Debug)]
pub struct ExternalClientBuilder {
    base_url: String,
    app_token: SecretString,
    timeout: Duration,
}

impl ExternalClientBuilder {
    /// Create a builder with the application token issued by the platform.
    #[must_use]
    pub fn new(app_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_token: SecretString::from(app_token.into()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ExternalClient> {
        let mut raw = self.base_url;
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)
            .map_err(|err| Error::ConfigError(format!("Invalid base URL `{raw}`: {err}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut token = HeaderValue::from_str(self.app_token.expose_secret())
            .map_err(|err| Error::ConfigError(format!("Invalid application token: {err}")))?;
        token.set_sensitive(true);
        headers.insert("X-APP-TOKEN", token);

        let http = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(self.timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(ExternalClient { http, base_url })
    }
}

/// Asynchronous client for the Klingo external API.
#[derive(Clone)]
pub struct ExternalClient {
    http: Client,
    base_url: Url,
}

impl ExternalClient {
    /// Construct a client directly from an application token.
    pub fn new(app_token: impl Into<String>) -> Result<Self> {
        ExternalClientBuilder::new(app_token).build()
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Liveness probe; false when the API is unreachable or unhealthy.
    pub async fn is_live(&self) -> bool {
        self.send_json::<(), Value>(Method::GET, "api/live", None, &[])
            .await
            .is_ok()
    }

    /// Identify a patient by phone number.
    pub async fn identify_patient_by_phone(
        &self,
        phone: &str,
        phone_only: bool,
    ) -> Result<ExternalResponse<PatientIdentification>> {
        self.send_json(
            Method::POST,
            "api/paciente/identificar",
            Some(&json!({"telefone": phone, "apenas_telefone": phone_only})),
            &[],
        )
        .await
    }

    /// Identify a patient by CPF.
    pub async fn identify_patient_by_cpf(
        &self,
        cpf: &str,
    ) -> Result<ExternalResponse<PatientIdentification>> {
        self.get_json("api/paciente/cpf", &[("cpf", cpf.to_string())])
            .await
    }

    /// Open slots matching the query.
    pub async fn available_slots(&self, query: &SlotQuery) -> Result<ExternalResponse<Vec<Slot>>> {
        self.get_json("api/agenda/horarios", &query.to_pairs()).await
    }

    /// Bookable specialties.
    pub async fn specialties(&self) -> Result<ExternalResponse<Vec<Specialty>>> {
        self.get_json("api/agenda/especialidades", &[]).await
    }

    /// Bookable exam types.
    pub async fn exams(&self) -> Result<ExternalResponse<Vec<Exam>>> {
        self.get_json("api/agenda/exames", &[]).await
    }

    /// Professionals, optionally restricted by procedure and plan.
    pub async fn professionals(
        &self,
        procedure_id: Option<i64>,
        plan_id: Option<i64>,
    ) -> Result<ExternalResponse<Vec<Professional>>> {
        let mut params = Vec::new();
        if let Some(id) = procedure_id {
            params.push(("procedimento", id.to_string()));
        }
        if let Some(id) = plan_id {
            params.push(("plano", id.to_string()));
        }
        self.get_json("api/agenda/profissionais", &params).await
    }

    /// Health plans accepted by the clinic.
    pub async fn health_plans(&self) -> Result<ExternalResponse<Vec<HealthPlan>>> {
        self.get_json("api/convenios", &[]).await
    }

    /// Price quote for a procedure under a plan.
    pub async fn price(&self, procedure_id: i64, plan_id: i64) -> Result<ExternalResponse<Price>> {
        self.get_json(
            "api/preco",
            &[
                ("procedimento", procedure_id.to_string()),
                ("plano", plan_id.to_string()),
            ],
        )
        .await
    }

    /// Place a temporary hold on a slot.
    pub async fn reserve_slot(
        &self,
        request: &ReserveSlotRequest,
    ) -> Result<ExternalResponse<Reservation>> {
        self.send_json(Method::POST, "api/agenda/reservar", Some(request), &[])
            .await
    }

    /// Release a previously placed hold.
    pub async fn cancel_reservation(&self, reservation_id: &str) -> Result<ExternalResponse<Value>> {
        self.send_json::<(), _>(
            Method::DELETE,
            "api/agenda/reservar",
            None,
            &[("id", reservation_id.to_string())],
        )
        .await
    }

    /// Turn a reservation into a confirmed booking.
    pub async fn confirm_booking(
        &self,
        request: &ConfirmBookingRequest,
    ) -> Result<ExternalResponse<BookingConfirmation>> {
        self.send_json(Method::POST, "api/agenda/horario", Some(request), &[])
            .await
    }

    /// Cancel a booking by its voucher id.
    pub async fn cancel_booking(&self, voucher_id: i64) -> Result<ExternalResponse<Value>> {
        self.send_json::<(), _>(
            Method::DELETE,
            "api/voucher",
            None,
            &[("id", voucher_id.to_string())],
        )
        .await
    }

    /// Vouchers issued to the application.
    pub async fn vouchers(&self) -> Result<ExternalResponse<Vec<Voucher>>> {
        self.get_json("api/vouchers", &[]).await
    }

    /// Telephony confirmation list for one day.
    pub async fn confirmation_list(
        &self,
        date: NaiveDate,
        include_links: bool,
    ) -> Result<ExternalResponse<Vec<PhoneListAppointment>>> {
        let path = format!("api/telefonia/lista/{}", date.format("%Y-%m-%d"));
        let params = if include_links {
            vec![("links", "1".to_string())]
        } else {
            Vec::new()
        };
        self.get_json(&path, &params).await
    }

    /// Record a patient's reply for a confirmation entry.
    pub async fn confirm_appointment(
        &self,
        entry_id: i64,
        reply: ConfirmationReply,
    ) -> Result<ExternalResponse<Value>> {
        self.send_json(
            Method::POST,
            "api/telefonia/confirmar",
            Some(&json!({"id": entry_id, "status": reply})),
            &[],
        )
        .await
    }

    /// Record an NPS score for a confirmation entry.
    pub async fn register_nps(&self, entry_id: i64, score: u8) -> Result<ExternalResponse<Value>> {
        self.send_json(
            Method::POST,
            "api/telefonia/nps",
            Some(&json!({"id": entry_id, "nota": score})),
            &[],
        )
        .await
    }

    /// Blocked periods on the schedule.
    pub async fn schedule_blocks(&self) -> Result<ExternalResponse<Vec<ScheduleBlock>>> {
        self.get_json("api/telefonia/bloqueios", &[]).await
    }

    /// Check a patient in for their booking.
    pub async fn checkin(&self, request: &CheckinRequest) -> Result<ExternalResponse<Value>> {
        self.send_json(Method::POST, "api/checkin", Some(request), &[])
            .await
    }

    /// Status of one exam result.
    pub async fn exam_result(&self, result_id: i64) -> Result<ExternalResponse<ExamResult>> {
        let path = format!("api/resultado/{result_id}");
        self.get_json(&path, &[]).await
    }

    /// Raw PDF report for one exam result.
    pub async fn exam_result_pdf(&self, result_id: i64) -> Result<Bytes> {
        let path = format!("api/resultado/pdf/{result_id}");
        let url = self.endpoint(&path)?;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            return Err(Error::RemoteCall {
                operation: format!("GET {path}"),
                status: status.as_u16(),
                body,
            });
        }

        response
            .bytes()
            .await
            .map_err(|err| Error::HttpError(format!("Failed to read PDF body: {err}")))
    }

    async fn get_json<T>(&self, path: &str, params: &[(&'static str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.send_json::<(), T>(Method::GET, path, None, params)
            .await
    }

    async fn send_json<B, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        params: &[(&'static str, String)],
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(%method, path, "sending external API request");

        let mut request = self.http.request(method.clone(), url);
        if !params.is_empty() {
            request = request.query(&params);
        }
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            return Err(Error::RemoteCall {
                operation: format!("{method} {path}"),
                status: status.as_u16(),
                body,
            });
        }

        response.json::<R>().await.map_err(|err| {
            Error::ParseError(format!(
                "Failed to parse external API response for `{path}`: {err}"
            ))
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid path `{path}`: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> ExternalClient {
        ExternalClientBuilder::new("app-token-1")
            .with_base_url(server.uri())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn app_token_header_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/live"))
            .and(header("X-APP-TOKEN", "app-token-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        assert!(client.is_live().await);
    }

    #[tokio::test]
    async fn is_live_false_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/live"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = test_client(&server);
        assert!(!client.is_live().await);
    }

    #[tokio::test]
    async fn identify_by_phone_posts_expected_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/paciente/identificar"))
            .and(body_json(json!({
                "telefone": "+5584999990000",
                "apenas_telefone": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"id_pessoa": 42, "st_nome": "Maria Souza"}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let response = client
            .identify_patient_by_phone("+5584999990000", true)
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.data.unwrap().id, 42);
    }

    #[tokio::test]
    async fn available_slots_sends_range_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/agenda/horarios"))
            .and(query_param("inicio", "2026-02-18"))
            .and(query_param("fim", "2026-02-25"))
            .and(query_param("profissional", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{
                    "id": 1, "data": "2026-02-18", "hora": "10:00",
                    "id_medico": 7, "nome_medico": "Dr. Silva",
                    "especialidade": "Cardiologia"
                }]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let query = SlotQuery {
            professional: Some(7),
            ..SlotQuery::range(
                NaiveDate::from_ymd_opt(2026, 2, 18).unwrap(),
                NaiveDate::from_ymd_opt(2026, 2, 25).unwrap(),
            )
        };
        let response = client.available_slots(&query).await.unwrap();
        let slots = response.data.unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].practitioner_name, "Dr. Silva");
    }

    #[tokio::test]
    async fn cancel_reservation_uses_delete_with_id() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/agenda/reservar"))
            .and(query_param("id", "res-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let response = client.cancel_reservation("res-9").await.unwrap();
        assert!(response.success);
    }

    #[tokio::test]
    async fn confirm_appointment_sends_reply_letter() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/telefonia/confirmar"))
            .and(body_json(json!({"id": 12, "status": "R"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let response = client
            .confirm_appointment(12, ConfirmationReply::Reschedule)
            .await
            .unwrap();
        assert!(response.success);
    }

    #[tokio::test]
    async fn failure_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/vouchers"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({"error": "token inválido"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.vouchers().await.unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.body(), Some(&json!({"error": "token inválido"})));
    }

    #[tokio::test]
    async fn exam_result_pdf_returns_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/resultado/pdf/31"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7".to_vec()))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let bytes = client.exam_result_pdf(31).await.unwrap();
        assert_eq!(bytes.as_ref(), b"%PDF-1.7");
    }
}
