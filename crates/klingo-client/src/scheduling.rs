//! Day schedules and bookings.
//!
//! A schedule (`agenda`) is a practitioner's grid of slots for one day; a
//! booking (`marcacao`) is a confirmed appointment occupying a slot.

use crate::client::KlingoClient;
use crate::models::ScheduleListParams;
use chrono::{Local, NaiveDate};
use klingo_core::aql::{QueryDescriptor, RoutingHints};
use klingo_core::Result;
use serde_json::{json, Value};

/// Handle for schedule operations.
#[derive(Debug, Clone, Copy)]
pub struct Schedules<'a> {
    client: &'a KlingoClient,
}

/// Handle for booking operations.
#[derive(Debug, Clone, Copy)]
pub struct Bookings<'a> {
    client: &'a KlingoClient,
}

impl KlingoClient {
    /// Schedule operations.
    #[must_use]
    pub fn schedules(&self) -> Schedules<'_> {
        Schedules { client: self }
    }

    /// Booking operations.
    #[must_use]
    pub fn bookings(&self) -> Bookings<'_> {
        Bookings { client: self }
    }
}

impl Schedules<'_> {
    /// List the slot grid for one day.
    pub async fn list(&self, params: &ScheduleListParams) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new("agendas.index", "lista").with_parms(params.to_parms());
        let hints = RoutingHints::new()
            .with_action("agendas.index")
            .with_page(params.page.unwrap_or(1));
        self.client.query(descriptor, hints).await
    }

    /// Book a slot.
    ///
    /// `fields` carries the platform's booking shape (`id_paciente`,
    /// `id_medico`, `data`, `hora`, `id_procedimento`, `id_operadora`, ...).
    pub async fn book(&self, fields: Value) -> Result<Value> {
        let descriptor = QueryDescriptor::new("agendas.store", "item").with_parms(fields);
        self.client
            .query(descriptor, RoutingHints::new().with_action("agendas.store"))
            .await
    }

    /// Book a recurring series of slots.
    pub async fn book_recurring(&self, fields: Value) -> Result<Value> {
        let descriptor = QueryDescriptor::new("agendas.store", "item").with_parms(fields);
        self.client
            .query(descriptor, RoutingHints::new().with_action("agendas.recorrencia"))
            .await
    }

    /// Cancel a booked slot, optionally recording a reason.
    pub async fn cancel(&self, schedule_id: i64, reason_id: Option<i64>) -> Result<Value> {
        let mut parms = json!({"id": schedule_id});
        if let Some(reason) = reason_id {
            parms["id_motivo"] = json!(reason);
        }
        let descriptor = QueryDescriptor::new("agendas.destroy", "item").with_parms(parms);
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// Place a temporary hold on a slot.
    pub async fn reserve(&self, fields: Value) -> Result<Value> {
        let descriptor = QueryDescriptor::new("agendas.reservar", "item").with_parms(fields);
        self.client
            .query(descriptor, RoutingHints::new().with_action("agendas.reservar"))
            .await
    }

    /// Release previously held slots.
    pub async fn release_reservations(&self, ids: &[i64]) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new("agendas.liberar_reservas", "item").with_parms(json!({"ids": ids}));
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// Available slots for one practitioner on one day (today when unset).
    pub async fn practitioner_slots(
        &self,
        practitioner_id: i64,
        date: Option<NaiveDate>,
    ) -> Result<Value> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let descriptor = QueryDescriptor::new("medicos.horarios", "item").with_parms(json!({
            "id_medico": practitioner_id,
            "data": date.format("%Y-%m-%d").to_string(),
        }));
        self.client.query(descriptor, RoutingHints::new()).await
    }
}

impl Bookings<'_> {
    /// Booking counters for the reception dashboard.
    pub async fn stats(&self, for_booking: bool) -> Result<Value> {
        let descriptor = QueryDescriptor::new("marcacoes.stats", "lista")
            .with_parms(json!({"para_marcacao": for_booking}));
        self.client
            .query(descriptor, RoutingHints::new().with_action("marcacoes.stats"))
            .await
    }

    /// List bookings matching the given filter map.
    pub async fn list(&self, filters: Value) -> Result<Value> {
        let descriptor = QueryDescriptor::new("marcacoes.index", "lista").with_parms(filters);
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// One booking in full.
    pub async fn get(&self, booking_id: i64) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new("marcacoes.show", "item").with_parms(json!({"id": booking_id}));
        self.client
            .query(descriptor, RoutingHints::new().with_action("marcacoes.show"))
            .await
    }

    /// Check a patient in for their booking.
    pub async fn check_in(&self, booking_id: i64) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new("marcacoes.iniciar", "item").with_parms(json!({"id": booking_id}));
        self.client
            .query(descriptor, RoutingHints::new().with_action("marcacoes.iniciar"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klingo_core::config::KlingoConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> KlingoClient {
        let config = KlingoConfig::new("irb")
            .unwrap()
            .with_base_url(server.uri())
            .unwrap();
        KlingoClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn list_defaults_to_page_one() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/aql"))
            .and(query_param("a", "agendas.index"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "lista": {"data": {"agendas": [{"hora": "10:00", "status": "livre"}]}}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client
            .schedules()
            .list(&ScheduleListParams::default())
            .await
            .unwrap();
        assert_eq!(result["agendas"][0]["status"], "livre");
    }

    #[tokio::test]
    async fn cancel_includes_reason_only_when_given() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/aql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item": {"ok": true}})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.schedules().cancel(10, Some(3)).await.unwrap();
        client.schedules().cancel(10, None).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let with_reason: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let without_reason: Value = serde_json::from_slice(&requests[1].body).unwrap();
        assert_eq!(with_reason["q"][0]["parms"]["id_motivo"], 3);
        assert!(without_reason["q"][0]["parms"]
            .as_object()
            .unwrap()
            .get("id_motivo")
            .is_none());
    }
}
