//! Practitioner and specialty lookups.

use crate::client::KlingoClient;
use chrono::{Local, NaiveDate};
use klingo_core::aql::{QueryDescriptor, RoutingHints};
use klingo_core::Result;
use serde_json::{json, Value};

/// Handle for practitioner operations.
#[derive(Debug, Clone, Copy)]
pub struct Practitioners<'a> {
    client: &'a KlingoClient,
}

/// Handle for specialty operations.
#[derive(Debug, Clone, Copy)]
pub struct Specialties<'a> {
    client: &'a KlingoClient,
}

impl KlingoClient {
    /// Practitioner operations.
    #[must_use]
    pub fn practitioners(&self) -> Practitioners<'_> {
        Practitioners { client: self }
    }

    /// Specialty operations.
    #[must_use]
    pub fn specialties(&self) -> Specialties<'_> {
        Specialties { client: self }
    }
}

impl Practitioners<'_> {
    /// List registered practitioners.
    pub async fn list(&self, active: bool) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new("medicos.index", "lista").with_parms(json!({"ativos": active}));
        self.client
            .query(descriptor, RoutingHints::new().with_action("medicos.index"))
            .await
    }

    /// Slot grid for one practitioner on one day (today when unset).
    pub async fn slots(&self, practitioner_id: i64, date: Option<NaiveDate>) -> Result<Value> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let descriptor = QueryDescriptor::new("medicos.horarios", "item").with_parms(json!({
            "id_medico": practitioner_id,
            "data": date.format("%Y-%m-%d").to_string(),
        }));
        self.client.query(descriptor, RoutingHints::new()).await
    }
}

impl Specialties<'_> {
    /// List specialties.
    pub async fn list(&self, enabled: bool) -> Result<Value> {
        let descriptor = QueryDescriptor::new("especialidades.index", "lista")
            .with_parms(json!({"ativadas": enabled}));
        self.client
            .query(
                descriptor,
                RoutingHints::new().with_action("especialidades.index"),
            )
            .await
    }
}
