//! CRM queues and report execution.

use crate::client::KlingoClient;
use klingo_core::aql::{QueryDescriptor, RoutingHints};
use klingo_core::{Error, Result};
use serde_json::{json, Value};

/// Handle for CRM operations.
#[derive(Debug, Clone, Copy)]
pub struct Crm<'a> {
    client: &'a KlingoClient,
}

/// Handle for report operations.
#[derive(Debug, Clone, Copy)]
pub struct Reports<'a> {
    client: &'a KlingoClient,
}

impl KlingoClient {
    /// CRM operations.
    #[must_use]
    pub fn crm(&self) -> Crm<'_> {
        Crm { client: self }
    }

    /// Report operations.
    #[must_use]
    pub fn reports(&self) -> Reports<'_> {
        Reports { client: self }
    }
}

impl Crm<'_> {
    /// Lead work queues.
    pub async fn lead_queues(&self, all: bool) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new("fila_leads.index", "item").with_parms(json!({"todas": all}));
        self.client
            .query(descriptor, RoutingHints::new().with_action("fila_leads.index"))
            .await
    }

    /// List quotes matching the given filter map.
    pub async fn quotes(&self, filters: Value) -> Result<Value> {
        let descriptor = QueryDescriptor::new("orcamentos.index", "lista").with_parms(filters);
        self.client.query(descriptor, RoutingHints::new()).await
    }
}

impl Reports<'_> {
    /// Reports available to the current user.
    pub async fn list(&self) -> Result<Value> {
        self.client
            .query(
                QueryDescriptor::new("relatorios.index", "lista"),
                RoutingHints::new(),
            )
            .await
    }

    /// Run one report, optionally with report-specific parameters.
    pub async fn run(&self, report_id: i64, parms: Option<Value>) -> Result<Value> {
        let mut merged = serde_json::Map::new();
        merged.insert("id".to_string(), json!(report_id));
        if let Some(extra) = parms {
            let Some(extra_map) = extra.as_object() else {
                return Err(Error::ValidationError(
                    "report parameters must be a JSON object".to_string(),
                ));
            };
            for (key, value) in extra_map {
                merged.insert(key.clone(), value.clone());
            }
        }

        let descriptor =
            QueryDescriptor::new("relatorios.show", "item").with_parms(Value::Object(merged));
        self.client
            .query(descriptor, RoutingHints::new().with_action("relatorio.show"))
            .await
    }

    /// Reports attached to a named page of the frontend.
    pub async fn page(&self, page: &str) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new("relatorios.pagina", "item").with_parms(json!({"pagina": page}));
        self.client
            .query(descriptor, RoutingHints::new().with_action("relatorios.pagina"))
            .await
    }

    /// Available dashboards.
    pub async fn dashboards(&self) -> Result<Value> {
        self.client
            .query(
                QueryDescriptor::new("dashboards.lista", "lista"),
                RoutingHints::new(),
            )
            .await
    }
}
