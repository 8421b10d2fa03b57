//! Encounter (visit) lifecycle operations.

use crate::client::KlingoClient;
use klingo_core::aql::{QueryDescriptor, RoutingHints};
use klingo_core::{Error, Result};
use serde_json::{json, Value};

/// Handle for encounter operations.
#[derive(Debug, Clone, Copy)]
pub struct Encounters<'a> {
    client: &'a KlingoClient,
}

impl KlingoClient {
    /// Encounter operations.
    #[must_use]
    pub fn encounters(&self) -> Encounters<'_> {
        Encounters { client: self }
    }
}

impl Encounters<'_> {
    /// Open a new encounter.
    pub async fn create(&self, fields: Value) -> Result<Value> {
        let descriptor = QueryDescriptor::new("atendimentos.store", "item").with_parms(fields);
        self.client
            .query(descriptor, RoutingHints::new().with_action("atendimentos.store"))
            .await
    }

    /// One encounter in full.
    pub async fn get(&self, encounter_id: i64) -> Result<Value> {
        let descriptor = QueryDescriptor::new("atendimentos.show", "item")
            .with_parms(json!({"id": encounter_id}));
        self.client
            .query(descriptor, RoutingHints::new().with_action("atendimentos.show"))
            .await
    }

    /// Call the patient to the consultation room.
    pub async fn call(&self, encounter_id: i64) -> Result<Value> {
        let descriptor = QueryDescriptor::new("atendimentos.chamar", "item")
            .with_parms(json!({"id": encounter_id}));
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// Start the consultation.
    pub async fn start(&self, encounter_id: i64) -> Result<Value> {
        let descriptor = QueryDescriptor::new("atendimentos.iniciar", "item")
            .with_parms(json!({"id": encounter_id}));
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// Close the encounter, optionally attaching closing fields.
    pub async fn finish(&self, encounter_id: i64, fields: Option<Value>) -> Result<Value> {
        let mut parms = serde_json::Map::new();
        parms.insert("id".to_string(), json!(encounter_id));
        if let Some(extra) = fields {
            let Some(extra_map) = extra.as_object() else {
                return Err(Error::ValidationError(
                    "closing fields must be a JSON object".to_string(),
                ));
            };
            for (key, value) in extra_map {
                parms.insert(key.clone(), value.clone());
            }
        }

        let descriptor =
            QueryDescriptor::new("atendimentos.finalizar", "item").with_parms(Value::Object(parms));
        self.client.query(descriptor, RoutingHints::new()).await
    }
}
