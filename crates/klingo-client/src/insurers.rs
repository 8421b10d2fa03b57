//! Insurer (health-plan operator) lookups.

use crate::client::KlingoClient;
use klingo_core::aql::{QueryDescriptor, RoutingHints};
use klingo_core::Result;
use serde_json::{json, Value};

/// Handle for insurer operations.
#[derive(Debug, Clone, Copy)]
pub struct Insurers<'a> {
    client: &'a KlingoClient,
}

impl KlingoClient {
    /// Insurer operations.
    #[must_use]
    pub fn insurers(&self) -> Insurers<'_> {
        Insurers { client: self }
    }
}

impl Insurers<'_> {
    /// List insurers matching the given filter map.
    pub async fn list(&self, filters: Value) -> Result<Value> {
        let descriptor = QueryDescriptor::new("operadoras.index", "lista").with_parms(filters);
        self.client
            .query(descriptor, RoutingHints::new().with_action("operadoras.index"))
            .await
    }

    /// One insurer in full.
    pub async fn get(&self, insurer_id: i64) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new("operadoras.show", "item").with_parms(json!({"id": insurer_id}));
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// Insurer-wide configuration.
    pub async fn config(&self) -> Result<Value> {
        self.client
            .query(
                QueryDescriptor::new("operadoras.config", "item"),
                RoutingHints::new(),
            )
            .await
    }
}
