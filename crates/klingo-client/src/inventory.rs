//! Stock and supplies operations.

use crate::client::KlingoClient;
use crate::models::InventoryRequestParams;
use klingo_core::aql::{QueryDescriptor, RoutingHints};
use klingo_core::Result;
use serde_json::{json, Value};

/// Handle for inventory operations.
#[derive(Debug, Clone, Copy)]
pub struct Inventory<'a> {
    client: &'a KlingoClient,
}

impl KlingoClient {
    /// Inventory operations.
    #[must_use]
    pub fn inventory(&self) -> Inventory<'_> {
        Inventory { client: self }
    }
}

impl Inventory<'_> {
    /// Stock movement types.
    pub async fn movement_types(&self, include_other: bool) -> Result<Value> {
        let descriptor = QueryDescriptor::new("estoque_tipo_movimentacaos.index", "item")
            .with_parms(json!({"outras": include_other}));
        self.client
            .query(
                descriptor,
                RoutingHints::new().with_action("estoque_tipo_movimentacaos.index"),
            )
            .await
    }

    /// List stock requests.
    pub async fn requests(&self, params: &InventoryRequestParams) -> Result<Value> {
        let descriptor = QueryDescriptor::new("estoque_solicitacoes.index", "lista")
            .with_parms(params.to_parms());
        self.client
            .query(
                descriptor,
                RoutingHints::new().with_action("estoque_solicitacoes.index"),
            )
            .await
    }

    /// Tags available for stock items.
    pub async fn item_tags(&self) -> Result<Value> {
        self.client
            .query(
                QueryDescriptor::new("estoque_items.tags", "item"),
                RoutingHints::new().with_action("estoque_items.tags"),
            )
            .await
    }

    /// Stock locations.
    pub async fn locations(&self) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new("estoque_locals.index", "lista").with_parms(json!({"sup": 1}));
        self.client
            .query(
                descriptor,
                RoutingHints::new().with_action("estoque_locals.index"),
            )
            .await
    }
}
