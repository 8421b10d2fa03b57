//! Financial, payment and billing operations.

use crate::client::KlingoClient;
use klingo_core::aql::{QueryDescriptor, RoutingHints};
use klingo_core::Result;
use serde_json::{json, Value};

/// Handle for financial configuration and ledgers.
#[derive(Debug, Clone, Copy)]
pub struct Finance<'a> {
    client: &'a KlingoClient,
}

/// Handle for payment operations.
#[derive(Debug, Clone, Copy)]
pub struct Payments<'a> {
    client: &'a KlingoClient,
}

/// Handle for billing operations.
#[derive(Debug, Clone, Copy)]
pub struct Billing<'a> {
    client: &'a KlingoClient,
}

impl KlingoClient {
    /// Financial operations.
    #[must_use]
    pub fn finance(&self) -> Finance<'_> {
        Finance { client: self }
    }

    /// Payment operations.
    #[must_use]
    pub fn payments(&self) -> Payments<'_> {
        Payments { client: self }
    }

    /// Billing operations.
    #[must_use]
    pub fn billing(&self) -> Billing<'_> {
        Billing { client: self }
    }
}

impl Finance<'_> {
    /// Financial module configuration.
    pub async fn configs(&self) -> Result<Value> {
        self.client
            .query(
                QueryDescriptor::new("financeiro.configs", "item"),
                RoutingHints::new().with_action("financeiro.configs"),
            )
            .await
    }

    /// Tags available for ledger entries.
    pub async fn entry_tags(&self) -> Result<Value> {
        self.client
            .query(
                QueryDescriptor::new("lancamentos.tags", "item"),
                RoutingHints::new().with_action("lancamentos.tags"),
            )
            .await
    }

    /// Accepted payment methods.
    pub async fn payment_methods(&self) -> Result<Value> {
        self.client
            .query(
                QueryDescriptor::new("forma_pagamentos.index", "lista"),
                RoutingHints::new().with_action("forma_pagamentos.index"),
            )
            .await
    }

    /// Configured tax rates.
    pub async fn taxes(&self, active: bool) -> Result<Value> {
        let descriptor = QueryDescriptor::new("impostos.index", "item")
            .with_parms(json!({"where": {"fl_ativo": active}}));
        self.client
            .query(descriptor, RoutingHints::new().with_action("impostos.index"))
            .await
    }
}

impl Payments<'_> {
    /// Whether a payment can be taken for the encounter.
    pub async fn can_pay(&self, encounter_id: i64) -> Result<Value> {
        let descriptor = QueryDescriptor::new("pagamentos.pode_realizar_pagamento", "item")
            .with_parms(json!({"id_atendimento": encounter_id}));
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// Advance payments held for a patient.
    pub async fn advances(&self, patient_id: i64) -> Result<Value> {
        let descriptor = QueryDescriptor::new("pagamentos.adiantamentos", "item")
            .with_parms(json!({"id_paciente": patient_id}));
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// Parties responsible for paying an encounter.
    pub async fn responsible_parties(&self, encounter_id: i64) -> Result<Value> {
        let descriptor = QueryDescriptor::new("pagamentos.responsaveis", "item")
            .with_parms(json!({"id_atendimento": encounter_id}));
        self.client.query(descriptor, RoutingHints::new()).await
    }
}

impl Billing<'_> {
    /// Procedure classes used for billing.
    pub async fn procedure_classes(&self) -> Result<Value> {
        self.client
            .query(
                QueryDescriptor::new("classe_procedimentos.index", "lista"),
                RoutingHints::new().with_action("classe_procedimentos.index"),
            )
            .await
    }

    /// Price-table versions.
    pub async fn table_versions(&self, price_update: bool) -> Result<Value> {
        let descriptor = QueryDescriptor::new("tabela_versaos.index", "lista")
            .with_parms(json!({"atualizacao_preco": price_update}));
        self.client
            .query(
                descriptor,
                RoutingHints::new().with_action("tabela_versaos.index"),
            )
            .await
    }

    /// Generate the TISS interchange JSON for a billing batch.
    pub async fn tiss_json(&self, fields: Value) -> Result<Value> {
        let descriptor = QueryDescriptor::new("tiss.gerar_json", "item").with_parms(fields);
        self.client
            .query(descriptor, RoutingHints::new().with_action("tiss.gerar_json"))
            .await
    }
}
