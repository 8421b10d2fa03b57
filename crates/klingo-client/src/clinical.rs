//! Clinical records, lab report queues and authorization queues.

use crate::client::KlingoClient;
use klingo_core::aql::{QueryDescriptor, RoutingHints};
use klingo_core::Result;
use serde_json::{json, Value};

/// Handle for the electronic medical record.
#[derive(Debug, Clone, Copy)]
pub struct MedicalRecords<'a> {
    client: &'a KlingoClient,
}

/// Handle for lab report queues.
#[derive(Debug, Clone, Copy)]
pub struct LabReports<'a> {
    client: &'a KlingoClient,
}

/// Handle for authorization queues.
#[derive(Debug, Clone, Copy)]
pub struct Authorizations<'a> {
    client: &'a KlingoClient,
}

impl KlingoClient {
    /// Electronic medical record operations.
    #[must_use]
    pub fn medical_records(&self) -> MedicalRecords<'_> {
        MedicalRecords { client: self }
    }

    /// Lab report operations.
    #[must_use]
    pub fn lab_reports(&self) -> LabReports<'_> {
        LabReports { client: self }
    }

    /// Authorization operations.
    #[must_use]
    pub fn authorizations(&self) -> Authorizations<'_> {
        Authorizations { client: self }
    }
}

impl MedicalRecords<'_> {
    /// Load the record for one encounter.
    pub async fn load(&self, encounter_id: i64) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new("pep.load", "item").with_parms(json!({"id_atendimento": encounter_id}));
        self.client
            .query(descriptor, RoutingHints::new().with_action("pep.load"))
            .await
    }

    /// Patient history of one section kind (e.g. `exames`, `receitas`).
    ///
    /// The platform exposes each section as its own query,
    /// `pep.historico_<kind>`.
    pub async fn history(&self, patient_id: i64, kind: &str) -> Result<Value> {
        let descriptor = QueryDescriptor::new(format!("pep.historico_{kind}"), "item")
            .with_parms(json!({"id_paciente": patient_id}));
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// Walk-in (unscheduled) record entries for a patient.
    pub async fn walk_ins(&self, patient_id: i64) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new("pep.avulsos", "item").with_parms(json!({"id_paciente": patient_id}));
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// Whether the current user may open a walk-in record entry.
    pub async fn can_create_walk_in(&self) -> Result<Value> {
        self.client
            .query(QueryDescriptor::new("pep.pode_avulso", "item"), RoutingHints::new())
            .await
    }

    /// Persist an order set into the record.
    pub async fn save_order_set(&self, fields: Value) -> Result<Value> {
        let descriptor = QueryDescriptor::new("pep.salvar_order_set", "item").with_parms(fields);
        self.client.query(descriptor, RoutingHints::new()).await
    }
}

impl LabReports<'_> {
    /// Report work queues.
    pub async fn queues(&self, all: bool) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new("fila_laudos.index", "item").with_parms(json!({"todas": all}));
        self.client
            .query(descriptor, RoutingHints::new().with_action("fila_laudos.index"))
            .await
    }

    /// Possible report statuses.
    pub async fn statuses(&self) -> Result<Value> {
        self.client
            .query(
                QueryDescriptor::new("status_laudos.index", "lista"),
                RoutingHints::new().with_action("status_laudos.index"),
            )
            .await
    }
}

impl Authorizations<'_> {
    /// Authorization work queues.
    pub async fn queues(&self) -> Result<Value> {
        self.client
            .query(
                QueryDescriptor::new("fila_autorizacoes.index", "lista"),
                RoutingHints::new().with_action("fila_autorizacoes.index"),
            )
            .await
    }
}
