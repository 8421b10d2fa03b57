//! Reference-table lookups.
//!
//! Small read-mostly tables the platform serves through the same query
//! endpoint: addresses, geography, professional councils, catalog entries.

use crate::client::KlingoClient;
use klingo_core::aql::{QueryDescriptor, RoutingHints};
use klingo_core::Result;
use serde_json::{json, Value};

/// Handle for reference-table lookups.
#[derive(Debug, Clone, Copy)]
pub struct Registry<'a> {
    client: &'a KlingoClient,
}

impl KlingoClient {
    /// Reference-table lookups.
    #[must_use]
    pub fn registry(&self) -> Registry<'_> {
        Registry { client: self }
    }
}

impl Registry<'_> {
    /// Address lookup by postal code.
    pub async fn postal_code(&self, code: &str) -> Result<Value> {
        let descriptor = QueryDescriptor::new("cep.show", "item").with_parms(json!({"cep": code}));
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// States.
    pub async fn states(&self) -> Result<Value> {
        self.list("estados.index").await
    }

    /// Cities, optionally restricted to one state.
    pub async fn cities(&self, state_id: Option<i64>) -> Result<Value> {
        let mut descriptor = QueryDescriptor::new("cidades.index", "lista");
        if let Some(id) = state_id {
            descriptor = descriptor.with_parms(json!({"id_estado": id}));
        }
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// Diagnosis (ICD) codes.
    pub async fn diagnosis_codes(&self, search: &str) -> Result<Value> {
        self.search_list("cids.index", search).await
    }

    /// Professional councils.
    pub async fn councils(&self) -> Result<Value> {
        self.list("conselhos.index").await
    }

    /// Banks.
    pub async fn banks(&self) -> Result<Value> {
        self.list("bancos.index").await
    }

    /// Reasons (cancellation and similar).
    pub async fn reasons(&self) -> Result<Value> {
        self.list("motivos.index").await
    }

    /// Encounter flags.
    pub async fn flags(&self, active: bool) -> Result<Value> {
        let descriptor = QueryDescriptor::new("sinalizadores.index", "lista")
            .with_parms(json!({"ativos": active}));
        self.client
            .query(
                descriptor,
                RoutingHints::new().with_action("sinalizadores.index"),
            )
            .await
    }

    /// Procedures.
    pub async fn procedures(&self, search: &str) -> Result<Value> {
        self.search_list("procedimentos.index", search).await
    }

    /// Procedure search by name or code.
    pub async fn search_procedure(&self, search: &str) -> Result<Value> {
        self.search_list("procedimento.search", search).await
    }

    /// Materials.
    pub async fn materials(&self, search: &str) -> Result<Value> {
        self.search_list("materiais.index", search).await
    }

    /// Medications.
    pub async fn medications(&self, search: &str) -> Result<Value> {
        self.search_list("medicamentos.index", search).await
    }

    /// Health plans.
    pub async fn plans(&self) -> Result<Value> {
        self.list("planos.index").await
    }

    /// Health-plan search by name.
    pub async fn search_plan(&self, search: &str) -> Result<Value> {
        self.search_list("plano.search", search).await
    }

    /// Document templates.
    pub async fn document_templates(&self) -> Result<Value> {
        self.list("modelos.index").await
    }

    /// File types accepted for a record model.
    pub async fn file_types(&self, model: &str, active: bool) -> Result<Value> {
        let descriptor = QueryDescriptor::new("tipo_arquivos.index", "lista")
            .with_parms(json!({"fl_ativo": u8::from(active), "model": model}));
        self.client
            .query(
                descriptor,
                RoutingHints::new().with_action("tipo_arquivos.index"),
            )
            .await
    }

    /// Clinic units.
    pub async fn units(&self) -> Result<Value> {
        self.list("unidades.lista").await
    }

    /// Service sites.
    pub async fn sites(&self) -> Result<Value> {
        self.list("locals.index").await
    }

    async fn list(&self, name: &str) -> Result<Value> {
        self.client
            .query(QueryDescriptor::new(name, "lista"), RoutingHints::new())
            .await
    }

    async fn search_list(&self, name: &str, search: &str) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new(name, "lista").with_parms(json!({"search": search}));
        self.client.query(descriptor, RoutingHints::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klingo_core::config::KlingoConfig;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> KlingoClient {
        let config = KlingoConfig::new("irb")
            .unwrap()
            .with_base_url(server.uri())
            .unwrap();
        KlingoClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn cities_omits_parms_without_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/aql"))
            .and(body_json(json!({"q": [{"name": "cidades.index", "id": "lista"}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"lista": []})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        assert_eq!(client.registry().cities(None).await.unwrap(), json!([]));
    }

    #[tokio::test]
    async fn file_types_encode_active_as_number() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/aql"))
            .and(body_json(json!({"q": [{
                "name": "tipo_arquivos.index",
                "id": "lista",
                "parms": {"fl_ativo": 1, "model": "marcacao"}
            }]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"lista": []})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.registry().file_types("marcacao", true).await.unwrap();
        assert_eq!(result, json!([]));
    }
}
