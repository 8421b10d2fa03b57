//! Patient operations.

use crate::client::KlingoClient;
use klingo_core::aql::{QueryDescriptor, RoutingHints};
use klingo_core::{Error, Result};
use serde_json::{json, Value};

/// Handle for patient operations.
#[derive(Debug, Clone, Copy)]
pub struct Patients<'a> {
    client: &'a KlingoClient,
}

impl KlingoClient {
    /// Patient operations.
    #[must_use]
    pub fn patients(&self) -> Patients<'_> {
        Patients { client: self }
    }
}

impl Patients<'_> {
    /// Search patients by name, CPF or other identifier.
    pub async fn search(&self, search: &str, page: u32) -> Result<Value> {
        let descriptor = QueryDescriptor::new("pacientes.index", "lista")
            .with_parms(json!({"search": search, "page": page}));
        self.client
            .query(descriptor, RoutingHints::new().with_action("pacientes.index"))
            .await
    }

    /// Full record of a single patient.
    pub async fn get(&self, patient_id: i64) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new("pacientes.show", "item").with_parms(json!({"id": patient_id}));
        self.client
            .query(descriptor, RoutingHints::new().with_action("pacientes.show"))
            .await
    }

    /// Register a new patient.
    ///
    /// `fields` is the platform's patient record shape (`st_nome`, `st_cpf`,
    /// `dt_nascimento`, `st_sexo`, `st_telefone`, `st_email`, ...).
    pub async fn create(&self, fields: Value) -> Result<Value> {
        let descriptor = QueryDescriptor::new("pacientes.store", "item").with_parms(fields);
        self.client
            .query(descriptor, RoutingHints::new().with_action("pacientes.store"))
            .await
    }

    /// Update an existing patient.
    pub async fn update(&self, patient_id: i64, mut fields: Value) -> Result<Value> {
        let Some(map) = fields.as_object_mut() else {
            return Err(Error::ValidationError(
                "patient fields must be a JSON object".to_string(),
            ));
        };
        map.insert("id".to_string(), json!(patient_id));

        let descriptor = QueryDescriptor::new("pacientes.store", "item").with_parms(fields);
        self.client
            .query(descriptor, RoutingHints::new().with_action("pacientes.store"))
            .await
    }

    /// Pending follow-up visits for a patient.
    pub async fn follow_ups(&self, patient_id: i64) -> Result<Value> {
        let descriptor = QueryDescriptor::new("pacientes.retornos", "item")
            .with_parms(json!({"id_paciente": patient_id}));
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// Ethnicity reference list used by the patient form.
    pub async fn ethnicities(&self) -> Result<Value> {
        self.client
            .query(
                QueryDescriptor::new("pacientes.etnias", "lista"),
                RoutingHints::new(),
            )
            .await
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
    async fn search_sends_expected_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/aql"))
            .and(body_json(json!({"q": [{
                "name": "pacientes.index",
                "id": "lista",
                "parms": {"search": "Maria", "page": 1}
            }]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "lista": {"data": [{"id_pessoa": 7, "st_nome": "Maria"}], "total": 1}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.patients().search("Maria", 1).await.unwrap();
        assert_eq!(result[0]["id_pessoa"], 7);
    }

    #[tokio::test]
    async fn update_merges_id_into_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/aql"))
            .and(body_json(json!({"q": [{
                "name": "pacientes.store",
                "id": "item",
                "parms": {"st_telefone": "8499", "id": 7}
            }]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item": {"id": 7}})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client
            .patients()
            .update(7, json!({"st_telefone": "8499"}))
            .await
            .unwrap();
        assert_eq!(result["id"], 7);
    }

    #[tokio::test]
    async fn update_rejects_non_object_fields() {
        let server = MockServer::start().await;
        let client = test_client(&server);
        let err = client.patients().update(7, json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }
}
