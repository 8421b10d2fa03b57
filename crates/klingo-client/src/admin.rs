//! System settings, users and tasks.

use crate::client::KlingoClient;
use klingo_core::aql::{QueryDescriptor, RoutingHints};
use klingo_core::Result;
use serde_json::{json, Value};

/// Handle for system settings.
#[derive(Debug, Clone, Copy)]
pub struct Settings<'a> {
    client: &'a KlingoClient,
}

/// Handle for user and permission checks.
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    client: &'a KlingoClient,
}

/// Handle for task operations.
#[derive(Debug, Clone, Copy)]
pub struct Tasks<'a> {
    client: &'a KlingoClient,
}

impl KlingoClient {
    /// System settings.
    #[must_use]
    pub fn settings(&self) -> Settings<'_> {
        Settings { client: self }
    }

    /// User and permission checks.
    #[must_use]
    pub fn users(&self) -> Users<'_> {
        Users { client: self }
    }

    /// Task operations.
    #[must_use]
    pub fn tasks(&self) -> Tasks<'_> {
        Tasks { client: self }
    }
}

impl Settings<'_> {
    /// List settings matching the given filter map.
    pub async fn list(&self, filters: Value) -> Result<Value> {
        let descriptor = QueryDescriptor::new("configuracoes.index", "item").with_parms(filters);
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// Value of one setting by slug.
    pub async fn get(&self, slug: &str) -> Result<Value> {
        let descriptor =
            QueryDescriptor::new("configuracoes.get", "item").with_parms(json!({"st_slug": slug}));
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// Whether a setting holds the given value (`"1"` checks for enabled).
    pub async fn check(&self, slug: &str, value: &str) -> Result<Value> {
        let descriptor = QueryDescriptor::new("configuracoes.check", "item")
            .with_parms(json!({"st_slug": slug, "st_valor": value}));
        self.client.query(descriptor, RoutingHints::new()).await
    }
}

impl Users<'_> {
    /// Whether the current user holds a permission on a resource.
    pub async fn has_permission(&self, resource: &str) -> Result<Value> {
        let descriptor = QueryDescriptor::new("usuarios.tem_permissao", "item")
            .with_parms(json!({"resource": resource}));
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// Whether the current user may access a specific resource id.
    pub async fn has_access_permission(&self, resource_id: i64) -> Result<Value> {
        let descriptor = QueryDescriptor::new("usuarios.tem_permissao_acesso", "item")
            .with_parms(json!({"resource_id": resource_id, "block_vazio": true}));
        self.client.query(descriptor, RoutingHints::new()).await
    }

    /// List users.
    pub async fn list(&self) -> Result<Value> {
        self.client
            .query(
                QueryDescriptor::new("usuarios.index", "lista"),
                RoutingHints::new(),
            )
            .await
    }
}

impl Tasks<'_> {
    /// List tasks.
    pub async fn list(&self, pending: bool, mine: bool) -> Result<Value> {
        let descriptor = QueryDescriptor::new("tarefas.index", "item").with_parms(json!({
            "pendentes": pending,
            "minhas": mine,
            "id_medico": Value::Null,
        }));
        self.client
            .query(descriptor, RoutingHints::new().with_action("tarefas.index"))
            .await
    }
}
