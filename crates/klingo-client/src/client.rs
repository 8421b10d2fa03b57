//! Asynchronous Klingo client implementation.
//!
//! One client instance holds one session: the tenant headers fixed at build
//! time and the bearer token acquired by [`KlingoClient::login`] or injected
//! with [`KlingoClient::set_token`]. Clones share the session, so a login
//! performed through one clone is visible to all of them. There is no logout;
//! a token lives until it is replaced or the process ends.

use bytes::Bytes;
use klingo_core::aql::{AqlRequest, QueryDescriptor, RoutingHints};
use klingo_core::config::KlingoConfig;
use klingo_core::{classify_body, unwrap_alias, Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("klingo-client/", env!("CARGO_PKG_VERSION"));

/// Builder for [`KlingoClient`].
#[derive(Debug, Clone)]
pub struct KlingoClientBuilder {
    config: KlingoConfig,
}

impl KlingoClientBuilder {
    /// Create a builder from a configuration.
    #[must_use]
    pub const fn new(config: KlingoConfig) -> Self {
        Self { config }
    }

    /// Build the client.
    pub fn build(self) -> Result<KlingoClient> {
        let base_url = self.config.parse_base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json;charset=utf-8"),
        );
        headers.insert("X-DOMAIN", header_value(&self.config.domain)?);
        headers.insert("X-PORTAL", header_value(&self.config.portal.to_string())?);
        headers.insert("X-UNIDADE", header_value(&self.config.unit.to_string())?);

        let mut builder = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(self.config.timeout())
            .connect_timeout(Duration::from_secs(10));

        if !self.config.tls_verify {
            warn!("TLS verification disabled for Klingo client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(KlingoClient {
            http,
            base_url,
            token: Arc::new(RwLock::new(None)),
        })
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|err| Error::ConfigError(format!("Invalid header value `{value}`: {err}")))
}

/// Asynchronous client for the Klingo platform.
#[derive(Clone, Debug)]
pub struct KlingoClient {
    http: Client,
    base_url: Url,
    token: Arc<RwLock<Option<SecretString>>>,
}

impl KlingoClient {
    /// Construct a client directly from a configuration.
    pub fn new(config: KlingoConfig) -> Result<Self> {
        KlingoClientBuilder::new(config).build()
    }

    /// Start a builder pre-populated with the provided configuration.
    #[must_use]
    pub const fn builder(config: KlingoConfig) -> KlingoClientBuilder {
        KlingoClientBuilder::new(config)
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Authenticate and store the session token.
    ///
    /// The platform returns the token under `access_token` or `token`
    /// depending on the installation; both are accepted. The full login
    /// payload is returned for callers interested in the user profile it
    /// carries.
    ///
    /// # Errors
    ///
    /// [`Error::AuthenticationFailed`] on a non-success transport status,
    /// [`Error::MissingToken`] when the response carries no token field.
    pub async fn login(&self, username: &str, password: &str) -> Result<Value> {
        let url = self.endpoint("login")?;
        debug!(username, "logging in");

        let response = self
            .http
            .post(url)
            .json(&json!({"login": username, "senha": password}))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            return Err(Error::AuthenticationFailed {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| Error::ParseError(format!("Failed to parse login response: {err}")))?;

        let token = extract_token(&body).ok_or(Error::MissingToken)?;
        self.store_token(token);
        Ok(body)
    }

    /// Inject a previously obtained token, bypassing login.
    ///
    /// No shape or expiry validation is performed; a stale token surfaces
    /// only when a subsequent call fails.
    pub fn set_token(&self, token: impl Into<String>) {
        self.store_token(token.into());
    }

    /// Whether a session token is currently held.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    /// Execute a single AQL query and unwrap its aliased result.
    ///
    /// One network round trip. The result is extracted under the
    /// descriptor's alias and one pagination envelope is stripped when
    /// present; if the platform ignored the alias the whole response body is
    /// returned as-is.
    pub async fn query(&self, descriptor: QueryDescriptor, hints: RoutingHints) -> Result<Value> {
        let alias = descriptor.alias.clone();
        let operation = descriptor.name.clone();

        let body = self
            .post_aql(AqlRequest::new(vec![descriptor])?, &hints, &operation)
            .await?;
        classify_body(&operation, &body)?;

        Ok(unwrap_alias(&body, &alias).clone())
    }

    /// Execute several AQL queries in a single round trip.
    ///
    /// The whole sequence travels in one request; it is never split. The
    /// returned object maps each query's alias to its result — use
    /// [`unwrap_alias`] to strip pagination envelopes per alias.
    pub async fn query_batch(
        &self,
        queries: Vec<QueryDescriptor>,
        hints: RoutingHints,
    ) -> Result<Value> {
        let operation = queries
            .iter()
            .map(|query| query.name.as_str())
            .collect::<Vec<_>>()
            .join("+");

        let body = self
            .post_aql(AqlRequest::new(queries)?, &hints, &operation)
            .await?;
        classify_body(&operation, &body)?;

        Ok(body)
    }

    /// Escape hatch for queries without a typed convenience method.
    pub async fn query_raw(
        &self,
        name: &str,
        parms: Option<Value>,
        alias: &str,
    ) -> Result<Value> {
        let mut descriptor = QueryDescriptor::new(name, alias);
        if let Some(parms) = parms {
            descriptor = descriptor.with_parms(parms);
        }
        self.query(descriptor, RoutingHints::new()).await
    }

    /// List the platform modules the authenticated user can access.
    pub async fn access_modules(&self) -> Result<Value> {
        self.query(
            QueryDescriptor::new("modulos.acesso", "item"),
            RoutingHints::new(),
        )
        .await
    }

    /// Upload a file, optionally attached to an encounter.
    pub async fn upload_file(
        &self,
        path: impl AsRef<Path>,
        encounter_id: Option<i64>,
    ) -> Result<Value> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("arquivo")
            .to_string();

        let mut form = Form::new().part("file", Part::bytes(contents).file_name(file_name));
        if let Some(id) = encounter_id {
            form = form.text("id_atendimento", id.to_string());
        }

        let url = self.endpoint("upload_arquivo_token")?;
        debug!(path = %path.display(), "uploading file");

        let response = self
            .authorized(self.http.post(url).multipart(form))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            return Err(Error::RemoteCall {
                operation: "upload_arquivo_token".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| Error::ParseError(format!("Failed to parse upload response: {err}")))
    }

    /// Download a file described by the given JSON body; returns raw bytes.
    pub async fn download_file(&self, descriptor: &Value) -> Result<Bytes> {
        let url = self.endpoint("arq")?;

        let response = self
            .authorized(self.http.post(url).json(descriptor))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            return Err(Error::RemoteCall {
                operation: "arq".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response
            .bytes()
            .await
            .map_err(|err| Error::HttpError(format!("Failed to read file body: {err}")))
    }

    async fn post_aql(
        &self,
        request: AqlRequest,
        hints: &RoutingHints,
        operation: &str,
    ) -> Result<Value> {
        let url = self.endpoint("aql")?;
        debug!(operation, queries = request.q.len(), "executing AQL request");

        let mut builder = self.http.post(url);
        let pairs = hints.to_pairs();
        if !pairs.is_empty() {
            builder = builder.query(&pairs);
        }

        let response = self.authorized(builder.json(&request)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            warn!(operation, status = status.as_u16(), "AQL request rejected");
            return Err(Error::RemoteCall {
                operation: operation.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Value>().await.map_err(|err| {
            Error::ParseError(format!("Failed to parse AQL response for `{operation}`: {err}"))
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().expect("token lock poisoned").as_ref() {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    fn store_token(&self, token: String) {
        *self.token.write().expect("token lock poisoned") = Some(SecretString::from(token));
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid path `{path}`: {err}")))
    }
}

fn extract_token(body: &Value) -> Option<String> {
    ["access_token", "token"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
}
