use std::fmt::Debug;
use std::marker::PhantomData;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::domain::PagedResult;
use crate::envelope::{self, Envelope};
use crate::error::ApiError;
use crate::query::{ListQuery, ToQuery};

// =============================================================================
// 1. THE ABSTRACTION (Resources addressed over REST)
// =============================================================================

/// Trait that any server-side resource must implement to be reachable through
/// a [`ResourceClient`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Raw wire record, as the server sends it.
    type Dto: DeserializeOwned + Send;
    type CreatePayload: Serialize + Send + Sync + Debug;
    type UpdatePayload: Serialize + Send + Sync + Debug;
    type Query: ListQuery;

    /// Collection root, e.g. `/api/inventory`.
    const BASE_PATH: &'static str;

    fn id(&self) -> &str;

    /// Normalise a wire record into its display-safe form.
    fn from_dto(dto: Self::Dto) -> Self;

    fn list_path() -> String {
        format!("{}/list", Self::BASE_PATH)
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::BASE_PATH, urlencoding::encode(id))
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, ApiError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Path plus query string, relative to the configured base URL.
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), body: None }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self { method: Method::Delete, path: path.into(), body: None }
    }

    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Ok(Self { method: Method::Post, path: path.into(), body: Some(to_body(body)?) })
    }

    pub fn put<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Ok(Self { method: Method::Put, path: path.into(), body: Some(to_body(body)?) })
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Transport(format!("Failed to encode body: {}", e)))
}

/// Status code and undecoded body text of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug)]
pub struct TransportRequest {
    pub request: HttpRequest,
    pub respond_to: Response<RawResponse>,
}

// =============================================================================
// 3. THE TRANSPORT ACTOR
// =============================================================================

/// Owns the HTTP connection pool. Each request is served on its own task, so
/// callers that fan out see their requests in flight together.
pub struct HttpActor {
    receiver: mpsc::Receiver<TransportRequest>,
    http: reqwest::Client,
    base_url: String,
}

impl HttpActor {
    pub fn new(buffer_size: usize, config: &Config) -> Result<(Self, HttpClient), ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            http,
            base_url: config.api_base_url.clone(),
        };
        Ok((actor, HttpClient::new(sender)))
    }

    #[instrument(name = "http_actor", skip(self), fields(base_url = %self.base_url))]
    pub async fn run(mut self) {
        debug!("HttpActor starting");
        while let Some(TransportRequest { request, respond_to }) = self.receiver.recv().await {
            let http = self.http.clone();
            let url = format!("{}{}", self.base_url, request.path);
            tokio::spawn(async move {
                let result = perform(&http, &url, request).await;
                let _ = respond_to.send(result);
            });
        }
        debug!("HttpActor stopped");
    }
}

#[instrument(skip(http, request), fields(method = ?request.method))]
async fn perform(http: &reqwest::Client, url: &str, request: HttpRequest) -> Result<RawResponse, ApiError> {
    let builder = match request.method {
        Method::Get => http.get(url),
        Method::Post => http.post(url),
        Method::Put => http.put(url),
        Method::Delete => http.delete(url),
    }
    .header(reqwest::header::CONTENT_TYPE, "application/json");

    let builder = match request.body {
        Some(body) => builder.json(&body),
        None => builder,
    };

    let response = builder.send().await.map_err(|e| {
        warn!(error = %e, "Request failed to complete");
        ApiError::Transport(e.to_string())
    })?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(format!("Failed to read response body: {}", e)))?;

    debug!(status, "Response received");
    Ok(RawResponse { status, body })
}

/// Cheap, cloneable handle to the [`HttpActor`].
#[derive(Clone, Debug)]
pub struct HttpClient {
    sender: mpsc::Sender<TransportRequest>,
}

impl HttpClient {
    pub fn new(sender: mpsc::Sender<TransportRequest>) -> Self {
        Self { sender }
    }

    pub async fn send(&self, request: HttpRequest) -> Result<RawResponse, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(TransportRequest { request, respond_to })
            .await
            .map_err(|_| ApiError::Transport("Transport closed".to_string()))?;
        response
            .await
            .map_err(|_| ApiError::Transport("Transport dropped".to_string()))?
    }

    /// Send and decode in one step.
    pub async fn fetch<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<Envelope<T>, ApiError> {
        let response = self.send(request).await?;
        envelope::decode(response)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// List/get/create/update/delete for one resource type. Failures from the
/// decoder propagate unchanged and nothing is retried.
pub struct ResourceClient<T: Entity> {
    http: HttpClient,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { http: self.http.clone(), _entity: PhantomData }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(http: HttpClient) -> Self {
        Self { http, _entity: PhantomData }
    }

    pub async fn list(&self, query: &T::Query) -> Result<PagedResult<T>, ApiError> {
        self.list_at(&T::list_path(), query).await
    }

    /// List against a non-default collection path (nested resources).
    pub async fn list_at(&self, path: &str, query: &T::Query) -> Result<PagedResult<T>, ApiError> {
        let path = format!("{}{}", path, query.to_query_string());
        debug!(path = %path, "Listing");
        let envelope: Envelope<Vec<T::Dto>> = self.http.fetch(HttpRequest::get(path)).await?;
        Ok(PagedResult::from_envelope(envelope, query, T::from_dto))
    }

    pub async fn get(&self, id: &str) -> Result<T, ApiError> {
        let envelope: Envelope<T::Dto> = self.http.fetch(HttpRequest::get(T::item_path(id))).await?;
        Ok(T::from_dto(envelope.data))
    }

    /// Returns the identifier the server assigned.
    pub async fn create(&self, payload: &T::CreatePayload) -> Result<String, ApiError> {
        let request = HttpRequest::post(T::BASE_PATH, payload)?;
        let envelope: Envelope<serde_json::Value> = self.http.fetch(request).await?;
        envelope::scalar_to_string(envelope.data).ok_or(ApiError::Shape)
    }

    /// Full replacement. The server also expects the id inside the payload.
    pub async fn update(&self, id: &str, payload: &T::UpdatePayload) -> Result<String, ApiError> {
        let request = HttpRequest::put(T::item_path(id), payload)?;
        let envelope: Envelope<serde_json::Value> = self.http.fetch(request).await?;
        envelope::scalar_to_string(envelope.data).ok_or(ApiError::Shape)
    }

    /// Returns the server's confirmation value, empty when it sent `null`.
    pub async fn delete(&self, id: &str) -> Result<String, ApiError> {
        let envelope: Envelope<serde_json::Value> =
            self.http.fetch(HttpRequest::delete(T::item_path(id))).await?;
        Ok(envelope::scalar_to_string(envelope.data).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::{create_mock_http, expect_request, paged_body, reply};
    use crate::query::QueryBuilder;
    use serde::Deserialize;
    use serde_json::json;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Widget {
        id: String,
        name: String,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct WidgetDto {
        id: String,
        name: Option<String>,
    }

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct WidgetPayload {
        name: String,
    }

    #[derive(Debug, Clone, Default)]
    struct WidgetQuery {
        page: Option<u32>,
        name: Option<String>,
    }

    impl ToQuery for WidgetQuery {
        fn to_query(&self) -> QueryBuilder {
            QueryBuilder::new().param("Page", self.page).param("Name", self.name.as_deref())
        }
    }

    impl ListQuery for WidgetQuery {
        fn page(&self) -> Option<u32> { self.page }
        fn page_size(&self) -> Option<u32> { None }
    }

    impl Entity for Widget {
        type Dto = WidgetDto;
        type CreatePayload = WidgetPayload;
        type UpdatePayload = WidgetPayload;
        type Query = WidgetQuery;
        const BASE_PATH: &'static str = "/api/widget";

        fn id(&self) -> &str { &self.id }

        fn from_dto(dto: WidgetDto) -> Self {
            Self { id: dto.id, name: dto.name.unwrap_or_default() }
        }
    }

    // --- Test ---

    #[tokio::test]
    async fn test_resource_client_round_trip() {
        let (http, mut rx) = create_mock_http(10);
        let client = ResourceClient::<Widget>::new(http);

        // 1. List
        let list_client = client.clone();
        let task = tokio::spawn(async move {
            list_client.list(&WidgetQuery { page: Some(2), name: Some(String::new()) }).await
        });
        let (request, responder) = expect_request(&mut rx).await.expect("Expected list request");
        assert_eq!(request, HttpRequest::get("/api/widget/list?Page=2"));
        reply(responder, 200, paged_body(json!([{ "Id": "w1", "Name": null }]), 1, 2, 10));

        let page = task.await.unwrap().unwrap();
        assert_eq!(page.items, vec![Widget { id: "w1".into(), name: String::new() }]);
        assert_eq!(page.total, 1);
        assert_eq!(page.page, 2);

        // 2. Create
        let create_client = client.clone();
        let task = tokio::spawn(async move {
            create_client.create(&WidgetPayload { name: "Bolt".into() }).await
        });
        let (request, responder) = expect_request(&mut rx).await.expect("Expected create request");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/api/widget");
        assert_eq!(request.body, Some(json!({ "Name": "Bolt" })));
        reply(responder, 200, json!({ "Data": 17, "Success": true, "Message": null }).to_string());
        assert_eq!(task.await.unwrap(), Ok("17".to_string()));

        // 3. Delete with null confirmation
        let task = tokio::spawn(async move { client.delete("w 1").await });
        let (request, responder) = expect_request(&mut rx).await.expect("Expected delete request");
        assert_eq!(request, HttpRequest::delete("/api/widget/w%201"));
        reply(responder, 200, json!({ "Data": null, "Success": true, "Message": "Deleted" }).to_string());
        assert_eq!(task.await.unwrap(), Ok(String::new()));
    }

    #[tokio::test]
    async fn test_get_propagates_http_error() {
        let (http, mut rx) = create_mock_http(10);
        let client = ResourceClient::<Widget>::new(http);

        let task = tokio::spawn(async move { client.get("missing").await });
        let (_, responder) = expect_request(&mut rx).await.expect("Expected get request");
        reply(responder, 404, json!({ "Data": null, "Success": false, "Message": "Not found" }).to_string());

        assert_eq!(
            task.await.unwrap(),
            Err(ApiError::Http { status: 404, message: "Not found".into() })
        );
    }

    #[tokio::test]
    async fn test_closed_transport_is_reported() {
        let (http, rx) = create_mock_http(1);
        drop(rx);
        let client = ResourceClient::<Widget>::new(http);
        assert_eq!(
            client.get("w1").await,
            Err(ApiError::Transport("Transport closed".into()))
        );
    }
}
