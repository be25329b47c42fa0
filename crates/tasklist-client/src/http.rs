use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, Url, header::ACCEPT};
use serde::de::DeserializeOwned;
use tracing::debug;

use tasklist_model::{Health, NewTask, Task, TaskId, TaskPatch, Version, normalize_title};

use crate::api::TaskApi;
use crate::config::ClientConfig;
use crate::errors::ClientError;

const HEALTH_PATH: &str = "/health";
const VERSION_PATH: &str = "/api/version";

/// [`TaskApi`] over HTTP/JSON.
///
/// Routes:
/// - GET {tasks} - list
/// - POST {tasks} - create
/// - PATCH {tasks}/{id} - partial update
/// - DELETE {tasks}/{id} - delete
#[derive(Debug, Clone)]
pub struct HttpTaskClient {
    http: reqwest::Client,
    base: Url,
    collection: Url,
}

impl HttpTaskClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Build on top of an existing `reqwest::Client` (shared pools, custom TLS).
    pub fn with_client(http: reqwest::Client, config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let base = parse_url(config.base())?;
        let collection = parse_url(&format!("{}{}", config.base(), config.tasks_path))?;

        Ok(Self {
            http,
            base,
            collection,
        })
    }

    /// URL of the collection endpoint.
    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    /// URL of a single task resource.
    pub fn item_url(&self, id: &TaskId) -> Result<Url, ClientError> {
        let mut url = self.collection.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidConfig(format!("'{}' cannot be a base", self.collection)))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    fn service_url(&self, path: &str) -> Result<Url, ClientError> {
        let base = self.base.as_str().trim_end_matches('/');
        parse_url(&format!("{base}{path}"))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "sending request");
        self.http
            .request(method, url)
            .header(ACCEPT, "application/json")
    }
}

#[async_trait]
impl TaskApi for HttpTaskClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let response = self
            .request(Method::GET, self.collection.clone())
            .send()
            .await?;
        let tasks: Vec<Task> = decode(ensure_success(response).await?).await?;

        debug!(count = tasks.len(), "tasks listed");
        Ok(tasks)
    }

    async fn create_task(&self, title: &str) -> Result<Task, ClientError> {
        let title = normalize_title(title).ok_or(ClientError::EmptyTitle)?;

        let response = self
            .request(Method::POST, self.collection.clone())
            .json(&NewTask { title })
            .send()
            .await?;
        let task: Task = decode(ensure_success(response).await?).await?;

        debug!(id = %task.id, "task created");
        Ok(task)
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, ClientError> {
        let response = self
            .request(Method::PATCH, self.item_url(id)?)
            .json(patch)
            .send()
            .await?;
        let task: Task = decode(ensure_success(response).await?).await?;

        debug!(id = %task.id, is_done = task.is_done, "task updated");
        Ok(task)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), ClientError> {
        let response = self
            .request(Method::DELETE, self.item_url(id)?)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        debug!(%id, status = response.status().as_u16(), "task deleted");
        Ok(())
    }

    async fn health(&self) -> Result<Health, ClientError> {
        let response = self
            .request(Method::GET, self.service_url(HEALTH_PATH)?)
            .send()
            .await?;
        decode(ensure_success(response).await?).await
    }

    async fn version(&self) -> Result<Version, ClientError> {
        let response = self
            .request(Method::GET, self.service_url(VERSION_PATH)?)
            .send()
            .await?;
        decode(ensure_success(response).await?).await
    }
}

fn parse_url(raw: &str) -> Result<Url, ClientError> {
    Url::parse(raw).map_err(|e| ClientError::InvalidConfig(format!("invalid url '{raw}': {e}")))
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        ClientError::InvalidResponse(format!("failed to parse response: {}, body: {}", e, body))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        extract::Path,
        http::StatusCode,
        routing::{delete, get, patch},
    };
    use serde_json::{Value, json};
    use tasklist_api::{HttpApi, MemoryStore};

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn backend() -> HttpTaskClient {
        let router = HttpApi::new(Arc::new(MemoryStore::new())).router();
        let base = serve(router).await;
        HttpTaskClient::new(ClientConfig::new(base)).unwrap()
    }

    /// Base URL of a port nothing listens on.
    async fn closed_port() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    #[test]
    fn builds_item_urls() {
        let client = HttpTaskClient::new(ClientConfig::new("http://localhost:8000/")).unwrap();
        assert_eq!(
            client.collection_url().as_str(),
            "http://localhost:8000/api/tasks"
        );
        assert_eq!(
            client.item_url(&TaskId::from(7)).unwrap().as_str(),
            "http://localhost:8000/api/tasks/7"
        );
        assert_eq!(
            client.item_url(&TaskId::from("a b")).unwrap().as_str(),
            "http://localhost:8000/api/tasks/a%20b"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let client = HttpTaskClient::new(ClientConfig::new("http://host/todo")).unwrap();
        assert_eq!(client.collection_url().as_str(), "http://host/todo/api/tasks");
    }

    #[tokio::test]
    async fn lists_empty_collection() {
        let client = backend().await;
        assert!(client.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn creates_and_lists() {
        let client = backend().await;

        let created = client.create_task("  Test task ").await.unwrap();
        assert_eq!(created.title, "Test task");
        assert!(!created.is_done);

        let tasks = client.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0], created);
    }

    #[tokio::test]
    async fn blank_title_never_hits_network() {
        let client = HttpTaskClient::new(ClientConfig::new(closed_port().await)).unwrap();

        assert!(matches!(
            client.create_task("   ").await,
            Err(ClientError::EmptyTitle)
        ));
        assert!(matches!(
            client.create_task("").await,
            Err(ClientError::EmptyTitle)
        ));
    }

    #[tokio::test]
    async fn toggle_inverts_completion() {
        let client = backend().await;
        let task = client.create_task("a").await.unwrap();

        let toggled = client.toggle_task(&task).await.unwrap();
        assert_eq!(toggled.id, task.id);
        assert!(toggled.is_done);

        let back = client.toggle_task(&toggled).await.unwrap();
        assert!(!back.is_done);
    }

    #[tokio::test]
    async fn toggle_sends_patch_with_inverted_flag() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = seen.clone();
        let router = Router::new().route(
            "/api/tasks/{id}",
            patch(move |Path(id): Path<u64>, Json(body): Json<Value>| async move {
                record.lock().unwrap().push((id, body.clone()));
                Json(json!({ "id": id, "title": "a", "is_done": body["is_done"] }))
            }),
        );
        let client = HttpTaskClient::new(ClientConfig::new(serve(router).await)).unwrap();

        let toggled = client.toggle_task(&Task::new(4, "a")).await.unwrap();
        assert!(toggled.is_done);
        let back = client.toggle_task(&toggled).await.unwrap();
        assert!(!back.is_done);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            [(4, json!({ "is_done": true })), (4, json!({ "is_done": false }))]
        );
    }

    #[tokio::test]
    async fn update_unknown_task_is_status_error() {
        let client = backend().await;
        let err = client
            .toggle_task(&Task::new(99, "ghost"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn delete_accepts_no_content() {
        let client = backend().await;
        let task = client.create_task("a").await.unwrap();

        client.delete_task(&task.id).await.unwrap();
        assert!(client.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_accepts_ok_with_body() {
        let router = Router::new().route(
            "/api/tasks/{id}",
            delete(|| async { Json(json!({ "message": "task deleted" })) }),
        );
        let client = HttpTaskClient::new(ClientConfig::new(serve(router).await)).unwrap();

        client.delete_task(&TaskId::from(1)).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_list_is_status_error() {
        let router = Router::new().route(
            "/api/tasks",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = HttpTaskClient::new(ClientConfig::new(serve(router).await)).unwrap();

        let err = client.list_tasks().await.unwrap_err();
        assert!(err.is_status());
        assert!(matches!(err, ClientError::Status { status: 500, ref body } if body == "boom"));
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let router = Router::new().route(
            "/api/tasks",
            get(|| async { Json(json!({ "tasks": [] })) }),
        );
        let client = HttpTaskClient::new(ClientConfig::new(serve(router).await)).unwrap();

        assert!(matches!(
            client.list_tasks().await,
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn normalizes_alternate_field_names() {
        let router = Router::new().route(
            "/api/tasks",
            get(|| async {
                Json(json!([
                    { "id": 1, "description": "a", "done": false },
                    { "id": 2, "title": "b", "completed": true },
                ]))
            }),
        );
        let client = HttpTaskClient::new(ClientConfig::new(serve(router).await)).unwrap();

        let tasks = client.list_tasks().await.unwrap();
        assert_eq!(tasks[0].title, "a");
        assert!(!tasks[0].is_done);
        assert_eq!(tasks[1].title, "b");
        assert!(tasks[1].is_done);
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        let client = HttpTaskClient::new(ClientConfig::new(closed_port().await)).unwrap();

        let err = client.list_tasks().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(!err.is_status());
    }

    #[tokio::test]
    async fn health_and_version() {
        let client = backend().await;

        assert!(client.health().await.unwrap().is_healthy());
        assert!(!client.version().await.unwrap().version.is_empty());
    }
}
