//! The adapter the list controller talks to.
//!
//! `TodoApi` is the whole contract: four calls, each returning the parsed
//! payload or an `ApiError`. `HttpTodoApi` satisfies it by pairing the
//! request builder with any [`Transport`].

use async_trait::async_trait;
use tracing::debug;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{NewTodo, Todo, TodoId};

#[async_trait]
pub trait TodoApi: Send + Sync {
    /// Every todo owned by the configured user.
    async fn list(&self) -> Result<Vec<Todo>, ApiError>;

    /// Persist a new todo; the server assigns its id.
    async fn create(&self, input: &NewTodo) -> Result<Todo, ApiError>;

    async fn remove(&self, id: TodoId) -> Result<(), ApiError>;

    /// Overwrite an existing todo and return the server's copy.
    async fn replace(&self, todo: &Todo) -> Result<Todo, ApiError>;
}

/// `TodoApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTodoApi<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> HttpTodoApi<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

#[async_trait]
impl<T: Transport> TodoApi for HttpTodoApi<T> {
    async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.send(self.client.build_list_todos()).await?;
        self.client.parse_list_todos(response)
    }

    async fn create(&self, input: &NewTodo) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(input)?;
        let response = self.send(request).await?;
        self.client.parse_create_todo(response)
    }

    async fn remove(&self, id: TodoId) -> Result<(), ApiError> {
        let response = self.send(self.client.build_remove_todo(id)).await?;
        self.client.parse_remove_todo(response)
    }

    async fn replace(&self, todo: &Todo) -> Result<Todo, ApiError> {
        let request = self.client.build_replace_todo(todo)?;
        let response = self.send(request).await?;
        self.client.parse_replace_todo(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http::HttpMethod;

    /// Answers every request with a canned response and remembers what it saw.
    struct CannedTransport {
        status: u16,
        body: &'static str,
        seen: Mutex<Vec<(HttpMethod, String)>>,
    }

    impl CannedTransport {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen
                .lock()
                .unwrap()
                .push((request.method, request.path.clone()));
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.to_string(),
            })
        }
    }

    struct DeadTransport;

    #[async_trait]
    impl Transport for DeadTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            Err(ApiError::Transport("connection refused".to_string()))
        }
    }

    fn client() -> TodoClient {
        TodoClient::new("http://api.test", 1554)
    }

    #[tokio::test]
    async fn replace_patches_by_id() {
        let api = HttpTodoApi::new(
            client(),
            CannedTransport::new(
                200,
                r#"{"id":3,"userId":1554,"title":"server copy","completed":true}"#,
            ),
        );
        let todo = Todo {
            id: 3,
            user_id: 1554,
            title: "local".to_string(),
            completed: true,
        };
        let received = api.replace(&todo).await.unwrap();
        assert_eq!(received.title, "server copy");
        let seen = api.transport.seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[(HttpMethod::Patch, "http://api.test/todos/3".to_string())]
        );
    }

    #[tokio::test]
    async fn remove_surfaces_http_errors() {
        let api = HttpTodoApi::new(client(), CannedTransport::new(503, "maintenance"));
        let err = api.remove(1).await.unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 503, .. }));
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let api = HttpTodoApi::new(client(), DeadTransport);
        let err = api.list().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
