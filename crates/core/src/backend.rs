//! The REST collaborator that owns queue and roster data.
//!
//! [`QueueBackend`] is the seam the controller talks through; [`HttpBackend`] is the
//! production implementation over `reqwest`.
//!
//! Write endpoints may or may not echo the stored entry. The returned entry is optional:
//! an empty or unrecognised body is logged and reported as `None` rather than failing a
//! write that the backend has already accepted.

use crate::config::ClientConfig;
use crate::constants::{DOCTORS_PATH, QUEUE_PATH, USER_AGENT};
use crate::model::{Doctor, EntryId, QueueEntry, QueuePayload, QueueStatus, StatusPayload};
use crate::{QueueError, QueueResult};
use reqwest::{Method, RequestBuilder, Response};

/// Operations the queue view needs from the backend.
#[allow(async_fn_in_trait)]
pub trait QueueBackend {
    /// `GET /queue`
    async fn list_queue(&self) -> QueueResult<Vec<QueueEntry>>;

    /// `GET /doctors`
    async fn list_doctors(&self) -> QueueResult<Vec<Doctor>>;

    /// `POST /queue`
    async fn create_entry(&self, payload: &QueuePayload) -> QueueResult<Option<QueueEntry>>;

    /// `PUT /queue/{id}`
    async fn update_entry(
        &self,
        id: EntryId,
        payload: &QueuePayload,
    ) -> QueueResult<Option<QueueEntry>>;

    /// `PATCH /queue/{id}/status`
    async fn update_status(
        &self,
        id: EntryId,
        status: QueueStatus,
    ) -> QueueResult<Option<QueueEntry>>;

    /// `DELETE /queue/{id}`
    async fn delete_entry(&self, id: EntryId) -> QueueResult<()>;
}

/// JSON-over-HTTP backend client.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns [`QueueError::Transport`] if the HTTP client cannot be built.
    pub fn new(cfg: &ClientConfig) -> QueueResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = cfg.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: cfg.api_base_url().to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn entry_url(&self, id: EntryId) -> String {
        self.url(&format!("{QUEUE_PATH}/{id}"))
    }

    /// Sends the request and turns any non-2xx response into [`QueueError::Status`].
    async fn send(
        &self,
        method: Method,
        url: String,
        request: RequestBuilder,
    ) -> QueueResult<Response> {
        tracing::debug!("{} {}", method, url);
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QueueError::Status {
                method,
                url,
                status,
            });
        }
        Ok(response)
    }

    async fn write(
        &self,
        method: Method,
        url: String,
        request: RequestBuilder,
    ) -> QueueResult<Option<QueueEntry>> {
        let response = self.send(method.clone(), url.clone(), request).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<QueueEntry>(&body) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                tracing::warn!("{} {} returned an unrecognised entry body: {}", method, url, e);
                Ok(None)
            }
        }
    }
}

impl QueueBackend for HttpBackend {
    async fn list_queue(&self) -> QueueResult<Vec<QueueEntry>> {
        let url = self.url(QUEUE_PATH);
        let request = self.client.get(&url);
        let response = self.send(Method::GET, url, request).await?;
        Ok(response.json().await?)
    }

    async fn list_doctors(&self) -> QueueResult<Vec<Doctor>> {
        let url = self.url(DOCTORS_PATH);
        let request = self.client.get(&url);
        let response = self.send(Method::GET, url, request).await?;
        Ok(response.json().await?)
    }

    async fn create_entry(&self, payload: &QueuePayload) -> QueueResult<Option<QueueEntry>> {
        let url = self.url(QUEUE_PATH);
        let request = self.client.post(&url).json(payload);
        self.write(Method::POST, url, request).await
    }

    async fn update_entry(
        &self,
        id: EntryId,
        payload: &QueuePayload,
    ) -> QueueResult<Option<QueueEntry>> {
        let url = self.entry_url(id);
        let request = self.client.put(&url).json(payload);
        self.write(Method::PUT, url, request).await
    }

    async fn update_status(
        &self,
        id: EntryId,
        status: QueueStatus,
    ) -> QueueResult<Option<QueueEntry>> {
        let url = format!("{}/status", self.entry_url(id));
        let request = self.client.patch(&url).json(&StatusPayload { status });
        self.write(Method::PATCH, url, request).await
    }

    async fn delete_entry(&self, id: EntryId) -> QueueResult<()> {
        let url = self.entry_url(id);
        let request = self.client.delete(&url);
        self.send(Method::DELETE, url, request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::{get, patch, put},
        Json, Router,
    };
    use frontdesk_types::{NonEmptyText, QueueNumber};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    type RequestLog = Arc<Mutex<Vec<String>>>;

    fn entry_json(id: i64, status: &str) -> Value {
        json!({
            "id": id,
            "patientName": "Alice Smith",
            "queueNumber": 3,
            "status": status,
            "priority": "normal",
            "createdAt": "2026-10-18T09:15:00Z",
            "doctor": { "id": 2, "name": "Dr Okafor" }
        })
    }

    async fn list_queue(State(log): State<RequestLog>) -> Json<Value> {
        log.lock().unwrap().push("GET /queue".into());
        Json(json!([entry_json(1, "waiting"), entry_json(2, "completed")]))
    }

    async fn list_doctors(State(log): State<RequestLog>) -> Json<Value> {
        log.lock().unwrap().push("GET /doctors".into());
        Json(json!([{ "id": 2, "name": "Dr Okafor" }, { "id": 3, "name": "Dr Lee" }]))
    }

    async fn create(
        State(log): State<RequestLog>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        log.lock().unwrap().push(format!("POST /queue {body}"));
        (StatusCode::CREATED, Json(entry_json(5, "waiting")))
    }

    async fn update(
        State(log): State<RequestLog>,
        Path(id): Path<i64>,
        Json(body): Json<Value>,
    ) -> StatusCode {
        log.lock().unwrap().push(format!("PUT /queue/{id} {body}"));
        StatusCode::NO_CONTENT
    }

    async fn delete(State(log): State<RequestLog>, Path(id): Path<i64>) -> StatusCode {
        log.lock().unwrap().push(format!("DELETE /queue/{id}"));
        if id == 404 {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::OK
        }
    }

    async fn set_status(
        State(log): State<RequestLog>,
        Path(id): Path<i64>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        log.lock().unwrap().push(format!("PATCH /queue/{id}/status {body}"));
        Json(entry_json(id, body["status"].as_str().unwrap_or("waiting")))
    }

    async fn spawn_backend() -> (HttpBackend, RequestLog) {
        let log = RequestLog::default();
        let app = Router::new()
            .route("/queue", get(list_queue).post(create))
            .route("/queue/:id", put(update).delete(delete))
            .route("/queue/:id/status", patch(set_status))
            .route("/doctors", get(list_doctors))
            .with_state(log.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve test backend");
        });

        let cfg = ClientConfig::new(&format!("http://{addr}/"), None).expect("config");
        (HttpBackend::new(&cfg).expect("client"), log)
    }

    fn payload() -> QueuePayload {
        QueuePayload {
            patient_name: NonEmptyText::new("Alice Smith").unwrap(),
            queue_number: QueueNumber::new(3).unwrap(),
            status: QueueStatus::Waiting,
            priority: Priority::Urgent,
            doctor_id: 2,
        }
    }

    #[tokio::test]
    async fn lists_queue_and_doctors() {
        let (backend, log) = spawn_backend().await;

        let queue = backend.list_queue().await.expect("list queue");
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0].patient_name, "Alice Smith");
        assert_eq!(queue[1].status, QueueStatus::Completed);

        let doctors = backend.list_doctors().await.expect("list doctors");
        assert_eq!(doctors[1].name, "Dr Lee");

        assert_eq!(*log.lock().unwrap(), vec!["GET /queue", "GET /doctors"]);
    }

    #[tokio::test]
    async fn create_posts_camel_case_payload() {
        let (backend, log) = spawn_backend().await;

        let created = backend.create_entry(&payload()).await.expect("create");
        assert_eq!(created.map(|e| e.id), Some(5));

        let logged = log.lock().unwrap().clone();
        assert_eq!(logged.len(), 1);
        let body: Value = serde_json::from_str(logged[0].trim_start_matches("POST /queue "))
            .expect("logged body");
        assert_eq!(
            body,
            json!({
                "patientName": "Alice Smith",
                "queueNumber": 3,
                "status": "waiting",
                "priority": "urgent",
                "doctorId": 2
            })
        );
    }

    #[tokio::test]
    async fn update_with_empty_response_returns_none() {
        let (backend, log) = spawn_backend().await;

        let updated = backend.update_entry(7, &payload()).await.expect("update");
        assert_eq!(updated, None);
        assert!(log.lock().unwrap()[0].starts_with("PUT /queue/7 "));
    }

    #[tokio::test]
    async fn patch_sends_status_only() {
        let (backend, log) = spawn_backend().await;

        let updated = backend
            .update_status(1, QueueStatus::WithDoctor)
            .await
            .expect("patch status");
        assert_eq!(updated.map(|e| e.status), Some(QueueStatus::WithDoctor));
        assert_eq!(
            *log.lock().unwrap(),
            vec![r#"PATCH /queue/1/status {"status":"with_doctor"}"#]
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (backend, _log) = spawn_backend().await;

        backend.delete_entry(2).await.expect("delete");

        let err = backend.delete_entry(404).await.expect_err("missing entry");
        match err {
            QueueError::Status {
                method,
                url,
                status,
            } => {
                assert_eq!(method, Method::DELETE);
                assert!(url.ends_with("/queue/404"));
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let cfg = ClientConfig::new(&format!("http://{addr}"), None).expect("config");
        let backend = HttpBackend::new(&cfg).expect("client");
        let err = backend.list_queue().await.expect_err("nothing listening");
        assert!(matches!(err, QueueError::Transport(_)));
    }
}
