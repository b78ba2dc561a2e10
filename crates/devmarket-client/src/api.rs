use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;
use uuid::Uuid;

use devmarket_types::api::{
    ErrorBody, GigCreate, MessageCreate, OrderCreate, PaymentProofCreate, ReviewCreate,
};
use devmarket_types::models::{Gig, Message, Order, Review, User};

use crate::error::ApiError;

/// Thin wrapper over the backend's REST surface. One attempt per call: no
/// retries, no timeout, no backoff. The cookie jar carries the backend's
/// session cookie across calls, which is the only credential this client
/// ever holds.
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base: base.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        let sep = if path.starts_with('/') { "" } else { "/" };
        format!("{}{}{}", self.base, sep, path)
    }

    /// Issue one request and normalize the outcome. On a non-success status
    /// the JSON error body's `detail` field becomes the error message,
    /// falling back to `API error: <status>` when the body is missing or
    /// unparseable. Failures are logged before being returned.
    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);

        let mut req = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!("request to {url} failed: {e}");
                return Err(ApiError::Transport(e));
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| format!("API error: {}", status.as_u16()));
            error!("request to {url} failed: {message}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<T>().await.map_err(|e| {
            error!("request to {url} returned an undecodable body: {e}");
            ApiError::Decode(e)
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        self.request(Method::PATCH, path, body).await
    }

    // -- Identity --

    pub async fn me(&self) -> Result<User, ApiError> {
        self.get("/me").await
    }

    // -- Gigs --

    pub async fn list_gigs(&self) -> Result<Vec<Gig>, ApiError> {
        self.get("/gigs/").await
    }

    pub async fn get_gig(&self, id: Uuid) -> Result<Gig, ApiError> {
        self.get(&format!("/gigs/{id}")).await
    }

    pub async fn create_gig(&self, gig: &GigCreate) -> Result<Gig, ApiError> {
        self.post("/gigs/", gig).await
    }

    // -- Orders --

    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("/orders/").await
    }

    pub async fn create_order(&self, order: &OrderCreate) -> Result<Order, ApiError> {
        self.post("/orders/", order).await
    }

    pub async fn submit_payment(
        &self,
        id: Uuid,
        proof: &PaymentProofCreate,
    ) -> Result<Order, ApiError> {
        self.patch(&format!("/orders/{id}/submit-payment"), Some(proof))
            .await
    }

    pub async fn confirm_payment(&self, id: Uuid) -> Result<Order, ApiError> {
        self.patch::<_, ()>(&format!("/orders/{id}/confirm-payment"), None)
            .await
    }

    pub async fn submit_work(&self, id: Uuid) -> Result<Order, ApiError> {
        self.patch::<_, ()>(&format!("/orders/{id}/submit-work"), None)
            .await
    }

    pub async fn approve(&self, id: Uuid) -> Result<Order, ApiError> {
        self.patch::<_, ()>(&format!("/orders/{id}/approve"), None)
            .await
    }

    pub async fn request_revision(&self, id: Uuid) -> Result<Order, ApiError> {
        self.patch::<_, ()>(&format!("/orders/{id}/revision"), None)
            .await
    }

    // -- Messages --

    pub async fn message_history(&self, peer: Uuid) -> Result<Vec<Message>, ApiError> {
        self.get(&format!("/messages/{peer}")).await
    }

    pub async fn send_message(&self, message: &MessageCreate) -> Result<Message, ApiError> {
        self.post("/messages/", message).await
    }

    // -- Reviews --

    pub async fn create_review(&self, review: &ReviewCreate) -> Result<Review, ApiError> {
        self.post("/reviews/", review).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_inserts_separator_only_when_missing() {
        let api = ApiClient::new("http://localhost:8000/api/v1").unwrap();
        assert_eq!(api.url("/gigs/"), "http://localhost:8000/api/v1/gigs/");
        assert_eq!(api.url("me"), "http://localhost:8000/api/v1/me");
    }
}
