use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::{CarFilter, ClientError, ClientResult, DataClient};
use crate::models::{Brand, CarDetail, CarSummary, InquiryCreateResponse, InquiryRequest};

/// `GET /api/cars/` body: the paginated wrapper, or a bare array when
/// pagination is switched off server-side
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Page { results: Vec<T> },
    Plain(Vec<T>),
}

impl<T> ListBody<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListBody::Page { results } => results,
            ListBody::Plain(items) => items,
        }
    }
}

/// Single resource a request looks up. Only these turn a 404 into
/// `NotFound`; on collection and submit endpoints a 404 means a bad route.
struct Target<'a> {
    resource: &'static str,
    id: &'a str,
}

/// REST client for the catalog backend
pub struct LiveClient {
    http: reqwest::Client,
    base_url: Url,
}

impl LiveClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL: {}", base_url))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("carctl/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Network(format!("Invalid endpoint '{}': {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&'static str, String)],
        target: Option<Target<'_>>,
    ) -> ClientResult<T> {
        tracing::debug!(%url, ?query, "GET");
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        read_json(response, target).await
    }
}

fn transport_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::Network(format!("Request timed out: {}", error))
    } else {
        ClientError::Network(error.to_string())
    }
}

/// Map the response status to the error taxonomy, then decode the body
async fn read_json<T: DeserializeOwned>(response: reqwest::Response, target: Option<Target<'_>>) -> ClientResult<T> {
    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        if let Some(target) = target {
            return Err(ClientError::not_found(target.resource, target.id));
        }
    }

    if status == reqwest::StatusCode::BAD_REQUEST {
        let body: serde_json::Value = response.json().await.unwrap_or(serde_json::Value::Null);
        return Err(ClientError::from_rejection_body(&body));
    }

    if !status.is_success() {
        let message = response
            .text()
            .await
            .ok()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
        tracing::warn!(status = status.as_u16(), "catalog backend returned an error");
        return Err(ClientError::Server {
            status: status.as_u16(),
            message,
        });
    }

    response.json::<T>().await.map_err(|e| {
        if e.is_decode() {
            ClientError::Server {
                status: status.as_u16(),
                message: format!("Invalid response body: {}", e),
            }
        } else {
            transport_error(e)
        }
    })
}

#[async_trait]
impl DataClient for LiveClient {
    async fn list_brands(&self) -> ClientResult<Vec<Brand>> {
        let url = self.endpoint("api/cars/brands/")?;
        let body: ListBody<Brand> = self.get_json(url, &[], None).await?;
        Ok(body.into_items())
    }

    async fn get_brand(&self, id: &str) -> ClientResult<Brand> {
        let url = self.endpoint(&format!("api/cars/brands/{}/", urlencoding::encode(id)))?;
        self.get_json(url, &[], Some(Target { resource: "Brand", id })).await
    }

    async fn list_cars(&self, filter: &CarFilter) -> ClientResult<Vec<CarSummary>> {
        let url = self.endpoint("api/cars/")?;
        let body: ListBody<CarSummary> = self.get_json(url, &filter.query_pairs(), None).await?;
        Ok(body.into_items())
    }

    async fn get_car(&self, id: &str) -> ClientResult<CarDetail> {
        let url = self.endpoint(&format!("api/cars/{}/", urlencoding::encode(id)))?;
        self.get_json(url, &[], Some(Target { resource: "Car", id })).await
    }

    async fn submit_inquiry(&self, request: &InquiryRequest) -> ClientResult<InquiryCreateResponse> {
        let url = self.endpoint("api/cars/inquiries/")?;
        tracing::debug!(%url, car = %request.car, "POST inquiry");

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        read_json(response, None).await
    }

    fn get_name(&self) -> &str {
        "live"
    }
}
