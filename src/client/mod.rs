use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::{Brand, CarDetail, CarSummary, InquiryCreateResponse, InquiryRequest};

pub mod fixtures;
pub mod live;
pub mod mock;

pub use live::LiveClient;
pub use mock::{LatencyProfile, MockClient};

/// Failures reported by a data client
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// Requested id is absent
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// Request content rejected by the backend
    #[error("Request rejected: {message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, Vec<String>>,
    },

    /// Transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response (or an unreadable 2xx body)
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        ClientError::NotFound { resource, id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    /// Single field rejection
    pub fn rejected(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut fields = BTreeMap::new();
        fields.insert(field.to_string(), vec![message.clone()]);
        ClientError::Validation { message, fields }
    }

    /// Build a validation error from a 400 body such as
    /// `{"message": ["Message must be at least 10 characters long."]}`
    pub fn from_rejection_body(body: &JsonValue) -> Self {
        let mut fields = BTreeMap::new();
        let mut general = Vec::new();

        if let Some(object) = body.as_object() {
            for (key, value) in object {
                let messages: Vec<String> = match value {
                    JsonValue::String(text) => vec![text.clone()],
                    JsonValue::Array(items) => items
                        .iter()
                        .filter_map(|item| item.as_str().map(|s| s.to_string()))
                        .collect(),
                    _ => continue,
                };

                if key == "detail" || key == "non_field_errors" {
                    general.extend(messages);
                } else if !messages.is_empty() {
                    fields.insert(key.clone(), messages);
                }
            }
        }

        let message = if !general.is_empty() {
            general.join(" ")
        } else if let Some((_, messages)) = fields.iter().next() {
            messages.join(" ")
        } else {
            "The request was rejected".to_string()
        };

        ClientError::Validation { message, fields }
    }

    /// Human-readable text for notifications
    pub fn user_message(&self) -> String {
        match self {
            ClientError::NotFound { resource, .. } => format!("{} not found", resource),
            ClientError::Validation { message, .. } => message.clone(),
            ClientError::Network(_) => {
                "Unable to reach the catalog service. Please check your connection.".to_string()
            }
            ClientError::Server { status, .. } => {
                format!("The catalog service returned an error ({}). Please try again later.", status)
            }
        }
    }
}

/// Listing filter; absent fields impose no constraint, present fields are
/// combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarFilter {
    pub brand: Option<String>,
    pub featured: Option<bool>,
}

impl CarFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn featured() -> Self {
        Self {
            brand: None,
            featured: Some(true),
        }
    }

    pub fn for_brand(brand_id: impl Into<String>) -> Self {
        Self {
            brand: Some(brand_id.into()),
            featured: None,
        }
    }

    pub fn matches(&self, car: &CarSummary) -> bool {
        let brand_ok = self.brand.as_ref().map_or(true, |id| &car.brand.id == id);
        let featured_ok = self.featured.map_or(true, |featured| car.is_featured == featured);
        brand_ok && featured_ok
    }

    /// Query string pairs for `GET /api/cars/`
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(brand) = self.brand.as_ref().filter(|b| !b.is_empty()) {
            pairs.push(("brand", brand.clone()));
        }
        if let Some(featured) = self.featured {
            pairs.push(("featured", featured.to_string()));
        }
        pairs
    }
}

/// Catalog data access, implemented by the live REST client and the
/// in-memory mock
#[async_trait]
pub trait DataClient: Send + Sync {
    /// All brands, in backend order
    async fn list_brands(&self) -> ClientResult<Vec<Brand>>;

    /// One brand by id
    async fn get_brand(&self, id: &str) -> ClientResult<Brand>;

    /// Cars matching the filter, in backend order
    async fn list_cars(&self, filter: &CarFilter) -> ClientResult<Vec<CarSummary>>;

    /// One car with its gallery
    async fn get_car(&self, id: &str) -> ClientResult<CarDetail>;

    /// Persist a new inquiry. Not idempotent.
    async fn submit_inquiry(&self, request: &InquiryRequest) -> ClientResult<InquiryCreateResponse>;

    /// Client name/identifier
    fn get_name(&self) -> &str;
}

/// Factory for creating data clients
pub struct ClientFactory;

impl ClientFactory {
    /// Create the client selected by configuration
    pub fn create_client(config: &AppConfig) -> anyhow::Result<Arc<dyn DataClient>> {
        if config.api.use_mock {
            let latency = LatencyProfile::standard().scaled(config.mock.latency_scale);
            tracing::info!(latency_scale = config.mock.latency_scale, "using mock catalog client");
            Ok(Arc::new(MockClient::new(latency)))
        } else {
            tracing::info!(base_url = %config.api.base_url, "using live catalog client");
            Ok(Arc::new(LiveClient::new(&config.api.base_url, config.api.timeout())?))
        }
    }

    /// Get all available client types
    pub fn get_available_clients() -> Vec<&'static str> {
        vec!["mock", "live"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_query_pairs() {
        assert!(CarFilter::all().query_pairs().is_empty());
        assert_eq!(CarFilter::featured().query_pairs(), vec![("featured", "true".to_string())]);

        let filter = CarFilter {
            brand: Some("2".to_string()),
            featured: Some(false),
        };
        assert_eq!(
            filter.query_pairs(),
            vec![("brand", "2".to_string()), ("featured", "false".to_string())]
        );
    }

    #[test]
    fn test_rejection_body_fields() {
        let body = json!({
            "message": ["Message must be at least 10 characters long."],
            "collector_email": ["Enter a valid email address."]
        });

        match ClientError::from_rejection_body(&body) {
            ClientError::Validation { message, fields } => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields["message"], vec!["Message must be at least 10 characters long."]);
                assert_eq!(message, "Enter a valid email address.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rejection_body_detail() {
        let body = json!({ "detail": "Throttled." });
        let error = ClientError::from_rejection_body(&body);
        assert_eq!(error.user_message(), "Throttled.");

        let error = ClientError::from_rejection_body(&json!("oops"));
        assert_eq!(error.user_message(), "The request was rejected");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(ClientError::not_found("Car", "999").user_message(), "Car not found");
        assert!(ClientError::not_found("Car", "999").is_not_found());
        assert!(ClientError::Network("refused".to_string()).user_message().contains("connection"));
        assert!(ClientError::Server { status: 503, message: String::new() }
            .user_message()
            .contains("503"));
    }

    #[test]
    fn test_available_clients() {
        let clients = ClientFactory::get_available_clients();
        assert!(clients.contains(&"mock"));
        assert!(clients.contains(&"live"));
    }
}
