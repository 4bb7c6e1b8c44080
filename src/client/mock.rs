use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

use super::{fixtures, CarFilter, ClientError, ClientResult, DataClient};
use crate::models::validation::MIN_MESSAGE_CHARS;
use crate::models::{
    generate_id, Brand, CarDetail, CarSummary, InquiryCreateResponse, InquiryField, InquiryRequest, InquiryResponse,
    ValidationError, Validators,
};

/// Longest inquiry message the backend accepts
const MAX_MESSAGE_CHARS: usize = 5000;

/// Description used for cars without a detail record
const FALLBACK_DESCRIPTION: &str = "A beautiful vintage car.";

/// Simulated response time per operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyProfile {
    pub list_brands: Duration,
    pub get_brand: Duration,
    pub list_cars: Duration,
    pub get_car: Duration,
    pub submit_inquiry: Duration,
}

impl LatencyProfile {
    /// Latencies in the 150-500ms band of a real backend
    pub fn standard() -> Self {
        Self {
            list_brands: Duration::from_millis(300),
            get_brand: Duration::from_millis(200),
            list_cars: Duration::from_millis(400),
            get_car: Duration::from_millis(200),
            submit_inquiry: Duration::from_millis(500),
        }
    }

    /// No latency at all
    pub fn none() -> Self {
        Self {
            list_brands: Duration::ZERO,
            get_brand: Duration::ZERO,
            list_cars: Duration::ZERO,
            get_car: Duration::ZERO,
            submit_inquiry: Duration::ZERO,
        }
    }

    /// Multiply every latency, saturating at `Duration::MAX`; negative or
    /// non-finite factors disable latency
    pub fn scaled(self, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return Self::none();
        }
        let scale = |latency: Duration| {
            Duration::try_from_secs_f64(latency.as_secs_f64() * factor).unwrap_or(Duration::MAX)
        };
        Self {
            list_brands: scale(self.list_brands),
            get_brand: scale(self.get_brand),
            list_cars: scale(self.list_cars),
            get_car: scale(self.get_car),
            submit_inquiry: scale(self.submit_inquiry),
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::standard()
    }
}

/// In-memory data client over the fixture catalog
pub struct MockClient {
    brands: Vec<Brand>,
    cars: Vec<CarSummary>,
    details: HashMap<String, CarDetail>,
    latency: LatencyProfile,
    inquiries: RwLock<Vec<InquiryResponse>>,
}

impl MockClient {
    /// Create a mock client over the standard fixtures
    pub fn new(latency: LatencyProfile) -> Self {
        Self::with_catalog(fixtures::brands(), fixtures::cars(), fixtures::car_details(), latency)
    }

    /// Create a mock client over a custom catalog
    pub fn with_catalog(
        brands: Vec<Brand>,
        cars: Vec<CarSummary>,
        details: HashMap<String, CarDetail>,
        latency: LatencyProfile,
    ) -> Self {
        Self {
            brands,
            cars,
            details,
            latency,
            inquiries: RwLock::new(Vec::new()),
        }
    }

    /// Inquiries accepted so far, oldest first
    pub async fn submitted_inquiries(&self) -> Vec<InquiryResponse> {
        self.inquiries.read().await.clone()
    }

    async fn simulate(&self, latency: Duration) {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    /// Only active listings are publicly visible
    fn listed_cars(&self) -> impl Iterator<Item = &CarSummary> {
        self.cars.iter().filter(|car| car.status.is_available())
    }

    /// Apply the backend's inquiry rules
    fn check_inquiry(&self, request: &InquiryRequest) -> ClientResult<()> {
        if !self.listed_cars().any(|car| car.id == request.car) {
            return Err(ClientError::rejected(
                "car",
                format!("Invalid pk \"{}\" - object does not exist.", request.car),
            ));
        }
        Validators::not_empty(&request.collector_name, InquiryField::CollectorName)
            .and_then(|_| Validators::email(&request.collector_email, InquiryField::CollectorEmail))
            .and_then(|_| {
                Validators::char_length(
                    &request.message,
                    InquiryField::Message,
                    Some(MIN_MESSAGE_CHARS),
                    Some(MAX_MESSAGE_CHARS),
                )
            })
            .map_err(|error| {
                tracing::debug!(%error, car = %request.car, "mock rejected inquiry");
                rejection(&error)
            })?;
        Ok(())
    }
}

/// Field rule failure in the backend's wording
fn rejection(error: &ValidationError) -> ClientError {
    let message = match error {
        ValidationError::Required(_) => "This field may not be blank.".to_string(),
        ValidationError::InvalidEmail(_) => "Enter a valid email address.".to_string(),
        ValidationError::TooShort { field, min } => {
            format!("{} must be at least {} characters long.", field.noun(), min)
        }
        ValidationError::TooLong { field, max } => format!("{} must be less than {} characters.", field.noun(), max),
    };
    ClientError::rejected(error.field().as_str(), message)
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new(LatencyProfile::standard())
    }
}

#[async_trait]
impl DataClient for MockClient {
    async fn list_brands(&self) -> ClientResult<Vec<Brand>> {
        self.simulate(self.latency.list_brands).await;
        Ok(self.brands.clone())
    }

    async fn get_brand(&self, id: &str) -> ClientResult<Brand> {
        self.simulate(self.latency.get_brand).await;
        self.brands
            .iter()
            .find(|brand| brand.id == id)
            .cloned()
            .ok_or_else(|| ClientError::not_found("Brand", id))
    }

    async fn list_cars(&self, filter: &CarFilter) -> ClientResult<Vec<CarSummary>> {
        self.simulate(self.latency.list_cars).await;
        let cars: Vec<CarSummary> = self.listed_cars().filter(|car| filter.matches(car)).cloned().collect();
        tracing::debug!(?filter, count = cars.len(), "mock car listing");
        Ok(cars)
    }

    async fn get_car(&self, id: &str) -> ClientResult<CarDetail> {
        self.simulate(self.latency.get_car).await;

        let summary = self
            .listed_cars()
            .find(|car| car.id == id)
            .ok_or_else(|| ClientError::not_found("Car", id))?;

        Ok(self
            .details
            .get(id)
            .cloned()
            .unwrap_or_else(|| CarDetail::from_summary(summary, FALLBACK_DESCRIPTION)))
    }

    async fn submit_inquiry(&self, request: &InquiryRequest) -> ClientResult<InquiryCreateResponse> {
        self.simulate(self.latency.submit_inquiry).await;
        self.check_inquiry(request)?;

        let data = InquiryResponse {
            id: generate_id(),
            car: request.car.clone(),
            collector_name: request.collector_name.trim().to_string(),
            collector_email: request.collector_email.trim().to_lowercase(),
            collector_phone: request.collector_phone.clone().unwrap_or_default(),
            message: request.message.trim().to_string(),
            created_at: Utc::now(),
        };

        self.inquiries.write().await.push(data.clone());
        tracing::info!(inquiry_id = %data.id, car = %data.car, "mock inquiry stored");

        Ok(InquiryCreateResponse {
            message: "Inquiry submitted successfully".to_string(),
            data,
        })
    }

    fn get_name(&self) -> &str {
        "mock"
    }
}
