use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::InquiryField;

/// Editable contents of the inquiry form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InquiryForm {
    pub car: String,
    pub collector_name: String,
    pub collector_email: String,
    pub collector_phone: String,
    pub message: String,
}

impl InquiryForm {
    /// Empty form for one car
    pub fn new(car: impl Into<String>) -> Self {
        Self {
            car: car.into(),
            ..Self::default()
        }
    }

    pub fn value(&self, field: InquiryField) -> &str {
        match field {
            InquiryField::CollectorName => &self.collector_name,
            InquiryField::CollectorEmail => &self.collector_email,
            InquiryField::CollectorPhone => &self.collector_phone,
            InquiryField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: InquiryField, value: impl Into<String>) {
        let value = value.into();
        match field {
            InquiryField::CollectorName => self.collector_name = value,
            InquiryField::CollectorEmail => self.collector_email = value,
            InquiryField::CollectorPhone => self.collector_phone = value,
            InquiryField::Message => self.message = value,
        }
    }

    /// Request body for submission. A blank phone is sent as absent.
    pub fn to_request(&self) -> InquiryRequest {
        let phone = self.collector_phone.trim();
        InquiryRequest {
            car: self.car.clone(),
            collector_name: self.collector_name.clone(),
            collector_email: self.collector_email.clone(),
            collector_phone: if phone.is_empty() { None } else { Some(phone.to_string()) },
            message: self.message.clone(),
        }
    }
}

/// Collector-submitted lead for one car
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InquiryRequest {
    /// Target car identifier
    pub car: String,
    pub collector_name: String,
    pub collector_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector_phone: Option<String>,
    pub message: String,
}

/// Persisted inquiry as acknowledged by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InquiryResponse {
    pub id: String,
    pub car: String,
    pub collector_name: String,
    pub collector_email: String,
    #[serde(default)]
    pub collector_phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Envelope returned by `POST /api/cars/inquiries/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InquiryCreateResponse {
    pub message: String,
    pub data: InquiryResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_missing_phone() {
        let request = InquiryRequest {
            car: "1".to_string(),
            collector_name: "John Smith".to_string(),
            collector_email: "john@example.com".to_string(),
            collector_phone: None,
            message: "Is the car still available?".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("collector_phone").is_none());
        assert_eq!(json["car"], "1");
    }

    #[test]
    fn test_form_to_request() {
        let mut form = InquiryForm::new("3");
        form.set(InquiryField::CollectorName, "Ada");
        form.set(InquiryField::CollectorPhone, "   ");
        assert_eq!(form.value(InquiryField::CollectorName), "Ada");
        assert_eq!(form.to_request().collector_phone, None);

        form.set(InquiryField::CollectorPhone, " +1 555 0100 ");
        let request = form.to_request();
        assert_eq!(request.car, "3");
        assert_eq!(request.collector_phone.as_deref(), Some("+1 555 0100"));
    }

    #[test]
    fn test_create_response_parses() {
        let json = r#"{
            "message": "Inquiry submitted successfully",
            "data": {
                "id": "5f0c7c3e-8f0e-4a43-9d55-1f9b1c3b8c11",
                "car": "1",
                "collector_name": "John Smith",
                "collector_email": "john@example.com",
                "collector_phone": "",
                "message": "Is the car still available?",
                "created_at": "2024-02-01T12:00:00Z"
            }
        }"#;

        let response: InquiryCreateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.car, "1");
        assert!(response.data.collector_phone.is_empty());
    }
}
