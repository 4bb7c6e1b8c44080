use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A manufacturer/marque
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Brand {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Logo URL, empty when the brand has none
    #[serde(default)]
    pub logo_url: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Brand {
    /// Logo reference, if one is set
    pub fn logo(&self) -> Option<&str> {
        if self.logo_url.trim().is_empty() {
            None
        } else {
            Some(&self.logo_url)
        }
    }
}

impl std::fmt::Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "1",
            "name": "Ferrari",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;

        let brand: Brand = serde_json::from_str(json).unwrap();
        assert_eq!(brand.name, "Ferrari");
        assert_eq!(brand.logo(), None);
        assert!(brand.description.is_empty());
    }

    #[test]
    fn test_brand_logo() {
        let json = r#"{
            "id": "2",
            "name": "Porsche",
            "logo_url": "https://example.com/porsche.svg",
            "description": "",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;

        let brand: Brand = serde_json::from_str(json).unwrap();
        assert_eq!(brand.logo(), Some("https://example.com/porsche.svg"));
        assert_eq!(brand.to_string(), "Porsche");
    }
}
