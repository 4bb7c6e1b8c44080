use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::brand::Brand;
use super::price::Price;

/// Listing lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CarStatus {
    Draft,
    Active,
    Sold,
    Archived,
}

/// Visual tone for a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Error,
    Info,
}

impl StatusTone {
    pub fn icon(&self) -> &'static str {
        match self {
            StatusTone::Success => "🟢",
            StatusTone::Error => "🔴",
            StatusTone::Info => "🔵",
        }
    }
}

impl CarStatus {
    pub const ALL: [CarStatus; 4] = [CarStatus::Draft, CarStatus::Active, CarStatus::Sold, CarStatus::Archived];

    /// Capitalized badge label
    pub fn label(&self) -> &'static str {
        match self {
            CarStatus::Draft => "Draft",
            CarStatus::Active => "Active",
            CarStatus::Sold => "Sold",
            CarStatus::Archived => "Archived",
        }
    }

    /// Badge tone on the detail view
    pub fn tone(&self) -> StatusTone {
        match self {
            CarStatus::Active => StatusTone::Success,
            CarStatus::Sold => StatusTone::Error,
            CarStatus::Draft | CarStatus::Archived => StatusTone::Info,
        }
    }

    /// Listing cards only badge cars that are not plainly for sale
    pub fn card_badge(&self) -> Option<(&'static str, StatusTone)> {
        match self {
            CarStatus::Active => None,
            other => Some((other.label(), other.tone())),
        }
    }

    /// Whether the car can receive inquiries
    pub fn is_available(&self) -> bool {
        matches!(self, CarStatus::Active)
    }
}

impl std::fmt::Display for CarStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CarStatus::Draft => write!(f, "draft"),
            CarStatus::Active => write!(f, "active"),
            CarStatus::Sold => write!(f, "sold"),
            CarStatus::Archived => write!(f, "archived"),
        }
    }
}

/// A gallery image for a car
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarImage {
    pub id: String,
    pub image_url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub sort_order: u32,
}

/// Lightweight listing representation of a vehicle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarSummary {
    pub id: String,
    pub brand: Brand,
    pub model: String,
    pub year: i32,
    pub price: Price,
    pub is_featured: bool,
    pub status: CarStatus,
    pub primary_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CarSummary {
    /// "1962 Ferrari 250 GTO"
    pub fn title(&self) -> String {
        format!("{} {} {}", self.year, self.brand.name, self.model)
    }
}

/// Full representation including description and image gallery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarDetail {
    pub id: String,
    pub brand: Brand,
    pub model: String,
    pub year: i32,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    pub is_featured: bool,
    pub status: CarStatus,
    #[serde(default)]
    pub images: Vec<CarImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CarDetail {
    /// Build a detail view from a listing entry when no richer record exists
    pub fn from_summary(summary: &CarSummary, description: impl Into<String>) -> Self {
        let images = summary
            .primary_image
            .as_ref()
            .map(|url| {
                vec![CarImage {
                    id: "1".to_string(),
                    image_url: url.clone(),
                    alt_text: format!("{} {}", summary.brand.name, summary.model),
                    is_primary: true,
                    sort_order: 0,
                }]
            })
            .unwrap_or_default();

        Self {
            id: summary.id.clone(),
            brand: summary.brand.clone(),
            model: summary.model.clone(),
            year: summary.year,
            price: summary.price.clone(),
            description: description.into(),
            is_featured: summary.is_featured,
            status: summary.status,
            images,
            created_at: summary.created_at,
            updated_at: summary.created_at,
        }
    }

    /// "1962 Ferrari 250 GTO"
    pub fn title(&self) -> String {
        format!("{} {} {}", self.year, self.brand.name, self.model)
    }

    /// Images in display order: ascending sort order, ties kept in
    /// collection order
    pub fn ordered_images(&self) -> Vec<&CarImage> {
        let mut images: Vec<&CarImage> = self.images.iter().collect();
        images.sort_by_key(|image| image.sort_order);
        images
    }

    /// The image shown by default: the primary one, else the first in
    /// display order
    pub fn display_image(&self) -> Option<&CarImage> {
        let ordered = self.ordered_images();
        ordered
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| ordered.first())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brand() -> Brand {
        Brand {
            id: "1".to_string(),
            name: "Ferrari".to_string(),
            logo_url: String::new(),
            description: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn image(id: &str, sort_order: u32, is_primary: bool) -> CarImage {
        CarImage {
            id: id.to_string(),
            image_url: format!("https://example.com/{}.jpg", id),
            alt_text: String::new(),
            is_primary,
            sort_order,
        }
    }

    fn detail(images: Vec<CarImage>) -> CarDetail {
        CarDetail {
            id: "1".to_string(),
            brand: brand(),
            model: "250 GTO".to_string(),
            year: 1962,
            price: Price::new("48000000.00"),
            description: String::new(),
            is_featured: true,
            status: CarStatus::Active,
            images,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_serde_values() {
        for status in CarStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
            let back: CarStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
        assert!(serde_json::from_str::<CarStatus>("\"reserved\"").is_err());
    }

    #[test]
    fn test_status_badges() {
        assert_eq!(CarStatus::Active.card_badge(), None);
        assert_eq!(CarStatus::Sold.card_badge(), Some(("Sold", StatusTone::Error)));
        assert_eq!(CarStatus::Draft.card_badge(), Some(("Draft", StatusTone::Info)));
        assert_eq!(CarStatus::Archived.tone(), StatusTone::Info);
        assert_eq!(CarStatus::Active.tone(), StatusTone::Success);
        assert_eq!(CarStatus::Sold.tone().icon(), "🔴");
    }

    #[test]
    fn test_ordered_images_stable_on_ties() {
        let car = detail(vec![image("a", 2, false), image("b", 1, false), image("c", 1, false)]);
        let ids: Vec<&str> = car.ordered_images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_display_image_prefers_primary() {
        let car = detail(vec![image("a", 0, false), image("b", 1, true)]);
        assert_eq!(car.display_image().unwrap().id, "b");

        let car = detail(vec![image("a", 3, false), image("b", 1, false)]);
        assert_eq!(car.display_image().unwrap().id, "b");

        let car = detail(vec![]);
        assert!(car.display_image().is_none());
    }

    #[test]
    fn test_title() {
        assert_eq!(detail(vec![]).title(), "1962 Ferrari 250 GTO");
    }
}
