//! Page-level view state over the data client.
//!
//! Pages hold a [`LoadState`] per request and derive what to render from
//! it. Nothing here prints; the CLI renders the derived views.

use crate::client::ClientResult;
use crate::models::CarSummary;

pub mod brand;
pub mod detail;
pub mod gallery;
pub mod home;
pub mod inquiry;

pub use brand::{BrandFilterOption, BrandPage, BrandSelection, CarsRequest, CarsResponse};
pub use detail::{CarDetailPage, DetailView};
pub use gallery::Gallery;
pub use home::HomePage;
pub use inquiry::{InquiryFormController, SubmitOutcome};

/// Number of placeholder cards shown while a car load is pending
pub const SKELETON_CARDS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    /// Settle a load from a client result, logging failures under `what`
    pub fn from_result(result: ClientResult<T>, what: &str) -> Self {
        match result {
            Ok(value) => LoadState::Ready(value),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load {}", what);
                LoadState::Failed(e.user_message())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Text shown by a grid with nothing to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyText {
    pub title: String,
    pub description: String,
}

impl EmptyText {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// What a car grid renders
#[derive(Debug, Clone, PartialEq)]
pub enum GridView<'a> {
    Skeleton { cards: usize },
    Empty(EmptyText),
    Populated(&'a [CarSummary]),
}

impl<'a> GridView<'a> {
    /// A failed load degrades to the empty state
    pub fn from_state(state: &'a LoadState<Vec<CarSummary>>, empty: EmptyText) -> Self {
        match state {
            LoadState::Loading => GridView::Skeleton { cards: SKELETON_CARDS },
            LoadState::Ready(cars) if !cars.is_empty() => GridView::Populated(cars),
            LoadState::Ready(_) | LoadState::Failed(_) => GridView::Empty(empty),
        }
    }
}

/// Navigation target offered by a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAction {
    pub label: &'static str,
    pub route: &'static str,
}

pub const BACK_TO_HOME: PageAction = PageAction {
    label: "Back to Home",
    route: "/",
};

/// Issued by [`RequestSlot::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Orders the requests made for one piece of state. Only a response
/// carrying the most recently issued ticket may be applied.
#[derive(Debug, Default)]
pub struct RequestSlot {
    latest: u64,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> Ticket {
        self.latest = self.latest.wrapping_add(1);
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

/// "1 vehicle available" / "N vehicles available"
pub fn vehicle_count(count: usize) -> String {
    if count == 1 {
        "1 vehicle available".to_string()
    } else {
        format!("{} vehicles available", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{fixtures, ClientError};

    fn empty() -> EmptyText {
        EmptyText::new("No cars found", "Check back soon.")
    }

    #[test]
    fn test_grid_views() {
        let loading = LoadState::Loading;
        assert_eq!(GridView::from_state(&loading, empty()), GridView::Skeleton { cards: 6 });

        let none = LoadState::Ready(Vec::new());
        assert_eq!(GridView::from_state(&none, empty()), GridView::Empty(empty()));

        let cars = LoadState::Ready(fixtures::cars());
        match GridView::from_state(&cars, empty()) {
            GridView::Populated(cars) => assert_eq!(cars.len(), 6),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_failed_load_degrades_to_empty() {
        let state: LoadState<Vec<CarSummary>> =
            LoadState::from_result(Err(ClientError::Network("refused".to_string())), "cars");
        assert!(state.failure().unwrap().contains("connection"));
        assert_eq!(GridView::from_state(&state, empty()), GridView::Empty(empty()));
    }

    #[test]
    fn test_request_slot_last_issued_wins() {
        let mut slot = RequestSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));
    }

    #[test]
    fn test_vehicle_count() {
        assert_eq!(vehicle_count(0), "0 vehicles available");
        assert_eq!(vehicle_count(1), "1 vehicle available");
        assert_eq!(vehicle_count(6), "6 vehicles available");
    }
}
