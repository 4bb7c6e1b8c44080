use std::fmt;

use super::{vehicle_count, EmptyText, GridView, LoadState, RequestSlot, Ticket};
use crate::client::{CarFilter, ClientResult, DataClient};
use crate::models::{Brand, CarSummary};

/// Which vehicles the brand page lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BrandSelection {
    #[default]
    All,
    Brand(String),
}

impl BrandSelection {
    /// `"all"` or an empty segment select every vehicle
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            BrandSelection::All
        } else {
            BrandSelection::Brand(value.to_string())
        }
    }

    pub fn brand_id(&self) -> Option<&str> {
        match self {
            BrandSelection::All => None,
            BrandSelection::Brand(id) => Some(id),
        }
    }

    fn filter(&self) -> CarFilter {
        match self {
            BrandSelection::All => CarFilter::all(),
            BrandSelection::Brand(id) => CarFilter::for_brand(id.clone()),
        }
    }
}

impl fmt::Display for BrandSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrandSelection::All => f.write_str("all"),
            BrandSelection::Brand(id) => f.write_str(id),
        }
    }
}

/// A pending car load for one selection
#[derive(Debug, Clone)]
pub struct CarsRequest {
    ticket: Ticket,
    selection: BrandSelection,
}

/// Results of a [`CarsRequest`]; the brand is only fetched for a brand
/// selection
#[derive(Debug)]
pub struct CarsResponse {
    ticket: Ticket,
    cars: ClientResult<Vec<CarSummary>>,
    brand: Option<ClientResult<Brand>>,
}

impl CarsRequest {
    pub fn selection(&self) -> &BrandSelection {
        &self.selection
    }

    /// Fetch the cars, and for a brand selection the brand itself,
    /// concurrently
    pub async fn fetch(self, client: &dyn DataClient) -> CarsResponse {
        let filter = self.selection.filter();
        let (cars, brand) = match self.selection.brand_id() {
            None => (client.list_cars(&filter).await, None),
            Some(id) => {
                let (cars, brand) = tokio::join!(client.list_cars(&filter), client.get_brand(id));
                (cars, Some(brand))
            }
        };

        CarsResponse {
            ticket: self.ticket,
            cars,
            brand,
        }
    }
}

/// One entry of the brand filter bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandFilterOption {
    pub label: String,
    pub selection: BrandSelection,
    pub selected: bool,
}

/// Vehicle listing filtered by brand
#[derive(Debug, Default)]
pub struct BrandPage {
    pub selection: BrandSelection,
    pub brands: LoadState<Vec<Brand>>,
    pub cars: LoadState<Vec<CarSummary>>,
    pub current_brand: Option<Brand>,
    cars_slot: RequestSlot,
}

async fn load_brand_list(state: &mut LoadState<Vec<Brand>>, client: &dyn DataClient) {
    if state.ready().is_none() {
        *state = LoadState::from_result(client.list_brands().await, "brands");
    }
}

impl BrandPage {
    pub fn new(selection: BrandSelection) -> Self {
        Self {
            selection,
            ..Self::default()
        }
    }

    /// First visit: the brand list and the car load for the current
    /// selection run concurrently
    pub async fn open(&mut self, client: &dyn DataClient) {
        let request = self.begin(self.selection.clone());
        let brands = &mut self.brands;
        let (_, response) = tokio::join!(load_brand_list(brands, client), request.fetch(client));
        self.apply(response);
    }

    /// Switch selection and reload the cars
    pub async fn select(&mut self, client: &dyn DataClient, selection: BrandSelection) {
        let request = self.begin(selection);
        let response = request.fetch(client).await;
        self.apply(response);
    }

    /// Start a car load for `selection`. Any earlier request still in
    /// flight becomes stale.
    pub fn begin(&mut self, selection: BrandSelection) -> CarsRequest {
        tracing::debug!(%selection, "loading cars");
        self.selection = selection.clone();
        self.cars = LoadState::Loading;
        CarsRequest {
            ticket: self.cars_slot.begin(),
            selection,
        }
    }

    /// Apply a finished request. Returns false when it was superseded.
    pub fn apply(&mut self, response: CarsResponse) -> bool {
        if !self.cars_slot.is_current(response.ticket) {
            tracing::debug!("discarding stale car listing");
            return false;
        }

        self.cars = LoadState::from_result(response.cars, "cars");
        self.current_brand = match response.brand {
            Some(Ok(brand)) => Some(brand),
            Some(Err(e)) => {
                tracing::warn!(selection = %self.selection, error = %e, "failed to load brand");
                None
            }
            None => None,
        };
        true
    }

    pub fn title(&self) -> &str {
        match (&self.selection, &self.current_brand) {
            (BrandSelection::All, _) => "All Vehicles",
            (BrandSelection::Brand(_), Some(brand)) => brand.name.as_str(),
            (BrandSelection::Brand(_), None) => "Loading...",
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.current_brand
            .as_ref()
            .map(|brand| brand.description.as_str())
            .filter(|description| !description.is_empty())
    }

    pub fn count_heading(&self) -> String {
        vehicle_count(self.cars.ready().map_or(0, Vec::len))
    }

    /// "All Brands", then each brand once the list has loaded
    pub fn filter_options(&self) -> Vec<BrandFilterOption> {
        let mut options = vec![BrandFilterOption {
            label: "All Brands".to_string(),
            selection: BrandSelection::All,
            selected: self.selection == BrandSelection::All,
        }];
        let brands = self.brands.ready().map(Vec::as_slice).unwrap_or_default();
        options.extend(brands.iter().map(|brand| BrandFilterOption {
            label: brand.name.clone(),
            selection: BrandSelection::Brand(brand.id.clone()),
            selected: self.selection.brand_id() == Some(brand.id.as_str()),
        }));
        options
    }

    pub fn grid(&self) -> GridView<'_> {
        let title = match &self.current_brand {
            Some(brand) => format!("No {} cars available", brand.name),
            None => "No cars available".to_string(),
        };
        GridView::from_state(&self.cars, EmptyText::new(title, "Check back soon for new listings."))
    }
}
