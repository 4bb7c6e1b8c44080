use super::{EmptyText, GridView, LoadState};
use crate::client::{CarFilter, DataClient};
use crate::models::{Brand, CarSummary};

/// Brand shortcuts plus the featured vehicles
#[derive(Debug, Default)]
pub struct HomePage {
    pub brands: LoadState<Vec<Brand>>,
    pub featured: LoadState<Vec<CarSummary>>,
}

impl HomePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load brands and featured cars concurrently; each state settles as
    /// soon as its own request completes
    pub async fn load(&mut self, client: &dyn DataClient) {
        self.brands = LoadState::Loading;
        self.featured = LoadState::Loading;

        let brands = &mut self.brands;
        let featured = &mut self.featured;
        let filter = CarFilter::featured();

        tokio::join!(
            async {
                *brands = LoadState::from_result(client.list_brands().await, "brands");
            },
            async {
                *featured = LoadState::from_result(client.list_cars(&filter).await, "featured cars");
            },
        );

        tracing::debug!(
            brands = self.brands.ready().map_or(0, Vec::len),
            featured = self.featured.ready().map_or(0, Vec::len),
            "home page loaded"
        );
    }

    /// Brand shortcuts are hidden while the brand load is pending
    pub fn brand_list(&self) -> Option<&[Brand]> {
        match &self.brands {
            LoadState::Loading => None,
            LoadState::Ready(brands) => Some(brands),
            LoadState::Failed(_) => Some(&[]),
        }
    }

    pub fn featured_grid(&self) -> GridView<'_> {
        GridView::from_state(
            &self.featured,
            EmptyText::new("No featured cars", "Check back soon for featured listings."),
        )
    }

    /// Messages for loads that failed
    pub fn failures(&self) -> Vec<&str> {
        [self.brands.failure(), self.featured.failure()]
            .into_iter()
            .flatten()
            .collect()
    }
}
