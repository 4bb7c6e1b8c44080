use super::{Gallery, PageAction, BACK_TO_HOME};
use crate::client::DataClient;
use crate::models::CarDetail;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Loading,
    Ready { car: Box<CarDetail>, gallery: Gallery },
    NotFound { message: String },
}

/// Single vehicle with its gallery
#[derive(Debug)]
pub struct CarDetailPage {
    pub car_id: String,
    pub view: DetailView,
}

impl CarDetailPage {
    pub fn new(car_id: impl Into<String>) -> Self {
        Self {
            car_id: car_id.into(),
            view: DetailView::Loading,
        }
    }

    /// Any failure lands on the not-found view
    pub async fn load(&mut self, client: &dyn DataClient) {
        let id = self.car_id.trim();
        if id.is_empty() {
            self.view = DetailView::NotFound {
                message: "Invalid car ID".to_string(),
            };
            return;
        }

        self.view = match client.get_car(id).await {
            Ok(car) => {
                let gallery = Gallery::from_detail(&car);
                DetailView::Ready {
                    car: Box::new(car),
                    gallery,
                }
            }
            Err(e) => {
                tracing::warn!(car = %id, error = %e, "failed to load car");
                DetailView::NotFound {
                    message: "Car not found".to_string(),
                }
            }
        };
    }

    pub fn car(&self) -> Option<&CarDetail> {
        match &self.view {
            DetailView::Ready { car, .. } => Some(&**car),
            _ => None,
        }
    }

    pub fn gallery_mut(&mut self) -> Option<&mut Gallery> {
        match &mut self.view {
            DetailView::Ready { gallery, .. } => Some(gallery),
            _ => None,
        }
    }

    pub fn heading(&self) -> &str {
        match self.view {
            DetailView::Loading => "Loading car details...",
            DetailView::Ready { .. } => "",
            DetailView::NotFound { .. } => "Car Not Found",
        }
    }

    /// Offered by the not-found view
    pub fn action(&self) -> Option<PageAction> {
        match self.view {
            DetailView::NotFound { .. } => Some(BACK_TO_HOME),
            _ => None,
        }
    }
}
