use crate::models::{CarDetail, CarImage};

/// Image carousel for the detail page
#[derive(Debug, Clone, PartialEq)]
pub struct Gallery {
    images: Vec<CarImage>,
    active: usize,
}

impl Gallery {
    /// Images in the car's display order, starting at its display image
    pub fn from_detail(detail: &CarDetail) -> Self {
        let ordered = detail.ordered_images();
        let active = detail
            .display_image()
            .and_then(|shown| ordered.iter().position(|image| std::ptr::eq(*image, shown)))
            .unwrap_or(0);

        Self {
            images: ordered.into_iter().cloned().collect(),
            active,
        }
    }

    pub fn images(&self) -> &[CarImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> Option<&CarImage> {
        self.images.get(self.active)
    }

    /// Navigation and the counter only apply with more than one image
    pub fn has_controls(&self) -> bool {
        self.images.len() > 1
    }

    pub fn next(&mut self) {
        if !self.images.is_empty() {
            self.active = (self.active + 1) % self.images.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.images.is_empty() {
            self.active = if self.active == 0 { self.images.len() - 1 } else { self.active - 1 };
        }
    }

    /// Jump to a thumbnail; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    /// "2 / 3"
    pub fn counter(&self) -> String {
        if self.images.is_empty() {
            return "0 / 0".to_string();
        }
        format!("{} / {}", self.active + 1, self.images.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures;

    fn gallery(images: Vec<CarImage>) -> Gallery {
        let detail = CarDetail {
            images,
            ..CarDetail::from_summary(&fixtures::cars()[0], "")
        };
        Gallery::from_detail(&detail)
    }

    fn image(id: &str, sort_order: u32, is_primary: bool) -> CarImage {
        CarImage {
            id: id.to_string(),
            image_url: format!("https://example.com/{}.jpg", id),
            alt_text: format!("view {}", id),
            is_primary,
            sort_order,
        }
    }

    #[test]
    fn test_starts_at_primary_in_display_order() {
        let gallery = gallery(vec![image("a", 2, false), image("b", 0, false), image("c", 1, true)]);
        let ids: Vec<&str> = gallery.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(gallery.active().unwrap().id, "c");
        assert_eq!(gallery.counter(), "2 / 3");
    }

    #[test]
    fn test_without_primary_starts_at_first() {
        let gallery = gallery(vec![image("a", 0, false), image("b", 0, false)]);
        assert_eq!(gallery.active_index(), 0);
        assert_eq!(gallery.active().unwrap().id, "a");
    }

    #[test]
    fn test_navigation_wraps() {
        let mut gallery = gallery(vec![image("a", 0, true), image("b", 1, false), image("c", 2, false)]);

        gallery.previous();
        assert_eq!(gallery.counter(), "3 / 3");
        gallery.next();
        assert_eq!(gallery.counter(), "1 / 3");

        assert!(gallery.select(1));
        assert_eq!(gallery.active().unwrap().id, "b");
        assert!(!gallery.select(3));
        assert_eq!(gallery.active_index(), 1);
    }

    #[test]
    fn test_first_primary_wins() {
        let gallery = gallery(vec![image("a", 1, true), image("b", 0, true)]);
        assert_eq!(gallery.active().unwrap().id, "b");
        assert_eq!(gallery.active_index(), 0);
    }

    #[test]
    fn test_empty_gallery() {
        let mut gallery = gallery(Vec::new());
        gallery.next();
        gallery.previous();
        assert!(gallery.active().is_none());
        assert!(!gallery.has_controls());
        assert_eq!(gallery.counter(), "0 / 0");
    }
}
