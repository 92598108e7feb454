//! Product Gallery
//!
//! Thumbnail strip beside the main product image.

pub const ACTIVE_CLASS: &str = "active";

pub trait GalleryView {
    fn thumbnail_count(&self) -> usize;
    fn thumbnail_src(&self, index: usize) -> Option<String>;
    /// `false` when the page has no main image
    fn set_main_image(&self, src: &str) -> bool;
    fn set_thumbnail_active(&self, index: usize, active: bool);
}

/// Show thumbnail `index` as the main image and mark it as the only active thumbnail.
/// A thumbnail without a source changes nothing.
pub fn show_thumbnail(view: &dyn GalleryView, index: usize) -> bool {
    let Some(src) = view.thumbnail_src(index).filter(|src| !src.is_empty()) else {
        return false;
    };
    if !view.set_main_image(&src) {
        tracing::debug!("no main product image");
    }
    for other in 0..view.thumbnail_count() {
        view.set_thumbnail_active(other, other == index);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeGallery {
        thumbs: Vec<Option<&'static str>>,
        active: RefCell<Vec<bool>>,
        main: RefCell<String>,
    }

    impl FakeGallery {
        fn new(thumbs: Vec<Option<&'static str>>) -> Self {
            let mut active = vec![false; thumbs.len()];
            active[0] = true;
            Self {
                thumbs,
                active: RefCell::new(active),
                main: RefCell::new("front.jpg".to_string()),
            }
        }
    }

    impl GalleryView for FakeGallery {
        fn thumbnail_count(&self) -> usize {
            self.thumbs.len()
        }

        fn thumbnail_src(&self, index: usize) -> Option<String> {
            self.thumbs.get(index).copied().flatten().map(str::to_string)
        }

        fn set_main_image(&self, src: &str) -> bool {
            *self.main.borrow_mut() = src.to_string();
            true
        }

        fn set_thumbnail_active(&self, index: usize, active: bool) {
            self.active.borrow_mut()[index] = active;
        }
    }

    #[test]
    fn test_thumbnail_becomes_main_image_and_only_active() {
        let gallery = FakeGallery::new(vec![Some("front.jpg"), Some("side.jpg"), Some("back.jpg")]);

        assert!(show_thumbnail(&gallery, 2));
        assert_eq!(*gallery.main.borrow(), "back.jpg");
        assert_eq!(*gallery.active.borrow(), vec![false, false, true]);
    }

    #[test]
    fn test_thumbnail_without_source_is_ignored() {
        let gallery = FakeGallery::new(vec![Some("front.jpg"), None]);

        assert!(!show_thumbnail(&gallery, 1));
        assert_eq!(*gallery.main.borrow(), "front.jpg");
        assert_eq!(*gallery.active.borrow(), vec![true, false]);
    }
}
