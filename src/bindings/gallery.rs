//! Product Gallery Bindings

use std::rc::Rc;

use ajax_controls::gallery::{show_thumbnail, ACTIVE_CLASS};
use ajax_controls::{EventKind, GalleryView};
use web_sys::{Document, Element};

use super::{wire, Page};
use crate::dom;

struct DomGallery {
    document: Document,
    thumbnails: Vec<Element>,
}

impl GalleryView for DomGallery {
    fn thumbnail_count(&self) -> usize {
        self.thumbnails.len()
    }

    fn thumbnail_src(&self, index: usize) -> Option<String> {
        self.thumbnails.get(index)?.get_attribute("src")
    }

    fn set_main_image(&self, src: &str) -> bool {
        match self.document.query_selector(".main-product-image") {
            Ok(Some(image)) => image.set_attribute("src", src).is_ok(),
            _ => false,
        }
    }

    fn set_thumbnail_active(&self, index: usize, active: bool) {
        if let Some(thumbnail) = self.thumbnails.get(index) {
            let _ = thumbnail.class_list().toggle_with_force(ACTIVE_CLASS, active);
        }
    }
}

/// `.product-thumbnail` images swapping into `.main-product-image` on click
pub fn bind_product_gallery(page: &Page) -> usize {
    let thumbnails = dom::query_all(&page.document, ".product-thumbnail");
    let view = Rc::new(DomGallery {
        document: page.document.clone(),
        thumbnails: thumbnails.clone(),
    });
    let mut bound = 0;
    for (index, thumbnail) in thumbnails.iter().enumerate() {
        let gallery = Rc::clone(&view);
        let id = dom::control_id(thumbnail, "thumbnail", index);
        if wire(page, thumbnail, id, EventKind::Click, move |_| {
            show_thumbnail(gallery.as_ref(), index);
        }) {
            bound += 1;
        }
    }
    bound
}
