//! Synthetic line art for compositor and engine tests.

use image::{Rgba, RgbaImage};
use koi_engine_assets::AssetStore;
use koi_engine_core::{catalog_layer_names, Category, LayerName};
use std::collections::HashMap;

pub(crate) const SOURCE_SIZE: u32 = 256;

/// Body silhouette rectangle `(x0, y0, x1, y1)`, exclusive upper bounds.
pub(crate) const BODY_RECT: (u32, u32, u32, u32) = (40, 80, 216, 176);

fn rect_mask(x0: u32, y0: u32, x1: u32, y1: u32) -> RgbaImage {
    RgbaImage::from_fn(SOURCE_SIZE, SOURCE_SIZE, |x, y| {
        if (x0..x1).contains(&x) && (y0..y1).contains(&y) {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

fn ring_mask(x0: u32, y0: u32, x1: u32, y1: u32, width: u32) -> RgbaImage {
    RgbaImage::from_fn(SOURCE_SIZE, SOURCE_SIZE, |x, y| {
        let outer = (x0..x1).contains(&x) && (y0..y1).contains(&y);
        let inner = (x0 + width..x1 - width).contains(&x) && (y0 + width..y1 - width).contains(&y);
        if outer && !inner {
            Rgba([20, 20, 20, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Top-left corner of a pattern's 24px square, inside the body rectangle.
pub(crate) fn pattern_origin(category: Category, index: u8) -> (u32, u32) {
    let i = u32::from(index.saturating_sub(1));
    match category {
        Category::Body => (96 + (i % 5) * 22, 84 + (i / 5) * 44),
        Category::Head => (44 + (i % 2) * 24, 84 + (i / 2) * 22),
        Category::Fin => (150 + i * 30, 150),
    }
}

fn mask_for(name: LayerName) -> RgbaImage {
    let (bx0, by0, bx1, by1) = BODY_RECT;
    match name {
        LayerName::Body => rect_mask(bx0, by0, bx1, by1),
        LayerName::Fin => rect_mask(100, 40, 160, 216),
        LayerName::Outline => ring_mask(bx0, by0, bx1, by1, 2),
        LayerName::Pattern { category, index } => {
            let (x, y) = pattern_origin(category, index);
            rect_mask(x, y, x + 24, y + 24)
        }
    }
}

/// A store with a mask for every catalog layer.
pub(crate) fn synthetic_store() -> AssetStore {
    let masks: HashMap<LayerName, RgbaImage> = catalog_layer_names()
        .into_iter()
        .map(|name| (name, mask_for(name)))
        .collect();
    AssetStore::from_masks(masks)
}
