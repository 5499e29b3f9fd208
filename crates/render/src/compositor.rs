//! Layered koi compositing.
//!
//! Layers are colorized in parallel but painted strictly in order: body
//! silhouette, fin silhouette, body patterns, head patterns, fin patterns,
//! then the outline on top. Colorized layers are collected positionally, so
//! the order in which workers finish never shows up in the output.

use crate::colorize::colorize;
use image::{imageops, Rgba, RgbaImage};
use koi_engine_assets::MaskCache;
use koi_engine_core::{check_size, Attributes, ColoredLayer, EngineError, LayerName, Rgb8};
use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;
use std::time::Instant;

/// Renders [`Attributes`] into RGBA images using masks from a [`MaskCache`].
pub struct Compositor {
    cache: Arc<MaskCache>,
    pool: ThreadPool,
}

impl Compositor {
    /// Creates a compositor with its own colorization pool.
    ///
    /// `worker_threads == 0` lets rayon choose (one per core).
    pub fn new(cache: Arc<MaskCache>, worker_threads: usize) -> Result<Self, EngineError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_threads)
            .thread_name(|i| format!("koi-colorize-{i}"))
            .build()
            .map_err(|e| EngineError::Config(format!("colorization pool: {e}")))?;
        Ok(Self { cache, pool })
    }

    /// The mask cache layers are read from.
    pub fn cache(&self) -> &Arc<MaskCache> {
        &self.cache
    }

    /// Number of threads in the colorization pool.
    pub fn worker_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs `op` inside the colorization pool.
    pub fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        self.pool.install(op)
    }

    /// Renders the koi on a transparent `size`×`size` canvas.
    ///
    /// Sizes outside `1..=MAX_SIZE` are `EngineError::InvalidDimensions`.
    pub fn render(&self, attributes: &Attributes, size: u32) -> Result<RgbaImage, EngineError> {
        let size = check_size(size)?;
        self.compose(attributes, size, RgbaImage::new(size, size))
    }

    /// Renders the koi over an opaque canvas filled with `background`.
    pub fn render_with_background(
        &self,
        attributes: &Attributes,
        size: u32,
        background: Rgb8,
    ) -> Result<RgbaImage, EngineError> {
        let size = check_size(size)?;
        let canvas = RgbaImage::from_pixel(size, size, Rgba(background.to_rgba()));
        self.compose(attributes, size, canvas)
    }

    fn compose(
        &self,
        attributes: &Attributes,
        size: u32,
        mut canvas: RgbaImage,
    ) -> Result<RgbaImage, EngineError> {
        let started = Instant::now();
        let layers = draw_list(attributes);

        let colored = self.pool.install(|| {
            layers
                .par_iter()
                .map(|layer| {
                    let mask = self.cache.get_image(layer.name, size)?;
                    Ok(colorize(&mask, layer.color))
                })
                .collect::<Result<Vec<RgbaImage>, EngineError>>()
        })?;
        let outline = self.cache.get_image(LayerName::Outline, size)?;

        for layer in &colored {
            imageops::overlay(&mut canvas, layer, 0, 0);
        }
        imageops::overlay(&mut canvas, &*outline, 0, 0);

        debug!(
            "rendered {} at {size}px with {} layers in {:?}",
            attributes.variant,
            colored.len() + 1,
            started.elapsed()
        );
        Ok(canvas)
    }
}

/// Colored layers in paint order, excluding the uncolored outline.
fn draw_list(attributes: &Attributes) -> Vec<ColoredLayer> {
    let mut layers = Vec::with_capacity(2 + attributes.pattern_quantity());
    layers.push(ColoredLayer::new(LayerName::Body, attributes.body_color));
    layers.push(ColoredLayer::new(LayerName::Fin, attributes.fin_color));
    layers.extend(attributes.pattern_layers().copied());
    layers
}
