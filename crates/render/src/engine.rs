//! The `KoiEngine` facade: assets, cache and compositor behind one handle.
//!
//! A server builds one engine at startup, warms the configured sizes, then
//! shares it (it is `Send + Sync`) across request handlers.

use crate::compositor::Compositor;
use image::RgbaImage;
use koi_engine_assets::{AssetStore, MaskCache, WarmStats};
use koi_engine_core::{generate, Attributes, EngineConfig, EngineError};
use log::info;
use std::sync::Arc;

/// Shareable handle that generates attributes and renders koi images.
pub struct KoiEngine {
    config: EngineConfig,
    compositor: Compositor,
}

impl KoiEngine {
    /// Loads `config.asset_dir`, checks that every catalog layer has a mask,
    /// and builds the colorization pool.
    ///
    /// Nothing is warmed; call [`KoiEngine::warm_configured_sizes`] before
    /// serving traffic.
    pub fn load_assets(config: EngineConfig) -> Result<Self, EngineError> {
        let store = AssetStore::load(&config.asset_dir)?;
        Self::from_store(store, config)
    }

    /// Builds an engine over masks that are already in memory.
    pub fn from_store(store: AssetStore, config: EngineConfig) -> Result<Self, EngineError> {
        store.verify_catalog()?;
        let cache = Arc::new(MaskCache::new(Arc::new(store)));
        let compositor = Compositor::new(cache, config.worker_threads)?;
        info!(
            "koi engine ready: {} masks, {} colorize workers",
            compositor.cache().store().len(),
            compositor.worker_threads()
        );
        Ok(Self { config, compositor })
    }

    /// Pre-scales every mask to each of `sizes`, on the engine's pool.
    pub fn warm_cache(&self, sizes: &[u32]) -> Result<WarmStats, EngineError> {
        let cache = self.compositor.cache();
        let stats = self
            .compositor
            .install(|| cache.build_caches_for_sizes(sizes))?;
        info!(
            "warmed {} sizes ({} masks scaled) in {:?}",
            stats.sizes, stats.scaled, stats.elapsed
        );
        Ok(stats)
    }

    /// Warms the sizes listed in [`EngineConfig::warm_sizes`].
    pub fn warm_configured_sizes(&self) -> Result<WarmStats, EngineError> {
        self.warm_cache(&self.config.warm_sizes)
    }

    /// Derives attributes for `token_id`. Needs no assets.
    pub fn generate_attributes(&self, token_id: &str) -> Result<Attributes, EngineError> {
        generate(token_id)
    }

    /// Renders `token_id` on a transparent `size`×`size` canvas.
    pub fn render_image(&self, token_id: &str, size: u32) -> Result<RgbaImage, EngineError> {
        let attributes = generate(token_id)?;
        self.compositor.render(&attributes, size)
    }

    /// Renders attributes that were already generated (or edited) by the caller.
    pub fn render_with_attributes(
        &self,
        attributes: &Attributes,
        size: u32,
    ) -> Result<RgbaImage, EngineError> {
        self.compositor.render(attributes, size)
    }

    /// Renders `token_id` over an opaque backdrop of its primary color.
    pub fn render_thumbnail(&self, token_id: &str, size: u32) -> Result<RgbaImage, EngineError> {
        let attributes = generate(token_id)?;
        self.compositor
            .render_with_background(&attributes, size, attributes.primary_color)
    }

    /// The multi-resolution mask cache behind this engine.
    pub fn cache(&self) -> &MaskCache {
        self.compositor.cache()
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{encode_png, write_png};
    use crate::test_support::{pattern_origin, synthetic_store, SOURCE_SIZE};
    use image::Rgba;
    use koi_engine_core::{catalog_layer_names, Category, LayerName, VariantKind, MAX_SIZE};
    use sha2::{Digest, Sha256};

    const PINNED_TOKEN: &str = "239264596381739575473221873891232270519";

    fn config(threads: usize) -> EngineConfig {
        EngineConfig {
            warm_sizes: vec![32, 64],
            worker_threads: threads,
            ..EngineConfig::default()
        }
    }

    fn engine() -> KoiEngine {
        KoiEngine::from_store(synthetic_store(), config(2)).unwrap()
    }

    fn digest(img: &RgbaImage) -> Vec<u8> {
        Sha256::digest(encode_png(img).unwrap()).to_vec()
    }

    fn token_with_variant(kind: VariantKind) -> String {
        (0..10_000)
            .map(|n| format!("{n:04}731900412556"))
            .find(|t| generate(t).unwrap().variant == kind)
            .unwrap()
    }

    #[test]
    fn from_store_rejects_incomplete_catalog() {
        let mut masks = std::collections::HashMap::new();
        masks.insert(LayerName::Body, RgbaImage::new(4, 4));
        let result = KoiEngine::from_store(AssetStore::from_masks(masks), config(1));
        assert!(matches!(result, Err(EngineError::UnknownAsset(_))));
    }

    #[test]
    fn load_assets_reads_a_mask_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = synthetic_store();
        for name in catalog_layer_names() {
            write_png(store.get(name).unwrap(), &dir.path().join(name.file_name())).unwrap();
        }
        let engine = KoiEngine::load_assets(EngineConfig {
            asset_dir: dir.path().to_path_buf(),
            ..config(1)
        })
        .unwrap();
        assert_eq!(engine.cache().store().len(), catalog_layer_names().len());
        let img = engine.render_image(PINNED_TOKEN, 48).unwrap();
        assert_eq!(img.dimensions(), (48, 48));
    }

    #[test]
    fn load_assets_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = KoiEngine::load_assets(EngineConfig {
            asset_dir: dir.path().join("absent"),
            ..config(1)
        });
        assert!(matches!(result, Err(EngineError::AssetLoadFailure { .. })));
    }

    #[test]
    fn generate_attributes_matches_free_function() {
        assert_eq!(
            engine().generate_attributes(PINNED_TOKEN).unwrap(),
            generate(PINNED_TOKEN).unwrap()
        );
    }

    #[test]
    fn render_image_rejects_bad_input() {
        let engine = engine();
        assert!(matches!(
            engine.render_image("12ab", 64),
            Err(EngineError::InvalidTokenId(_))
        ));
        assert!(matches!(
            engine.render_image(PINNED_TOKEN, 0),
            Err(EngineError::InvalidDimensions)
        ));
    }

    #[test]
    fn renders_are_byte_identical_across_engines() {
        let first = digest(&engine().render_image(PINNED_TOKEN, 96).unwrap());
        let again = digest(&engine().render_image(PINNED_TOKEN, 96).unwrap());
        let threads = KoiEngine::from_store(synthetic_store(), config(5)).unwrap();
        let other_pool = digest(&threads.render_image(PINNED_TOKEN, 96).unwrap());
        assert_eq!(first, again);
        assert_eq!(first, other_pool);
    }

    /// SHA-256 of the raw RGBA pixels of `PINNED_TOKEN` at the masks'
    /// native size, where scaling is a plain copy.
    const PINNED_PIXELS_SHA256: &str =
        "ad9e0b14ac6c2e1f63fb684952f8bcd57948ea891d462d3e6dc1c7eef4cf0a19";

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn pinned_token_renders_pinned_pixels() {
        let img = engine().render_image(PINNED_TOKEN, SOURCE_SIZE).unwrap();
        assert_eq!(hex(&Sha256::digest(img.as_raw())), PINNED_PIXELS_SHA256);
    }

    /// Set in a child test process to receive that process's PNG digest.
    const DIGEST_OUT_ENV: &str = "KOI_ENGINE_RENDER_DIGEST_OUT";

    #[test]
    fn png_digest_is_stable_across_processes() {
        let digest_hex = hex(&digest(&engine().render_image(PINNED_TOKEN, 96).unwrap()));
        if let Ok(out) = std::env::var(DIGEST_OUT_ENV) {
            std::fs::write(out, &digest_hex).unwrap();
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("digest.txt");
        let status = std::process::Command::new(std::env::current_exe().unwrap())
            .args([
                "--exact",
                "engine::tests::png_digest_is_stable_across_processes",
                "--test-threads",
                "1",
            ])
            .env(DIGEST_OUT_ENV, &out)
            .status()
            .unwrap();
        assert!(status.success());
        assert_eq!(std::fs::read_to_string(&out).unwrap(), digest_hex);
    }

    #[test]
    fn warmed_and_cold_renders_are_identical() {
        let warm = engine();
        warm.warm_configured_sizes().unwrap();
        let cold = engine();
        for token in [PINNED_TOKEN, "42", "0"] {
            assert_eq!(
                warm.render_image(token, 64).unwrap(),
                cold.render_image(token, 64).unwrap()
            );
        }
    }

    #[test]
    fn warm_cache_covers_every_mask_and_prevents_rescaling() {
        let engine = engine();
        let stats = engine.warm_configured_sizes().unwrap();
        let masks = catalog_layer_names().len();
        assert_eq!(stats.sizes, 2);
        assert_eq!(stats.scaled, 2 * masks);
        assert_eq!(engine.cache().len(), 2 * masks);

        let before = engine.cache().scale_count();
        engine.render_image(PINNED_TOKEN, 32).unwrap();
        engine.render_image("987654321", 64).unwrap();
        assert_eq!(engine.cache().scale_count(), before);
    }

    #[test]
    fn warm_cache_rejects_zero_size() {
        assert!(matches!(
            engine().warm_cache(&[64, 0]),
            Err(EngineError::InvalidDimensions)
        ));
    }

    #[test]
    fn oversized_requests_fail_cleanly() {
        let engine = engine();
        for size in [MAX_SIZE + 1, u32::MAX] {
            assert!(matches!(
                engine.warm_cache(&[size]),
                Err(EngineError::InvalidDimensions)
            ));
            assert!(matches!(
                engine.render_image(PINNED_TOKEN, size),
                Err(EngineError::InvalidDimensions)
            ));
            assert!(matches!(
                engine.render_thumbnail(PINNED_TOKEN, size),
                Err(EngineError::InvalidDimensions)
            ));
        }
        assert!(engine.cache().is_empty());
    }

    #[test]
    fn patternless_variant_renders_bare_body() {
        let token = token_with_variant(VariantKind::Monochrome);
        let attributes = generate(&token).unwrap();
        assert_eq!(attributes.pattern_quantity(), 0);

        let size = 128;
        let img = engine().render_image(&token, size).unwrap();
        // body_5 sits clear of the fin silhouette
        let (x, y) = pattern_origin(Category::Body, 5);
        let pixel = img.get_pixel((x + 12) * size / 256, (y + 12) * size / 256);
        assert_eq!(*pixel, Rgba(attributes.body_color.to_rgba()));
    }

    #[test]
    fn small_and_large_renders_agree_structurally() {
        let engine = engine();
        let small = engine.render_image(PINNED_TOKEN, 200).unwrap();
        let large = engine.render_image(PINNED_TOKEN, 1024).unwrap();

        const GRID: u32 = 20;
        let sample = |img: &RgbaImage, gx: u32, gy: u32| {
            let size = img.width();
            *img.get_pixel(
                (2 * gx + 1) * size / (2 * GRID),
                (2 * gy + 1) * size / (2 * GRID),
            )
        };
        let close = |a: Rgba<u8>, b: Rgba<u8>| a.0.iter().zip(b.0).all(|(x, y)| x.abs_diff(y) <= 48);
        let agreeing = (0..GRID)
            .flat_map(|gy| (0..GRID).map(move |gx| (gx, gy)))
            .filter(|&(gx, gy)| close(sample(&small, gx, gy), sample(&large, gx, gy)))
            .count();
        assert!(agreeing * 10 >= (GRID * GRID) as usize * 9, "only {agreeing} cells agree");
    }

    #[test]
    fn thumbnail_uses_primary_color_backdrop() {
        let engine = engine();
        let attributes = generate(PINNED_TOKEN).unwrap();
        let thumb = engine
            .render_thumbnail(PINNED_TOKEN, engine.config().thumbnail_size)
            .unwrap();
        assert_eq!(thumb.dimensions(), (200, 200));
        assert_eq!(*thumb.get_pixel(0, 0), Rgba(attributes.primary_color.to_rgba()));
    }

    #[test]
    fn render_with_attributes_matches_render_image() {
        let engine = engine();
        let attributes = engine.generate_attributes("31337").unwrap();
        assert_eq!(
            engine.render_with_attributes(&attributes, 40).unwrap(),
            engine.render_image("31337", 40).unwrap()
        );
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KoiEngine>();
    }
}
