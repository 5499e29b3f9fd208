//! Error types for koi-engine.

use thiserror::Error;

/// Errors produced while generating attributes, loading assets, or rendering.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The token id was empty, contained non-digit characters, or exceeded
    /// the 256-bit range.
    #[error("invalid token id: {0}")]
    InvalidTokenId(String),

    /// A layer was requested that has no preloaded mask. This is a
    /// catalog/asset mismatch, not a per-request condition.
    #[error("unknown asset: {0}")]
    UnknownAsset(String),

    /// The asset directory or one of its masks could not be read or decoded.
    #[error("failed to load asset '{path}': {reason}")]
    AssetLoadFailure { path: String, reason: String },

    /// A render or scale was requested with a zero size or one above
    /// [`MAX_SIZE`](crate::config::MAX_SIZE).
    #[error(
        "invalid dimensions: width and height must be between 1 and {max}",
        max = crate::config::MAX_SIZE
    )]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette selection was attempted over an empty set of color ranges.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A configuration file or value could not be used.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An I/O or encoding failure outside of asset loading.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_token_id_includes_input() {
        let err = EngineError::InvalidTokenId("12ab".into());
        let msg = format!("{err}");
        assert!(msg.contains("12ab"), "missing token id in: {msg}");
    }

    #[test]
    fn unknown_asset_includes_layer_name() {
        let err = EngineError::UnknownAsset("head_7".into());
        let msg = format!("{err}");
        assert!(msg.contains("head_7"), "missing layer name in: {msg}");
    }

    #[test]
    fn asset_load_failure_includes_path_and_reason() {
        let err = EngineError::AssetLoadFailure {
            path: "images/koi/body.png".into(),
            reason: "unexpected EOF".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("images/koi/body.png"), "missing path in: {msg}");
        assert!(msg.contains("unexpected EOF"), "missing reason in: {msg}");
    }

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = format!("{}", EngineError::InvalidDimensions);
        assert!(msg.contains("width") && msg.contains("height"), "got: {msg}");
        assert!(msg.contains("4096"), "got: {msg}");
    }

    #[test]
    fn config_error_includes_message() {
        let err = EngineError::Config("worker_threads must be a number".into());
        assert!(err.to_string().contains("worker_threads"));
    }

    #[test]
    fn engine_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }

    #[test]
    fn engine_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<EngineError>();
    }
}
