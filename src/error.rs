//! Structured error types for spritetab.

/// All errors that can occur while building or driving a sprite panel.
#[derive(Debug, thiserror::Error)]
pub enum SpriteTabError {
    /// Durable settings storage unavailable or rejected a write.
    #[error("Settings storage: {0}")]
    Storage(String),

    /// JSON (de)serialization error from serde_json.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Scene data request failed or returned an unusable payload.
    #[error("Scene fetch failed: {0}")]
    SceneFetch(String),

    /// The scene has no sprite sheet, or the sheet resolved to no tiles.
    #[error("No sprites available")]
    NoSprites,

    /// The sprite sheet image could not be loaded.
    #[error("Image load failed: {0}")]
    ImageLoad(String),

    /// Media discovery gave up before a player appeared.
    #[error("Video not ready after {attempts} attempts")]
    MediaNotReady { attempts: u32 },

    /// Host page structure missing or DOM call failed.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpriteTabError>;

impl From<String> for SpriteTabError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for SpriteTabError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<SpriteTabError> for wasm_bindgen::JsValue {
    fn from(e: SpriteTabError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl SpriteTabError {
    /// Wrap a JS exception as a DOM error.
    pub(crate) fn from_js(context: &str, value: &wasm_bindgen::JsValue) -> Self {
        let detail = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Dom(format!("{context}: {detail}"))
    }
}
