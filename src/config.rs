//! Tunables for the panel, overridable from the embedding page.

use serde::{Deserialize, Serialize};

use crate::geometry::{ASSUMED_ASPECT_RATIO, ASSUMED_TILE_WIDTH_PX};
use crate::media::DISCOVERY_INTERVAL_MS;

/// GraphQL endpoint of the scene data service, relative to the page origin.
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "/graphql";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpriteTabConfig {
    pub graphql_endpoint: String,
    pub poll_interval_ms: u32,
    /// `None` keeps polling for the player until it appears.
    pub max_discovery_attempts: Option<u32>,
    pub tile_width_px: f64,
    /// Tile height divided by tile width.
    pub tile_aspect: f64,
}

impl Default for SpriteTabConfig {
    fn default() -> Self {
        Self {
            graphql_endpoint: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
            poll_interval_ms: DISCOVERY_INTERVAL_MS,
            max_discovery_attempts: None,
            tile_width_px: ASSUMED_TILE_WIDTH_PX,
            tile_aspect: ASSUMED_ASPECT_RATIO,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: SpriteTabConfig =
            serde_json::from_str(r#"{"maxDiscoveryAttempts": 30}"#).unwrap();
        assert_eq!(config.max_discovery_attempts, Some(30));
        assert_eq!(config.graphql_endpoint, "/graphql");
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.tile_width_px, 160.0);
    }
}
