//! Scene metadata and the contract with the scene data service.
//!
//! The service is a GraphQL endpoint; only the request shape and the subset of
//! the response this crate reads are modelled here. Transport lives behind
//! [`SceneDataProvider`].

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpriteTabError};

/// Query sent for a scene's duration and sprite sheet location.
pub const FIND_SCENE_QUERY: &str =
    "query FindScene($id: ID!) { findScene(id: $id) { id files { duration } paths { sprite } } }";

/// What the panel needs to know about a scene. Read-only once fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneMedia {
    /// Sprite sheet location; `None` means the scene has no sprites.
    pub sprite_sheet_url: Option<String>,
    /// Scene length in seconds; 0 when unknown.
    pub duration_seconds: f64,
}

impl SceneMedia {
    pub fn new(sprite_sheet_url: Option<String>, duration_seconds: f64) -> Self {
        Self {
            sprite_sheet_url: sprite_sheet_url.filter(|url| !url.trim().is_empty()),
            duration_seconds: sanitize_duration(duration_seconds),
        }
    }

    pub fn has_sprites(&self) -> bool {
        self.sprite_sheet_url.is_some()
    }

    /// Whether playback can be mapped onto tiles at all.
    pub fn is_syncable(&self) -> bool {
        self.duration_seconds > 0.0
    }
}

fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}

/// Source of scene metadata. One best-effort request, no retry.
pub trait SceneDataProvider {
    fn fetch_scene(&self, scene_id: &str) -> impl Future<Output = Result<SceneMedia>>;
}

/// GraphQL request body.
#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: FindSceneVariables<'a>,
}

#[derive(Debug, Serialize)]
pub struct FindSceneVariables<'a> {
    pub id: &'a str,
}

impl<'a> GraphqlRequest<'a> {
    pub fn find_scene(scene_id: &'a str) -> Self {
        Self {
            query: FIND_SCENE_QUERY,
            variables: FindSceneVariables { id: scene_id },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<FindSceneData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindSceneData {
    find_scene: Option<SceneRecord>,
}

#[derive(Debug, Deserialize)]
struct SceneRecord {
    #[serde(default)]
    files: Vec<SceneFile>,
    paths: Option<ScenePaths>,
}

#[derive(Debug, Deserialize)]
struct SceneFile {
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ScenePaths {
    sprite: Option<String>,
}

/// Decode a `findScene` response body.
///
/// A missing duration becomes 0 and a missing sprite path becomes `None`; a
/// null scene or a response carrying only errors is a fetch failure.
pub fn parse_find_scene_response(body: &str) -> Result<SceneMedia> {
    let response: GraphqlResponse = serde_json::from_str(body)?;
    let Some(data) = response.data else {
        let message = response
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(SpriteTabError::SceneFetch(if message.is_empty() {
            "response has no data".to_string()
        } else {
            message
        }));
    };
    let scene = data
        .find_scene
        .ok_or_else(|| SpriteTabError::SceneFetch("scene not found".to_string()))?;
    let duration = scene
        .files
        .first()
        .and_then(|file| file.duration)
        .unwrap_or(0.0);
    let sprite = scene.paths.and_then(|paths| paths.sprite);
    Ok(SceneMedia::new(sprite, duration))
}
