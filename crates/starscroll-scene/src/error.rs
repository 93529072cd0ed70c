//! Scene construction errors.

use starscroll_graph::GraphError;
use starscroll_planet::PresetError;

/// Errors from building or loading a section scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The planet preset key did not name a known preset.
    #[error(transparent)]
    Preset(#[from] PresetError),

    /// A structural graph edit failed while assembling the scene.
    #[error("scene graph edit failed: {0}")]
    Graph(#[from] GraphError),

    /// The scene's lazy load resolved to an error.
    #[error("scene load failed: {0}")]
    Load(String),
}
