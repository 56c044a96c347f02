//! Error types
//!
//! Only startup can fail. The simulation step itself is infallible.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A sound asset is missing or unreadable. Recoverable: audio is disabled.
    #[error("failed to load sound asset {}: {source}", path.display())]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The display surface could not be created. Fatal.
    #[error("render surface unavailable: {0}")]
    RenderSurface(String),
}
