use lmmp_core::DocumentError;

pub type Result<T> = std::result::Result<T, ImportError>;

/// Errors that abort an import before the scene is touched
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to load song: {0}")]
    Document(#[from] DocumentError),

    #[error("Song tempo is 0 bpm, cannot map ticks to frames")]
    ZeroTempo,
}
