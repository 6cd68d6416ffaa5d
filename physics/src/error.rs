use thiserror::Error;

/// Failure to read a maze mesh asset.
#[derive(Debug, Error)]
pub enum MeshLoadError {
    #[error("failed to read mesh asset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse mesh asset: {0}")]
    Parse(#[from] tobj::LoadError),
}

#[derive(Debug, Error)]
pub enum MazeError {
    /// World settings that would produce a degenerate simulation or pose.
    #[error("invalid world settings: {0}")]
    InvalidSettings(String),

    /// A body definition pairs a shape with a mass it cannot carry.
    #[error("invalid shape configuration: {0}")]
    InvalidShapeConfiguration(String),

    /// The engine refused to build a triangle mesh from the buffer.
    #[error("unable to build maze collision mesh: {0}")]
    MeshShape(String),
}
