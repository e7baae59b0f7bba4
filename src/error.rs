use thiserror::Error;

use crate::import::ReadStatus;

/// Top-level error type for the selection engine and its collaborators.
#[derive(Debug, Error)]
pub enum FacepickError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while turning an uploaded file into a shape.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported input file extension: {extension:?}")]
    UnsupportedFormat { extension: String },

    #[error("failed to read geometry from {file}: reader returned {status:?}")]
    Failed { file: String, status: ReadStatus },

    #[error("reader produced no shape for {file}")]
    NoShape { file: String },
}

/// Errors related to topological lookups.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Errors related to converting a face triangulation into a renderable mesh.
#[derive(Debug, Error)]
pub enum MeshingError {
    #[error("no triangulation available for face {0}")]
    NoTriangulation(u32),

    #[error("triangle {triangle} references node {node} but only {nodes} nodes exist")]
    InvalidTriangle {
        triangle: usize,
        node: u32,
        nodes: usize,
    },

    #[error("triangulation has {nodes} nodes but {normals} normals")]
    NormalCountMismatch { nodes: usize, normals: usize },
}

/// Errors related to loading viewer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid viewer configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`FacepickError`].
pub type Result<T> = std::result::Result<T, FacepickError>;
