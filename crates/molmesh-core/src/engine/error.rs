use thiserror::Error;

use super::config::ConfigError;
use crate::core::geometry::mesh::EmptyMeshError;
use crate::core::geometry::transform::DegenerateDirectionError;
use crate::core::io::model_doc::ModelDocError;
use crate::core::models::model::ModelError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid model: {source}")]
    Model {
        #[from]
        source: ModelError,
    },

    #[error("Failed to load model document: {source}")]
    ModelDoc {
        #[from]
        source: ModelDocError,
    },

    #[error("Geometry synthesis failed: {source}")]
    Geometry {
        #[from]
        source: DegenerateDirectionError,
    },

    #[error("Scene is empty: {source}")]
    EmptyScene {
        #[from]
        source: EmptyMeshError,
    },
}
