use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use toml::{Table, Value};
use tracing::debug;

use super::models::OutputFormat;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSynthesisConfig {
    pub atom_scale: Option<f64>,
    pub bond_gap: Option<f64>,
    pub bond_radius: Option<f64>,
    pub min_cylinder_height: Option<f64>,
    pub excluded_residues: Option<Vec<String>>,
    pub connection_policy: Option<String>,
    pub atom_scope: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileResolutionConfig {
    pub sphere_lat_bands: Option<u32>,
    pub sphere_lon_bands: Option<u32>,
    pub cylinder_sides: Option<u32>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub format: Option<OutputFormat>,
    pub representations: Option<Vec<String>>,
    pub palette: Option<String>,
    pub normalize: Option<bool>,
    pub symmetry: Option<bool>,
    pub synthesis: Option<FileSynthesisConfig>,
    pub resolution: Option<FileResolutionConfig>,
}

impl FileConfig {
    /// Reads a config file into an untyped table so overrides can be patched in first.
    pub fn read_table(path: &Path) -> Result<Table> {
        debug!("Reading scene configuration from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_table(table: Table) -> Result<Self> {
        Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| CliError::Config(e.message().to_string()))
    }
}
