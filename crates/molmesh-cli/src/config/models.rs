use clap::ValueEnum;
use molmesh::engine::config::SceneConfig;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indexed `VERTICES`/`COLORS`/`FACES` listing for browser viewers.
    Listing,
    /// Binary STL (geometry only).
    Stl,
}

impl OutputFormat {
    /// Guesses the format from a file extension; `None` when the extension is not recognized.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "stl" => Some(OutputFormat::Stl),
            "js" | "txt" | "listing" => Some(OutputFormat::Listing),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Listing => write!(f, "listing"),
            OutputFormat::Stl => write!(f, "stl"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub format: OutputFormat,
    pub scene: SceneConfig,
}
