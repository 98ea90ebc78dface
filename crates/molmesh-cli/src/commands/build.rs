use crate::cli::BuildArgs;
use crate::config::{AppConfig, OutputFormat, build_config};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use molmesh::{
    core::{
        geometry::indexed::WeldedMesh,
        io::{listing::ListingFile, model_doc, stl::StlFile, traits::MeshFile},
    },
    engine::progress::ProgressReporter,
    workflows,
};
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: BuildArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args)?;
    info!(
        format = %config.format,
        representations = ?config.scene.representations,
        "Configuration resolved."
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Building scene from {}...", config.input_path.display());
    let summary = execute(&config, &reporter)?;

    println!(
        "✓ Wrote {} faces ({} vertices, {} colors) as {} to: {}",
        summary.faces,
        summary.vertices,
        summary.colors,
        config.format,
        config.output_path.display()
    );
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub faces: usize,
    pub vertices: usize,
    pub colors: usize,
}

/// Loads the model, runs the build workflow and writes the welded scene.
pub fn execute(config: &AppConfig, reporter: &ProgressReporter) -> Result<BuildSummary> {
    info!("Loading model document from {:?}", &config.input_path);
    let model =
        model_doc::load(&config.input_path).map_err(|e| CliError::FileParsing {
            path: config.input_path.clone(),
            source: e.into(),
        })?;

    if model.atom_count() == 0 && model.chains().iter().all(|c| c.ribbon().is_empty()) {
        warn!("Model document contains no atoms and no ribbons.");
    }

    let scene = workflows::build::run(&model, &config.scene, reporter)?;

    info!("Writing {} output to {:?}", config.format, &config.output_path);
    write_scene(&scene.welded, config.format, &config.output_path)?;

    Ok(BuildSummary {
        faces: scene.welded.faces.len(),
        vertices: scene.welded.vertices.len(),
        colors: scene.welded.colors.len(),
    })
}

fn write_scene(mesh: &WeldedMesh, format: OutputFormat, path: &Path) -> Result<()> {
    let to_cli_error = |source: anyhow::Error| CliError::FileWriting {
        path: path.to_path_buf(),
        source,
    };
    match format {
        OutputFormat::Listing => {
            ListingFile::write_to_path(mesh, path).map_err(|e| to_cli_error(e.into()))
        }
        OutputFormat::Stl => StlFile::write_to_path(mesh, path).map_err(|e| to_cli_error(e.into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use molmesh::engine::config::{Representation, SceneConfig, SceneConfigBuilder};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    const CARBON_MONOXIDE: &str = r#"
connections = [[1, 2]]

[[atoms]]
serial = 1
name = "C"
element = "C"
residue = "CMO"
position = [0.0, 0.0, 0.0]

[[atoms]]
serial = 2
name = "O"
element = "O"
residue = "CMO"
position = [0.0, 0.0, 2.0]
"#;

    fn write_model(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("model.toml");
        fs::write(&path, content).unwrap();
        path
    }

    fn app_config(input: PathBuf, output: PathBuf, format: OutputFormat) -> AppConfig {
        AppConfig {
            input_path: input,
            output_path: output,
            format,
            scene: SceneConfig::default(),
        }
    }

    #[test]
    fn execute_writes_listing_output() {
        let dir = tempdir().unwrap();
        let input = write_model(&dir, CARBON_MONOXIDE);
        let output = dir.path().join("scene.js");
        let config = app_config(input, output.clone(), OutputFormat::Listing);

        let summary = execute(&config, &ProgressReporter::new()).unwrap();

        assert!(summary.faces > 0);
        assert!(summary.vertices > 0);
        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("var VERTICES = ["));
        assert!(text.contains("var COLORS = ["));
        assert!(text.trim_end().ends_with("];"));
    }

    #[test]
    fn execute_writes_stl_with_expected_size() {
        let dir = tempdir().unwrap();
        let input = write_model(&dir, CARBON_MONOXIDE);
        let output = dir.path().join("scene.stl");
        let config = app_config(input, output.clone(), OutputFormat::Stl);

        let summary = execute(&config, &ProgressReporter::new()).unwrap();

        let bytes = fs::read(&output).unwrap();
        assert_eq!(bytes.len(), StlFile::encoded_len(summary.faces));
    }

    #[test]
    fn missing_input_is_a_parsing_error() {
        let dir = tempdir().unwrap();
        let config = app_config(
            dir.path().join("absent.toml"),
            dir.path().join("scene.js"),
            OutputFormat::Listing,
        );
        let err = execute(&config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
    }

    #[test]
    fn empty_scene_surfaces_the_pipeline_error() {
        let dir = tempdir().unwrap();
        let input = write_model(&dir, "");
        let output = dir.path().join("scene.js");
        let config = app_config(input, output.clone(), OutputFormat::Listing);

        let err = execute(&config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, CliError::Pipeline(_)));
        assert!(!output.exists());
    }

    #[test]
    fn unwritable_output_is_a_writing_error() {
        let dir = tempdir().unwrap();
        let input = write_model(&dir, CARBON_MONOXIDE);
        let mut config = app_config(
            input,
            dir.path().join("missing-dir").join("scene.js"),
            OutputFormat::Listing,
        );
        config.scene = SceneConfigBuilder::new()
            .representations(vec![Representation::BallAndStick])
            .build()
            .unwrap();

        let err = execute(&config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, CliError::FileWriting { .. }));
    }
}
