use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileResolutionConfig, FileSynthesisConfig};
use super::models::{AppConfig, OutputFormat};
use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use molmesh::core::colormap::Palette;
use molmesh::engine::config::{
    AtomScope, ConnectionPolicy, Representation, ResolutionConfig, SceneConfigBuilder,
};
use std::str::FromStr;
use toml::{Table, Value};
use tracing::debug;

/// Merges command-line arguments, `-S` overrides, the config file and defaults.
///
/// Precedence, highest first: dedicated CLI flags, `-S key=value`, the config file, defaults.
pub fn build_config(args: &BuildArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let mut table = match &args.config {
        Some(path) => FileConfig::read_table(path)?,
        None => Table::new(),
    };
    apply_set_values(&mut table, &args.set_values)?;
    let file_config = FileConfig::from_table(table)?;
    debug!("Merged file configuration: {:?}", file_config);

    let format = args
        .format
        .or(file_config.format)
        .or_else(|| OutputFormat::from_path(&args.output))
        .unwrap_or(defaults.format);

    let mut builder = SceneConfigBuilder::new()
        .normalize(
            !args.no_normalize && file_config.normalize.unwrap_or(defaults.normalize),
        )
        .apply_symmetry(args.symmetry || file_config.symmetry.unwrap_or(defaults.symmetry));

    let representations = if args.representations.is_empty() {
        file_config.representations.clone()
    } else {
        Some(args.representations.clone())
    };
    if let Some(names) = representations {
        builder = builder.representations(parse_all::<Representation>(&names, "representation")?);
    }

    if let Some(name) = args.palette.as_deref().or(file_config.palette.as_deref()) {
        builder = builder.palette(parse_named::<Palette>(name, "palette")?);
    }

    if let Some(synthesis) = file_config.synthesis {
        builder = apply_synthesis(builder, synthesis)?;
    }
    if let Some(resolution) = file_config.resolution {
        builder = builder.resolution(merge_resolution(resolution));
    }

    let scene = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        format,
        scene,
    })
}

fn parse_named<T>(value: &str, kind: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| CliError::Config(format!("Invalid {} '{}': {}", kind, value, e)))
}

fn parse_all<T>(values: &[String], kind: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    values.iter().map(|v| parse_named(v.trim(), kind)).collect()
}

fn apply_synthesis(
    mut builder: SceneConfigBuilder,
    file: FileSynthesisConfig,
) -> Result<SceneConfigBuilder> {
    if let Some(v) = file.atom_scale {
        builder = builder.atom_scale(v);
    }
    if let Some(v) = file.bond_gap {
        builder = builder.bond_gap(v);
    }
    if let Some(v) = file.bond_radius {
        builder = builder.bond_radius(v);
    }
    if let Some(v) = file.min_cylinder_height {
        builder = builder.min_cylinder_height(v);
    }
    if let Some(names) = file.excluded_residues {
        builder = builder.excluded_residues(names);
    }
    if let Some(policy) = file.connection_policy {
        builder = builder
            .connection_policy(parse_named::<ConnectionPolicy>(&policy, "connection policy")?);
    }
    if let Some(scope) = file.atom_scope {
        builder = builder.atom_scope(parse_named::<AtomScope>(&scope, "atom scope")?);
    }
    Ok(builder)
}

fn merge_resolution(file: FileResolutionConfig) -> ResolutionConfig {
    let defaults = ResolutionConfig::default();
    ResolutionConfig {
        sphere_lat_bands: file.sphere_lat_bands.unwrap_or(defaults.sphere_lat_bands),
        sphere_lon_bands: file.sphere_lon_bands.unwrap_or(defaults.sphere_lon_bands),
        cylinder_sides: file.cylinder_sides.unwrap_or(defaults.cylinder_sides),
    }
}

/// Parses the right-hand side of a `-S` override as a TOML value, falling back to a bare string.
fn parse_override_value(raw: &str) -> Value {
    toml::from_str::<Table>(&format!("value = {}", raw))
        .ok()
        .and_then(|mut t| t.remove("value"))
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

fn apply_set_values(table: &mut Table, set_values: &[String]) -> Result<()> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        let path: Vec<&str> = key.trim().split('.').collect();
        let Some((last, parents)) = path
            .split_last()
            .filter(|_| path.iter().all(|segment| !segment.is_empty()))
        else {
            return Err(CliError::Config(format!(
                "Invalid configuration key for --set: '{}'",
                key
            )));
        };
        let mut current = &mut *table;
        for segment in parents {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            current = match entry {
                Value::Table(inner) => inner,
                _ => {
                    return Err(CliError::Config(format!(
                        "Cannot set '{}': '{}' is not a table",
                        key, segment
                    )));
                }
            };
        }
        current.insert(last.to_string(), parse_override_value(value_str.trim()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn base_build_args() -> BuildArgs {
        BuildArgs {
            input: PathBuf::from("model.toml"),
            output: PathBuf::from("scene.js"),
            config: None,
            format: None,
            representations: vec![],
            palette: None,
            no_normalize: false,
            symmetry: false,
            set_values: vec![],
        }
    }

    #[test]
    fn build_config_without_file_uses_defaults() {
        let app = build_config(&base_build_args()).expect("build ok");
        assert_eq!(app.format, OutputFormat::Listing);
        assert_eq!(app.scene, SceneConfigBuilder::new().build().unwrap());
        assert_eq!(app.input_path, PathBuf::from("model.toml"));
    }

    #[test]
    fn format_is_inferred_from_output_extension() {
        let mut args = base_build_args();
        args.output = PathBuf::from("scene.STL");
        assert_eq!(build_config(&args).unwrap().format, OutputFormat::Stl);

        args.format = Some(OutputFormat::Listing);
        assert_eq!(build_config(&args).unwrap().format, OutputFormat::Listing);
    }

    #[test]
    fn build_config_reads_file_and_merges() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        let toml = r#"
            format = "stl"
            representations = ["backbone", "space-filling"]
            palette = "magma"
            symmetry = true
            [synthesis]
            bond-radius = 0.2
            connection-policy = "skip-descending"
            atom-scope = "all"
            excluded-residues = []
            [resolution]
            sphere-lat-bands = 6
            "#;
        fs::write(&cfg_path, toml).unwrap();

        let mut args = base_build_args();
        args.config = Some(cfg_path);
        let app = build_config(&args).expect("build ok");

        assert_eq!(app.format, OutputFormat::Stl);
        let scene = app.scene;
        assert_eq!(
            scene.representations,
            vec![Representation::Backbone, Representation::SpaceFilling]
        );
        assert_eq!(scene.palette, Palette::Magma);
        assert!(scene.apply_symmetry);
        assert!(scene.normalize);
        assert_eq!(scene.synthesis.bond_radius, 0.2);
        assert_eq!(scene.synthesis.connection_policy, ConnectionPolicy::SkipDescending);
        assert_eq!(scene.synthesis.atom_scope, AtomScope::All);
        assert!(scene.synthesis.excluded_residues.is_empty());
        assert_eq!(scene.resolution.sphere_lat_bands, 6);
        assert_eq!(
            scene.resolution.sphere_lon_bands,
            ResolutionConfig::default().sphere_lon_bands
        );
    }

    #[test]
    fn cli_overrides_set_values_which_override_file() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            "palette = \"magma\"\nnormalize = true\n[synthesis]\nbond-radius = 0.2\natom-scale = 0.6\n",
        )
        .unwrap();

        let mut args = base_build_args();
        args.config = Some(cfg_path);
        args.palette = Some("plasma".to_string());
        args.no_normalize = true;
        args.representations = vec!["ball-and-stick".to_string()];
        args.set_values = vec![
            "synthesis.bond-radius=0.3".to_string(),
            "palette=inferno".to_string(),
            "resolution.cylinder-sides=10".to_string(),
        ];

        let scene = build_config(&args).expect("build ok").scene;
        assert_eq!(scene.palette, Palette::Plasma);
        assert!(!scene.normalize);
        assert_eq!(scene.representations, vec![Representation::BallAndStick]);
        assert_eq!(scene.synthesis.bond_radius, 0.3);
        assert_eq!(scene.synthesis.atom_scale, 0.6);
        assert_eq!(scene.resolution.cylinder_sides, 10);
    }

    #[test]
    fn set_values_reject_bad_syntax_and_unknown_keys() {
        let mut args = base_build_args();
        args.set_values = vec!["synthesis.bond-radius".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        args.set_values = vec!["synthesis.colour=red".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        args.set_values = vec!["palette=magma".to_string(), "palette.name=magma".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn invalid_names_and_values_are_config_errors() {
        let mut args = base_build_args();
        args.palette = Some("rainbow".to_string());
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        let mut args = base_build_args();
        args.representations = vec!["wireframe".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        let mut args = base_build_args();
        args.set_values = vec!["synthesis.atom-scale=-1".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn parse_override_value_infers_types() {
        assert_eq!(parse_override_value("0.5"), Value::Float(0.5));
        assert_eq!(parse_override_value("12"), Value::Integer(12));
        assert_eq!(parse_override_value("true"), Value::Boolean(true));
        assert_eq!(parse_override_value("viridis"), Value::String("viridis".into()));
        assert_eq!(
            parse_override_value("[\"HOH\"]"),
            Value::Array(vec![Value::String("HOH".into())])
        );
    }
}
