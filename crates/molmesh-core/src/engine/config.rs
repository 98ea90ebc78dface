use crate::core::colormap::Palette;
use crate::core::geometry::primitives::{
    DEFAULT_CYLINDER_SIDES, DEFAULT_SPHERE_LAT_BANDS, DEFAULT_SPHERE_LON_BANDS,
};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_ATOM_SCALE: f64 = 0.75;
pub const DEFAULT_BOND_GAP: f64 = 0.1;
pub const DEFAULT_BOND_RADIUS: f64 = 0.25;
pub const DEFAULT_MIN_CYLINDER_HEIGHT: f64 = 1e-6;
pub const DEFAULT_EXCLUDED_RESIDUES: &[&str] = &["HOH"];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value {value} for '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("At least one representation must be selected")]
    NoRepresentation,
}

/// A kind of submesh the pipeline can synthesize for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Representation {
    /// Element-colored spheres and split-colored bond cylinders.
    BallAndStick,
    /// Van der Waals spheres for polymer atoms.
    SpaceFilling,
    /// Carbonyl spheres and sticks tracing the main chain.
    Backbone,
    /// Precomputed chain ribbons colored along the chain by the palette.
    Ribbon,
}

impl Representation {
    pub const ALL: [Representation; 4] = [
        Representation::Ribbon,
        Representation::BallAndStick,
        Representation::SpaceFilling,
        Representation::Backbone,
    ];
}

#[derive(Debug, Error)]
#[error("Invalid representation string '{0}'")]
pub struct ParseRepresentationError(String);

impl FromStr for Representation {
    type Err = ParseRepresentationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "ball-and-stick" | "ball-stick" => Ok(Representation::BallAndStick),
            "space-filling" | "spacefill" | "cpk" => Ok(Representation::SpaceFilling),
            "backbone" => Ok(Representation::Backbone),
            "ribbon" | "cartoon" => Ok(Representation::Ribbon),
            _ => Err(ParseRepresentationError(s.to_string())),
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Representation::BallAndStick => "ball-and-stick",
                Representation::SpaceFilling => "space-filling",
                Representation::Backbone => "backbone",
                Representation::Ribbon => "ribbon",
            }
        )
    }
}

/// How repeated or reversed connections between the same two atoms are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionPolicy {
    /// Every listed connection produces a bond.
    KeepAll,
    /// Connections listed from the higher serial to the lower one are skipped.
    SkipDescending,
    /// `(a, b)` and `(b, a)` collapse into one bond; the first occurrence wins.
    #[default]
    Unordered,
}

#[derive(Debug, Error)]
#[error("Invalid connection policy string '{0}'")]
pub struct ParseConnectionPolicyError(String);

impl FromStr for ConnectionPolicy {
    type Err = ParseConnectionPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "keep-all" | "all" => Ok(ConnectionPolicy::KeepAll),
            "skip-descending" | "ascending" => Ok(ConnectionPolicy::SkipDescending),
            "unordered" | "dedup" => Ok(ConnectionPolicy::Unordered),
            _ => Err(ParseConnectionPolicyError(s.to_string())),
        }
    }
}

impl fmt::Display for ConnectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ConnectionPolicy::KeepAll => "keep-all",
                ConnectionPolicy::SkipDescending => "skip-descending",
                ConnectionPolicy::Unordered => "unordered",
            }
        )
    }
}

/// Which atoms the ball-and-stick representation draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AtomScope {
    /// Only hetero atoms (ligands, ions, cofactors).
    #[default]
    Hetero,
    /// Every atom of the model.
    All,
}

#[derive(Debug, Error)]
#[error("Invalid atom scope string '{0}'")]
pub struct ParseAtomScopeError(String);

impl FromStr for AtomScope {
    type Err = ParseAtomScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hetero" | "het" | "hetatm" => Ok(AtomScope::Hetero),
            "all" => Ok(AtomScope::All),
            _ => Err(ParseAtomScopeError(s.to_string())),
        }
    }
}

impl fmt::Display for AtomScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomScope::Hetero => write!(f, "hetero"),
            AtomScope::All => write!(f, "all"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisConfig {
    /// Fraction of the bonding radius used for ball-and-stick spheres.
    pub atom_scale: f64,
    /// Distance bonds are pulled back inside each sphere surface.
    pub bond_gap: f64,
    pub bond_radius: f64,
    /// Lower bound on cylinder height so collapsed bonds stay invertible.
    pub min_cylinder_height: f64,
    /// Residue names whose atoms are never drawn as balls (e.g. water).
    pub excluded_residues: BTreeSet<String>,
    pub connection_policy: ConnectionPolicy,
    pub atom_scope: AtomScope,
}

impl SynthesisConfig {
    pub fn is_excluded(&self, residue_name: &str) -> bool {
        self.excluded_residues.contains(residue_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionConfig {
    pub sphere_lat_bands: u32,
    pub sphere_lon_bands: u32,
    pub cylinder_sides: u32,
}

impl ResolutionConfig {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            sphere_lat_bands: DEFAULT_SPHERE_LAT_BANDS,
            sphere_lon_bands: DEFAULT_SPHERE_LON_BANDS,
            cylinder_sides: DEFAULT_CYLINDER_SIDES,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Submeshes to synthesize, concatenated in this order.
    pub representations: Vec<Representation>,
    pub synthesis: SynthesisConfig,
    pub resolution: ResolutionConfig,
    pub palette: Palette,
    /// Append a copy of the scene for every non-identity symmetry operator.
    pub apply_symmetry: bool,
    /// Fit the scene into the bi-unit cube before welding.
    pub normalize: bool,
}

impl SceneConfig {
    pub fn builder() -> SceneConfigBuilder {
        SceneConfigBuilder::new()
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            representations: vec![Representation::Ribbon, Representation::BallAndStick],
            synthesis: SynthesisConfig {
                atom_scale: DEFAULT_ATOM_SCALE,
                bond_gap: DEFAULT_BOND_GAP,
                bond_radius: DEFAULT_BOND_RADIUS,
                min_cylinder_height: DEFAULT_MIN_CYLINDER_HEIGHT,
                excluded_residues: DEFAULT_EXCLUDED_RESIDUES
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                connection_policy: ConnectionPolicy::default(),
                atom_scope: AtomScope::default(),
            },
            resolution: ResolutionConfig::default(),
            palette: Palette::default(),
            apply_symmetry: false,
            normalize: true,
        }
    }
}

#[derive(Default)]
pub struct SceneConfigBuilder {
    representations: Option<Vec<Representation>>,
    atom_scale: Option<f64>,
    bond_gap: Option<f64>,
    bond_radius: Option<f64>,
    min_cylinder_height: Option<f64>,
    excluded_residues: Option<BTreeSet<String>>,
    connection_policy: Option<ConnectionPolicy>,
    atom_scope: Option<AtomScope>,
    resolution: Option<ResolutionConfig>,
    palette: Option<Palette>,
    apply_symmetry: Option<bool>,
    normalize: Option<bool>,
}

impl SceneConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn representations(mut self, representations: Vec<Representation>) -> Self {
        self.representations = Some(representations);
        self
    }
    pub fn atom_scale(mut self, scale: f64) -> Self {
        self.atom_scale = Some(scale);
        self
    }
    pub fn bond_gap(mut self, gap: f64) -> Self {
        self.bond_gap = Some(gap);
        self
    }
    pub fn bond_radius(mut self, radius: f64) -> Self {
        self.bond_radius = Some(radius);
        self
    }
    pub fn min_cylinder_height(mut self, height: f64) -> Self {
        self.min_cylinder_height = Some(height);
        self
    }
    pub fn excluded_residues<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_residues = Some(names.into_iter().map(Into::into).collect());
        self
    }
    pub fn connection_policy(mut self, policy: ConnectionPolicy) -> Self {
        self.connection_policy = Some(policy);
        self
    }
    pub fn atom_scope(mut self, scope: AtomScope) -> Self {
        self.atom_scope = Some(scope);
        self
    }
    pub fn resolution(mut self, resolution: ResolutionConfig) -> Self {
        self.resolution = Some(resolution);
        self
    }
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }
    pub fn apply_symmetry(mut self, apply: bool) -> Self {
        self.apply_symmetry = Some(apply);
        self
    }
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = Some(normalize);
        self
    }

    /// Fills unset fields with defaults and validates the numeric parameters.
    ///
    /// Duplicate representations are dropped, keeping the first occurrence.
    pub fn build(self) -> Result<SceneConfig, ConfigError> {
        let defaults = SceneConfig::default();

        let mut representations = Vec::new();
        for r in self.representations.unwrap_or(defaults.representations) {
            if !representations.contains(&r) {
                representations.push(r);
            }
        }
        if representations.is_empty() {
            return Err(ConfigError::NoRepresentation);
        }

        let synthesis = SynthesisConfig {
            atom_scale: positive("atom_scale", self.atom_scale, defaults.synthesis.atom_scale)?,
            bond_gap: non_negative("bond_gap", self.bond_gap, defaults.synthesis.bond_gap)?,
            bond_radius: positive("bond_radius", self.bond_radius, defaults.synthesis.bond_radius)?,
            min_cylinder_height: positive(
                "min_cylinder_height",
                self.min_cylinder_height,
                defaults.synthesis.min_cylinder_height,
            )?,
            excluded_residues: self
                .excluded_residues
                .unwrap_or(defaults.synthesis.excluded_residues),
            connection_policy: self
                .connection_policy
                .unwrap_or(defaults.synthesis.connection_policy),
            atom_scope: self.atom_scope.unwrap_or(defaults.synthesis.atom_scope),
        };

        Ok(SceneConfig {
            representations,
            synthesis,
            resolution: self.resolution.unwrap_or(defaults.resolution),
            palette: self.palette.unwrap_or(defaults.palette),
            apply_symmetry: self.apply_symmetry.unwrap_or(defaults.apply_symmetry),
            normalize: self.normalize.unwrap_or(defaults.normalize),
        })
    }
}

fn positive(name: &'static str, value: Option<f64>, default: f64) -> Result<f64, ConfigError> {
    let value = value.unwrap_or(default);
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be a finite number greater than zero",
        });
    }
    Ok(value)
}

fn non_negative(name: &'static str, value: Option<f64>, default: f64) -> Result<f64, ConfigError> {
    let value = value.unwrap_or(default);
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be a finite, non-negative number",
        });
    }
    Ok(value)
}
