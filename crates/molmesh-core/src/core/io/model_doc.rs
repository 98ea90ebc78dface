//! TOML serialization of an already materialized [`Model`].
//!
//! A model document lists standalone atoms (hetero by default), chains with their
//! residues and precomputed ribbon triangles, connections, and symmetry operators:
//!
//! ```toml
//! connections = [[1, 2]]
//! symmetry = [[1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1]]
//!
//! [[atoms]]
//! serial = 1
//! name = "FE"
//! element = "Fe"
//! residue = "HEM"
//! position = [0.0, 0.0, 0.0]
//!
//! [[chains]]
//! id = "A"
//! ribbon = { vertices = [[0, 0, 0], [1, 0, 0], [0, 1, 0]], triangles = [[0, 1, 2]] }
//!
//! [[chains.residues]]
//! number = 1
//! name = "GLY"
//! atoms = [{ serial = 2, name = "C", element = "C", position = [1.0, 0.0, 0.0] }]
//! ```

use crate::core::geometry::mesh::{Mesh, Triangle};
use crate::core::models::atom::{Atom, AtomKind};
use crate::core::models::model::{Model, ModelError};
use nalgebra::{Matrix4, Point3};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ModelDocError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Chain identifier '{0}' must be a single character")]
    InvalidChainId(String),
    #[error("Invalid atom kind '{kind}' for atom {serial}")]
    InvalidAtomKind { serial: u32, kind: String },
    #[error("Ribbon of chain '{chain}' references missing vertex {index}")]
    RibbonIndex { chain: char, index: usize },
    #[error("Invalid model: {0}")]
    Model(#[from] ModelError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelDoc {
    #[serde(default)]
    atoms: Vec<AtomDoc>,
    #[serde(default)]
    chains: Vec<ChainDoc>,
    #[serde(default)]
    connections: Vec<[u32; 2]>,
    #[serde(default)]
    symmetry: Vec<[f64; 16]>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AtomDoc {
    serial: u32,
    name: String,
    #[serde(default)]
    element: String,
    #[serde(default)]
    residue: String,
    position: [f64; 3],
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChainDoc {
    id: String,
    #[serde(default)]
    residues: Vec<ResidueDoc>,
    ribbon: Option<RibbonDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResidueDoc {
    number: isize,
    name: String,
    #[serde(default)]
    atoms: Vec<AtomDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RibbonDoc {
    vertices: Vec<[f64; 3]>,
    triangles: Vec<[usize; 3]>,
}

impl AtomDoc {
    fn into_atom(self, default_kind: AtomKind) -> Result<Atom, ModelDocError> {
        let kind = match &self.kind {
            Some(kind) => kind
                .parse::<AtomKind>()
                .map_err(|_| ModelDocError::InvalidAtomKind {
                    serial: self.serial,
                    kind: kind.clone(),
                })?,
            None => default_kind,
        };
        let [x, y, z] = self.position;
        Ok(Atom::new(self.serial, &self.name, &self.element, Point3::new(x, y, z))
            .with_residue_name(&self.residue)
            .with_kind(kind))
    }
}

impl RibbonDoc {
    fn into_mesh(self, chain: char) -> Result<Mesh, ModelDocError> {
        let points: Vec<Point3<f64>> = self
            .vertices
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect();
        let point = |index: usize| {
            points
                .get(index)
                .copied()
                .ok_or(ModelDocError::RibbonIndex { chain, index })
        };
        let triangles = self
            .triangles
            .iter()
            .map(|&[a, b, c]| Ok(Triangle::new(point(a)?, point(b)?, point(c)?)))
            .collect::<Result<Vec<_>, ModelDocError>>()?;
        Ok(Mesh::from_triangles(triangles))
    }
}

fn chain_id(id: &str) -> Result<char, ModelDocError> {
    let mut chars = id.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ModelDocError::InvalidChainId(id.to_string())),
    }
}

impl ModelDoc {
    fn into_model(self) -> Result<Model, ModelDocError> {
        let mut model = Model::new();

        for chain in self.chains {
            let id = chain_id(&chain.id)?;
            model.add_chain(id);
            for residue in chain.residues {
                for atom in residue.atoms {
                    let atom = atom.into_atom(AtomKind::Polymer)?;
                    model.add_atom_to_residue(id, residue.number, &residue.name, atom)?;
                }
            }
            if let Some(ribbon) = chain.ribbon {
                model.set_ribbon(id, ribbon.into_mesh(id)?)?;
            }
        }

        for atom in self.atoms {
            model.add_atom(atom.into_atom(AtomKind::Hetero)?)?;
        }

        for [a, b] in self.connections {
            match model.add_connection(a, b) {
                Err(ModelError::SelfBond(serial)) => {
                    warn!(serial, "Dropping self-bond from model document.")
                }
                other => other?,
            }
        }

        for m in self.symmetry {
            model.add_symmetry(Matrix4::from_row_slice(&m));
        }

        Ok(model)
    }
}

/// Parses a model document from a string. `origin` names the source in error messages.
pub fn parse(content: &str, origin: &str) -> Result<Model, ModelDocError> {
    let doc: ModelDoc = toml::from_str(content).map_err(|e| ModelDocError::Toml {
        path: origin.to_string(),
        source: e,
    })?;
    doc.into_model()
}

/// Loads a model document from disk.
pub fn load(path: &Path) -> Result<Model, ModelDocError> {
    let content = std::fs::read_to_string(path).map_err(|e| ModelDocError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    parse(&content, &path.to_string_lossy())
}
