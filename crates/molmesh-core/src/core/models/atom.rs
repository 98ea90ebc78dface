use crate::core::elements;
use nalgebra::Point3;
use std::borrow::Cow;
use std::str::FromStr;
use thiserror::Error;

/// Distinguishes polymer atoms (`ATOM` records) from non-polymer ones (`HETATM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AtomKind {
    /// Atom belonging to a polymer chain (protein or nucleic acid).
    #[default]
    Polymer,
    /// Non-polymer atom such as a ligand, ion or water.
    Hetero,
}

#[derive(Debug, Error)]
#[error("Invalid atom kind string")]
pub struct ParseAtomKindError;

impl FromStr for AtomKind {
    type Err = ParseAtomKindError;

    /// Parses `"atom"`/`"polymer"` and `"hetatm"`/`"hetero"`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "atom" | "polymer" => Ok(AtomKind::Polymer),
            "hetatm" | "hetero" | "het" => Ok(AtomKind::Hetero),
            _ => Err(ParseAtomKindError),
        }
    }
}

/// A single atom of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Serial number, unique within a model.
    pub serial: u32,
    /// The atom name (e.g., "CA", "O1").
    pub name: String,
    /// Element symbol; may be empty when the source record had none.
    pub element: String,
    /// Name of the residue the atom belongs to (e.g., "ALA", "HOH").
    pub residue_name: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    pub kind: AtomKind,
}

impl Atom {
    pub fn new(serial: u32, name: &str, element: &str, position: Point3<f64>) -> Self {
        Self {
            serial,
            name: name.to_string(),
            element: element.to_string(),
            residue_name: String::new(),
            position,
            kind: AtomKind::default(),
        }
    }

    pub fn with_residue_name(mut self, residue_name: &str) -> Self {
        self.residue_name = residue_name.to_string();
        self
    }

    pub fn with_kind(mut self, kind: AtomKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_hetero(&self) -> bool {
        self.kind == AtomKind::Hetero
    }

    /// The element symbol, falling back to one inferred from the atom name when blank.
    pub fn element_symbol(&self) -> Option<Cow<'_, str>> {
        let element = self.element.trim();
        if element.is_empty() {
            elements::infer_symbol(&self.name).map(Cow::Owned)
        } else {
            Some(Cow::Borrowed(element))
        }
    }
}
