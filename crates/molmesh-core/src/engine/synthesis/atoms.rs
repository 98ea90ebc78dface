use crate::core::elements::{self, Element, MissingElementError};
use crate::core::geometry::mesh::Mesh;
use crate::core::geometry::primitives::Primitives;
use crate::core::models::atom::Atom;
use crate::core::models::model::Model;
use crate::engine::config::{AtomScope, SynthesisConfig};
use tracing::warn;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An atom paired with its resolved element.
#[derive(Debug, Clone, Copy)]
pub struct PlacedAtom<'a> {
    pub atom: &'a Atom,
    pub element: &'static Element,
}

pub fn resolve_element(atom: &Atom) -> Result<&'static Element, MissingElementError> {
    match atom.element_symbol() {
        Some(symbol) => elements::lookup(&symbol),
        None => Err(MissingElementError {
            symbol: atom.element.clone(),
        }),
    }
}

fn place<'a>(atoms: impl Iterator<Item = &'a Atom>) -> Vec<PlacedAtom<'a>> {
    atoms
        .filter_map(|atom| match resolve_element(atom) {
            Ok(element) => Some(PlacedAtom { atom, element }),
            Err(e) => {
                warn!(serial = atom.serial, name = %atom.name, "Skipping atom: {}", e);
                None
            }
        })
        .collect()
}

/// Atoms drawn by the ball-and-stick representation, in model order.
///
/// Atoms outside the configured scope, in an excluded residue, or with an unknown element
/// are left out. Bonds only resolve against this set.
pub fn ball_and_stick_atoms<'a>(model: &'a Model, config: &SynthesisConfig) -> Vec<PlacedAtom<'a>> {
    let in_scope = |atom: &&Atom| match config.atom_scope {
        AtomScope::Hetero => atom.is_hetero(),
        AtomScope::All => true,
    };
    place(
        model
            .atoms_iter()
            .map(|(_, atom)| atom)
            .filter(in_scope)
            .filter(|atom| !config.is_excluded(&atom.residue_name)),
    )
}

/// Places one flat-colored sphere per atom, concatenated in input order.
pub fn spheres(
    atoms: &[PlacedAtom],
    radius: impl Fn(&Element) -> f64 + Sync,
    primitives: &Primitives,
) -> Mesh {
    #[cfg(not(feature = "parallel"))]
    let iterator = atoms.iter();

    #[cfg(feature = "parallel")]
    let iterator = atoms.par_iter();

    let instances: Vec<Mesh> = iterator
        .map(|placed| {
            let mut mesh = primitives.sphere(&placed.atom.position, radius(placed.element));
            mesh.set_color(placed.element.color());
            mesh
        })
        .collect();

    let mut mesh = Mesh::new();
    for instance in &instances {
        mesh.add(instance);
    }
    mesh
}

/// Spheres scaled to `atom_scale` times each element's bonding radius.
pub fn ball_and_stick_spheres(
    atoms: &[PlacedAtom],
    config: &SynthesisConfig,
    primitives: &Primitives,
) -> Mesh {
    spheres(atoms, |e| config.atom_scale * e.radius, primitives)
}

/// Van der Waals spheres for every polymer atom.
pub fn space_filling(model: &Model, primitives: &Primitives) -> Mesh {
    let atoms = place(model.polymer_atoms());
    spheres(&atoms, |e| e.vdw_radius, primitives)
}
