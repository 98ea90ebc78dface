use crate::core::elements;
use crate::core::geometry::mesh::{Color, Mesh};
use crate::core::geometry::primitives::Primitives;
use crate::core::geometry::transform::DegenerateDirectionError;
use crate::core::models::chain::Chain;
use crate::core::models::model::Model;
use crate::core::models::residue::Residue;
use nalgebra::Point3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const CARBONYL_CARBON: &str = "C";
const CARBONYL_OXYGEN: &str = "O";
const TRACE_RADIUS: f64 = 0.4;
const CARBONYL_RADIUS: f64 = 0.25;

fn atom_position(model: &Model, residue: &Residue, name: &str) -> Option<Point3<f64>> {
    residue
        .atom_by_name(name)
        .and_then(|id| model.atom(id))
        .map(|atom| atom.position)
}

fn chain_backbone(
    model: &Model,
    chain: &Chain,
    primitives: &Primitives,
) -> Result<Mesh, DegenerateDirectionError> {
    let oxygen = elements::lookup(CARBONYL_OXYGEN)
        .map(|e| e.color())
        .unwrap_or(Color::WHITE);

    let mut mesh = Mesh::new();
    let mut previous: Option<Point3<f64>> = None;
    for residue in chain.residues() {
        let carbonyl = atom_position(model, residue, CARBONYL_CARBON)
            .zip(atom_position(model, residue, CARBONYL_OXYGEN));
        // A residue without a full carbonyl breaks the trace.
        let Some((c, o)) = carbonyl else {
            previous = None;
            continue;
        };

        let mut part = primitives.sphere(&c, TRACE_RADIUS);
        part.set_color(Color::WHITE);
        mesh.add(&part);

        let mut part = primitives.cylinder_between(&c, &o, CARBONYL_RADIUS)?;
        part.set_color(oxygen);
        mesh.add(&part);

        let mut part = primitives.sphere(&o, CARBONYL_RADIUS);
        part.set_color(oxygen);
        mesh.add(&part);

        if let Some(prev) = previous {
            let mut part = primitives.cylinder_between(&c, &prev, TRACE_RADIUS)?;
            part.set_color(Color::WHITE);
            mesh.add(&part);
        }
        previous = Some(c);
    }
    Ok(mesh)
}

/// Traces each chain through its carbonyl groups.
///
/// Every residue contributes a white sphere at `C`, an oxygen-colored stick and sphere for
/// `C=O`, and a white stick back to the previous residue's `C`.
pub fn backbone_mesh(model: &Model, primitives: &Primitives) -> Result<Mesh, DegenerateDirectionError> {
    #[cfg(not(feature = "parallel"))]
    let iterator = model.chains().iter();

    #[cfg(feature = "parallel")]
    let iterator = model.chains().par_iter();

    let chains: Vec<Mesh> = iterator
        .map(|chain| chain_backbone(model, chain, primitives))
        .collect::<Result<_, _>>()?;

    let mut mesh = Mesh::new();
    for chain in &chains {
        mesh.add(chain);
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;

    fn add(model: &mut Model, residue: isize, serial: u32, name: &str, position: Point3<f64>) {
        let element = &name[..1];
        model
            .add_atom_to_residue('A', residue, "GLY", Atom::new(serial, name, element, position))
            .unwrap();
    }

    fn counts(primitives: &Primitives) -> (usize, usize) {
        (
            primitives.sphere_template().len(),
            primitives.cylinder_template().len(),
        )
    }

    #[test]
    fn backbone_links_consecutive_residues() {
        let mut model = Model::new();
        model.add_chain('A');
        add(&mut model, 1, 1, "C", Point3::new(0.0, 0.0, 0.0));
        add(&mut model, 1, 2, "O", Point3::new(0.0, 1.2, 0.0));
        add(&mut model, 2, 3, "C", Point3::new(3.8, 0.0, 0.0));
        add(&mut model, 2, 4, "O", Point3::new(3.8, 1.2, 0.0));

        let primitives = Primitives::new(4, 6, 6);
        let (sphere, cylinder) = counts(&primitives);
        let mesh = backbone_mesh(&model, &primitives).unwrap();
        assert_eq!(mesh.len(), 2 * (2 * sphere + cylinder) + cylinder);

        let first = &mesh.triangles()[0];
        assert_eq!(first.v1.color, Color::WHITE);
        let stick = &mesh.triangles()[sphere];
        assert_eq!(stick.v1.color, elements::lookup("O").unwrap().color());

        let bb = mesh.bounding_box().unwrap();
        assert!((bb.min.x + TRACE_RADIUS).abs() < 1e-9);
        assert!((bb.max.x - 3.8 - TRACE_RADIUS).abs() < 1e-9);
    }

    #[test]
    fn residue_without_carbonyl_breaks_the_trace() {
        let mut model = Model::new();
        model.add_chain('A');
        add(&mut model, 1, 1, "C", Point3::new(0.0, 0.0, 0.0));
        add(&mut model, 1, 2, "O", Point3::new(0.0, 1.2, 0.0));
        add(&mut model, 2, 3, "CA", Point3::new(2.0, 0.0, 0.0));
        add(&mut model, 3, 4, "C", Point3::new(3.8, 0.0, 0.0));
        add(&mut model, 3, 5, "O", Point3::new(3.8, 1.2, 0.0));

        let primitives = Primitives::new(4, 6, 6);
        let (sphere, cylinder) = counts(&primitives);
        let mesh = backbone_mesh(&model, &primitives).unwrap();
        assert_eq!(mesh.len(), 2 * (2 * sphere + cylinder));
    }

    #[test]
    fn coincident_carbonyl_atoms_are_degenerate() {
        let mut model = Model::new();
        model.add_chain('A');
        add(&mut model, 1, 1, "C", Point3::new(1.0, 0.0, 0.0));
        add(&mut model, 1, 2, "O", Point3::new(1.0, 0.0, 0.0));
        assert!(backbone_mesh(&model, Primitives::shared()).is_err());
    }

    #[test]
    fn model_without_chains_has_no_backbone() {
        assert!(backbone_mesh(&Model::new(), Primitives::shared()).unwrap().is_empty());
    }
}
