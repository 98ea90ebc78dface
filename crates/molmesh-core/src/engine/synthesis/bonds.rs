use super::atoms::PlacedAtom;
use crate::core::geometry::mesh::Mesh;
use crate::core::geometry::primitives::Primitives;
use crate::core::geometry::transform::{DegenerateDirectionError, direction};
use crate::core::models::topology::Connection;
use crate::engine::config::{ConnectionPolicy, SynthesisConfig};
use nalgebra::Point3;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Bond endpoint {serial} is not among the drawn atoms")]
pub struct UnresolvedBondEndpointError {
    pub serial: u32,
}

/// Filters connections according to the policy, preserving input order.
pub fn select_connections(connections: &[Connection], policy: ConnectionPolicy) -> Vec<Connection> {
    match policy {
        ConnectionPolicy::KeepAll => connections.to_vec(),
        ConnectionPolicy::SkipDescending => connections
            .iter()
            .filter(|c| !c.is_descending())
            .copied()
            .collect(),
        ConnectionPolicy::Unordered => {
            let mut seen = HashSet::new();
            connections
                .iter()
                .filter(|c| seen.insert(c.canonical()))
                .copied()
                .collect()
        }
    }
}

fn resolve<'m, 'a>(
    by_serial: &'m HashMap<u32, &'m PlacedAtom<'a>>,
    connection: &Connection,
) -> Result<(&'m PlacedAtom<'a>, &'m PlacedAtom<'a>), UnresolvedBondEndpointError> {
    let endpoint = |serial: u32| {
        by_serial
            .get(&serial)
            .copied()
            .ok_or(UnresolvedBondEndpointError { serial })
    };
    Ok((endpoint(connection.serial1)?, endpoint(connection.serial2)?))
}

/// Two cylinders joining `a1` and `a2`, each half colored by its own atom's element.
///
/// Both ends are pulled back to `atom_scale * radius - bond_gap` from the atom centers and
/// the split happens at the midpoint of the trimmed segment.
pub fn split_bond(
    a1: &PlacedAtom,
    a2: &PlacedAtom,
    config: &SynthesisConfig,
    primitives: &Primitives,
) -> Result<Mesh, DegenerateDirectionError> {
    let c1 = a1.atom.position;
    let c2 = a2.atom.position;
    let axis = direction(&(c2 - c1))?;

    let t1 = config.atom_scale * a1.element.radius - config.bond_gap;
    let t2 = config.atom_scale * a2.element.radius - config.bond_gap;
    let p1 = c1 + axis.into_inner() * t1;
    let p2 = c2 - axis.into_inner() * t2;
    let mid = nalgebra::center(&p1, &p2);

    let half = |from: &Point3<f64>, to: &Point3<f64>| {
        primitives.cylinder(
            &nalgebra::center(from, to),
            &axis,
            (to - from).norm().max(config.min_cylinder_height),
            config.bond_radius,
        )
    };

    let mut first = half(&p1, &mid)?;
    first.set_color(a1.element.color());
    let mut second = half(&mid, &p2)?;
    second.set_color(a2.element.color());

    let mut mesh = first;
    mesh.add(&second);
    Ok(mesh)
}

/// Bond cylinders for every selected connection whose endpoints are both drawn.
///
/// Connections naming an atom outside `atoms` are dropped.
pub fn bond_mesh(
    atoms: &[PlacedAtom],
    connections: &[Connection],
    config: &SynthesisConfig,
    primitives: &Primitives,
) -> Result<Mesh, DegenerateDirectionError> {
    let by_serial: HashMap<u32, &PlacedAtom> = atoms.iter().map(|p| (p.atom.serial, p)).collect();

    let pairs: Vec<_> = select_connections(connections, config.connection_policy)
        .iter()
        .filter_map(|connection| match resolve(&by_serial, connection) {
            Ok(pair) => Some(pair),
            Err(e) => {
                debug!(
                    serial1 = connection.serial1,
                    serial2 = connection.serial2,
                    "Dropping connection: {}",
                    e
                );
                None
            }
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = pairs.iter();

    #[cfg(feature = "parallel")]
    let iterator = pairs.par_iter();

    let bonds: Vec<Mesh> = iterator
        .map(|(a1, a2)| split_bond(a1, a2, config, primitives))
        .collect::<Result<_, _>>()?;

    let mut mesh = Mesh::new();
    for bond in &bonds {
        mesh.add(bond);
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::elements;
    use crate::core::geometry::mesh::BoundingBox;
    use crate::core::models::atom::Atom;
    use crate::engine::config::SceneConfig;

    const EPS: f64 = 1e-9;

    fn connection(a: u32, b: u32) -> Connection {
        Connection::new(a, b).unwrap()
    }

    fn atoms() -> Vec<Atom> {
        vec![
            Atom::new(1, "C1", "C", Point3::new(0.0, 0.0, 0.0)),
            Atom::new(2, "O1", "O", Point3::new(0.0, 0.0, 2.0)),
            Atom::new(3, "N1", "N", Point3::new(2.0, 0.0, 0.0)),
        ]
    }

    fn placed(atoms: &[Atom]) -> Vec<PlacedAtom<'_>> {
        atoms
            .iter()
            .map(|atom| PlacedAtom {
                atom,
                element: elements::lookup(&atom.element).unwrap(),
            })
            .collect()
    }

    #[test]
    fn select_connections_applies_each_policy() {
        let list = [connection(1, 2), connection(2, 1), connection(3, 1), connection(1, 2)];

        assert_eq!(select_connections(&list, ConnectionPolicy::KeepAll).len(), 4);
        assert_eq!(
            select_connections(&list, ConnectionPolicy::SkipDescending),
            vec![connection(1, 2), connection(1, 2)]
        );
        assert_eq!(
            select_connections(&list, ConnectionPolicy::Unordered),
            vec![connection(1, 2), connection(3, 1)]
        );
    }

    #[test]
    fn split_bond_trims_and_splits_at_the_midpoint() {
        let atoms = atoms();
        let placed = placed(&atoms);
        let config = SceneConfig::default().synthesis;
        let primitives = Primitives::new(4, 8, 12);

        let mesh = split_bond(&placed[0], &placed[1], &config, &primitives).unwrap();
        let per_cylinder = primitives.cylinder_template().len();
        assert_eq!(mesh.len(), 2 * per_cylinder);

        let carbon_half = Mesh::from_triangles(mesh.triangles()[..per_cylinder].to_vec());
        let oxygen_half = Mesh::from_triangles(mesh.triangles()[per_cylinder..].to_vec());
        let bb1 = carbon_half.bounding_box().unwrap();
        let bb2 = oxygen_half.bounding_box().unwrap();

        // 0.75 * 0.77 - 0.1 and 2 - (0.75 * 0.66 - 0.1)
        assert!((bb1.min.z - 0.4775).abs() < EPS);
        assert!((bb1.max.z - 1.04125).abs() < EPS);
        assert!((bb2.min.z - 1.04125).abs() < EPS);
        assert!((bb2.max.z - 1.605).abs() < EPS);
        assert!((bb1.max.x - 0.25).abs() < EPS);

        let carbon = elements::lookup("C").unwrap().color();
        let oxygen = elements::lookup("O").unwrap().color();
        assert!(carbon_half.triangles().iter().all(|t| t.v1.color == carbon));
        assert!(oxygen_half.triangles().iter().all(|t| t.v3.color == oxygen));
    }

    #[test]
    fn split_bond_of_coincident_atoms_is_degenerate() {
        let atoms = vec![
            Atom::new(1, "C1", "C", Point3::new(1.0, 1.0, 1.0)),
            Atom::new(2, "C2", "C", Point3::new(1.0, 1.0, 1.0)),
        ];
        let placed = placed(&atoms);
        let config = SceneConfig::default().synthesis;
        assert!(split_bond(&placed[0], &placed[1], &config, Primitives::shared()).is_err());
    }

    fn halves(mesh: &Mesh, primitives: &Primitives) -> (BoundingBox, BoundingBox) {
        let n = primitives.cylinder_template().len();
        let first = Mesh::from_triangles(mesh.triangles()[..n].to_vec());
        let second = Mesh::from_triangles(mesh.triangles()[n..].to_vec());
        (first.bounding_box().unwrap(), second.bounding_box().unwrap())
    }

    fn two_carbons(distance: f64) -> Vec<Atom> {
        vec![
            Atom::new(1, "C1", "C", Point3::new(0.0, 0.0, 0.0)),
            Atom::new(2, "C2", "C", Point3::new(0.0, 0.0, distance)),
        ]
    }

    #[test]
    fn split_bond_clamps_zero_length_halves_to_minimum_height() {
        // 2 * (0.75 * 0.77 - 0.1): the trimmed endpoints meet.
        let atoms = two_carbons(0.955);
        let placed = placed(&atoms);
        let config = SceneConfig::default().synthesis;
        let primitives = Primitives::new(4, 8, 6);

        let mesh = split_bond(&placed[0], &placed[1], &config, &primitives).unwrap();
        let (bb1, bb2) = halves(&mesh, &primitives);
        for bb in [bb1, bb2] {
            assert!((bb.size().z - config.min_cylinder_height).abs() < 1e-12);
            assert!((bb.center().z - 0.4775).abs() < 1e-9);
            assert!(bb.min.iter().chain(bb.max.iter()).all(|c| c.is_finite()));
        }
    }

    #[test]
    fn split_bond_of_crossed_trimmed_ends_splits_at_their_midpoint() {
        // Trimmed ends at z = 0.4775 and z = 0.5 - 0.4775 = 0.0225 have crossed.
        let atoms = two_carbons(0.5);
        let placed = placed(&atoms);
        let mut config = SceneConfig::default().synthesis;
        let primitives = Primitives::new(4, 8, 6);

        let mesh = split_bond(&placed[0], &placed[1], &config, &primitives).unwrap();
        let (bb1, bb2) = halves(&mesh, &primitives);
        assert!((bb1.min.z - 0.25).abs() < EPS && (bb1.max.z - 0.4775).abs() < EPS);
        assert!((bb2.min.z - 0.0225).abs() < EPS && (bb2.max.z - 0.25).abs() < EPS);
        assert!(bb1.size().z >= config.min_cylinder_height);
        assert!(bb2.size().z >= config.min_cylinder_height);

        // Halves shorter than the minimum grow around their own centers.
        config.min_cylinder_height = 0.5;
        let mesh = split_bond(&placed[0], &placed[1], &config, &primitives).unwrap();
        let (bb1, bb2) = halves(&mesh, &primitives);
        assert!((bb1.size().z - 0.5).abs() < EPS && (bb2.size().z - 0.5).abs() < EPS);
        assert!((bb1.center().z - 0.36375).abs() < EPS);
        assert!((bb2.center().z - 0.13625).abs() < EPS);
    }

    #[test]
    fn bond_mesh_drops_unresolved_connections() {
        let atoms = atoms();
        let placed = placed(&atoms);
        let config = SceneConfig::default().synthesis;
        let primitives = Primitives::new(4, 8, 6);
        let per_bond = 2 * primitives.cylinder_template().len();

        let connections = [connection(1, 2), connection(2, 99), connection(1, 3), connection(2, 1)];
        let mesh = bond_mesh(&placed, &connections, &config, &primitives).unwrap();
        assert_eq!(mesh.len(), 2 * per_bond);

        let first = split_bond(&placed[0], &placed[1], &config, &primitives).unwrap();
        assert_eq!(&mesh.triangles()[..per_bond], first.triangles());
    }

    #[test]
    fn resolve_reports_missing_endpoint() {
        let atoms = atoms();
        let placed = placed(&atoms);
        let by_serial: HashMap<u32, &PlacedAtom> = placed.iter().map(|p| (p.atom.serial, p)).collect();
        let err = resolve(&by_serial, &connection(7, 1)).unwrap_err();
        assert_eq!(err, UnresolvedBondEndpointError { serial: 7 });
    }
}
