use super::atom::{Atom, AtomKind};
use super::chain::Chain;
use super::ids::AtomId;
use super::topology::Connection;
use crate::core::geometry::mesh::Mesh;
use nalgebra::Matrix4;
use slotmap::SlotMap;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Duplicate atom serial {0}")]
    DuplicateSerial(u32),
    #[error("Atom {0} cannot be bonded to itself")]
    SelfBond(u32),
    #[error("Unknown chain '{0}'")]
    UnknownChain(char),
}

/// A materialized molecular structure ready for mesh synthesis.
///
/// The model owns its atoms in a slot map and indexes them by serial number. Polymer atoms
/// are registered with a chain and residue; hetero atoms may stand alone. Once built, the
/// model is only read by the synthesis stages.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Primary storage for atoms, iterated in insertion order.
    atoms: SlotMap<AtomId, Atom>,
    /// Lookup map from serial number to atom ID.
    serial_map: HashMap<u32, AtomId>,
    /// Chains in the order they were first seen.
    chains: Vec<Chain>,
    /// Lookup map from chain identifier to position in `chains`.
    chain_index: HashMap<char, usize>,
    /// Bonds as listed by the source, in order.
    connections: Vec<Connection>,
    /// Biological assembly operators, applied to the whole scene.
    symmetry: Vec<Matrix4<f64>>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn atom_by_serial(&self, serial: u32) -> Option<&Atom> {
        self.serial_map
            .get(&serial)
            .and_then(|&id| self.atoms.get(id))
    }

    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn het_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.values().filter(|a| a.kind == AtomKind::Hetero)
    }

    pub fn polymer_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.values().filter(|a| a.kind == AtomKind::Polymer)
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chain(&self, id: char) -> Option<&Chain> {
        self.chain_index.get(&id).map(|&i| &self.chains[i])
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn symmetry(&self) -> &[Matrix4<f64>] {
        &self.symmetry
    }

    /// Adds a chain or returns the existing one with the same identifier.
    pub fn add_chain(&mut self, id: char) -> &mut Chain {
        let index = *self.chain_index.entry(id).or_insert_with(|| {
            self.chains.push(Chain::new(id));
            self.chains.len() - 1
        });
        &mut self.chains[index]
    }

    /// Adds an atom that belongs to no chain, such as a ligand or solvent molecule.
    pub fn add_atom(&mut self, atom: Atom) -> Result<AtomId, ModelError> {
        if self.serial_map.contains_key(&atom.serial) {
            return Err(ModelError::DuplicateSerial(atom.serial));
        }
        let serial = atom.serial;
        let id = self.atoms.insert(atom);
        self.serial_map.insert(serial, id);
        Ok(id)
    }

    /// Adds an atom and registers it with a residue of an existing chain.
    ///
    /// The residue is created on first use. The atom's residue name is filled in from
    /// `residue_name` when it was left blank.
    pub fn add_atom_to_residue(
        &mut self,
        chain_id: char,
        residue_number: isize,
        residue_name: &str,
        mut atom: Atom,
    ) -> Result<AtomId, ModelError> {
        let chain_index = *self
            .chain_index
            .get(&chain_id)
            .ok_or(ModelError::UnknownChain(chain_id))?;
        if atom.residue_name.is_empty() {
            atom.residue_name = residue_name.to_string();
        }
        let atom_name = atom.name.clone();
        let id = self.add_atom(atom)?;
        self.chains[chain_index]
            .residue_entry(residue_number, residue_name)
            .add_atom(&atom_name, id);
        Ok(id)
    }

    pub fn set_ribbon(&mut self, chain_id: char, ribbon: Mesh) -> Result<(), ModelError> {
        let &index = self
            .chain_index
            .get(&chain_id)
            .ok_or(ModelError::UnknownChain(chain_id))?;
        self.chains[index].set_ribbon(ribbon);
        Ok(())
    }

    /// Records a bond between two serials. Endpoints are resolved lazily during synthesis,
    /// so a bond may name atoms that were filtered out of the model.
    pub fn add_connection(&mut self, serial1: u32, serial2: u32) -> Result<(), ModelError> {
        let connection = Connection::new(serial1, serial2).ok_or(ModelError::SelfBond(serial1))?;
        self.connections.push(connection);
        Ok(())
    }

    pub fn add_symmetry(&mut self, matrix: Matrix4<f64>) {
        self.symmetry.push(matrix);
    }
}
