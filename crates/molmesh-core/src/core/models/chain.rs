use super::residue::Residue;
use crate::core::geometry::mesh::Mesh;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub id: char,                         // Chain identifier (e.g., 'A', 'B')
    residues: Vec<Residue>,               // Residues in sequence order
    residue_index: HashMap<isize, usize>, // Residue number to position in `residues`
    ribbon: Mesh,                         // Precomputed ribbon surface, may be empty
}

impl Chain {
    pub(crate) fn new(id: char) -> Self {
        Self {
            id,
            residues: Vec::new(),
            residue_index: HashMap::new(),
            ribbon: Mesh::new(),
        }
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residue(&self, number: isize) -> Option<&Residue> {
        self.residue_index.get(&number).map(|&i| &self.residues[i])
    }

    /// Returns the residue with the given number, appending it when absent.
    pub(crate) fn residue_entry(&mut self, number: isize, name: &str) -> &mut Residue {
        let index = *self.residue_index.entry(number).or_insert_with(|| {
            self.residues.push(Residue::new(number, name));
            self.residues.len() - 1
        });
        &mut self.residues[index]
    }

    pub fn ribbon(&self) -> &Mesh {
        &self.ribbon
    }

    pub(crate) fn set_ribbon(&mut self, ribbon: Mesh) {
        self.ribbon = ribbon;
    }
}
