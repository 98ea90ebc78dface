pub mod atom;
pub mod chain;
pub mod ids;
pub mod model;
pub mod residue;
pub mod topology;
