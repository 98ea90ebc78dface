use super::geometry::mesh::Color;
use phf::{Map, phf_map};
use thiserror::Error;

/// Display and size data for a chemical element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub symbol: &'static str,
    pub name: &'static str,
    /// Jmol/CPK display color as `RRGGBB`.
    pub hex_color: &'static str,
    /// Covalent bonding radius in Angstroms.
    pub radius: f64,
    /// Van der Waals radius in Angstroms.
    pub vdw_radius: f64,
}

impl Element {
    pub fn color(&self) -> Color {
        Color::from_hex(self.hex_color).unwrap_or(Color::WHITE)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown element symbol '{symbol}'")]
pub struct MissingElementError {
    pub symbol: String,
}

macro_rules! element {
    ($symbol:literal, $name:literal, $hex:literal, $radius:literal, $vdw:literal) => {
        Element {
            symbol: $symbol,
            name: $name,
            hex_color: $hex,
            radius: $radius,
            vdw_radius: $vdw,
        }
    };
}

#[rustfmt::skip]
static ELEMENTS: Map<&'static str, Element> = phf_map! {
    // --- Period 1 ---
    "H"  => element!("H",  "Hydrogen",   "FFFFFF", 0.31, 1.20),
    "He" => element!("He", "Helium",     "D9FFFF", 0.28, 1.40),
    // --- Period 2 ---
    "Li" => element!("Li", "Lithium",    "CC80FF", 1.28, 1.82),
    "Be" => element!("Be", "Beryllium",  "C2FF00", 0.96, 1.53),
    "B"  => element!("B",  "Boron",      "FFB5B5", 0.84, 1.92),
    "C"  => element!("C",  "Carbon",     "909090", 0.77, 1.70),
    "N"  => element!("N",  "Nitrogen",   "3050F8", 0.71, 1.55),
    "O"  => element!("O",  "Oxygen",     "FF0D0D", 0.66, 1.52),
    "F"  => element!("F",  "Fluorine",   "90E050", 0.57, 1.47),
    "Ne" => element!("Ne", "Neon",       "B3E3F5", 0.58, 1.54),
    // --- Period 3 ---
    "Na" => element!("Na", "Sodium",     "AB5CF2", 1.66, 2.27),
    "Mg" => element!("Mg", "Magnesium",  "8AFF00", 1.41, 1.73),
    "Al" => element!("Al", "Aluminium",  "BFA6A6", 1.21, 1.84),
    "Si" => element!("Si", "Silicon",    "F0C8A0", 1.11, 2.10),
    "P"  => element!("P",  "Phosphorus", "FF8000", 1.07, 1.80),
    "S"  => element!("S",  "Sulfur",     "FFFF30", 1.05, 1.80),
    "Cl" => element!("Cl", "Chlorine",   "1FF01F", 1.02, 1.75),
    "Ar" => element!("Ar", "Argon",      "80D1E3", 1.06, 1.88),
    // --- Period 4 ---
    "K"  => element!("K",  "Potassium",  "8F40D4", 2.03, 2.75),
    "Ca" => element!("Ca", "Calcium",    "3DFF00", 1.76, 2.31),
    "V"  => element!("V",  "Vanadium",   "A6A6AB", 1.53, 2.07),
    "Cr" => element!("Cr", "Chromium",   "8A99C7", 1.39, 2.06),
    "Mn" => element!("Mn", "Manganese",  "9C7AC7", 1.39, 2.05),
    "Fe" => element!("Fe", "Iron",       "E06633", 1.32, 2.04),
    "Co" => element!("Co", "Cobalt",     "F090A0", 1.26, 2.00),
    "Ni" => element!("Ni", "Nickel",     "50D050", 1.24, 1.63),
    "Cu" => element!("Cu", "Copper",     "C88033", 1.32, 1.40),
    "Zn" => element!("Zn", "Zinc",       "7D80B0", 1.22, 1.39),
    "Ga" => element!("Ga", "Gallium",    "C28F8F", 1.22, 1.87),
    "As" => element!("As", "Arsenic",    "BD80E3", 1.19, 1.85),
    "Se" => element!("Se", "Selenium",   "FFA100", 1.20, 1.90),
    "Br" => element!("Br", "Bromine",    "A62929", 1.20, 1.85),
    // --- Period 5 ---
    "Rb" => element!("Rb", "Rubidium",   "702EB0", 2.20, 3.03),
    "Sr" => element!("Sr", "Strontium",  "00FF00", 1.95, 2.49),
    "Mo" => element!("Mo", "Molybdenum", "54B5B5", 1.54, 2.17),
    "Cd" => element!("Cd", "Cadmium",    "FFD98F", 1.44, 1.58),
    "I"  => element!("I",  "Iodine",     "940094", 1.39, 1.98),
    "Xe" => element!("Xe", "Xenon",      "429EB0", 1.40, 2.16),
    // --- Period 6 ---
    "Cs" => element!("Cs", "Caesium",    "57178F", 2.44, 3.43),
    "Ba" => element!("Ba", "Barium",     "00C900", 2.15, 2.68),
    "W"  => element!("W",  "Tungsten",   "2194D6", 1.62, 2.18),
    "Pt" => element!("Pt", "Platinum",   "D0D0E0", 1.36, 1.75),
    "Au" => element!("Au", "Gold",       "FFD123", 1.36, 1.66),
    "Hg" => element!("Hg", "Mercury",    "B8B8D0", 1.32, 1.55),
    "Pb" => element!("Pb", "Lead",       "575961", 1.46, 2.02),
};

/// Looks up an element by its case-sensitive symbol (`"Fe"`, not `"FE"`).
pub fn lookup(symbol: &str) -> Result<&'static Element, MissingElementError> {
    ELEMENTS.get(symbol).ok_or_else(|| MissingElementError {
        symbol: symbol.to_string(),
    })
}

/// All known elements, ordered by bonding radius and then symbol.
pub fn all() -> Vec<&'static Element> {
    let mut elements: Vec<_> = ELEMENTS.values().collect();
    elements.sort_by(|a, b| a.radius.total_cmp(&b.radius).then(a.symbol.cmp(b.symbol)));
    elements
}

/// Guesses an element symbol from an atom name when a record carries no element field.
///
/// Only the first alphabetic character is used, so `"CA"` is the alpha carbon, not calcium.
pub fn infer_symbol(atom_name: &str) -> Option<String> {
    atom_name
        .trim()
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_known_elements() {
        let carbon = lookup("C").unwrap();
        assert_eq!(carbon.name, "Carbon");
        assert_eq!(carbon.radius, 0.77);
        assert_eq!(carbon.vdw_radius, 1.70);

        let oxygen = lookup("O").unwrap();
        assert_eq!(oxygen.radius, 0.66);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup("Fe").is_ok());
        assert_eq!(
            lookup("FE").unwrap_err(),
            MissingElementError {
                symbol: "FE".to_string()
            }
        );
        assert!(lookup("c").is_err());
    }

    #[test]
    fn unknown_symbol_reports_the_symbol() {
        let err = lookup("Xx").unwrap_err();
        assert_eq!(err.to_string(), "Unknown element symbol 'Xx'");
    }

    #[test]
    fn table_keys_match_symbols_and_colors_parse() {
        for (key, element) in ELEMENTS.entries() {
            assert_eq!(key, &element.symbol);
            assert!(Color::from_hex(element.hex_color).is_some(), "{}", element.symbol);
            assert!(element.radius > 0.0 && element.vdw_radius > element.radius * 0.5);
        }
    }

    #[test]
    fn element_color_converts_hex() {
        assert_eq!(lookup("O").unwrap().color(), Color::from_rgb8(0xFF, 0x0D, 0x0D));
        assert_eq!(lookup("H").unwrap().color(), Color::WHITE);
    }

    #[test]
    fn all_is_sorted_and_complete() {
        let elements = all();
        assert_eq!(elements.len(), ELEMENTS.len());
        assert_eq!(elements[0].symbol, "He");
        assert!(elements.windows(2).all(|w| w[0].radius <= w[1].radius));
    }

    #[test]
    fn infer_symbol_uses_first_letter() {
        assert_eq!(infer_symbol("CA"), Some("C".to_string()));
        assert_eq!(infer_symbol(" 1HB"), Some("H".to_string()));
        assert_eq!(infer_symbol("o"), Some("O".to_string()));
        assert_eq!(infer_symbol("12"), None);
    }
}
