use crate::cli::ElementsArgs;
use crate::error::{CliError, Result};
use molmesh::core::elements::{self, Element};
use std::fmt::Write as _;

pub fn run(args: ElementsArgs) -> Result<()> {
    let selected = select(&args.symbols)?;
    print!("{}", format_table(&selected));
    Ok(())
}

/// Resolves the requested symbols in order, or the whole table when none are given.
fn select(symbols: &[String]) -> Result<Vec<&'static Element>> {
    if symbols.is_empty() {
        return Ok(elements::all());
    }
    symbols
        .iter()
        .map(|s| elements::lookup(s).map_err(|e| CliError::Argument(e.to_string())))
        .collect()
}

fn format_table(rows: &[&Element]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<12} {:>8} {:>8}  {}",
        "Symbol", "Name", "Radius", "vdW", "Color"
    );
    for e in rows {
        let _ = writeln!(
            out,
            "{:<6} {:<12} {:>8.2} {:>8.2}  #{}",
            e.symbol, e.name, e.radius, e.vdw_radius, e.hex_color
        );
    }
    out
}
