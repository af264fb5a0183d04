//! The same rows rendered through every output style.
//!
//! Run with: cargo run --example styles

use fixie::{row, write_str, OutputStyle, Result};

fn main() -> Result<()> {
    let rows = vec![
        row!({"name": "Hydrogen", "symbol": "H", "metallic": false}),
        row!({"name": "Lithium", "symbol": "Li", "metallic": true}),
    ];

    for style in [
        OutputStyle::Compact,
        OutputStyle::AlignedCompact,
        OutputStyle::Expanded,
        OutputStyle::AlignedExpanded,
    ] {
        println!("=== {:?} ===", style);
        println!("{}", write_str(&rows, style)?);
    }

    Ok(())
}
