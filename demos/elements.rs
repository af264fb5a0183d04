//! Write a small periodic table to a fixture file and read it back.
//!
//! Run with: cargo run --example elements

use fixie::{read_path, row, write_path, OutputStyle, Result};

fn main() -> Result<()> {
    let rows = vec![
        row!({"name": "Hydrogen", "symbol": "H", "number": 1, "weight": 1.00794, "group": None::<&str>}),
        row!({"name": "Helium", "symbol": "He", "number": 2, "weight": 4.002602, "group": "Noble gas"}),
        row!({"name": "Lithium", "symbol": "Li", "number": 3, "weight": 6.941, "group": "Alkali metal"}),
    ];

    let path = std::env::temp_dir().join("elements.fix");
    write_path(&path, &rows, OutputStyle::Switching)?;

    println!("wrote {}:", path.display());
    println!("{}", std::fs::read_to_string(&path).expect("file was just written"));

    for (key, row) in read_path(&path)? {
        println!("{} -> {:?}", key, row.get("name"));
    }

    Ok(())
}
