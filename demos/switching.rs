//! Watch the adaptive writer switch from aligned to compact output.
//!
//! Run with: cargo run --example switching

use fixie::{row, Result, SwitchingWriter, WriteHandle};

fn main() -> Result<()> {
    // a tiny threshold so the switch happens after a handful of rows
    for threshold in [1024, 64] {
        let mut buffer = Vec::new();
        {
            let mut writer = SwitchingWriter::from_stream(&mut buffer).with_threshold(threshold);
            for i in 0..4 {
                writer.write(&row!({"word": format!("word-{}", i), "n": i}))?;
            }
            writer.close()?;
        }
        println!("=== threshold {} bytes ===", threshold);
        println!("{}", String::from_utf8_lossy(&buffer));
    }

    Ok(())
}
