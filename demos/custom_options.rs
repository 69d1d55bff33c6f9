//! Customizing the layout with ExportOptions.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_exporter::{export_serialize, to_value, to_writer_with_options, ExportOptions, Exporter};
use std::error::Error;
use std::io;

#[derive(Debug, Serialize)]
struct Config {
    name: String,
    version: String,
    debug: bool,
    paths: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        debug: true,
        paths: vec!["/usr/local/share/myapp/resources/default".to_string()],
    };

    // Default layout (4 spaces)
    println!("Default:");
    println!("{}\n", export_serialize(&config)?);

    // Two-space indentation, written straight to stdout
    println!("Indent 2:");
    let compact = ExportOptions::new().with_indent(2);
    to_writer_with_options(io::stdout().lock(), &config, &compact)?;
    println!("\n");

    // Narrower truncation window for the single-line form
    let narrow = Exporter::new(ExportOptions::new().with_string_window(24, 16, 5));
    let value = to_value(&config.paths[0])?;
    println!("Default shortened: {}", Exporter::default().shortened_export(&value));
    println!("Narrow shortened:  {}", narrow.shortened_export(&value));

    Ok(())
}
