//! Exporting scalars and serializable structs.
//!
//! Run with: cargo run --example simple

use serde::Serialize;
use serde_exporter::{export, export_serialize, shortened_export, Value};
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    email: String,
    score: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Scalars keep their exact kind visible
    for value in [
        Value::Null,
        Value::from(false),
        Value::from(0),
        Value::from(1.0),
        Value::from("line one\r\nline two"),
        Value::from(vec![0xde_u8, 0xad, 0x00]),
    ] {
        println!("{}", export(&value));
    }
    println!();

    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            score: 10.0,
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
            score: 7.5,
        },
    ];

    let text = export_serialize(&users)?;
    println!("Full export:\n{}\n", text);

    let long = Value::from("The quick brown fox jumps over the lazy dog\nagain and again");
    println!("Shortened: {}", shortened_export(&long));

    Ok(())
}
