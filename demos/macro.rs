//! Using the value! macro for dynamic value construction.
//!
//! Run with: cargo run --example macro

use serde_exporter::{export, shortened_export, value, Key, Value};

fn main() {
    let null_val = value!(null);
    let bool_val = value!(true);
    let number = value!(42);
    let float = value!(42.0);
    let text = value!("Hello, exporter!");

    println!("Primitives:");
    println!("  null:   {}", export(&null_val));
    println!("  bool:   {}", export(&bool_val));
    println!("  number: {}", export(&number));
    println!("  float:  {}", export(&float));
    println!("  text:   {}\n", export(&text));

    let numbers = value!([1, 2, 3, 4, 5]);
    let mixed = value!([1, "two", true, null]);

    println!("Arrays:");
    println!("{}", export(&numbers));
    println!("{}\n", export(&mixed));

    let config = value!({
        "app": {
            "name": "MyApp",
            "version": "1.0.0"
        },
        "database": {
            "host": "localhost",
            "port": 5432
        },
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    println!("Nested structures:");
    println!("{}\n", export(&config));

    let items = vec![
        value!({"id": 1, "status": "active"}),
        value!({"id": 2, "status": "pending"}),
        value!({"id": 3, "status": "completed"}),
    ];

    let summary = value!({
        "total": 3,
        "items": items
    });

    println!("Dynamic construction:");
    println!("{}", export(&summary));
    println!("Shortened: {}\n", shortened_export(&summary));

    if let Some(app) = config.as_array().and_then(|c| c.get(&Key::from("app"))) {
        if let Some(Value::String(name)) = app.as_array().and_then(|a| a.get(&Key::from("name"))) {
            println!("Accessing values:");
            println!("  App name: {}", String::from_utf8_lossy(&name));
        }
    }
}
