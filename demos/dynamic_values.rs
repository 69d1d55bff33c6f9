//! Objects with visibility, enumerable storage and serde conversion.
//!
//! Run with: cargo run --example dynamic_values

use serde::Serialize;
use serde_exporter::{export, shortened_export, to_array, to_value, Object, Value};
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Fields of every visibility export under their bare names
    let account = Object::new("Account");
    account.set_public("owner", Value::from("alice"));
    account.set_protected("balance", Value::from(120.0));
    account.set_private("Account", "pin", Value::from("0000"));

    println!("Object:\n{}\n", export(&Value::Object(account.clone())));

    let flat = to_array(&Value::Object(account.clone()));
    println!("Flattened keys:");
    for key in flat.keys() {
        println!("  {}", key);
    }
    println!();

    // Enumerable storage lists attached objects instead of its own fields
    let storage = Object::storage("ObjectStorage");
    storage.attach(account.clone(), Value::from("primary"))?;
    storage.attach(Object::new("Account"), Value::Null)?;
    println!("Storage:\n{}\n", export(&Value::Object(storage.clone())));
    println!("Storage shortened: {}\n", shortened_export(&Value::Object(storage)));

    // Convert an existing struct to a Value
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let user_value = to_value(&user)?;
    println!("User as Value:\n{}\n", user_value);

    println!("Type checks:");
    println!("  is_object: {}", user_value.is_object());
    println!("  is_array:  {}", user_value.is_array());
    println!("  is_string: {}", user_value.is_string());

    Ok(())
}
