//! Shared and self-referential structures.
//!
//! Run with: cargo run --example cycles

use serde_exporter::{export, shortened_recursive_export, Array, Object, Value};

fn main() {
    // An array that contains itself
    let list = Array::new();
    list.push(Value::from("head"));
    list.push(Value::Array(list.clone()));
    println!("Self-reference:\n{}\n", export(&Value::Array(list.clone())));

    // A parent and child pointing at each other
    let parent = Object::new("Parent");
    let child = Object::new("Child");
    parent.set_public("child", Value::Object(child.clone()));
    child.set_private("Child", "parent", Value::Object(parent.clone()));
    println!("Mutual references:\n{}\n", export(&Value::Object(parent)));

    // Equal content, separate identity: two numbers
    let siblings = Array::new();
    siblings.push(Value::from(vec![Value::from(1), Value::from(2)]));
    siblings.push(Value::from(vec![Value::from(1), Value::from(2)]));
    println!("Equal siblings:\n{}\n", export(&Value::Array(siblings)));

    // Argument-list style summary
    println!("Arguments: {}", shortened_recursive_export(&list));
}
