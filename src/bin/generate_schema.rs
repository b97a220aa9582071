//! Generate JSON Schema for moodnote settings
//!
//! Usage:
//!   cargo run --features dev-bins --bin generate_schema > moodnote-settings.schema.json

use moodnote::config::MoodnoteConfig;
use schemars::schema_for;

fn main() {
    let schema = schema_for!(MoodnoteConfig);
    let output = serde_json::to_string_pretty(&schema).expect("Failed to serialize schema");
    println!("{}", output);
}
