//! Algorithms command - prints the closed set of algorithm names per capability

use clap::Args;
use serde_json::{Map, Value};

use crate::domain::Capability;

#[derive(Args, Debug, Default)]
pub struct AlgorithmsArgs {
    /// Print a JSON object instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AlgorithmsArgs) -> anyhow::Result<()> {
    let output = if args.json {
        serde_json::to_string_pretty(&catalog())?
    } else {
        render_table()
    };

    println!("{}", output);
    Ok(())
}

/// `{capability: [algorithm names]}`
fn catalog() -> Value {
    let map: Map<String, Value> = Capability::ALL
        .iter()
        .map(|capability| {
            let names = capability
                .algorithm_names()
                .into_iter()
                .map(|name| Value::String(name.to_string()))
                .collect();
            (capability.as_str().to_string(), Value::Array(names))
        })
        .collect();

    Value::Object(map)
}

fn render_table() -> String {
    let width = Capability::ALL
        .iter()
        .map(|c| c.as_str().len())
        .max()
        .unwrap_or(0);

    Capability::ALL
        .iter()
        .map(|capability| {
            let names = capability.algorithm_names();
            let names = if names.is_empty() {
                "(no selector)".to_string()
            } else {
                names.join(", ")
            };
            format!("{:<width$}  {}", capability.as_str(), names, width = width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
