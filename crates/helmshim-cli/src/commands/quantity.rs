//! Quantity command - validate and convert Kubernetes quantities

use helmshim_core::{Value, quantity_as_int64, quantity_validate};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Serialize)]
struct QuantityResult {
    quantity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ok: Option<bool>,
}

/// Convert each quantity; the first malformed one aborts the command
pub fn run(quantities: &[String], validate_only: bool, json: bool) -> Result<()> {
    let mut results = Vec::with_capacity(quantities.len());

    for quantity in quantities {
        let value = quantity_validate(Value::from(quantity.as_str()))?;

        let result = if validate_only {
            QuantityResult {
                quantity: quantity.clone(),
                value: None,
                ok: None,
            }
        } else {
            let (n, ok) = quantity_as_int64(&value)?;
            QuantityResult {
                quantity: quantity.clone(),
                value: Some(n),
                ok: Some(ok),
            }
        };
        results.push(result);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for result in &results {
        match (result.value, result.ok) {
            (Some(n), Some(ok)) => println!("{}\t{}\t{}", result.quantity, n, ok),
            _ => println!("{}\tvalid", result.quantity),
        }
    }

    Ok(())
}
