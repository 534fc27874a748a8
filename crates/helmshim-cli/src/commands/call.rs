//! Call command - invoke a single shim from the command line

use console::style;
use helmshim_core::{Value, registry};

use crate::error::Result;

pub fn run(shim: &str, args: &[String], debug: bool) -> Result<()> {
    let args: Vec<Value> = args.iter().map(|arg| parse_arg(arg)).collect();

    if debug {
        eprintln!(
            "{} Calling {} with {}",
            style("DEBUG").dim(),
            shim,
            serde_json::to_string(&args)?
        );
    }

    let result = registry::call(shim, &args)?;
    println!("{}", serde_json::to_string(&to_json(result))?);
    Ok(())
}

/// Decode an argument as JSON, falling back to a plain string
fn parse_arg(arg: &str) -> Value {
    serde_json::from_str(arg).unwrap_or_else(|_| Value::from(arg))
}

/// Integral float64 values print as integers, as they do in templates
fn to_json(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => b.into(),
        Value::Int(i) => i.into(),
        Value::Number(n) => {
            if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
                (n as i64).into()
            } else {
                serde_json::Number::from_f64(n)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            }
        }
        Value::String(s) => s.into(),
        Value::List(items) => items.into_iter().map(to_json).collect(),
        Value::Map(map) => serde_json::Value::Object(
            map.into_iter().map(|(k, v)| (k, to_json(v))).collect(),
        ),
    }
}
