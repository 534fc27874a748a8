//! The `_shims` object exposed to templates
//!
//! Each registered shim is a method of one global object, so generated code
//! reads `{{ _shims.typetest("string", x, "") }}`. Arguments cross into the
//! shim [`Value`] model JSON style (every number becomes a float64, undefined
//! and none become null) and results cross back out.

use helmshim_core::{Value, registry};
use minijinja::value::{Object, ObjectRepr, ValueKind};
use minijinja::{Error, ErrorKind, Output, State};
use std::fmt::Write;
use std::sync::Arc;

/// Global object dispatching method calls to the shim registry
#[derive(Debug, Default)]
pub struct ShimNamespace;

impl Object for ShimNamespace {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[minijinja::Value],
    ) -> Result<minijinja::Value, Error> {
        let shim = registry::lookup(method).map_err(|err| {
            Error::new(ErrorKind::UnknownMethod, err.to_string()).with_source(err)
        })?;

        let args = args
            .iter()
            .map(from_template_value)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(shim = shim.name, args = args.len(), "calling shim");

        let result = shim.call(&args).map_err(|err| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("{}: {}", shim.name, err),
            )
            .with_source(err)
        })?;

        Ok(into_template_value(result))
    }
}

/// Output formatter writing booleans as `true`/`false`, not `True`/`False`
pub fn format_value(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &minijinja::Value,
) -> Result<(), Error> {
    if value.kind() == ValueKind::Bool {
        let text = if value.is_true() { "true" } else { "false" };
        return out
            .write_str(text)
            .map_err(|e| Error::new(ErrorKind::WriteFailure, "failed to write output").with_source(e));
    }
    minijinja::escape_formatter(out, state, value)
}

/// Convert a template value into the shim model
pub fn from_template_value(value: &minijinja::Value) -> Result<Value, Error> {
    if value.is_undefined() || value.is_none() {
        return Ok(Value::Null);
    }

    let json = serde_json::to_value(value).map_err(|e| {
        Error::new(
            ErrorKind::BadSerialization,
            format!("cannot pass value to a shim: {}", e),
        )
    })?;
    Ok(Value::from(json))
}

/// Convert a shim value back into a template value
///
/// Integral float64 values leave as integers so they print as `3`, not
/// `3.0`; this loses nothing because they come back in as float64 anyway.
pub fn into_template_value(value: Value) -> minijinja::Value {
    match value {
        Value::Null => minijinja::Value::from(()),
        Value::Bool(b) => minijinja::Value::from(b),
        Value::Int(i) => minijinja::Value::from(i),
        Value::Number(n) => {
            if helmshim_core::is_int_like_float(&Value::Number(n))
                && n >= i64::MIN as f64
                && n < i64::MAX as f64
            {
                minijinja::Value::from(n as i64)
            } else {
                minijinja::Value::from(n)
            }
        }
        Value::String(s) => minijinja::Value::from(s),
        Value::List(items) => minijinja::Value::from(
            items
                .into_iter()
                .map(into_template_value)
                .collect::<Vec<_>>(),
        ),
        Value::Map(map) => minijinja::Value::from_iter(
            map.into_iter()
                .map(|(k, v)| (k, into_template_value(v))),
        ),
    }
}
