//! Kubernetes resource quantities
//!
//! Quantities such as `500m`, `2Gi` or `1.5G` are strings interpreted on
//! demand. Decimal suffixes scale by powers of 1000 (`m` is 1/1000), binary
//! suffixes (`Ki`..`Pi`) by powers of 1024.
//!
//! Only the subset used by resource sizing is supported: at most one
//! fractional digit, no exponents, no `E`/`Ei` suffixes.

use once_cell::sync::Lazy;
use phf::phf_map;
use regex::Regex;

use crate::error::{ShimError, ShimResult};
use crate::value::Value;

static QUANTITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]){0,1}(k|m|M|G|T|P|Ki|Mi|Gi|Ti|Pi)?$")
        .expect("quantity pattern is valid")
});

static UNIT_SCALES: phf::Map<&'static str, f64> = phf_map! {
    "" => 1.0,
    "m" => 0.001,
    "k" => 1_000.0,
    "M" => 1_000_000.0,
    "G" => 1_000_000_000.0,
    "T" => 1_000_000_000_000.0,
    "P" => 1_000_000_000_000_000.0,
    "Ki" => 1_024.0,
    "Mi" => 1_048_576.0,
    "Gi" => 1_073_741_824.0,
    "Ti" => 1_099_511_627_776.0,
    "Pi" => 1_125_899_906_842_624.0,
};

/// Scale factor of a unit suffix, `None` for unknown suffixes
pub fn unit_scale(unit: &str) -> Option<f64> {
    UNIT_SCALES.get(unit).copied()
}

/// Split `"1.5Gi"` into `("1.5", "Gi")`
///
/// The unit is the run of trailing ASCII letters, possibly empty.
pub fn split_unit(quantity: &str) -> (&str, &str) {
    let idx = quantity
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map_or(quantity.len(), |(i, _)| i);
    quantity.split_at(idx)
}

/// Whether `quantity` is in the accepted grammar
pub fn is_valid(quantity: &str) -> bool {
    QUANTITY_PATTERN.is_match(quantity)
}

/// `resource.MustParse`: syntactic validation only
///
/// Returns the input unchanged; it is neither normalized nor scaled.
pub fn quantity_validate(value: Value) -> ShimResult<Value> {
    let Some(quantity) = value.as_str() else {
        return Err(ShimError::InvalidQuantityType {
            expected: "string",
            actual: value.kind_name(),
        });
    };

    if !is_valid(quantity) {
        return Err(ShimError::InvalidQuantityFormat {
            input: quantity.to_string(),
        });
    }

    Ok(value)
}

/// `Quantity.AsInt64`
///
/// Numbers pass through truncated toward zero. Strings are scaled by their
/// unit. Sub-unit scales (`m`) are not representable and report
/// `(0, false)`; precise milli-unit arithmetic is not implemented.
pub fn quantity_as_int64(value: &Value) -> ShimResult<(i64, bool)> {
    match value {
        Value::Number(n) => Ok((n.trunc() as i64, true)),
        Value::Int(i) => Ok((*i, true)),
        Value::String(s) => parse_scaled(s),
        other => Err(ShimError::InvalidQuantityType {
            expected: "string or number",
            actual: other.kind_name(),
        }),
    }
}

fn parse_scaled(quantity: &str) -> ShimResult<(i64, bool)> {
    let (mantissa, unit) = split_unit(quantity);

    let mantissa: f64 = mantissa
        .parse()
        .map_err(|_| ShimError::InvalidQuantityFormat {
            input: quantity.to_string(),
        })?;

    let scale = unit_scale(unit).ok_or_else(|| ShimError::UnknownUnit {
        unit: unit.to_string(),
        input: quantity.to_string(),
    })?;

    if scale < 1.0 {
        return Ok((0, false));
    }

    Ok(((scale * mantissa) as i64, true))
}
