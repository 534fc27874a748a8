//! Static shim registry
//!
//! Generated templates call shims by bare name with a fixed arity. The table
//! below is that calling convention: renaming an entry or changing its arity
//! breaks every previously generated template.
//!
//! Multi-value results are encoded here as a two element list `[value, ok]`.

use phf::phf_map;

use crate::containers::{compact, dict_test, length};
use crate::error::{ShimError, ShimResult};
use crate::pointers::{deref, ptr_deref, ptr_equal};
use crate::quantity::{quantity_as_int64, quantity_validate};
use crate::types::{TypeTag, is_int_like_float, type_assert, type_test};
use crate::value::Value;

/// Entry point of a registered shim; `args` already has the right length
pub type ShimFn = fn(&[Value]) -> ShimResult<Value>;

/// A registered shim
#[derive(Debug, Clone, Copy)]
pub struct Shim {
    pub name: &'static str,
    pub arity: usize,
    pub summary: &'static str,
    func: ShimFn,
}

impl Shim {
    /// Invoke the shim, checking the argument count first
    pub fn call(&self, args: &[Value]) -> ShimResult<Value> {
        if args.len() != self.arity {
            return Err(ShimError::ArityMismatch {
                name: self.name,
                expected: self.arity,
                actual: args.len(),
            });
        }
        (self.func)(args)
    }
}

static SHIMS: phf::Map<&'static str, Shim> = phf_map! {
    "isIntLikeFloat" => Shim {
        name: "isIntLikeFloat",
        arity: 1,
        summary: "true for a float64 without fractional part",
        func: shim_is_int_like_float,
    },
    "typetest" => Shim {
        name: "typetest",
        arity: 3,
        summary: "v, ok := x.(T)",
        func: shim_typetest,
    },
    "typeassertion" => Shim {
        name: "typeassertion",
        arity: 2,
        summary: "v := x.(T)",
        func: shim_typeassertion,
    },
    "dicttest" => Shim {
        name: "dicttest",
        arity: 3,
        summary: "v, ok := m[k]",
        func: shim_dicttest,
    },
    "compact" => Shim {
        name: "compact",
        arity: 1,
        summary: "pack a list into {T1..TN}",
        func: shim_compact,
    },
    "len" => Shim {
        name: "len",
        arity: 1,
        summary: "length, 0 for nil",
        func: shim_len,
    },
    "deref" => Shim {
        name: "deref",
        arity: 1,
        summary: "*ptr, fails on nil",
        func: shim_deref,
    },
    "ptr_Deref" => Shim {
        name: "ptr_Deref",
        arity: 2,
        summary: "ptr.Deref(ptr, def)",
        func: shim_ptr_deref,
    },
    "ptr_Equal" => Shim {
        name: "ptr_Equal",
        arity: 2,
        summary: "ptr.Equal(a, b)",
        func: shim_ptr_equal,
    },
    "resource_MustParse" => Shim {
        name: "resource_MustParse",
        arity: 1,
        summary: "validate a quantity string",
        func: shim_resource_must_parse,
    },
    "resource_AsInt64" => Shim {
        name: "resource_AsInt64",
        arity: 1,
        summary: "quantity as an integer count",
        func: shim_resource_as_int64,
    },
};

/// Look up a shim by name
pub fn lookup(name: &str) -> ShimResult<&'static Shim> {
    SHIMS.get(name).ok_or_else(|| ShimError::UnknownShim {
        name: name.to_string(),
    })
}

/// Call a shim by name
pub fn call(name: &str, args: &[Value]) -> ShimResult<Value> {
    let shim = lookup(name)?;
    let result = shim.call(args);
    if let Err(err) = &result {
        tracing::trace!(shim = name, error = %err, "shim failed");
    }
    result
}

/// All registered shims, sorted by name
pub fn shims() -> Vec<&'static Shim> {
    let mut all: Vec<&'static Shim> = SHIMS.values().collect();
    all.sort_by_key(|shim| shim.name);
    all
}

fn pair(value: Value, ok: bool) -> Value {
    Value::List(vec![value, Value::Bool(ok)])
}

fn string_arg(arg: &Value) -> ShimResult<&str> {
    arg.as_str().ok_or_else(|| ShimError::TypeMismatch {
        expected: "string".to_string(),
        actual: arg.kind_name(),
    })
}

fn shim_is_int_like_float(args: &[Value]) -> ShimResult<Value> {
    Ok(Value::Bool(is_int_like_float(&args[0])))
}

fn shim_typetest(args: &[Value]) -> ShimResult<Value> {
    let tag: TypeTag = string_arg(&args[0])?.parse()?;
    let (value, ok) = type_test(tag, args[1].clone(), args[2].clone());
    Ok(pair(value, ok))
}

fn shim_typeassertion(args: &[Value]) -> ShimResult<Value> {
    let name = string_arg(&args[0])?;
    let tag: TypeTag = name.parse()?;
    // report the type as the template spelled it
    type_assert(tag, args[1].clone()).map_err(|err| match err {
        ShimError::TypeMismatch { actual, .. } => ShimError::TypeMismatch {
            expected: name.to_string(),
            actual,
        },
        other => other,
    })
}

fn shim_dicttest(args: &[Value]) -> ShimResult<Value> {
    let key = string_arg(&args[1])?;
    let (value, ok) = dict_test(&args[0], key, args[2].clone());
    Ok(pair(value, ok))
}

fn shim_compact(args: &[Value]) -> ShimResult<Value> {
    match &args[0] {
        Value::List(items) => Ok(Value::Map(compact(items.clone()))),
        other => Err(ShimError::TypeMismatch {
            expected: TypeTag::List.to_string(),
            actual: other.kind_name(),
        }),
    }
}

fn shim_len(args: &[Value]) -> ShimResult<Value> {
    Ok(Value::Int(length(&args[0]) as i64))
}

fn shim_deref(args: &[Value]) -> ShimResult<Value> {
    deref(args[0].clone())
}

fn shim_ptr_deref(args: &[Value]) -> ShimResult<Value> {
    Ok(ptr_deref(args[0].clone(), args[1].clone()))
}

fn shim_ptr_equal(args: &[Value]) -> ShimResult<Value> {
    Ok(Value::Bool(ptr_equal(&args[0], &args[1])))
}

fn shim_resource_must_parse(args: &[Value]) -> ShimResult<Value> {
    quantity_validate(args[0].clone())
}

fn shim_resource_as_int64(args: &[Value]) -> ShimResult<Value> {
    let (count, ok) = quantity_as_int64(&args[0])?;
    Ok(pair(Value::Int(count), ok))
}
