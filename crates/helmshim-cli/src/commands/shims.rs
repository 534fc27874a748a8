//! Shims command - list the registry

use console::style;
use helmshim_core::registry;

use crate::error::Result;

pub fn run() -> Result<()> {
    let shims = registry::shims();
    let width = shims.iter().map(|shim| shim.name.len()).max().unwrap_or(0);

    for shim in shims {
        println!(
            "{:<width$}  {}  {}",
            style(shim.name).cyan(),
            shim.arity,
            style(shim.summary).dim(),
            width = width
        );
    }

    Ok(())
}
