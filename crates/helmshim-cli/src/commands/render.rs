//! Render command - render templates against merged values

use console::style;
use helmshim_core::{Values, parse_set_values};
use helmshim_engine::{Engine, EngineConfig, RenderReport};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

pub fn run(
    template: &Path,
    values_files: &[PathBuf],
    set_values: &[String],
    lenient: bool,
    output: Option<&Path>,
    config: EngineConfig,
    debug: bool,
) -> Result<()> {
    let values = load_values(values_files, set_values, debug)?;

    let strict = config.strict && !lenient;
    let engine = Engine::builder().config(config).strict(strict).build()?;

    let rendered = if template.is_dir() {
        render_dir(&engine, template, &values, debug)?
    } else {
        let source = fs::read_to_string(template)?;
        let name = template
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| template.display().to_string());

        let out = engine.render_string(&source, &values, &name)?;

        if debug {
            eprintln!("{} Rendered {}", style("DEBUG").dim(), template.display());
        }
        out
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &rendered)?;
            eprintln!("{} {}", style("wrote").green(), path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Merge values files in order, then apply `--set` overrides
fn load_values(values_files: &[PathBuf], set_values: &[String], debug: bool) -> Result<Values> {
    let mut values = Values::new();

    for values_file in values_files {
        let file_values = Values::from_file(values_file).map_err(|e| {
            CliError::values_with_help(
                format!("Failed to load values file {}: {}", values_file.display(), e),
                "Values files are YAML or JSON documents with a map at the top level",
            )
        })?;
        values.merge(&file_values);

        if debug {
            eprintln!(
                "{} Merged values from {}",
                style("DEBUG").dim(),
                values_file.display()
            );
        }
    }

    if !set_values.is_empty() {
        let set_vals = parse_set_values(set_values)?;
        values.merge(&set_vals);

        if debug {
            eprintln!(
                "{} Applied {} --set values",
                style("DEBUG").dim(),
                set_values.len()
            );
        }
    }

    Ok(values)
}

/// Render a directory and join the outputs with `# Source:` headers
fn render_dir(engine: &Engine, dir: &Path, values: &Values, debug: bool) -> Result<String> {
    let result = engine.render_dir(dir, values);

    if !result.is_success() {
        display_render_report(&result.report);
        return Err(CliError::template_with_help(
            result.report.summary(),
            "Fix the errors listed above; templates render only when all succeed",
        ));
    }

    if debug {
        eprintln!(
            "{} Rendered {} template(s) from {}",
            style("DEBUG").dim(),
            result.report.successful_templates.len(),
            dir.display()
        );
    }

    Ok(join_outputs(&result.outputs))
}

fn join_outputs(outputs: &IndexMap<String, String>) -> String {
    let mut joined = String::new();
    for (name, content) in outputs {
        if !joined.is_empty() {
            joined.push('\n');
        }
        joined.push_str(&format!("# Source: {}\n", name));
        joined.push_str(content.trim());
        joined.push('\n');
    }
    joined
}

/// Display a render report with all errors grouped by template
fn display_render_report(report: &RenderReport) {
    eprintln!(
        "  {} Template rendering failed: {}",
        style("✗").red(),
        style(report.summary()).bold()
    );
    eprintln!();

    for (template_name, template_errors) in &report.errors_by_template {
        eprintln!(
            "  {} {} ({} {})",
            style("→").blue(),
            style(template_name).yellow(),
            template_errors.len(),
            if template_errors.len() == 1 {
                "error"
            } else {
                "errors"
            }
        );

        for error in template_errors {
            eprintln!(
                "    {} [{}] {}",
                style("✗").red(),
                error.kind().to_code_string(),
                error.message
            );

            if let Some(suggestion) = &error.suggestion {
                eprintln!("      {} {}", style("hint:").blue(), suggestion);
            }
        }
        eprintln!();
    }

    if !report.successful_templates.is_empty() {
        eprintln!(
            "  {} {} template(s) rendered successfully",
            style("✓").green(),
            report.successful_templates.len()
        );
    }
}
