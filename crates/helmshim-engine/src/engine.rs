//! Template engine based on MiniJinja

use helmshim_core::Values;
use indexmap::IndexMap;
use minijinja::Environment;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::EngineConfig;
use crate::error::{RenderReport, RenderOutcome, Result, TemplateError};
use crate::namespace::{ShimNamespace, format_value, into_template_value};

/// Template engine builder
pub struct EngineBuilder {
    config: EngineConfig,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Start from a loaded configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set strict mode (fail on undefined variables)
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Name of the global object carrying the shims
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<Engine> {
        self.config.validate()?;
        Ok(Engine::new(self.config))
    }
}

/// The template engine
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine; the configuration is assumed valid
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Create a configured MiniJinja environment
    fn create_environment(&self) -> Environment<'static> {
        let mut env = Environment::new();

        if self.config.strict {
            env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
        } else {
            env.set_undefined_behavior(minijinja::UndefinedBehavior::Lenient);
        }

        env.set_formatter(format_value);
        env.add_global(
            self.config.namespace.clone(),
            minijinja::Value::from_object(ShimNamespace),
        );

        tracing::debug!(
            namespace = %self.config.namespace,
            strict = self.config.strict,
            "created template environment"
        );

        env
    }

    fn context(values: &Values) -> minijinja::Value {
        minijinja::context! {
            values => into_template_value(values.inner().clone()),
        }
    }

    /// Render a single template string
    pub fn render_string(
        &self,
        template: &str,
        values: &Values,
        template_name: &str,
    ) -> Result<String> {
        let mut env = self.create_environment();

        env.add_template_owned(template_name.to_string(), template.to_string())
            .map_err(|e| TemplateError::from_minijinja(e, template_name, template))?;

        let tmpl = env
            .get_template(template_name)
            .map_err(|e| TemplateError::from_minijinja(e, template_name, template))?;

        let rendered = tmpl
            .render(Self::context(values))
            .map_err(|e| TemplateError::from_minijinja(e, template_name, template))?;

        tracing::debug!(template = template_name, "rendered template");
        Ok(rendered)
    }

    /// Render every template file under `dir`, collecting all errors
    ///
    /// Files whose name starts with `_` are loaded (so they can be
    /// imported or included) but not rendered on their own. Outputs that
    /// render to nothing but whitespace are dropped.
    pub fn render_dir(&self, dir: &Path, values: &Values) -> RenderOutcome {
        let mut report = RenderReport::new();
        let mut outputs = IndexMap::new();

        let template_files = match self.template_files(dir) {
            Ok(files) => files,
            Err(e) => {
                report.add_error(
                    "<dir>".to_string(),
                    TemplateError::simple(format!("Failed to list templates: {}", e)),
                );
                return RenderOutcome { outputs, report };
            }
        };

        let mut env = self.create_environment();
        let mut template_sources: HashMap<String, String> = HashMap::new();

        // Load all templates - continue even if some fail to parse
        for file_path in &template_files {
            let template_name = template_name(dir, file_path);

            let content = match std::fs::read_to_string(file_path) {
                Ok(c) => c,
                Err(e) => {
                    report.add_error(
                        template_name,
                        TemplateError::simple(format!("Failed to read template: {}", e)),
                    );
                    continue;
                }
            };

            if let Err(e) = env.add_template_owned(template_name.clone(), content.clone()) {
                report.add_error(
                    template_name.clone(),
                    TemplateError::from_minijinja(e, &template_name, &content),
                );
            }
            template_sources.insert(template_name, content);
        }

        let ctx = Self::context(values);

        for file_path in &template_files {
            let template_name = template_name(dir, file_path);

            let is_helper = file_path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with('_'));
            if is_helper {
                continue;
            }

            // failed to load: already reported
            let Ok(tmpl) = env.get_template(&template_name) else {
                continue;
            };

            match tmpl.render(&ctx) {
                Ok(rendered) => {
                    if !rendered.trim().is_empty() {
                        outputs.insert(template_name.clone(), rendered);
                    }
                    report.add_success(template_name);
                }
                Err(e) => {
                    let content = template_sources
                        .get(&template_name)
                        .map(String::as_str)
                        .unwrap_or_default();
                    let error = TemplateError::from_minijinja(e, &template_name, content);
                    report.add_error(template_name, error);
                }
            }
        }

        if report.has_errors() {
            tracing::warn!(dir = %dir.display(), "{}", report.summary());
        }

        RenderOutcome { outputs, report }
    }

    /// Template files under `dir`, sorted by path
    fn template_files(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::other)?;
            if entry.file_type().is_file()
                && self
                    .config
                    .is_template(&entry.file_name().to_string_lossy())
            {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

/// Template name relative to the rendered directory, with `/` separators
fn template_name(dir: &Path, file_path: &Path) -> String {
    let rel_path = file_path.strip_prefix(dir).unwrap_or(file_path);
    rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
