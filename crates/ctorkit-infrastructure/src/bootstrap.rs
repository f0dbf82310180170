//! Context bootstrap
//!
//! Turns the `[context]` configuration section into a ready
//! [`Context`]. Dependencies are code-level objects and are added by the
//! host after this step.

use crate::config::{ContextConfig, FieldConfig, SourceConfig};
use ctorkit_application::context::{
    ConfigurationSource, Context, ContextOptions, FieldSource, SourceField,
};
use ctorkit_domain::error::Result;
use tracing::info;

/// Build a context from configuration
///
/// Development-only sources and fields are skipped unless
/// `config.development` is set. A variable name produced twice fails with
/// [`Error::DuplicateKey`](ctorkit_domain::error::Error::DuplicateKey).
pub fn build_context(config: &ContextConfig) -> Result<Context> {
    let options = context_options(config);
    let context = Context::with_sources(
        options,
        config.sources.iter().map(configuration_source),
        config.fields.iter().map(field_source),
    )?;

    info!(
        development = options.development,
        experimental = options.experimental,
        variables = context.variables().count(),
        "Activation context ready"
    );
    Ok(context)
}

/// Mode flags of the configured context
pub fn context_options(config: &ContextConfig) -> ContextOptions {
    ContextOptions {
        development: config.development,
        experimental: config.experimental,
    }
}

fn configuration_source(config: &SourceConfig) -> ConfigurationSource {
    ConfigurationSource {
        name: config.name.clone(),
        split_names: config.split_names,
        development_only: config.development_only,
        fields: config
            .values
            .iter()
            .map(|(name, value)| SourceField {
                name: name.clone(),
                value: value.clone(),
                constant: config.constant,
            })
            .collect(),
    }
}

fn field_source(config: &FieldConfig) -> FieldSource {
    let mut field = FieldSource::new(config.name.clone(), config.value.clone());
    if !config.constant {
        field = field.mutable();
    }
    if config.development_only {
        field = field.development_only();
    }
    field
}
