//! Parameter classification
//!
//! Maps an exposed constructor parameter to one of the six domain kinds
//! and builds its description, resolving deferred defaults and bounds
//! against the context.
//!
//! Classification is a pure function of the parameter schema: a selection
//! descriptor wins, otherwise the declared value type decides.
//!
//! | Declared | Kind |
//! |----------|------|
//! | single entity converter | single-selection |
//! | composite entity converter | composite-selection |
//! | `Boolean` | toggle |
//! | `Integer` | count |
//! | `Real` | quantity |
//! | `Text` | label |

use super::entities::EntityResolver;
use crate::context::Context;
use crate::ports::registry::Catalog;
use crate::schema::{Bounds, Parameter, ParameterRole, Selection, ValueType};
use ctorkit_domain::constants::{
    COUNT_DEFAULT_MAX, COUNT_DEFAULT_MIN, COUNT_DEFAULT_STEP, LABEL_DEFAULT_MAX_LENGTH,
    LABEL_DEFAULT_MIN_LENGTH, QUANTITY_DEFAULT_MAX, QUANTITY_DEFAULT_MIN,
    QUANTITY_DEFAULT_PRECISION,
};
use ctorkit_domain::error::{Error, Result};
use ctorkit_domain::value_objects::{
    CompositeSelectionParameter, CountParameter, DomainKind, FromValue, LabelParameter,
    ParameterDescription, ParameterInfo, QuantityParameter, SingleSelectionParameter,
    ToggleParameter,
};
use regex::Regex;

/// Domain kind of an exposed parameter
///
/// Dependency, context and unmarked parameters have no kind, nor does an
/// exposed parameter of an opaque type without a selection descriptor;
/// those fail with [`Error::InvalidDefinition`], as does a bound
/// descriptor that belongs to another kind.
pub fn classify(parameter: &Parameter) -> Result<DomainKind> {
    let name = match &parameter.role {
        ParameterRole::Exposed { name, .. } => name,
        other => {
            return Err(Error::invalid_definition(format!(
                "only exposed parameters have a domain kind, found {other:?}"
            )))
        }
    };

    let kind = match (&parameter.selection, parameter.value_type) {
        (Some(Selection::Single(_)), _) => DomainKind::SingleSelection,
        (Some(Selection::Composite(_)), _) => DomainKind::CompositeSelection,
        (None, ValueType::Boolean) => DomainKind::Toggle,
        (None, ValueType::Integer) => DomainKind::Count,
        (None, ValueType::Real) => DomainKind::Quantity,
        (None, ValueType::Text) => DomainKind::Label,
        (None, ValueType::Opaque(type_name)) => {
            return Err(Error::invalid_definition(format!(
                "parameter '{name}' of type {type_name} has no domain kind"
            )))
        }
    };

    let bounds_fit = matches!(
        (&parameter.bounds, kind),
        (None, _)
            | (Some(Bounds::Count { .. }), DomainKind::Count)
            | (Some(Bounds::Quantity { .. }), DomainKind::Quantity)
            | (Some(Bounds::Label { .. }), DomainKind::Label)
    );
    if !bounds_fit {
        return Err(Error::invalid_definition(format!(
            "parameter '{name}' is a {kind} but declares bounds of another kind"
        )));
    }

    Ok(kind)
}

/// Builds parameter descriptions against one catalog and context
#[derive(Debug, Clone, Copy)]
pub struct ParameterClassifier<'a> {
    catalog: &'a Catalog,
    context: &'a Context,
}

impl<'a> ParameterClassifier<'a> {
    pub fn new(catalog: &'a Catalog, context: &'a Context) -> Self {
        Self { catalog, context }
    }

    /// Description of an exposed parameter
    ///
    /// A deferred default or bound whose name is unbound and has no
    /// fallback fails with [`Error::NotFound`]; a bound name holding the
    /// wrong shape fails with [`Error::TypeMismatch`].
    pub fn describe(&self, parameter: &Parameter) -> Result<ParameterDescription> {
        let kind = classify(parameter)?;
        let ParameterRole::Exposed { name, description } = &parameter.role else {
            return Err(Error::invalid_definition(
                "only exposed parameters have a domain kind",
            ));
        };
        let info = ParameterInfo {
            name: name.clone(),
            description: description.clone(),
            is_required: parameter.required,
        };

        let description = match kind {
            DomainKind::Toggle => ParameterDescription::Toggle(ToggleParameter {
                default: self.default_as::<bool>(parameter, &info.name)?,
                info,
            }),
            DomainKind::Count => self.describe_count(parameter, info)?,
            DomainKind::Quantity => self.describe_quantity(parameter, info)?,
            DomainKind::Label => self.describe_label(parameter, info)?,
            DomainKind::SingleSelection => {
                let converter = EntityResolver::new(self.catalog, self.context)
                    .single(Self::converter_name(parameter))?;
                ParameterDescription::SingleSelection(SingleSelectionParameter {
                    info,
                    default: converter.default_identifier(),
                    values: converter.identifiers(),
                })
            }
            DomainKind::CompositeSelection => {
                let converter = EntityResolver::new(self.catalog, self.context)
                    .composite(Self::converter_name(parameter))?;
                ParameterDescription::CompositeSelection(CompositeSelectionParameter {
                    info,
                    default: converter.default_identifiers(),
                    values: converter.identifiers(),
                })
            }
        };
        Ok(description)
    }

    fn describe_count(
        &self,
        parameter: &Parameter,
        info: ParameterInfo,
    ) -> Result<ParameterDescription> {
        let (min, max, step) = match &parameter.bounds {
            Some(Bounds::Count { min, max, step }) => (
                min.resolve(self.context)?,
                max.resolve(self.context)?,
                *step,
            ),
            _ => (COUNT_DEFAULT_MIN, COUNT_DEFAULT_MAX, COUNT_DEFAULT_STEP),
        };
        if step <= 0 {
            return Err(Error::invalid_definition(format!(
                "count parameter '{}' declares step {step}, which is not positive",
                info.name
            )));
        }
        Ok(ParameterDescription::Count(CountParameter {
            default: self.default_as::<i64>(parameter, &info.name)?,
            info,
            min,
            max,
            step,
        }))
    }

    fn describe_quantity(
        &self,
        parameter: &Parameter,
        info: ParameterInfo,
    ) -> Result<ParameterDescription> {
        let (min, max, precision) = match &parameter.bounds {
            Some(Bounds::Quantity {
                min,
                max,
                precision,
            }) => (
                min.resolve(self.context)?,
                max.resolve(self.context)?,
                *precision,
            ),
            _ => (
                QUANTITY_DEFAULT_MIN,
                QUANTITY_DEFAULT_MAX,
                QUANTITY_DEFAULT_PRECISION,
            ),
        };
        Ok(ParameterDescription::Quantity(QuantityParameter {
            default: self.default_as::<f64>(parameter, &info.name)?,
            info,
            min,
            max,
            precision,
        }))
    }

    fn describe_label(
        &self,
        parameter: &Parameter,
        info: ParameterInfo,
    ) -> Result<ParameterDescription> {
        let (min, max, pattern) = match &parameter.bounds {
            Some(Bounds::Label { min, max, pattern }) => (*min, *max, pattern.clone()),
            _ => (LABEL_DEFAULT_MIN_LENGTH, LABEL_DEFAULT_MAX_LENGTH, None),
        };
        if let Some(pattern) = &pattern {
            Regex::new(pattern).map_err(|e| {
                Error::invalid_definition(format!(
                    "label parameter '{}' declares an invalid pattern: {e}",
                    info.name
                ))
            })?;
        }
        Ok(ParameterDescription::Label(LabelParameter {
            default: self.default_as::<String>(parameter, &info.name)?,
            info,
            min,
            max,
            pattern,
        }))
    }

    fn default_as<T: FromValue>(&self, parameter: &Parameter, name: &str) -> Result<Option<T>> {
        parameter
            .default
            .as_ref()
            .map(|source| source.resolve_as::<T>(self.context, name))
            .transpose()
    }

    fn converter_name(parameter: &Parameter) -> &str {
        match &parameter.selection {
            Some(Selection::Single(name) | Selection::Composite(name)) => name,
            None => "",
        }
    }
}
