//! Resolution of declared parameter types into option converters.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::command::adapters::converters::{
    CustomConverterAdapter, FallbackConverter, IntegerParsingConverter, builtin_converter,
};
use crate::command::domain::{ArgumentKind, ConstructionError, OptionType, ParameterType};
use crate::command::ports::Converter;

/// Outcome of resolving a parameter type.
#[derive(Clone)]
pub struct ResolvedConverter {
    /// Option type announced to the platform.
    pub option_type: OptionType,
    /// Whether the platform must supply a value.
    pub required: bool,
    /// Converter applied to the raw value.
    pub converter: Arc<dyn Converter>,
}

impl fmt::Debug for ResolvedConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConverter")
            .field("option_type", &self.option_type)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

/// Maps parameter types to converters and platform option types.
///
/// Starts from the built-in table; individual kinds may be overridden.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    overrides: HashMap<ArgumentKind, Arc<dyn Converter>>,
}

impl ConverterRegistry {
    /// Creates a registry with the built-in converters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the converter used for `kind`.
    #[must_use]
    pub fn with_converter(mut self, kind: ArgumentKind, converter: Arc<dyn Converter>) -> Self {
        self.overrides.insert(kind, converter);
        self
    }

    /// Returns the converter currently used for `kind`.
    #[must_use]
    pub fn converter(&self, kind: ArgumentKind) -> Arc<dyn Converter> {
        self.overrides
            .get(&kind)
            .map_or_else(|| builtin_converter(kind), Arc::clone)
    }

    /// Resolves a declared parameter type.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] when the type has no slash-command
    /// representation.
    pub fn resolve(&self, parameter_type: &ParameterType) -> Result<ResolvedConverter, ConstructionError> {
        match parameter_type {
            ParameterType::Kind(kind) => Ok(ResolvedConverter {
                option_type: kind.option_type(),
                required: true,
                converter: self.converter(*kind),
            }),
            ParameterType::Optional(inner) => {
                let resolved = self.resolve(inner)?;
                Ok(ResolvedConverter {
                    required: false,
                    ..resolved
                })
            }
            ParameterType::Union(members) => self.resolve_union(members),
            ParameterType::NoneType => Err(ConstructionError::UnsupportedShape(
                "NoneType is only valid inside a union".to_owned(),
            )),
            ParameterType::Variadic(_) => Err(ConstructionError::UnsupportedVariadic),
            ParameterType::Context => Err(ConstructionError::InvalidContextParameter),
            ParameterType::Custom(custom) => Ok(ResolvedConverter {
                option_type: OptionType::String,
                required: true,
                converter: Arc::new(CustomConverterAdapter::new(Arc::clone(custom))),
            }),
        }
    }

    /// Resolves a union of parameter types.
    ///
    /// `NoneType` members make the union optional and a mentionable member
    /// becomes the catch-all. With several branches of one option type the
    /// branches are tried left to right before the catch-all; integers
    /// mixed with strings are parsed from text and the option is exposed
    /// as a string.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::EmptyUnion`] when nothing remains to
    /// convert, [`ConstructionError::NotIdentifiable`] when a mentionable
    /// catch-all meets a primitive option type, and
    /// [`ConstructionError::UnsupportedFallback`] for other mixes.
    pub fn resolve_union(&self, members: &[ParameterType]) -> Result<ResolvedConverter, ConstructionError> {
        let mut required = true;
        let mut mentionable_fallback = false;
        let mut branches = Vec::new();

        for member in members {
            match member {
                ParameterType::NoneType => required = false,
                ParameterType::Kind(ArgumentKind::Mentionable) => mentionable_fallback = true,
                other => {
                    let resolved = self.resolve(other)?;
                    required &= resolved.required;
                    branches.push(resolved);
                }
            }
        }

        if branches.len() <= 1 {
            let mut branch = branches.pop().ok_or(ConstructionError::EmptyUnion)?;
            branch.required &= required;
            return Ok(branch);
        }

        match distinct_option_types(&branches).as_slice() {
            &[single] => self.chain(branches, single, required, mentionable_fallback),
            &[OptionType::String, OptionType::Integer] => {
                let (integers, text): (Vec<_>, Vec<_>) = branches
                    .into_iter()
                    .partition(|branch| branch.option_type == OptionType::Integer);
                let ordered = integers
                    .into_iter()
                    .map(|branch| ResolvedConverter {
                        option_type: OptionType::String,
                        converter: Arc::new(IntegerParsingConverter::new(branch.converter)),
                        required: branch.required,
                    })
                    .chain(text)
                    .collect();
                self.chain(ordered, OptionType::String, required, mentionable_fallback)
            }
            types => Err(ConstructionError::UnsupportedFallback(
                types
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            )),
        }
    }

    fn chain(
        &self,
        mut branches: Vec<ResolvedConverter>,
        option_type: OptionType,
        required: bool,
        mentionable_fallback: bool,
    ) -> Result<ResolvedConverter, ConstructionError> {
        let last = if mentionable_fallback {
            if !option_type.is_identifiable() {
                return Err(ConstructionError::NotIdentifiable(option_type));
            }
            self.converter(ArgumentKind::Mentionable)
        } else {
            match branches.pop() {
                Some(last) => last.converter,
                None => return Err(ConstructionError::EmptyUnion),
            }
        };

        let converters = branches.into_iter().map(|branch| branch.converter).collect();
        Ok(ResolvedConverter {
            option_type,
            required,
            converter: Arc::new(FallbackConverter::new(converters, last)),
        })
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn distinct_option_types(branches: &[ResolvedConverter]) -> Vec<OptionType> {
    let mut types = branches
        .iter()
        .map(|branch| branch.option_type)
        .collect::<Vec<_>>();
    types.sort_unstable();
    types.dedup();
    types
}
