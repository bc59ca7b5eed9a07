use std::sync::Arc;

use pointcut_config::FilterConfig;
use pointcut_types::ConcreteType;

use crate::error::FilterError;
use crate::filter::{build_method_filter, CustomFilter, MethodFilter};
use crate::method::MethodInfo;

/// Fluent builder for a [`MethodFilter`].
///
/// ```
/// use pointcut_aop::{MethodSelector, MethodStub};
/// use pointcut_types::ConcreteType;
///
/// let filter = MethodSelector::new()
///     .method_annotated("com.example.Traced")
///     .return_type(ConcreteType::class("java.lang.String"))
///     .build()
///     .unwrap();
///
/// let method = MethodStub::new("name", ConcreteType::class("java.lang.String"))
///     .with_annotation("com.example.Traced");
/// assert!(filter.matches(&method));
/// ```
#[derive(Clone, Default)]
pub struct MethodSelector {
    annotations: Vec<String>,
    return_types: Vec<ConcreteType>,
    custom: Option<CustomFilter>,
}

impl MethodSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method_annotated(mut self, binary_name: impl Into<String>) -> Self {
        self.annotations.push(binary_name.into());
        self
    }

    pub fn return_type(mut self, ty: ConcreteType) -> Self {
        self.return_types.push(ty);
        self
    }

    /// Add a predicate; repeated calls must all accept.
    pub fn where_method<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&dyn MethodInfo) -> bool + Send + Sync + 'static,
    {
        let combined: CustomFilter = match self.custom.take() {
            Some(previous) => Arc::new(move |method: &dyn MethodInfo| {
                previous(method) && predicate(method)
            }),
            None => Arc::new(predicate),
        };
        self.custom = Some(combined);
        self
    }

    pub fn build(self) -> Result<MethodFilter, FilterError> {
        build_method_filter(
            Some(self.annotations.as_slice()),
            Some(self.return_types.as_slice()),
            self.custom,
        )
    }

    /// Selector for the criteria in a [`FilterConfig`]; return type names must
    /// be plain Java names such as `int` or `java.lang.String[]`.
    pub fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        let return_types = config
            .return_types
            .iter()
            .map(|name| ConcreteType::from_type_name(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            annotations: config.annotations.clone(),
            return_types,
            custom: None,
        })
    }
}
