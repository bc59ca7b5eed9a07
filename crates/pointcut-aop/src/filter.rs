use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use pointcut_types::{equivalence_class, ConcreteType};

use crate::error::FilterError;
use crate::method::MethodInfo;

/// Caller-supplied predicate over a candidate method.
pub type CustomFilter = Arc<dyn Fn(&dyn MethodInfo) -> bool + Send + Sync>;

/// Immutable conjunction of method criteria.
///
/// Criteria are checked in order (custom predicate, return type, annotations)
/// and evaluation stops at the first one that rejects. A filter without any
/// criteria accepts every method.
#[derive(Clone, Default)]
pub struct MethodFilter {
    custom: Option<CustomFilter>,
    return_types: Option<BTreeSet<ConcreteType>>,
    annotations: Option<Vec<String>>,
}

impl MethodFilter {
    pub fn accept_all() -> Self {
        Self::default()
    }

    pub fn matches(&self, method: &dyn MethodInfo) -> bool {
        if let Some(custom) = &self.custom {
            if !custom(method) {
                return false;
            }
        }
        if let Some(return_types) = &self.return_types {
            if !return_types
                .iter()
                .any(|ty| method.return_type_assignable_to(ty))
            {
                return false;
            }
        }
        if let Some(annotations) = &self.annotations {
            if !annotations.iter().any(|name| method.has_annotation(name)) {
                return false;
            }
        }
        true
    }

    /// Number of criteria groups this filter checks.
    pub fn criteria(&self) -> usize {
        usize::from(self.custom.is_some())
            + usize::from(self.return_types.is_some())
            + usize::from(self.annotations.is_some())
    }

    /// Accepted return types after primitive/wrapper expansion.
    pub fn return_types(&self) -> Option<&BTreeSet<ConcreteType>> {
        self.return_types.as_ref()
    }

    pub fn annotations(&self) -> Option<&[String]> {
        self.annotations.as_deref()
    }
}

impl fmt::Debug for MethodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodFilter")
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .field("return_types", &self.return_types)
            .field("annotations", &self.annotations)
            .finish()
    }
}

/// Build a [`MethodFilter`] from optional criteria.
///
/// `return_types` must be present, though it may be empty. Each return type is
/// widened to its primitive/wrapper equivalence class, so `boolean` also
/// accepts `java.lang.Boolean`. Empty lists impose no constraint.
pub fn build_method_filter(
    annotations: Option<&[String]>,
    return_types: Option<&[ConcreteType]>,
    custom: Option<CustomFilter>,
) -> Result<MethodFilter, FilterError> {
    let return_types = return_types
        .ok_or_else(|| FilterError::InvalidArgument("inReturnTypes is null".to_string()))?;

    let expanded: BTreeSet<ConcreteType> =
        return_types.iter().flat_map(equivalence_class).collect();
    let annotations = annotations
        .filter(|names| !names.is_empty())
        .map(<[String]>::to_vec);

    let filter = MethodFilter {
        custom,
        return_types: (!expanded.is_empty()).then_some(expanded),
        annotations,
    };
    tracing::debug!(
        target = "pointcut.filter",
        criteria = filter.criteria(),
        return_types = filter.return_types.as_ref().map_or(0, BTreeSet::len),
        annotations = filter.annotations.as_ref().map_or(0, Vec::len),
        "built method filter"
    );
    Ok(filter)
}

/// The methods accepted by `filter`, in input order.
pub fn select_methods<'a, M, I>(filter: &MethodFilter, methods: I) -> Vec<&'a M>
where
    M: MethodInfo + 'a,
    I: IntoIterator<Item = &'a M>,
{
    methods
        .into_iter()
        .filter(|method| {
            let accepted = filter.matches(*method);
            tracing::trace!(
                target = "pointcut.filter",
                method = %method.name(),
                accepted,
                "evaluated method"
            );
            accepted
        })
        .collect()
}
