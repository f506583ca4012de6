//! Objectives assembled from caller-supplied closures.

use super::Objective;
use crate::types::OptimiserError;

type ScalarFn = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Objective defined by a value closure and one partial-derivative closure
/// per named variable.
///
/// The partial derivatives are supplied once at construction; evaluating
/// the gradient calls each of them in variable order.
///
/// # Example
///
/// ```
/// use odts_core::objective::{ClosedFormObjective, Objective};
///
/// // f(a, b) = a² + ab
/// let f = ClosedFormObjective::builder(["a", "b"])
///     .value(|p| p[0] * p[0] + p[0] * p[1])
///     .partial(|p| 2.0 * p[0] + p[1])
///     .partial(|p| p[0])
///     .expression("a^2 + ab")
///     .build()
///     .unwrap();
///
/// assert_eq!(f.dimension(), 2);
/// assert_eq!(f.gradient(&[1.0, 3.0]), vec![5.0, 1.0]);
/// ```
pub struct ClosedFormObjective {
    variables: Vec<String>,
    expression: String,
    value: ScalarFn,
    partials: Vec<ScalarFn>,
}

impl ClosedFormObjective {
    /// Start building an objective over the named variables.
    pub fn builder<I, S>(variables: I) -> ClosedFormBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ClosedFormBuilder {
            variables: variables.into_iter().map(Into::into).collect(),
            expression: None,
            value: None,
            partials: Vec::new(),
        }
    }
}

impl std::fmt::Debug for ClosedFormObjective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosedFormObjective")
            .field("variables", &self.variables)
            .field("expression", &self.expression)
            .finish_non_exhaustive()
    }
}

impl Objective for ClosedFormObjective {
    fn dimension(&self) -> usize {
        self.variables.len()
    }

    fn value(&self, x: &[f64]) -> f64 {
        (self.value)(x)
    }

    fn gradient(&self, x: &[f64]) -> Vec<f64> {
        self.partials.iter().map(|d| d(x)).collect()
    }

    fn variables(&self) -> Vec<String> {
        self.variables.clone()
    }

    fn expression(&self) -> String {
        self.expression.clone()
    }
}

/// Builder for [`ClosedFormObjective`].
pub struct ClosedFormBuilder {
    variables: Vec<String>,
    expression: Option<String>,
    value: Option<ScalarFn>,
    partials: Vec<ScalarFn>,
}

impl ClosedFormBuilder {
    /// Set the value closure.
    pub fn value<F>(mut self, f: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.value = Some(Box::new(f));
        self
    }

    /// Append the partial derivative with respect to the next variable.
    pub fn partial<F>(mut self, d: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.partials.push(Box::new(d));
        self
    }

    /// Set the human-readable expression.
    pub fn expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    /// Finish construction.
    ///
    /// # Errors
    ///
    /// * `OptimiserError::InvalidInput` - No variables, or no value closure
    /// * `OptimiserError::DimensionMismatch` - Partial count differs from variable count
    pub fn build(self) -> Result<ClosedFormObjective, OptimiserError> {
        if self.variables.is_empty() {
            return Err(OptimiserError::invalid_input(
                "objective needs at least one variable",
            ));
        }
        let value = self
            .value
            .ok_or_else(|| OptimiserError::invalid_input("objective value function missing"))?;
        if self.partials.len() != self.variables.len() {
            return Err(OptimiserError::DimensionMismatch {
                expected: self.variables.len(),
                actual: self.partials.len(),
            });
        }
        let expression = self
            .expression
            .unwrap_or_else(|| format!("f({})", self.variables.join(", ")));

        Ok(ClosedFormObjective {
            variables: self.variables,
            expression,
            value,
            partials: self.partials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_plane() -> ClosedFormObjective {
        ClosedFormObjective::builder(["x", "y"])
            .value(|p| p[0] + p[1])
            .partial(|_| 1.0)
            .partial(|_| 1.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_gradient_in_variable_order() {
        let f = ClosedFormObjective::builder(["u", "v", "w"])
            .value(|p| p[0] * p[1] * p[2])
            .partial(|p| p[1] * p[2])
            .partial(|p| p[0] * p[2])
            .partial(|p| p[0] * p[1])
            .build()
            .unwrap();

        assert_eq!(f.gradient(&[1.0, 2.0, 3.0]), vec![6.0, 3.0, 2.0]);
        assert_eq!(f.value(&[1.0, 2.0, 3.0]), 6.0);
    }

    #[test]
    fn test_default_expression_lists_variables() {
        assert_eq!(flat_plane().expression(), "f(x, y)");
        assert_eq!(flat_plane().variables(), vec!["x", "y"]);
    }

    #[test]
    fn test_no_variables_rejected() {
        let result = ClosedFormObjective::builder(Vec::<String>::new())
            .value(|_| 0.0)
            .build();
        assert!(matches!(result, Err(OptimiserError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_value_rejected() {
        let result = ClosedFormObjective::builder(["x"]).partial(|_| 0.0).build();
        match result {
            Err(OptimiserError::InvalidInput(msg)) => assert!(msg.contains("value")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_count_mismatch_rejected() {
        let result = ClosedFormObjective::builder(["x", "y"])
            .value(|p| p[0])
            .partial(|_| 1.0)
            .build();
        assert!(matches!(
            result,
            Err(OptimiserError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_debug_omits_closures() {
        let debug_str = format!("{:?}", flat_plane());
        assert!(debug_str.contains("ClosedFormObjective"));
        assert!(debug_str.contains("variables"));
    }
}
