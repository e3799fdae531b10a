//! Provides struct for representing a constraint in an optimization problem
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::configuration;
use crate::optimize::expression::LinearExpression;

/// Represents a linear constraint, `lower_bound <= expression <= upper_bound`
///
/// An equality constraint is one where the lower and upper bound are the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Used to identify the constraint, must be unique within a [`Problem`](crate::optimize::problem::Problem)
    ///
    /// Ids generated by the model (see [`Model::unused_constraint_id`](crate::metabolic_model::model::Model::unused_constraint_id))
    /// are built only from reaction ids and a counter, so they are safe to persist.
    pub id: String,
    /// Linear expression being constrained
    pub expression: LinearExpression,
    /// The lowest value the expression can take
    pub lower_bound: f64,
    /// The highest value the expression can take
    pub upper_bound: f64,
}

impl Constraint {
    /// Create a new constraint
    ///
    /// # Parameters
    /// - `id`: Identifier for the constraint
    /// - `expression`: The linear expression to constrain
    /// - `lower_bound`: The lowest value the expression can take
    /// - `upper_bound`: The highest value the expression can take
    ///
    /// # Examples
    /// ```rust
    /// use fluxpin_core::optimize::constraint::Constraint;
    /// use fluxpin_core::optimize::expression::LinearExpression;
    /// // represents the inequality 2 <= 3*x + 2*y <= 6
    /// let expr = LinearExpression::from_terms(&["x", "y"], &[3., 2.]);
    /// let new_constraint = Constraint::new("c1", expr, 2., 6.);
    /// assert!(!new_constraint.is_equality());
    /// ```
    pub fn new(id: &str, expression: LinearExpression, lower_bound: f64, upper_bound: f64) -> Self {
        Constraint {
            id: id.to_string(),
            expression,
            lower_bound,
            upper_bound,
        }
    }

    /// Create a new equality constraint, `expression = equals`
    pub fn new_equality(id: &str, expression: LinearExpression, equals: f64) -> Self {
        Self::new(id, expression, equals, equals)
    }

    pub fn is_equality(&self) -> bool {
        self.lower_bound == self.upper_bound
    }

    /// Value of the constrained expression for the given variable values
    pub fn evaluate(&self, values: &IndexMap<String, f64>) -> f64 {
        self.expression.evaluate(values)
    }

    /// Check whether the given variable values satisfy the constraint, within the
    /// configured tolerance
    pub fn is_satisfied(&self, values: &IndexMap<String, f64>) -> bool {
        let tol = configuration::tolerance();
        let value = self.evaluate(values);
        value >= self.lower_bound - tol && value <= self.upper_bound + tol
    }

    /// Remove any terms involving the variable from the constraint
    pub(crate) fn remove_variable(&mut self, variable_id: &str) {
        let coef = self.expression.coefficient(variable_id);
        self.expression.add_term(variable_id, -coef);
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_equality() {
            write!(f, "{}: {} = {}", self.id, self.expression, self.lower_bound)
        } else {
            write!(
                f,
                "{}: {} <= {} <= {}",
                self.id, self.lower_bound, self.expression, self.upper_bound
            )
        }
    }
}
