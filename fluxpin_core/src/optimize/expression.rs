//! Provides linear expressions over optimization problem variables
use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A linear combination of variables, `sum(coefficient * variable)`
///
/// Variables are referred to by id, and terms are kept in the order the variables were
/// first added. Adding a term for a variable which is already present merges the
/// coefficients, and terms whose coefficient ends up at exactly zero are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpression {
    terms: IndexMap<String, f64>,
}

impl LinearExpression {
    /// Create an empty expression, which evaluates to 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an expression from variable ids and coefficients
    ///
    /// # Examples
    /// ```rust
    /// use fluxpin_core::optimize::expression::LinearExpression;
    /// // represents 3*x + 2*y
    /// let expr = LinearExpression::from_terms(&["x", "y"], &[3., 2.]);
    /// assert_eq!(expr.coefficient("x"), 3.);
    /// ```
    pub fn from_terms(variables: &[&str], coefficients: &[f64]) -> Self {
        let mut expr = Self::new();
        variables
            .iter()
            .zip(coefficients)
            .for_each(|(var, coef)| expr.add_term(var, *coef));
        expr
    }

    /// Add `coefficient * variable` to the expression
    pub fn add_term(&mut self, variable: &str, coefficient: f64) {
        let entry = self.terms.entry(variable.to_string()).or_insert(0.);
        *entry += coefficient;
        if *entry == 0. {
            self.terms.shift_remove(variable);
        }
    }

    /// Coefficient of a variable, 0 if the variable doesn't appear in the expression
    pub fn coefficient(&self, variable: &str) -> f64 {
        self.terms.get(variable).copied().unwrap_or(0.)
    }

    /// Iterate over the (variable id, coefficient) terms
    pub fn terms(&self) -> impl Iterator<Item = (&str, f64)> {
        self.terms.iter().map(|(id, coef)| (id.as_str(), *coef))
    }

    /// Ids of the variables in the expression
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(|id| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate the expression for the given variable values
    ///
    /// Variables missing from `values` are taken to be 0.
    pub fn evaluate(&self, values: &IndexMap<String, f64>) -> f64 {
        self.terms
            .iter()
            .map(|(id, coef)| coef * values.get(id).copied().unwrap_or(0.))
            .sum()
    }
}

impl Add for LinearExpression {
    type Output = LinearExpression;

    fn add(mut self, rhs: Self) -> Self::Output {
        rhs.terms
            .into_iter()
            .for_each(|(id, coef)| self.add_term(&id, coef));
        self
    }
}

impl Sub for LinearExpression {
    type Output = LinearExpression;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl Neg for LinearExpression {
    type Output = LinearExpression;

    fn neg(self) -> Self::Output {
        self * -1.
    }
}

impl Mul<f64> for LinearExpression {
    type Output = LinearExpression;

    fn mul(self, rhs: f64) -> Self::Output {
        let mut scaled = LinearExpression::new();
        self.terms
            .into_iter()
            .for_each(|(id, coef)| scaled.add_term(&id, coef * rhs));
        scaled
    }
}

impl Mul<LinearExpression> for f64 {
    type Output = LinearExpression;

    fn mul(self, rhs: LinearExpression) -> Self::Output {
        rhs * self
    }
}

impl Display for LinearExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        let rendered = self
            .terms
            .iter()
            .map(|(id, coef)| format!("{}*{}", coef, id))
            .collect::<Vec<_>>();
        write!(f, "{}", rendered.join(" + "))
    }
}
