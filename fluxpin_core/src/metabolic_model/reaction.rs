//! This module provides a struct for representing reactions
use derive_builder::Builder;

use crate::configuration::{default_lower_bound, default_upper_bound};
use crate::optimize::expression::LinearExpression;
use crate::utils::hashing::hash_as_hex_string;

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Lower flux bound
    #[builder(default = "default_lower_bound()")]
    pub(crate) lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "default_upper_bound()")]
    pub(crate) upper_bound: f64,
    /// Reaction subsystem
    #[builder(default = "None")]
    pub subsystem: Option<String>,
}

impl Reaction {
    /// Create a new reaction with the default bounds
    ///
    /// # Examples
    /// ```rust
    /// use fluxpin_core::metabolic_model::reaction::Reaction;
    /// let pgi = Reaction::new("PGI");
    /// assert_eq!(pgi.bounds(), (-1000., 1000.));
    /// ```
    pub fn new(id: &str) -> Self {
        Reaction {
            id: id.to_string(),
            name: None,
            lower_bound: default_lower_bound(),
            upper_bound: default_upper_bound(),
            subsystem: None,
        }
    }

    /// The (lower, upper) flux bounds of the reaction
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower_bound, self.upper_bound)
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Determine the id to be associated with the forward reaction in the optimization problem
    ///
    /// # Note:
    /// The forward id is "{reaction_id}_forward"
    pub fn get_forward_id(&self) -> String {
        format!("{}_forward", &self.id)
    }

    /// Determine the id to be associated with the reverse reaction in the optimization problem
    ///
    /// # Note:
    /// The reverse id is "{reaction_id}_reverse_{hexidecimal hash of reaction_id}"
    pub fn get_reverse_id(&self) -> String {
        format!("{}_reverse_{}", &self.id, hash_as_hex_string(&self.id))
    }

    /// Net flux through the reaction as an expression over the problem variables,
    /// `forward - reverse`
    pub fn flux_expression(&self) -> LinearExpression {
        LinearExpression::from_terms(
            &[self.get_forward_id().as_str(), self.get_reverse_id().as_str()],
            &[1., -1.],
        )
    }

    /// Determine the upper bound of the variable associated with the forward reaction
    pub(crate) fn get_forward_upper_bound(&self) -> f64 {
        self.upper_bound.max(0f64)
    }

    /// Determine the lower bound of the variable associated with the forward reaction
    pub(crate) fn get_forward_lower_bound(&self) -> f64 {
        self.lower_bound.max(0f64)
    }

    /// Determine the upper bound of the variable associated with the reverse reaction
    pub(crate) fn get_reverse_upper_bound(&self) -> f64 {
        (-self.lower_bound).max(0f64)
    }

    /// Determine the lower bound of the variable associated with the reverse reaction
    pub(crate) fn get_reverse_lower_bound(&self) -> f64 {
        (-self.upper_bound).max(0f64)
    }
}
