//! Module providing representation of optimization problem variables
use std::fmt::{Display, Formatter};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// A continuous variable in an optimization problem
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct Variable {
    /// Used to identify the variable, must be unique within a [`Problem`](crate::optimize::problem::Problem)
    pub id: String,
    /// Human-readable variable name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Lowest value the variable can take
    #[builder(default = "0.")]
    pub lower_bound: f64,
    /// Highest value the variable can take
    #[builder(default = "f64::INFINITY")]
    pub upper_bound: f64,
    /// Position of the variable within the problem, assigned when it is added
    #[builder(default = "0")]
    pub index: usize,
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(
                f,
                "{}: {} <= {} <= {}",
                name, self.lower_bound, self.id, self.upper_bound
            ),
            None => write!(
                f,
                "{} <= {} <= {}",
                self.lower_bound, self.id, self.upper_bound
            ),
        }
    }
}
