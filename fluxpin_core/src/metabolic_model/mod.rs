//! Module providing the Model struct for representing a metabolic model.

pub mod model;
pub mod reaction;
