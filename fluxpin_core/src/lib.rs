//! Helpers for pinning reaction fluxes in a constraint based metabolic model.
//!
//! A [`Model`] holds reactions and the optimization problem built from them. The functions
//! in [`manipulation`] fix a reaction's flux, set its bounds, or tie the fluxes of two
//! reactions together at a fixed ratio.

pub mod configuration;
pub mod manipulation;
pub mod metabolic_model;
pub mod optimize;
mod utils;

pub use manipulation::{
    set_bounds, set_fixed_flux, set_fixed_flux_ratio, set_fixed_flux_ratio_pair, RatioError,
};
pub use metabolic_model::model::{Model, ModelError};
pub use metabolic_model::reaction::{Reaction, ReactionBuilder};
pub use optimize::constraint::Constraint;
pub use optimize::expression::LinearExpression;
pub use optimize::problem::ProblemError;
