//! Module for constructing the optimization problem underlying a metabolic model

pub mod constraint;
pub mod expression;
pub mod problem;
pub mod variable;
