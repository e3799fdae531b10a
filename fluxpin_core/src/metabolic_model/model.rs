//! This module provides the Model struct for representing an entire metabolic model
use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use crate::metabolic_model::reaction::Reaction;
use crate::optimize::constraint::Constraint;
use crate::optimize::problem::{Problem, ProblemError};

/// Represents a constraint based metabolic model
///
/// The model keeps its reactions and the optimization problem in sync: every reaction is
/// represented in the problem by a forward and a reverse variable, whose bounds follow the
/// reaction's bounds. For that reason reactions are only mutable through the model.
#[derive(Clone, Debug, Default)]
pub struct Model {
    /// Map of reaction ids to Reaction Objects, in the order they were added
    reactions: IndexMap<String, Reaction>,
    /// Underlying optimization problem
    problem: Problem,
    /// Id associated with the Model
    pub id: Option<String>,
}

impl Model {
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Create a new, empty model with an id
    pub fn new(id: &str) -> Self {
        Model {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }

    /// Add a reaction to the model
    ///
    /// # Parameters
    /// - reaction: Reaction to add
    ///
    /// # Examples
    /// ```rust
    /// use fluxpin_core::metabolic_model::model::Model;
    /// use fluxpin_core::metabolic_model::reaction::ReactionBuilder;
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction".to_string()).build().unwrap();
    /// model.add_reaction(new_reaction).unwrap();
    /// assert!(model.reaction("new_reaction").is_ok());
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) -> Result<(), ModelError> {
        if self.reactions.contains_key(&reaction.id) {
            return Err(ModelError::ReactionAlreadyExists(reaction.id));
        }
        Self::check_bounds(&reaction.id, reaction.lower_bound, reaction.upper_bound)?;
        self.problem.add_new_variable(
            &reaction.get_forward_id(),
            None,
            reaction.get_forward_lower_bound(),
            reaction.get_forward_upper_bound(),
        )?;
        if let Err(err) = self.problem.add_new_variable(
            &reaction.get_reverse_id(),
            None,
            reaction.get_reverse_lower_bound(),
            reaction.get_reverse_upper_bound(),
        ) {
            // Don't leave a dangling forward variable behind
            self.problem.delete_variable(&reaction.get_forward_id())?;
            return Err(err.into());
        }
        debug!("Added reaction {} with bounds {:?}", reaction.id, reaction.bounds());
        self.reactions.insert(reaction.id.clone(), reaction);
        Ok(())
    }

    /// Get a reaction by id
    ///
    /// # Errors
    /// [`ModelError::ReactionNotFound`] if there is no reaction with this id in the model
    pub fn reaction(&self, id: &str) -> Result<&Reaction, ModelError> {
        self.reactions
            .get(id)
            .ok_or_else(|| ModelError::ReactionNotFound(id.to_string()))
    }

    /// Iterate over the reactions, in the order they were added
    pub fn reactions(&self) -> impl Iterator<Item = &Reaction> {
        self.reactions.values()
    }

    pub fn num_reactions(&self) -> usize {
        self.reactions.len()
    }

    /// Set both flux bounds of a reaction, updating the associated problem variables
    ///
    /// The model is left unchanged if this returns an error.
    pub fn set_reaction_bounds(
        &mut self,
        id: &str,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<(), ModelError> {
        let reaction = self
            .reactions
            .get_mut(id)
            .ok_or_else(|| ModelError::ReactionNotFound(id.to_string()))?;
        Self::check_bounds(id, lower_bound, upper_bound)?;
        reaction.lower_bound = lower_bound;
        reaction.upper_bound = upper_bound;
        // Split bounds are both >= 0 and ordered whenever lower_bound <= upper_bound,
        // so these updates can't fail once the check above has passed
        self.problem.update_variable_bounds(
            &reaction.get_forward_id(),
            reaction.get_forward_lower_bound(),
            reaction.get_forward_upper_bound(),
        )?;
        self.problem.update_variable_bounds(
            &reaction.get_reverse_id(),
            reaction.get_reverse_lower_bound(),
            reaction.get_reverse_upper_bound(),
        )?;
        debug!("Set bounds of reaction {} to ({}, {})", id, lower_bound, upper_bound);
        Ok(())
    }

    /// Register a constraint with the model's optimization problem
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), ModelError> {
        let id = constraint.id.clone();
        self.problem.add_constraint(constraint)?;
        debug!("Added constraint {}", id);
        Ok(())
    }

    /// Remove a constraint from the model's optimization problem, returning it if it was present
    pub fn remove_constraint(&mut self, id: &str) -> Option<Constraint> {
        let removed = self.problem.remove_constraint(id);
        if removed.is_some() {
            debug!("Removed constraint {}", id);
        }
        removed
    }

    /// Find a constraint id of the form "{prefix}_{n}" which isn't yet used in the model
    ///
    /// `n` counts up from 0, so repeated registrations under the same prefix each get their
    /// own id.
    pub fn unused_constraint_id(&self, prefix: &str) -> String {
        let mut suffix = 0usize;
        let mut id = format!("{}_{}", prefix, suffix);
        while self.problem.constraint(&id).is_some() {
            suffix += 1;
            id = format!("{}_{}", prefix, suffix);
        }
        id
    }

    pub fn constraint(&self, id: &str) -> Option<&Constraint> {
        self.problem.constraint(id)
    }

    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.problem.constraints()
    }

    pub fn num_constraints(&self) -> usize {
        self.problem.num_constraints()
    }

    /// The optimization problem underlying the model
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Translate net reaction fluxes into values for the problem variables
    ///
    /// Positive fluxes are assigned to the forward variable, negative fluxes to the
    /// reverse variable. Reactions missing from `fluxes` get no entry.
    pub fn flux_values_to_variable_values(
        &self,
        fluxes: &IndexMap<String, f64>,
    ) -> Result<IndexMap<String, f64>, ModelError> {
        let mut values = IndexMap::new();
        for (id, flux) in fluxes {
            let reaction = self.reaction(id)?;
            values.insert(reaction.get_forward_id(), flux.max(0.));
            values.insert(reaction.get_reverse_id(), (-flux).max(0.));
        }
        Ok(values)
    }

    fn check_bounds(id: &str, lower_bound: f64, upper_bound: f64) -> Result<(), ModelError> {
        if lower_bound > upper_bound {
            return Err(ModelError::InvalidBounds {
                id: id.to_string(),
                lower_bound,
                upper_bound,
            });
        }
        Ok(())
    }
}

/// Errors associated with the Model
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ModelError {
    /// Error when looking up a reaction id which isn't in the model
    #[error("Reaction {0} is not present in the model")]
    ReactionNotFound(String),
    /// Error when adding a reaction with the same id as an existing reaction
    #[error("Tried to add reaction {0}, but a reaction with that id already exists")]
    ReactionAlreadyExists(String),
    /// Error when assigning bounds with lower_bound > upper_bound to a reaction
    #[error("Invalid bounds for reaction {id}: lower bound {lower_bound} > upper bound {upper_bound}")]
    InvalidBounds {
        id: String,
        lower_bound: f64,
        upper_bound: f64,
    },
    /// Error from the underlying optimization problem
    #[error(transparent)]
    Problem(#[from] ProblemError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::reaction::ReactionBuilder;

    fn setup_model() -> Model {
        let mut model = Model::new("test_model");
        model.add_reaction(Reaction::new("R1")).unwrap();
        model
            .add_reaction(
                ReactionBuilder::default()
                    .id("R2".to_string())
                    .lower_bound(0.)
                    .upper_bound(50.)
                    .build()
                    .unwrap(),
            )
            .unwrap();
        model
    }

    #[test]
    fn add_reaction() {
        let model = setup_model();
        assert_eq!(model.id.as_deref(), Some("test_model"));
        assert_eq!(model.num_reactions(), 2);
        // Two variables per reaction
        assert_eq!(model.problem().num_variables(), 4);

        let r2 = model.reaction("R2").unwrap();
        let forward = model.problem().variable(&r2.get_forward_id()).unwrap();
        assert!((forward.upper_bound - 50.).abs() < 1e-25);
        let reverse = model.problem().variable(&r2.get_reverse_id()).unwrap();
        assert!(reverse.upper_bound.abs() < 1e-25);

        let ids = model.reactions().map(|r| r.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["R1", "R2"]);
    }

    #[test]
    fn add_bad_reaction() {
        let mut model = setup_model();
        assert_eq!(
            model.add_reaction(Reaction::new("R1")),
            Err(ModelError::ReactionAlreadyExists("R1".to_string()))
        );
        let backwards = ReactionBuilder::default()
            .id("R3".to_string())
            .lower_bound(10.)
            .upper_bound(0.)
            .build()
            .unwrap();
        assert!(matches!(
            model.add_reaction(backwards),
            Err(ModelError::InvalidBounds { .. })
        ));
        assert_eq!(model.num_reactions(), 2);
        assert_eq!(model.problem().num_variables(), 4);
    }

    #[test]
    fn reaction_lookup() {
        let model = setup_model();
        assert!(model.reaction("R1").is_ok());
        assert_eq!(
            model.reaction("missing"),
            Err(ModelError::ReactionNotFound("missing".to_string()))
        );
    }

    #[test]
    fn set_reaction_bounds() {
        let mut model = setup_model();
        model.set_reaction_bounds("R1", -20., -5.).unwrap();
        let r1 = model.reaction("R1").unwrap();
        assert_eq!(r1.bounds(), (-20., -5.));
        let forward = model.problem().variable(&r1.get_forward_id()).unwrap();
        assert!(forward.lower_bound.abs() < 1e-25);
        assert!(forward.upper_bound.abs() < 1e-25);
        let reverse = model.problem().variable(&r1.get_reverse_id()).unwrap();
        assert!((reverse.lower_bound - 5.).abs() < 1e-25);
        assert!((reverse.upper_bound - 20.).abs() < 1e-25);
    }

    #[test]
    fn set_invalid_reaction_bounds() {
        let mut model = setup_model();
        assert!(matches!(
            model.set_reaction_bounds("R2", 10., 1.),
            Err(ModelError::InvalidBounds { .. })
        ));
        assert_eq!(model.reaction("R2").unwrap().bounds(), (0., 50.));
        assert_eq!(
            model.set_reaction_bounds("missing", 0., 1.),
            Err(ModelError::ReactionNotFound("missing".to_string()))
        );
    }

    #[test]
    fn constraints() {
        let mut model = setup_model();
        let expr = model.reaction("R1").unwrap().flux_expression()
            - model.reaction("R2").unwrap().flux_expression();
        model
            .add_constraint(Constraint::new_equality("same_flux", expr, 0.))
            .unwrap();
        assert_eq!(model.num_constraints(), 1);
        assert!(model.constraint("same_flux").is_some());
        assert_eq!(model.constraints().count(), 1);

        // Constraints over unknown variables are rejected
        let bad = Constraint::new_equality(
            "bad",
            crate::optimize::expression::LinearExpression::from_terms(&["nope"], &[1.]),
            0.,
        );
        assert_eq!(
            model.add_constraint(bad),
            Err(ModelError::Problem(
                ProblemError::NonExistentVariablesInConstraint
            ))
        );

        assert!(model.remove_constraint("same_flux").is_some());
        assert_eq!(model.num_constraints(), 0);
        assert!(model.remove_constraint("same_flux").is_none());
    }

    #[test]
    fn unused_constraint_id() {
        let mut model = setup_model();
        assert_eq!(model.unused_constraint_id("R1_R2_ratio"), "R1_R2_ratio_0");
        let expr = model.reaction("R1").unwrap().flux_expression();
        model
            .add_constraint(Constraint::new_equality("R1_R2_ratio_0", expr.clone(), 0.))
            .unwrap();
        model
            .add_constraint(Constraint::new_equality("R1_R2_ratio_1", expr, 0.))
            .unwrap();
        assert_eq!(model.unused_constraint_id("R1_R2_ratio"), "R1_R2_ratio_2");

        // Gaps left by removed constraints are reused
        model.remove_constraint("R1_R2_ratio_0");
        assert_eq!(model.unused_constraint_id("R1_R2_ratio"), "R1_R2_ratio_0");
    }

    #[test]
    fn flux_values() {
        let model = setup_model();
        let fluxes: IndexMap<String, f64> =
            [("R1".to_string(), -3.), ("R2".to_string(), 4.)].into_iter().collect();
        let values = model.flux_values_to_variable_values(&fluxes).unwrap();
        let r1 = model.reaction("R1").unwrap();
        assert!((values[&r1.get_reverse_id()] - 3.).abs() < 1e-25);
        assert!(values[&r1.get_forward_id()].abs() < 1e-25);
        let expr = r1.flux_expression();
        assert!((expr.evaluate(&values) + 3.).abs() < 1e-12);

        let missing: IndexMap<String, f64> = [("R9".to_string(), 1.)].into_iter().collect();
        assert!(model.flux_values_to_variable_values(&missing).is_err());
    }
}
