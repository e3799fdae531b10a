//! Helpers for constraining reaction fluxes in an existing model
//!
//! These are thin wrappers over [`Model`]: they look reactions up by id and either
//! reassign their bounds or register a new constraint. Lookup failures come straight from
//! the model.
use indexmap::IndexMap;
use log::{debug, warn};
use thiserror::Error;

use crate::metabolic_model::model::{Model, ModelError};
use crate::optimize::constraint::Constraint;

/// Fix the flux through a reaction to a single value, by setting both bounds to `value`
///
/// # Parameters
/// - `reaction_id`: Id of a reaction in the model
/// - `value`: Flux the reaction should carry
/// - `model`: Model containing the reaction
///
/// # Examples
/// ```rust
/// use fluxpin_core::metabolic_model::model::Model;
/// use fluxpin_core::metabolic_model::reaction::Reaction;
/// use fluxpin_core::manipulation::set_fixed_flux;
/// let mut model = Model::new_empty();
/// model.add_reaction(Reaction::new("R1")).unwrap();
/// set_fixed_flux("R1", 100., &mut model).unwrap();
/// assert_eq!(model.reaction("R1").unwrap().bounds(), (100., 100.));
/// ```
pub fn set_fixed_flux(reaction_id: &str, value: f64, model: &mut Model) -> Result<(), ModelError> {
    debug!("Fixing flux of {} to {}", reaction_id, value);
    model.set_reaction_bounds(reaction_id, value, value)
}

/// Set the (lower, upper) bounds of a reaction
///
/// The pair is passed to the model as is.
pub fn set_bounds(
    reaction_id: &str,
    bounds: (f64, f64),
    model: &mut Model,
) -> Result<(), ModelError> {
    let (lower_bound, upper_bound) = bounds;
    model.set_reaction_bounds(reaction_id, lower_bound, upper_bound)
}

/// Constrain the fluxes of two reactions to a fixed ratio
///
/// `ratios` must hold exactly two entries, `{reaction1: ratio1, reaction2: ratio2}`, in that
/// order. The constraint added is `ratio1*flux(reaction2) - ratio2*flux(reaction1) = 0`, so
/// `flux(reaction1)/flux(reaction2) = ratio1/ratio2` whenever the fluxes are non-zero.
///
/// # Returns
/// The constraint that was added to the model, its id can be used with
/// [`Model::remove_constraint`].
///
/// # Errors
/// - [`RatioError::WrongEntryCount`] if `ratios` doesn't have exactly two entries, in which
///   case the model is not touched
/// - [`RatioError::Model`] if either reaction isn't in the model
///
/// # Examples
/// ```rust
/// use indexmap::IndexMap;
/// use fluxpin_core::metabolic_model::model::Model;
/// use fluxpin_core::metabolic_model::reaction::Reaction;
/// use fluxpin_core::manipulation::set_fixed_flux_ratio;
/// let mut model = Model::new_empty();
/// model.add_reaction(Reaction::new("RUBISCO")).unwrap();
/// model.add_reaction(Reaction::new("RXN_961")).unwrap();
/// let mut ratios = IndexMap::new();
/// ratios.insert("RUBISCO".to_string(), 3.);
/// ratios.insert("RXN_961".to_string(), 1.);
/// let constraint = set_fixed_flux_ratio(&ratios, &mut model).unwrap();
/// assert!(model.constraint(&constraint.id).is_some());
/// ```
pub fn set_fixed_flux_ratio(
    ratios: &IndexMap<String, f64>,
    model: &mut Model,
) -> Result<Constraint, RatioError> {
    let mut entries = ratios.iter();
    match (entries.next(), entries.next(), entries.next()) {
        (Some((id1, ratio1)), Some((id2, ratio2)), None) => set_fixed_flux_ratio_pair(
            (id1.as_str(), *ratio1),
            (id2.as_str(), *ratio2),
            model,
        ),
        _ => {
            warn!(
                "Flux ratio needs exactly two reactions, got {}; no constraint added",
                ratios.len()
            );
            Err(RatioError::WrongEntryCount(ratios.len()))
        }
    }
}

/// Constrain the fluxes of two reactions to a fixed ratio, with the reactions given as an
/// ordered pair of (reaction id, ratio)
///
/// See [`set_fixed_flux_ratio`] for the form of the constraint.
pub fn set_fixed_flux_ratio_pair(
    first: (&str, f64),
    second: (&str, f64),
    model: &mut Model,
) -> Result<Constraint, RatioError> {
    let (id1, ratio1) = first;
    let (id2, ratio2) = second;
    let flux1 = model.reaction(id1)?.flux_expression();
    let flux2 = model.reaction(id2)?.flux_expression();
    let expression = ratio1 * flux2 - ratio2 * flux1;

    let constraint_id = model.unused_constraint_id(&format!("{}_{}_ratio", id1, id2));
    let constraint = Constraint::new_equality(&constraint_id, expression, 0.);
    model.add_constraint(constraint.clone())?;
    debug!("Fixed flux ratio {}:{} = {}:{}", id1, id2, ratio1, ratio2);
    Ok(constraint)
}

/// Errors from constraining a flux ratio
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RatioError {
    /// The ratio map didn't contain exactly two reactions
    #[error("A flux ratio needs exactly two reactions, but {0} were given")]
    WrongEntryCount(usize),
    /// Error from the model, e.g. a reaction which doesn't exist
    #[error(transparent)]
    Model(#[from] ModelError),
}
