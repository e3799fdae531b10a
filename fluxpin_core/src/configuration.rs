//! Global defaults used when building reactions and checking constraints
use std::sync::{LazyLock, RwLock, RwLockReadGuard};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

#[derive(Debug, Clone)]
pub struct Configuration {
    /// Lower bound given to reactions which don't specify one
    pub lower_bound: f64,
    /// Upper bound given to reactions which don't specify one
    pub upper_bound: f64,
    /// Absolute tolerance used when checking if a constraint is satisfied
    pub tolerance: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lower_bound: -1000.,
            upper_bound: 1000.,
            tolerance: 1e-07,
        }
    }
}

/// Read the current configuration
///
/// # Note:
/// A poisoned lock still holds the last written configuration, so that value is used
/// rather than propagating the panic of whichever thread poisoned it.
pub fn read_configuration() -> RwLockReadGuard<'static, Configuration> {
    CONFIGURATION
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) fn default_lower_bound() -> f64 {
    read_configuration().lower_bound
}

pub(crate) fn default_upper_bound() -> f64 {
    read_configuration().upper_bound
}

pub(crate) fn tolerance() -> f64 {
    read_configuration().tolerance
}
