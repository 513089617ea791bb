use serde::{Deserialize, Serialize};

use crate::SpecificSpeed;

/// A chart reading as a callable model from a typed input to a typed output.
///
/// Models are deterministic: the same input always produces the same
/// result, so they can be called freely from solvers and sweeps.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Calls the model with the given input.
    ///
    /// # Errors
    ///
    /// Each model defines its own `Error` type to represent domain-specific failures.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// Input of a chart read at a specific speed for a given vane count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaneInput {
    pub specific_speed: SpecificSpeed,
    pub vanes: u32,
}

impl VaneInput {
    #[must_use]
    pub fn new(specific_speed: SpecificSpeed, vanes: u32) -> Self {
        Self {
            specific_speed,
            vanes,
        }
    }
}
