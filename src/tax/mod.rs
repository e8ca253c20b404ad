//! Simplified capital tax estimate and the tax return helper

mod estimate;
pub mod helper;

pub use estimate::{estimate, TaxEstimate, TaxInputs};
pub use helper::{advance, form_fields, transition, FormField, TaxTopic, WizardAction, WizardState};
