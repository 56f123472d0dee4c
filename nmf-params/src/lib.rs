pub mod errors;
pub mod params;
pub mod update_rules;

pub use errors::NmfParamsError;
pub use params::{NmfParams, NmfParamsBuilder};
pub use update_rules::UpdateRules;
