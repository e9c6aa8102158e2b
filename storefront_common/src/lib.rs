//! Types shared by every crate in the storefront payment workspace.
pub mod helpers;
mod minor_units;
mod secret;

pub use minor_units::{MinorUnits, DEFAULT_CURRENCY_CODE, MINOR_UNITS_PER_MAJOR_UNIT};
pub use secret::Secret;
