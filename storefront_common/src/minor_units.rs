use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY_CODE: &str = "INR";
/// The number of minor units (e.g. paise) in one major unit (e.g. rupees).
pub const MINOR_UNITS_PER_MAJOR_UNIT: i64 = 100;
/// The number of decimal places implied by [`MINOR_UNITS_PER_MAJOR_UNIT`].
const MINOR_UNIT_SCALE: u32 = MINOR_UNITS_PER_MAJOR_UNIT.ilog10();

//--------------------------------------     MinorUnits       ---------------------------------------------------------
/// An amount of money expressed in the smallest currency subunit, which is the convention the payment provider uses
/// for all amounts on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(i64);

impl From<i64> for MinorUnits {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for MinorUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.to_major())
    }
}

impl MinorUnits {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// The amount in major units, e.g. 55000 paise is 550.00 rupees. The conversion is exact.
    pub fn to_major(&self) -> Decimal {
        Decimal::new(self.0, MINOR_UNIT_SCALE)
    }
}
