use core::str::FromStr;
use serde::{Deserialize, Serialize};

use scrapledger_core::LedgerError;

/// Measurement unit of a traded quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    G,
    Piece,
    Liter,
    Packet,
    Bag,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::Piece => "piece",
            Unit::Liter => "liter",
            Unit::Packet => "packet",
            Unit::Bag => "bag",
        }
    }

    /// All units, in the order the intake form offers them.
    pub fn all() -> [Unit; 6] {
        [
            Unit::Kg,
            Unit::G,
            Unit::Piece,
            Unit::Liter,
            Unit::Packet,
            Unit::Bag,
        ]
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kg" => Ok(Unit::Kg),
            "g" => Ok(Unit::G),
            "piece" => Ok(Unit::Piece),
            "liter" => Ok(Unit::Liter),
            "packet" => Ok(Unit::Packet),
            "bag" => Ok(Unit::Bag),
            other => Err(LedgerError::validation(
                "unit",
                format!("unknown unit '{other}'"),
            )),
        }
    }
}
