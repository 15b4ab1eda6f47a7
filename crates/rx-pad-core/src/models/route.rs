//! Route of administration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownVariant;

/// Route of drug administration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Route {
    /// By mouth
    #[serde(rename = "Oral")]
    Oral,
    /// Intravenous
    #[serde(rename = "IV")]
    Iv,
    /// Intramuscular
    #[serde(rename = "IM")]
    Im,
    /// Subcutaneous
    #[serde(rename = "S/C")]
    SubCut,
}

impl Route {
    /// All routes, in dropdown display order.
    pub const ALL: [Route; 4] = [Route::Oral, Route::Iv, Route::Im, Route::SubCut];

    /// Wire/display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Oral => "Oral",
            Route::Iv => "IV",
            Route::Im => "IM",
            Route::SubCut => "S/C",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Route {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "oral" | "po" => Ok(Route::Oral),
            "iv" => Ok(Route::Iv),
            "im" => Ok(Route::Im),
            "s/c" | "sc" | "sq" => Ok(Route::SubCut),
            _ => Err(UnknownVariant::new("route", s)),
        }
    }
}
