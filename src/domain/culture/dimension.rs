//! CultureDimension enum representing the four OCAI culture types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four Competing Values Framework culture types scored by the OCAI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CultureDimension {
    Clan,
    Adhocracy,
    Market,
    Hierarchy,
}

impl CultureDimension {
    /// Returns all dimensions in canonical order.
    pub fn all() -> &'static [CultureDimension] {
        &[
            CultureDimension::Clan,
            CultureDimension::Adhocracy,
            CultureDimension::Market,
            CultureDimension::Hierarchy,
        ]
    }

    /// Returns the key used in serialized score vectors.
    pub fn key(&self) -> &'static str {
        match self {
            CultureDimension::Clan => "Clan",
            CultureDimension::Adhocracy => "Adhocracy",
            CultureDimension::Market => "Market",
            CultureDimension::Hierarchy => "Hierarchy",
        }
    }

    /// Returns a short description of what the culture type emphasises.
    pub fn focus(&self) -> &'static str {
        match self {
            CultureDimension::Clan => "Collaborate",
            CultureDimension::Adhocracy => "Create",
            CultureDimension::Market => "Compete",
            CultureDimension::Hierarchy => "Control",
        }
    }
}

impl fmt::Display for CultureDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
