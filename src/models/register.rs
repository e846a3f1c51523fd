use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sub-registry code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Register {
    /// Trade register (companies)
    Krek,
    /// Foundation register
    Srek,
}

impl Register {
    pub fn as_str(&self) -> &'static str {
        match self {
            Register::Krek => "krek",
            Register::Srek => "srek",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Register {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "krek" => Ok(Register::Krek),
            "srek" => Ok(Register::Srek),
            other => Err(format!("unknown register '{}', expected krek or srek", other)),
        }
    }
}
