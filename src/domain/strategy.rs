//! Prioritization strategies
//!
//! A strategy is a named policy that adds a bonus on top of the base
//! score. Unknown names never fail: anything unrecognized behaves as
//! `smart_balance`, so a stale client sending a retired strategy name
//! still gets a ranking back.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scoring policy applied on top of the base score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum Strategy {
    /// Balanced bonuses for importance, small effort, and near deadlines
    #[default]
    SmartBalance,
    /// Reward quick tasks
    FastestWins,
    /// Reward important tasks
    HighImpact,
    /// Reward imminent deadlines
    DeadlineDriven,
}

impl Strategy {
    /// All strategies, in display order
    pub const ALL: [Strategy; 4] = [
        Strategy::SmartBalance,
        Strategy::FastestWins,
        Strategy::HighImpact,
        Strategy::DeadlineDriven,
    ];

    /// Returns the wire name of the strategy
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => "smart_balance",
            Strategy::FastestWins => "fastest_wins",
            Strategy::HighImpact => "high_impact",
            Strategy::DeadlineDriven => "deadline_driven",
        }
    }

    /// Returns a display label for the strategy
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => "Smart Balance",
            Strategy::FastestWins => "Fastest Wins",
            Strategy::HighImpact => "High Impact",
            Strategy::DeadlineDriven => "Deadline Driven",
        }
    }

    /// Resolves a wire name, falling back to `SmartBalance` for anything unrecognized
    pub fn from_name(name: &str) -> Self {
        match name {
            "fastest_wins" => Strategy::FastestWins,
            "high_impact" => Strategy::HighImpact,
            "deadline_driven" => Strategy::DeadlineDriven,
            _ => Strategy::SmartBalance,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for Strategy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Strategy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Strategy::from_name(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_roundtrip() {
        for strategy in Strategy::ALL {
            assert_eq!(Strategy::from_name(strategy.as_str()), strategy);
        }
    }

    #[test]
    fn unknown_name_falls_back_to_smart_balance() {
        assert_eq!(Strategy::from_name("chaos_monkey"), Strategy::SmartBalance);
        assert_eq!(Strategy::from_name(""), Strategy::SmartBalance);
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&Strategy::DeadlineDriven).unwrap(),
            "\"deadline_driven\""
        );
        assert_eq!(
            serde_json::from_str::<Strategy>("\"high_impact\"").unwrap(),
            Strategy::HighImpact
        );
    }

    #[test]
    fn serde_fallback_on_unknown_name() {
        assert_eq!(
            serde_json::from_str::<Strategy>("\"no_such_policy\"").unwrap(),
            Strategy::SmartBalance
        );
    }
}
