use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{EnumMessage, IntoEnumIterator};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString};

use crate::error::{GameError, GameResult};

#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Copy,
    Clone,
    Display,
    EnumIter,
    EnumString,
    EnumMessage,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[strum(message = "Choose a player for the mafia to kill tonight")]
    Mafia,
    #[strum(message = "Choose a player to investigate tonight")]
    Detective,
    #[strum(message = "Choose a player to save tonight")]
    Medic,
    #[strum(message = "The town is asleep, wait for the morning")]
    Civilian,
    #[strum(message = "Get yourself executed by the town to win")]
    Jester,
}

impl Role {
    /// Parses a role name sent by the server; the role set is closed.
    pub fn parse(value: &str) -> GameResult<Role> {
        Role::from_str(value.trim()).map_err(|_| GameError::UnknownRole(value.to_string()))
    }

    pub fn summary() -> String {
        Role::iter()
            .map(|r| format!("{}: {}", r, r.night_instructions()))
            .join("\n")
    }

    /// Status shown to a living player while the night vote is open.
    pub fn night_instructions(&self) -> &'static str {
        self.get_message().unwrap_or("Wait for the night to pass")
    }

    /// Name of the outbound night vote event, e.g. `mafia-vote`.
    pub fn vote_event(&self) -> String {
        format!("{}-vote", self)
    }
}
