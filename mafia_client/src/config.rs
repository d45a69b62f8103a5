use std::time::Duration;

use itertools::Itertools;
use mafia_core::{events::Nickname, GameError, GameResult, Role};

/// How long the host waits after a phase resolves before advancing the game.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(2000);

/// What the lobby knows about the local player when the game starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub nickname: Nickname,
    pub role: Role,
    pub players: Vec<Nickname>,
    pub is_host: bool,
    pub advance_delay: Duration,
}

impl SessionConfig {
    pub fn new(nickname: impl Into<Nickname>, role: Role, players: Vec<Nickname>) -> Self {
        SessionConfig {
            nickname: nickname.into(),
            role,
            players,
            is_host: false,
            advance_delay: DEFAULT_ADVANCE_DELAY,
        }
    }

    pub fn with_host(self, is_host: bool) -> Self {
        SessionConfig { is_host, ..self }
    }

    pub fn with_advance_delay(self, advance_delay: Duration) -> Self {
        SessionConfig {
            advance_delay,
            ..self
        }
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.nickname.trim().is_empty() {
            return Err(GameError::config("nickname must not be empty"));
        }
        if !self.players.contains(&self.nickname) {
            return Err(GameError::config(format!(
                "{} is not one of the players",
                self.nickname
            )));
        }
        if !self.players.iter().all_unique() {
            return Err(GameError::config(format!(
                "duplicate players in [{}]",
                self.players.iter().join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mafia_core::{GameError, Role};

    use crate::config::{SessionConfig, DEFAULT_ADVANCE_DELAY};

    fn players(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn defaults_should_not_be_host() {
        let config = SessionConfig::new("me", Role::Mafia, players(&["A", "me"]));
        assert!(!config.is_host);
        assert_eq!(config.advance_delay, DEFAULT_ADVANCE_DELAY);
        assert!(config.validate().is_ok());

        let config = config
            .with_host(true)
            .with_advance_delay(Duration::from_millis(10));
        assert!(config.is_host);
        assert_eq!(config.advance_delay, Duration::from_millis(10));
    }

    #[test]
    fn nickname_must_be_a_player() {
        let config = SessionConfig::new("me", Role::Medic, players(&["A", "B"]));
        assert!(matches!(config.validate(), Err(GameError::Config(_))));

        let config = SessionConfig::new(" ", Role::Medic, players(&[" "]));
        assert!(matches!(config.validate(), Err(GameError::Config(_))));
    }

    #[test]
    fn players_must_be_unique() {
        let config = SessionConfig::new("me", Role::Civilian, players(&["A", "me", "A"]));
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid session configuration: duplicate players in [A, me, A]"
        );
    }
}
