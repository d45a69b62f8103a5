use std::{collections::BTreeMap, fmt};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{GameError, GameResult},
    role::Role,
};

pub type Nickname = String;

/// Reserved trial vote target meaning "execute nobody".
pub const ABSTAIN_VOTE: &str = "abstain Vote";

/// A named event as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InboundMessage {
    pub event: String,
    #[serde(default)]
    pub payload: Value,
}

impl InboundMessage {
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        InboundMessage {
            event: event.into(),
            payload,
        }
    }
}

/// A named event handed to the transport.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutboundMessage {
    pub event: String,
    pub payload: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTimer {
    pub time_to_vote: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    #[serde(default)]
    pub player_killed: Option<Nickname>,
    #[serde(default)]
    pub is_game_over: bool,
}

impl Resolution {
    /// The player who actually died, with the abstain sentinel read as nobody.
    pub fn victim(&self) -> Option<&str> {
        self.player_killed
            .as_deref()
            .filter(|&p| p != ABSTAIN_VOTE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Nomination {
    #[serde(default)]
    pub player_on_trial: Option<Nickname>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOutcome {
    pub winning_role: String,
    #[serde(default)]
    pub winners: Vec<Nickname>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteMap {
    #[serde(default)]
    pub vote_map: BTreeMap<Nickname, Value>,
}

impl VoteMap {
    pub fn voters(&self) -> Vec<Nickname> {
        self.vote_map.keys().cloned().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckedPlayer {
    pub nickname: Nickname,
    pub is_mafia: bool,
}

/// Everything the game server pushes to a client.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    NightStart(VoteTimer),
    NightEnd(Resolution),
    DayStart(VoteTimer),
    DiscussionEnd(Nomination),
    TrialStart(VoteTimer),
    TrialEnd(Resolution),
    GameOver(GameOutcome),
    DayVoteUpdate(VoteMap),
    TrialVoteUpdate(VoteMap),
    SuspectReveal(CheckedPlayer),
}

impl ServerEvent {
    pub fn decode(message: &InboundMessage) -> GameResult<Self> {
        fn payload<T: DeserializeOwned>(message: &InboundMessage) -> GameResult<T> {
            serde_json::from_value(message.payload.clone()).map_err(|source| {
                GameError::MalformedPayload {
                    event: message.event.clone(),
                    source,
                }
            })
        }

        let event = match message.event.as_str() {
            "night-start" => ServerEvent::NightStart(payload(message)?),
            "night-end" => ServerEvent::NightEnd(payload(message)?),
            "day-start" => ServerEvent::DayStart(payload(message)?),
            "discussion-end" => ServerEvent::DiscussionEnd(payload(message)?),
            "trial-start" => ServerEvent::TrialStart(payload(message)?),
            "trial-end" => ServerEvent::TrialEnd(payload(message)?),
            "game-over" => ServerEvent::GameOver(payload(message)?),
            "day-vote-update" => ServerEvent::DayVoteUpdate(payload(message)?),
            "trial-vote-update" => ServerEvent::TrialVoteUpdate(payload(message)?),
            "suspect-reveal" => ServerEvent::SuspectReveal(payload(message)?),
            unknown => return Err(GameError::UnknownEvent(unknown.to_string())),
        };
        Ok(event)
    }

    /// Whether the event moves the game into another phase. Vote updates and
    /// reveals only annotate the current one.
    pub fn changes_phase(&self) -> bool {
        !matches!(
            self,
            ServerEvent::DayVoteUpdate(_)
                | ServerEvent::TrialVoteUpdate(_)
                | ServerEvent::SuspectReveal(_)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::NightStart(_) => "night-start",
            ServerEvent::NightEnd(_) => "night-end",
            ServerEvent::DayStart(_) => "day-start",
            ServerEvent::DiscussionEnd(_) => "discussion-end",
            ServerEvent::TrialStart(_) => "trial-start",
            ServerEvent::TrialEnd(_) => "trial-end",
            ServerEvent::GameOver(_) => "game-over",
            ServerEvent::DayVoteUpdate(_) => "day-vote-update",
            ServerEvent::TrialVoteUpdate(_) => "trial-vote-update",
            ServerEvent::SuspectReveal(_) => "suspect-reveal",
        }
    }
}

/// Everything a client sends to the game server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    RoleVote { role: Role, voting_for: Nickname },
    DayVote { voting_for: Nickname },
    TrialVote { voting_for: Nickname },
    StartDay,
    StartNight,
    StartTrial,
}

impl ClientEvent {
    pub fn name(&self) -> String {
        match self {
            ClientEvent::RoleVote { role, .. } => role.vote_event(),
            ClientEvent::DayVote { .. } => "day-vote".to_string(),
            ClientEvent::TrialVote { .. } => "trial-vote".to_string(),
            ClientEvent::StartDay => "start-day".to_string(),
            ClientEvent::StartNight => "start-night".to_string(),
            ClientEvent::StartTrial => "start-trial".to_string(),
        }
    }

    pub fn to_message(&self) -> OutboundMessage {
        let payload = match self {
            ClientEvent::RoleVote { voting_for, .. }
            | ClientEvent::DayVote { voting_for }
            | ClientEvent::TrialVote { voting_for } => json!({ "votingFor": voting_for }),
            ClientEvent::StartDay | ClientEvent::StartNight | ClientEvent::StartTrial => {
                Value::Null
            }
        };
        OutboundMessage {
            event: self.name(),
            payload,
        }
    }
}

impl fmt::Display for ClientEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::{
        error::GameError,
        events::{
            CheckedPlayer, ClientEvent, InboundMessage, Nomination, Resolution, ServerEvent,
            VoteMap, VoteTimer, ABSTAIN_VOTE,
        },
        role::Role,
    };

    fn decode(event: &str, payload: Value) -> Result<ServerEvent, GameError> {
        ServerEvent::decode(&InboundMessage::new(event, payload))
    }

    #[test]
    fn night_start_should_decode_time_to_vote() {
        let event = decode("night-start", json!({ "timeToVote": 30 })).unwrap();
        assert_eq!(event, ServerEvent::NightStart(VoteTimer { time_to_vote: 30 }));
    }

    #[test]
    fn resolution_should_accept_missing_and_null_victims() {
        let event = decode("night-end", json!({ "playerKilled": null, "isGameOver": false })).unwrap();
        assert_eq!(event, ServerEvent::NightEnd(Resolution::default()));

        let event = decode("trial-end", json!({})).unwrap();
        assert_eq!(event, ServerEvent::TrialEnd(Resolution::default()));
    }

    #[test]
    fn abstain_sentinel_should_not_be_a_victim() {
        let resolution = Resolution {
            player_killed: Some(ABSTAIN_VOTE.to_string()),
            is_game_over: false,
        };
        assert_eq!(resolution.victim(), None);

        let resolution = Resolution {
            player_killed: Some("A".to_string()),
            is_game_over: true,
        };
        assert_eq!(resolution.victim(), Some("A"));
    }

    #[test]
    fn discussion_end_should_decode_missing_nominee() {
        let event = decode("discussion-end", json!({ "playerOnTrial": null })).unwrap();
        assert_eq!(event, ServerEvent::DiscussionEnd(Nomination::default()));
    }

    #[test]
    fn vote_update_should_expose_sorted_voters() {
        let event = decode("day-vote-update", json!({ "voteMap": { "B": "A", "A": "C" } })).unwrap();
        match event {
            ServerEvent::DayVoteUpdate(map) => assert_eq!(map.voters(), vec!["A", "B"]),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn suspect_reveal_should_decode_checked_player() {
        let event = decode("suspect-reveal", json!({ "nickname": "A", "isMafia": true })).unwrap();
        assert_eq!(
            event,
            ServerEvent::SuspectReveal(CheckedPlayer {
                nickname: "A".to_string(),
                is_mafia: true,
            })
        );
    }

    #[test]
    fn unknown_event_should_be_a_protocol_violation() {
        let err = decode("lobby-closed", Value::Null).unwrap_err();
        assert!(matches!(err, GameError::UnknownEvent(ref name) if name == "lobby-closed"));
        assert!(err.is_protocol_violation());
    }

    #[test]
    fn malformed_payload_should_be_a_protocol_violation() {
        let err = decode("game-over", json!({ "winners": [] })).unwrap_err();
        assert!(matches!(err, GameError::MalformedPayload { ref event, .. } if event == "game-over"));
        assert!(err.is_protocol_violation());
    }

    #[test]
    fn only_phase_events_should_change_the_phase() {
        let timer = VoteTimer { time_to_vote: 1 };
        assert!(ServerEvent::NightStart(timer.clone()).changes_phase());
        assert!(ServerEvent::TrialEnd(Resolution::default()).changes_phase());
        assert!(ServerEvent::DiscussionEnd(Nomination::default()).changes_phase());
        assert!(!ServerEvent::DayVoteUpdate(VoteMap::default()).changes_phase());
        assert!(!ServerEvent::TrialVoteUpdate(VoteMap::default()).changes_phase());
        assert!(!ServerEvent::SuspectReveal(CheckedPlayer {
            nickname: "A".to_string(),
            is_mafia: true,
        })
        .changes_phase());
    }

    #[test]
    fn client_events_should_encode_names_and_payloads() {
        let message = ClientEvent::RoleVote {
            role: Role::Detective,
            voting_for: "A".to_string(),
        }
        .to_message();
        assert_eq!(message.event, "detective-vote");
        assert_eq!(message.payload, json!({ "votingFor": "A" }));

        let message = ClientEvent::TrialVote {
            voting_for: ABSTAIN_VOTE.to_string(),
        }
        .to_message();
        assert_eq!(message.event, "trial-vote");
        assert_eq!(message.payload, json!({ "votingFor": "abstain Vote" }));

        let message = ClientEvent::StartNight.to_message();
        assert_eq!(message.event, "start-night");
        assert_eq!(message.payload, Value::Null);
    }
}
