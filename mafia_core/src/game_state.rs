use strum_macros::Display;

use crate::{
    events::{CheckedPlayer, Nickname, ServerEvent},
    game_action::InternalAction,
    role::Role,
    status,
    utils::RosterExtensions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Screen {
    #[default]
    Entry,
    Core,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DayPeriod {
    #[default]
    Day,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Phase {
    #[default]
    Pending,
    NightStart,
    NightEnd,
    DayStart,
    DiscussionEnd,
    TrialStart,
    TrialEnd,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum VoteType {
    Role,
    Discussion,
    Trial,
}

/// Identity of a phase instance; a phase label repeats every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseKey {
    pub phase: Phase,
    pub day_number: u32,
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct VotingState {
    pub vote_type: Option<VoteType>,
    pub votable_players: Vec<Nickname>,
    pub vote: Option<Nickname>,
    pub players_who_voted: Vec<Nickname>,
    pub killed_player: Option<Nickname>,
    pub time_to_vote: Option<u64>,
    pub is_on_trial: bool,
    pub has_abstained: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub revision: u64,
    pub screen: Screen,
    pub day_period: DayPeriod,
    pub day_number: u32,
    pub alive_players: Vec<Nickname>,
    pub status: String,
    pub phase: Phase,
    pub role: Option<Role>,
    pub nickname: Nickname,
    pub is_dead: bool,
    pub checked_players: Vec<CheckedPlayer>,
    pub winning_role: Option<String>,
    pub winners: Vec<Nickname>,
    pub voting_state: VotingState,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        GameSnapshot {
            revision: 0,
            screen: Screen::Entry,
            day_period: DayPeriod::Day,
            day_number: 1,
            alive_players: vec![],
            status: String::new(),
            phase: Phase::Pending,
            role: None,
            nickname: String::new(),
            is_dead: false,
            checked_players: vec![],
            winning_role: None,
            winners: vec![],
            voting_state: VotingState::default(),
        }
    }
}

impl GameSnapshot {
    /// The transition function. Every accepted action yields a new revision.
    pub fn apply(self, action: InternalAction) -> GameSnapshot {
        let revision = self.revision + 1;
        let next = match action {
            InternalAction::Init {
                alive_players,
                role,
                nickname,
            } => GameSnapshot {
                alive_players,
                role: Some(role),
                nickname,
                ..self
            },
            InternalAction::NightStart {
                status,
                votable_players,
                time_to_vote,
            } => GameSnapshot {
                phase: Phase::NightStart,
                status,
                day_period: DayPeriod::Night,
                screen: Screen::Core,
                voting_state: VotingState {
                    vote_type: Some(VoteType::Role),
                    votable_players,
                    time_to_vote: Some(time_to_vote),
                    vote: None,
                    players_who_voted: vec![],
                    has_abstained: false,
                    ..self.voting_state
                },
                ..self
            },
            InternalAction::ShowSelected { status, vote } => GameSnapshot {
                status,
                voting_state: VotingState {
                    vote: Some(vote),
                    has_abstained: false,
                    ..self.voting_state
                },
                ..self
            },
            InternalAction::Abstain { status } => GameSnapshot {
                status,
                voting_state: VotingState {
                    vote: None,
                    has_abstained: true,
                    ..self.voting_state
                },
                ..self
            },
            InternalAction::NightEnd {
                status,
                player_killed,
            } => self.resolve_death(Phase::NightEnd, status, player_killed),
            InternalAction::DayStart {
                status,
                votable_players,
                time_to_vote,
            } => GameSnapshot {
                phase: Phase::DayStart,
                day_period: DayPeriod::Day,
                day_number: self.day_number + 1,
                status,
                voting_state: VotingState {
                    vote_type: Some(VoteType::Discussion),
                    votable_players,
                    time_to_vote: Some(time_to_vote),
                    vote: None,
                    players_who_voted: vec![],
                    has_abstained: false,
                    ..self.voting_state
                },
                ..self
            },
            InternalAction::DiscussionEnd {
                status,
                player_on_trial,
            } => GameSnapshot {
                phase: Phase::DiscussionEnd,
                status,
                voting_state: VotingState {
                    vote_type: Some(VoteType::Trial),
                    is_on_trial: player_on_trial == self.nickname,
                    votable_players: vec![player_on_trial],
                    ..VotingState::default()
                },
                ..self
            },
            InternalAction::SkipTrial { status } => GameSnapshot {
                status,
                voting_state: VotingState::default(),
                ..self
            },
            InternalAction::TrialStart {
                status,
                time_to_vote,
            } => GameSnapshot {
                phase: Phase::TrialStart,
                status,
                voting_state: VotingState {
                    time_to_vote: Some(time_to_vote),
                    ..self.voting_state
                },
                ..self
            },
            InternalAction::TrialEnd {
                status,
                player_killed,
            } => self.resolve_death(Phase::TrialEnd, status, player_killed),
            InternalAction::GameOver {
                winning_role,
                winners,
            } => {
                let winning_role = winning_role.to_lowercase();
                GameSnapshot {
                    phase: Phase::GameOver,
                    screen: Screen::End,
                    status: status::winner(&winning_role),
                    winning_role: Some(winning_role),
                    winners,
                    ..self
                }
            }
            InternalAction::VoteUpdate { players_who_voted } => GameSnapshot {
                voting_state: VotingState {
                    players_who_voted,
                    ..self.voting_state
                },
                ..self
            },
            InternalAction::SuspectReveal(checked) => GameSnapshot {
                checked_players: {
                    let mut checked_players = self.checked_players;
                    if !checked_players.iter().any(|c| c.nickname == checked.nickname) {
                        checked_players.push(checked);
                    }
                    checked_players
                },
                ..self
            },
        };
        GameSnapshot { revision, ..next }
    }

    fn resolve_death(
        self,
        phase: Phase,
        status: String,
        player_killed: Option<Nickname>,
    ) -> GameSnapshot {
        let is_dead = self.is_dead || player_killed.as_deref() == Some(self.nickname.as_str());
        GameSnapshot {
            phase,
            status,
            is_dead,
            alive_players: match &player_killed {
                Some(killed) => self.alive_players.without(killed),
                None => self.alive_players,
            },
            voting_state: VotingState {
                killed_player: player_killed,
                ..VotingState::default()
            },
            ..self
        }
    }

    pub fn phase_key(&self) -> PhaseKey {
        PhaseKey {
            phase: self.phase,
            day_number: self.day_number,
        }
    }

    pub fn is_initialised(&self) -> bool {
        self.role.is_some()
    }

    pub fn is_voting_round(&self) -> bool {
        matches!(
            self.phase,
            Phase::NightStart | Phase::DayStart | Phase::TrialStart
        )
    }

    /// Whether an inbound server event makes sense in the current phase.
    pub fn accepts(&self, event: &ServerEvent) -> bool {
        if !self.is_initialised() || self.phase == Phase::GameOver {
            return false;
        }
        match event {
            ServerEvent::NightStart(_) => match self.phase {
                Phase::Pending | Phase::TrialEnd => true,
                // a skipped trial leaves the day phase in place with no vote open
                Phase::DayStart => self.voting_state.vote_type.is_none(),
                _ => false,
            },
            ServerEvent::NightEnd(_) => self.phase == Phase::NightStart,
            ServerEvent::DayStart(_) => self.phase == Phase::NightEnd,
            ServerEvent::DiscussionEnd(_) => {
                self.phase == Phase::DayStart
                    && self.voting_state.vote_type == Some(VoteType::Discussion)
            }
            ServerEvent::TrialStart(_) => self.phase == Phase::DiscussionEnd,
            ServerEvent::TrialEnd(_) => self.phase == Phase::TrialStart,
            ServerEvent::GameOver(_) => true,
            ServerEvent::DayVoteUpdate(_) | ServerEvent::TrialVoteUpdate(_) => {
                self.is_voting_round()
            }
            ServerEvent::SuspectReveal(_) => {
                self.role == Some(Role::Detective)
                    && matches!(self.phase, Phase::NightStart | Phase::NightEnd)
            }
        }
    }

    pub fn can_vote_for(&self, target: &str) -> bool {
        let voting = &self.voting_state;
        let vote_type = match voting.vote_type {
            Some(vote_type) => vote_type,
            None => return false,
        };
        if self.is_dead || voting.is_on_trial || !self.is_voting_round() {
            return false;
        }
        if !voting.votable_players.contains_player(target) {
            return false;
        }
        if voting.vote.as_deref() == Some(target) {
            return false;
        }
        let detective_has_suspected = vote_type == VoteType::Role
            && self.role == Some(Role::Detective)
            && voting.vote.is_some();
        !detective_has_suspected
    }

    pub fn can_abstain(&self) -> bool {
        self.phase == Phase::TrialStart
            && self.voting_state.vote_type == Some(VoteType::Trial)
            && !self.is_dead
            && !self.voting_state.is_on_trial
            && !self.voting_state.has_abstained
    }

    pub fn trial_subject(&self) -> Option<&Nickname> {
        match (self.voting_state.vote_type, self.voting_state.votable_players.as_slice()) {
            (Some(VoteType::Trial), [subject]) => Some(subject),
            _ => None,
        }
    }

    pub fn role_banner(&self) -> Option<String> {
        self.role.map(|role| format!("You are a {}", role))
    }
}
