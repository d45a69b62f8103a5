use crate::{
    events::{CheckedPlayer, Nickname, ServerEvent},
    role::Role,
};

#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    Server(ServerEvent),
    Player(PlayerAction),
    Internal(InternalAction),
}

/// Requests made by the local player through the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Vote(Nickname),
    Abstain,
}

/// The only actions the reducer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum InternalAction {
    Init {
        alive_players: Vec<Nickname>,
        role: Role,
        nickname: Nickname,
    },
    NightStart {
        status: String,
        votable_players: Vec<Nickname>,
        time_to_vote: u64,
    },
    ShowSelected {
        status: String,
        vote: Nickname,
    },
    Abstain {
        status: String,
    },
    NightEnd {
        status: String,
        player_killed: Option<Nickname>,
    },
    DayStart {
        status: String,
        votable_players: Vec<Nickname>,
        time_to_vote: u64,
    },
    DiscussionEnd {
        status: String,
        player_on_trial: Nickname,
    },
    SkipTrial {
        status: String,
    },
    TrialStart {
        status: String,
        time_to_vote: u64,
    },
    TrialEnd {
        status: String,
        player_killed: Option<Nickname>,
    },
    GameOver {
        winning_role: String,
        winners: Vec<Nickname>,
    },
    VoteUpdate {
        players_who_voted: Vec<Nickname>,
    },
    SuspectReveal(CheckedPlayer),
}

impl From<InternalAction> for GameAction {
    fn from(action: InternalAction) -> Self {
        GameAction::Internal(action)
    }
}

impl From<ServerEvent> for GameAction {
    fn from(event: ServerEvent) -> Self {
        GameAction::Server(event)
    }
}

impl From<PlayerAction> for GameAction {
    fn from(action: PlayerAction) -> Self {
        GameAction::Player(action)
    }
}
