use std::str::FromStr;

use itertools::Itertools;

use mafia_core::{
    events::{InboundMessage, Nickname},
    game_state::{GameSnapshot, Phase, Screen},
    player_view::PlayerView,
    PlayerAction, Role,
};

static RULES: &str = "
*** Mafia ***
Every player secretly gets a role. At night the mafia picks a victim, the medic picks someone to save
and the detective learns whether one player belongs to the mafia. During the day the town discusses
and nominates one player for trial. Everybody except the defendant then votes to execute them or abstains.
The town wins once the mafia is gone, the mafia wins once it can no longer be outvoted and the jester
wins by getting executed. Press c to see what each role does.";

static HELP: &str = "
Server events are read as one JSON object per line, e.g.
  {\"event\":\"night-start\",\"payload\":{\"timeToVote\":30}}
Commands:
- [vote <name>]: vote for a player
- [a]: abstain from the trial vote
- [r]: display rules
- [c]: display roles
- [h]: display this help
- [q]: quit";

#[derive(Debug, PartialEq)]
pub enum CliCommand {
    Quit,
    Help,
    Rules,
    Roles,
    Server(InboundMessage),
    Player(PlayerAction),
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseCommandError(pub String);

impl FromStr for CliCommand {
    type Err = ParseCommandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('{') {
            return serde_json::from_str(s)
                .map(CliCommand::Server)
                .map_err(|e| ParseCommandError(format!("not a server event: {}", e)));
        }
        match s.split_whitespace().collect_vec().as_slice() {
            ["q"] | ["quit"] => Ok(CliCommand::Quit),
            ["h"] | ["help"] => Ok(CliCommand::Help),
            ["r"] | ["rules"] => Ok(CliCommand::Rules),
            ["c"] | ["roles"] => Ok(CliCommand::Roles),
            ["a"] | ["abstain"] => Ok(CliCommand::Player(PlayerAction::Abstain)),
            ["vote", name] => Ok(CliCommand::Player(PlayerAction::Vote(name.to_string()))),
            _ => Err(ParseCommandError(format!("unknown command `{}`", s))),
        }
    }
}

pub fn help() -> &'static str {
    HELP
}

pub fn rules() -> &'static str {
    RULES
}

pub fn roles() -> String {
    Role::summary()
}

fn format_player(view: &PlayerView) -> String {
    let mut tags = vec![];
    if view.is_self {
        tags.push("you");
    }
    if view.is_on_trial {
        tags.push("on trial");
    }
    if view.has_voted {
        tags.push("voted");
    }
    if view.is_vote_target {
        tags.push("your vote");
    }
    let marker = if view.is_selectable { "[x]" } else { "[ ]" };
    if tags.is_empty() {
        format!("{} {}", marker, view.label())
    } else {
        format!("{} {} <{}>", marker, view.label(), tags.join(", "))
    }
}

/// Renders what the local player currently sees.
pub fn format_snapshot(state: &GameSnapshot, roster: &[Nickname]) -> String {
    let mut lines = vec!["================================================".to_string()];
    match state.screen {
        Screen::Entry => {
            if let Some(banner) = state.role_banner() {
                lines.push(banner);
            }
            lines.push("Waiting for the first night...".to_string());
        }
        Screen::Core => {
            lines.push(format!(
                "~ {} {} ({}){}",
                state.day_period,
                state.day_number,
                state.phase,
                state
                    .role
                    .map(|r| format!(" | {}", r))
                    .unwrap_or_default()
            ));
            lines.push(format!("~ {}", state.status));
            if let Some(seconds) = state.voting_state.time_to_vote {
                lines.push(format!("~ {}s to vote", seconds));
            }
            if let Some(subject) = state.trial_subject() {
                lines.push(format!("~ On trial: {}", subject));
            }
            lines.extend(state.player_views(roster).iter().map(format_player));
            if state.can_abstain() {
                lines.push("- [a]: abstain".to_string());
            }
        }
        Screen::End => {
            lines.push(format!("~ {}", state.status));
            lines.push(format!("Winners: {}", state.winners.iter().join(", ")));
        }
    }
    if state.phase == Phase::GameOver && state.is_dead {
        lines.push("You died during the game".to_string());
    }
    lines.join("\n")
}
