//! Translation of server events and player requests into reducer actions.

use mafia_core::{
    events::{ClientEvent, Nomination, ServerEvent, ABSTAIN_VOTE},
    game_state::{GameSnapshot, VoteType},
    role_policy::{idle_status_for, votable_players_for},
    status,
    utils::RosterExtensions,
    InternalAction, PlayerAction,
};

/// Builds the reducer action for a server event. `None` until the game is
/// initialised, since every derivation depends on the local role.
pub fn internal_action_for(state: &GameSnapshot, event: ServerEvent) -> Option<InternalAction> {
    let role = state.role?;
    let action = match event {
        ServerEvent::NightStart(timer) => InternalAction::NightStart {
            status: idle_status_for(role, state.is_dead).to_string(),
            votable_players: votable_players_for(
                role,
                &state.alive_players,
                &state.nickname,
                &state.checked_players,
            ),
            time_to_vote: timer.time_to_vote,
        },
        ServerEvent::NightEnd(resolution) => {
            let victim = resolution.victim().map(str::to_string);
            InternalAction::NightEnd {
                status: match &victim {
                    Some(p) => status::killed_at_night(p),
                    None => status::NOBODY_DIED_AT_NIGHT.to_string(),
                },
                player_killed: victim,
            }
        }
        ServerEvent::DayStart(timer) => InternalAction::DayStart {
            status: if state.is_dead {
                status::DEAD_STATUS
            } else {
                status::NOMINATE
            }
            .to_string(),
            votable_players: state.alive_players.without(&state.nickname),
            time_to_vote: timer.time_to_vote,
        },
        ServerEvent::DiscussionEnd(Nomination {
            player_on_trial: Some(player_on_trial),
        }) => InternalAction::DiscussionEnd {
            status: status::put_on_trial(&player_on_trial),
            player_on_trial,
        },
        ServerEvent::DiscussionEnd(Nomination {
            player_on_trial: None,
        }) => InternalAction::SkipTrial {
            status: status::NO_TRIAL.to_string(),
        },
        ServerEvent::TrialStart(timer) => InternalAction::TrialStart {
            status: if state.is_dead {
                status::DEAD_STATUS
            } else if state.voting_state.is_on_trial {
                status::ON_TRIAL
            } else {
                status::VOTE_ON_TRIAL
            }
            .to_string(),
            time_to_vote: timer.time_to_vote,
        },
        ServerEvent::TrialEnd(resolution) => {
            let victim = resolution.victim().map(str::to_string);
            InternalAction::TrialEnd {
                status: match &victim {
                    Some(p) => status::executed(p),
                    None => status::NOBODY_EXECUTED.to_string(),
                },
                player_killed: victim,
            }
        }
        ServerEvent::GameOver(outcome) => InternalAction::GameOver {
            winning_role: outcome.winning_role.to_lowercase(),
            winners: outcome.winners,
        },
        ServerEvent::DayVoteUpdate(votes) | ServerEvent::TrialVoteUpdate(votes) => {
            InternalAction::VoteUpdate {
                players_who_voted: votes.voters(),
            }
        }
        ServerEvent::SuspectReveal(checked) => InternalAction::SuspectReveal(checked),
    };
    Some(action)
}

/// The outbound vote for a player request plus the optimistic local update.
pub fn vote_request(
    state: &GameSnapshot,
    request: &PlayerAction,
) -> Option<(ClientEvent, InternalAction)> {
    match request {
        PlayerAction::Vote(target) => {
            let (event, status) = match state.voting_state.vote_type? {
                VoteType::Role => (
                    ClientEvent::RoleVote {
                        role: state.role?,
                        voting_for: target.clone(),
                    },
                    status::selected_for_ability(target),
                ),
                VoteType::Discussion => (
                    ClientEvent::DayVote {
                        voting_for: target.clone(),
                    },
                    status::nominated(target),
                ),
                VoteType::Trial => (
                    ClientEvent::TrialVote {
                        voting_for: target.clone(),
                    },
                    status::voted_to_kill(target),
                ),
            };
            Some((
                event,
                InternalAction::ShowSelected {
                    status,
                    vote: target.clone(),
                },
            ))
        }
        PlayerAction::Abstain => Some((
            ClientEvent::TrialVote {
                voting_for: ABSTAIN_VOTE.to_string(),
            },
            InternalAction::Abstain {
                status: status::ABSTAINED.to_string(),
            },
        )),
    }
}
