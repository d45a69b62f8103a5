use crate::{
    events::Nickname,
    game_state::{GameSnapshot, VoteType},
    role::Role,
    utils::RosterExtensions,
};

/// What the UI needs to draw a single seat at the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub nickname: Nickname,
    pub is_self: bool,
    pub is_dead: bool,
    pub is_selectable: bool,
    pub has_voted: bool,
    pub is_vote_target: bool,
    pub is_on_trial: bool,
    /// Investigation result, only ever known to the detective.
    pub is_mafia: Option<bool>,
}

impl PlayerView {
    pub fn label(&self) -> String {
        let mut label = self.nickname.clone();
        if self.is_dead {
            label.push_str(" (DEAD)");
        }
        match self.is_mafia {
            Some(true) => label.push_str(" (Mafia)"),
            Some(false) => label.push_str(" (Not Mafia)"),
            None => {}
        }
        label
    }
}

impl GameSnapshot {
    pub fn player_view(&self, nickname: &str) -> PlayerView {
        let voting = &self.voting_state;
        let is_mafia = match self.role {
            Some(Role::Detective) => self
                .checked_players
                .iter()
                .find(|c| c.nickname == nickname)
                .map(|c| c.is_mafia),
            _ => None,
        };
        PlayerView {
            nickname: nickname.to_string(),
            is_self: self.nickname == nickname,
            is_dead: !self.alive_players.contains_player(nickname),
            is_selectable: self.can_vote_for(nickname),
            has_voted: voting.players_who_voted.contains_player(nickname),
            is_vote_target: voting.vote.as_deref() == Some(nickname),
            is_on_trial: voting.vote_type == Some(VoteType::Trial)
                && voting.votable_players.contains_player(nickname),
            is_mafia,
        }
    }

    /// Views for the full lobby roster, including players who already died.
    pub fn player_views(&self, roster: &[Nickname]) -> Vec<PlayerView> {
        roster.iter().map(|p| self.player_view(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        events::CheckedPlayer,
        game_action::InternalAction,
        game_state::GameSnapshot,
        role::Role,
    };

    fn detective_at_night() -> GameSnapshot {
        GameSnapshot::default()
            .apply(InternalAction::Init {
                alive_players: vec!["A".to_string(), "B".to_string(), "me".to_string()],
                role: Role::Detective,
                nickname: "me".to_string(),
            })
            .apply(InternalAction::SuspectReveal(CheckedPlayer {
                nickname: "A".to_string(),
                is_mafia: true,
            }))
            .apply(InternalAction::NightStart {
                status: String::new(),
                votable_players: vec!["B".to_string()],
                time_to_vote: 30,
            })
    }

    #[test]
    fn detective_should_see_investigation_results() {
        let state = detective_at_night();
        let a = state.player_view("A");
        assert_eq!(a.is_mafia, Some(true));
        assert_eq!(a.label(), "A (Mafia)");
        assert!(!a.is_selectable);

        let b = state.player_view("B");
        assert_eq!(b.is_mafia, None);
        assert!(b.is_selectable);
    }

    #[test]
    fn views_should_cover_dead_players_and_votes() {
        let state = detective_at_night()
            .apply(InternalAction::VoteUpdate {
                players_who_voted: vec!["me".to_string()],
            })
            .apply(InternalAction::ShowSelected {
                status: String::new(),
                vote: "B".to_string(),
            })
            .apply(InternalAction::NightEnd {
                status: String::new(),
                player_killed: Some("B".to_string()),
            });
        let roster = vec!["A".to_string(), "B".to_string(), "me".to_string()];
        let views = state.player_views(&roster);
        assert_eq!(views.len(), 3);
        assert!(views[1].is_dead);
        assert_eq!(views[1].label(), "B (DEAD)");
        assert!(views[2].is_self);
        assert!(!views[2].has_voted);
        assert!(views.iter().all(|v| !v.is_selectable));
    }

    #[test]
    fn nominee_should_be_marked_on_trial() {
        let state = GameSnapshot::default()
            .apply(InternalAction::Init {
                alive_players: vec!["A".to_string(), "me".to_string()],
                role: Role::Civilian,
                nickname: "me".to_string(),
            })
            .apply(InternalAction::DiscussionEnd {
                status: String::new(),
                player_on_trial: "A".to_string(),
            });
        assert!(state.player_view("A").is_on_trial);
        assert!(!state.player_view("me").is_on_trial);
        assert_eq!(state.player_view("A").is_mafia, None);
    }
}
