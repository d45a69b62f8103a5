use itertools::Itertools;

use crate::{
    events::{CheckedPlayer, Nickname},
    role::Role,
};

pub const DEAD_STATUS: &str = "You are dead and cannot vote";

/// Who the local player may target with their night ability.
pub fn votable_players_for(
    role: Role,
    alive_players: &[Nickname],
    nickname: &str,
    checked_players: &[CheckedPlayer],
) -> Vec<Nickname> {
    match role {
        Role::Mafia => alive_players
            .iter()
            .filter(|&p| p != nickname)
            .cloned()
            .collect_vec(),
        Role::Detective => alive_players
            .iter()
            .filter(|&p| p != nickname)
            .filter(|&p| !checked_players.iter().any(|c| &c.nickname == p))
            .cloned()
            .collect_vec(),
        Role::Medic => alive_players.to_vec(),
        Role::Civilian | Role::Jester => vec![],
    }
}

pub fn idle_status_for(role: Role, is_dead: bool) -> &'static str {
    if is_dead {
        DEAD_STATUS
    } else {
        role.night_instructions()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use crate::{
        events::CheckedPlayer,
        role::Role,
        role_policy::{idle_status_for, votable_players_for, DEAD_STATUS},
    };

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn checked(nickname: &str, is_mafia: bool) -> CheckedPlayer {
        CheckedPlayer {
            nickname: nickname.to_string(),
            is_mafia,
        }
    }

    #[test]
    fn mafia_should_target_everyone_alive_but_themselves() {
        let alive = names(&["A", "B", "C", "me"]);
        assert_eq!(
            votable_players_for(Role::Mafia, &alive, "me", &[]),
            names(&["A", "B", "C"])
        );
    }

    #[test]
    fn detective_should_skip_self_and_checked_players() {
        let alive = names(&["A", "B", "me"]);
        assert_eq!(
            votable_players_for(Role::Detective, &alive, "me", &[checked("A", false)]),
            names(&["B"])
        );
    }

    #[test]
    fn detective_should_never_target_a_checked_player() {
        let alive = names(&["A", "B", "C", "D", "me"]);
        let all_checks = [
            checked("A", true),
            checked("C", false),
            checked("D", false),
            checked("gone", true),
        ];
        for n in 0..=all_checks.len() {
            let checks = &all_checks[..n];
            let votable = votable_players_for(Role::Detective, &alive, "me", checks);
            assert!(!votable.contains(&"me".to_string()));
            for c in checks {
                assert!(!votable.contains(&c.nickname));
            }
        }
    }

    #[test]
    fn medic_should_be_able_to_save_themselves() {
        let alive = names(&["A", "me"]);
        assert_eq!(
            votable_players_for(Role::Medic, &alive, "me", &[]),
            names(&["A", "me"])
        );
    }

    #[test]
    fn civilian_and_jester_should_have_no_targets() {
        let alive = names(&["A", "B", "me"]);
        for role in [Role::Civilian, Role::Jester] {
            assert!(votable_players_for(role, &alive, "me", &[]).is_empty());
            assert!(votable_players_for(role, &[], "me", &[checked("A", true)]).is_empty());
        }
    }

    #[test]
    fn dead_players_should_get_the_dead_status_regardless_of_role() {
        for role in Role::iter() {
            assert_eq!(idle_status_for(role, true), DEAD_STATUS);
            assert_eq!(idle_status_for(role, false), role.night_instructions());
        }
    }
}
