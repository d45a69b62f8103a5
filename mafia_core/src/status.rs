//! Status lines shown to the local player.

pub use crate::role_policy::DEAD_STATUS;

pub const NOBODY_DIED_AT_NIGHT: &str = "Nobody died in the night!";
pub const NOMINATE: &str = "Select someone to be on trial";
pub const NO_TRIAL: &str = "No one is on trial";
pub const ON_TRIAL: &str = "You are on trial";
pub const VOTE_ON_TRIAL: &str = "Vote for the player on trial to kill them";
pub const NOBODY_EXECUTED: &str = "Nobody was killed in the Trial!";
pub const ABSTAINED: &str = "Voted to Abstain";

pub fn killed_at_night(player: &str) -> String {
    format!("{} was killed in the night...", player)
}

pub fn put_on_trial(player: &str) -> String {
    format!("{} is on trial", player)
}

pub fn executed(player: &str) -> String {
    format!("The town voted to kill {}!", player)
}

pub fn winner(winning_role: &str) -> String {
    format!("{} wins!", winning_role)
}

pub fn selected_for_ability(player: &str) -> String {
    format!("Selected {} for ability", player)
}

pub fn nominated(player: &str) -> String {
    format!("Voted {} for trial", player)
}

pub fn voted_to_kill(player: &str) -> String {
    format!("Voted to kill {}", player)
}
