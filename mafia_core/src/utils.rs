use crate::events::Nickname;

pub trait RosterExtensions {
    fn contains_player(&self, nickname: &str) -> bool;

    fn without(&self, nickname: &str) -> Vec<Nickname>;
}

impl RosterExtensions for [Nickname] {
    fn contains_player(&self, nickname: &str) -> bool {
        self.iter().any(|p| p == nickname)
    }

    fn without(&self, nickname: &str) -> Vec<Nickname> {
        self.iter().filter(|&p| p != nickname).cloned().collect()
    }
}
