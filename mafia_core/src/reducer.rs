use crate::{game_action::GameAction, game_state::GameSnapshot};

/// Root reducer of the client store.
///
/// Server events and player requests are translated into internal actions by
/// middleware before they get here; anything else reaching the reducer is a
/// bug in the middleware chain.
pub fn reducer(state: GameSnapshot, action: GameAction) -> GameSnapshot {
    match action {
        GameAction::Internal(internal) => state.apply(internal),
        GameAction::Server(_) => panic!("only internal actions should arrive at the reducer"),
        GameAction::Player(_) => panic!("only internal actions should arrive at the reducer"),
    }
}
