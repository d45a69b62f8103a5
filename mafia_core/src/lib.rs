pub mod error;
pub mod events;
pub mod game_action;
pub mod game_state;
pub mod player_view;
pub mod reducer;
pub mod role;
pub mod role_policy;
pub mod status;
pub mod utils;

pub use error::{GameError, GameResult};
pub use game_action::{GameAction, InternalAction, PlayerAction};
pub use game_state::GameSnapshot;
pub use reducer::reducer;
pub use role::Role;
