use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use log::{debug, error, info, warn};
use mafia_core::{
    events::{ClientEvent, Nomination, ServerEvent},
    game_state::PhaseKey,
    GameAction, GameSnapshot, PlayerAction,
};
use redux_rs::{MiddleWare, StoreApi};
use tokio::{task::JoinHandle, time};

use crate::{
    adapter::{internal_action_for, vote_request},
    transport::Transport,
};

/// Drops server events that do not fit the current phase and player requests
/// the local player is not allowed to make.
pub struct ValidatorMiddleware;

#[async_trait]
impl<Inner> MiddleWare<GameSnapshot, GameAction, Inner> for ValidatorMiddleware
where
    GameSnapshot: Send + Clone + 'static,
    Inner: StoreApi<GameSnapshot, GameAction> + Send + Sync,
{
    async fn dispatch(&self, action: GameAction, inner: &Arc<Inner>) {
        let state = inner.state_cloned().await;

        let valid = match &action {
            GameAction::Server(event) => state.accepts(event),
            GameAction::Player(PlayerAction::Vote(target)) => state.can_vote_for(target),
            GameAction::Player(PlayerAction::Abstain) => state.can_abstain(),
            GameAction::Internal(_) => true,
        };

        if !valid {
            // Ignore the action
            warn!("Ignoring invalid action in {}: {:?}", state.phase, action);
        } else {
            inner.dispatch(action).await;
        }
    }
}

pub struct MapToInternalMiddleware<T> {
    transport: Arc<T>,
}

impl<T> MapToInternalMiddleware<T> {
    pub fn new(transport: Arc<T>) -> Self {
        MapToInternalMiddleware { transport }
    }
}

#[async_trait]
impl<Inner, T> MiddleWare<GameSnapshot, GameAction, Inner> for MapToInternalMiddleware<T>
where
    GameSnapshot: Send + Clone + 'static,
    Inner: StoreApi<GameSnapshot, GameAction> + Send + Sync,
    T: Transport,
{
    async fn dispatch(&self, action: GameAction, inner: &Arc<Inner>) {
        let state = inner.state_cloned().await;

        match action {
            GameAction::Server(event) => {
                let name = event.name();
                match internal_action_for(&state, event) {
                    Some(internal) => inner.dispatch(GameAction::Internal(internal)).await,
                    None => error!("Dropping `{}` received before the game started", name),
                }
            }
            GameAction::Player(request) => match vote_request(&state, &request) {
                Some((event, internal)) => {
                    // the local update only happens once the vote is on its way
                    if let Err(e) = self.transport.emit(event.clone()).await {
                        error!("Could not send {}: {}", event, e);
                        return;
                    }
                    inner.dispatch(GameAction::Internal(internal)).await;
                }
                None => warn!("No vote is open for {:?}", request),
            },
            GameAction::Internal(_) => inner.dispatch(action).await,
        };
    }
}

/// Drives the game forward from the host client: once a phase resolves
/// without a game over, the next phase is requested after a grace delay.
pub struct HostMiddleware<T> {
    transport: Arc<T>,
    is_host: bool,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T> HostMiddleware<T> {
    pub fn new(transport: Arc<T>, is_host: bool, delay: Duration) -> Self {
        HostMiddleware {
            transport,
            is_host,
            delay,
            pending: Mutex::new(None),
        }
    }

    fn pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel_pending(&self) {
        if let Some(handle) = self.pending().take() {
            if !handle.is_finished() {
                debug!("Cancelling pending advance");
            }
            handle.abort();
        }
    }
}

impl<T> Drop for HostMiddleware<T> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// The request that moves the game on once `event` has been applied.
pub fn advance_after(event: &ServerEvent) -> Option<ClientEvent> {
    match event {
        ServerEvent::NightEnd(resolution) if !resolution.is_game_over => Some(ClientEvent::StartDay),
        ServerEvent::DiscussionEnd(Nomination {
            player_on_trial: Some(_),
        }) => Some(ClientEvent::StartTrial),
        ServerEvent::DiscussionEnd(Nomination {
            player_on_trial: None,
        }) => Some(ClientEvent::StartNight),
        ServerEvent::TrialEnd(resolution) if !resolution.is_game_over => {
            Some(ClientEvent::StartNight)
        }
        _ => None,
    }
}

async fn advance<Inner, T>(
    inner: Arc<Inner>,
    transport: Arc<T>,
    delay: Duration,
    scheduled_for: PhaseKey,
    event: ClientEvent,
) where
    Inner: StoreApi<GameSnapshot, GameAction> + Send + Sync + 'static,
    T: Transport,
{
    time::sleep(delay).await;

    let current = inner.state_cloned().await.phase_key();
    if current != scheduled_for {
        debug!(
            "Discarding {} scheduled for {:?}, game is in {:?}",
            event, scheduled_for, current
        );
        return;
    }

    info!("Advancing the game with {}", event);
    if let Err(e) = transport.emit(event.clone()).await {
        debug!("Could not send {}: {}", event, e);
    }
}

#[async_trait]
impl<Inner, T> MiddleWare<GameSnapshot, GameAction, Inner> for HostMiddleware<T>
where
    GameSnapshot: Send + Clone + 'static,
    Inner: StoreApi<GameSnapshot, GameAction> + Send + Sync + 'static,
    T: Transport,
{
    async fn dispatch(&self, action: GameAction, inner: &Arc<Inner>) {
        if !self.is_host {
            inner.dispatch(action).await;
            return;
        }

        let next = match &action {
            GameAction::Server(event) => {
                // a newer phase supersedes a pending advance, annotations do not
                if event.changes_phase() {
                    self.cancel_pending();
                }
                advance_after(event)
            }
            _ => None,
        };

        inner.dispatch(action).await;

        if let Some(next) = next {
            let scheduled_for = inner.state_cloned().await.phase_key();
            debug!("Scheduling {} in {:?}", next, self.delay);
            let handle = tokio::spawn(advance(
                Arc::clone(inner),
                Arc::clone(&self.transport),
                self.delay,
                scheduled_for,
                next,
            ));
            *self.pending() = Some(handle);
        }
    }
}
