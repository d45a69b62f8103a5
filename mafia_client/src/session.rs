use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info, warn, Level};
use mafia_core::{
    events::{InboundMessage, Nickname, ServerEvent},
    game_state::Phase,
    reducer, GameAction, GameError, GameResult, GameSnapshot, InternalAction, PlayerAction,
};
use redux_rs::{middlewares::logger::LoggerMiddleware, Store, StoreApi};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    config::SessionConfig,
    middleware::{HostMiddleware, MapToInternalMiddleware, ValidatorMiddleware},
    transport::Transport,
};

type Subscriber = Box<dyn Fn(&GameSnapshot) + Send>;

/// The parts of the store a session needs, without naming the middleware chain.
#[async_trait]
trait GameStore: Send + Sync {
    async fn submit(&self, action: GameAction);

    async fn snapshot(&self) -> GameSnapshot;

    async fn watch(&self, subscriber: Subscriber);
}

#[async_trait]
impl<S> GameStore for S
where
    S: StoreApi<GameSnapshot, GameAction> + Send + Sync,
{
    async fn submit(&self, action: GameAction) {
        self.dispatch(action).await
    }

    async fn snapshot(&self) -> GameSnapshot {
        self.state_cloned().await
    }

    async fn watch(&self, subscriber: Subscriber) {
        self.subscribe(subscriber).await
    }
}

async fn assemble_store<T: Transport>(
    config: &SessionConfig,
    transport: &Arc<T>,
) -> impl StoreApi<GameSnapshot, GameAction> + Send + Sync {
    let logger_middleware = LoggerMiddleware::new(Level::Info);
    let logger_internal_middleware = LoggerMiddleware::new(Level::Debug);

    Store::new_with_state(reducer, GameSnapshot::default())
        .wrap(logger_internal_middleware)
        .await
        .wrap(MapToInternalMiddleware::new(Arc::clone(transport)))
        .await
        .wrap(HostMiddleware::new(
            Arc::clone(transport),
            config.is_host,
            config.advance_delay,
        ))
        .await
        .wrap(ValidatorMiddleware)
        .await
        .wrap(logger_middleware)
        .await
}

/// One client's view of one game, from the role reveal to game over.
pub struct GameSession<T: Transport> {
    store: Box<dyn GameStore>,
    transport: Arc<T>,
    config: SessionConfig,
}

impl<T: Transport> GameSession<T> {
    pub async fn start(config: SessionConfig, transport: Arc<T>) -> GameResult<Self> {
        config.validate()?;

        let store = assemble_store(&config, &transport).await;
        store
            .dispatch(
                InternalAction::Init {
                    alive_players: config.players.clone(),
                    role: config.role,
                    nickname: config.nickname.clone(),
                }
                .into(),
            )
            .await;

        info!(
            "Session started for {} as {} with {} players{}",
            config.nickname,
            config.role,
            config.players.len(),
            if config.is_host { " (host)" } else { "" }
        );

        Ok(GameSession {
            store: Box::new(store),
            transport,
            config,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.store.snapshot().await
    }

    /// Calls `subscriber` with every new snapshot.
    pub async fn subscribe<F>(&self, subscriber: F)
    where
        F: Fn(&GameSnapshot) + Send + 'static,
    {
        self.store.watch(Box::new(subscriber)).await
    }

    /// Feeds one inbound message through the store. Returns whether the game
    /// is over afterwards.
    pub async fn handle(&self, message: InboundMessage) -> GameResult<bool> {
        let event = ServerEvent::decode(&message).map_err(|e| {
            error!("Protocol violation: {}", e);
            e
        })?;
        self.store.submit(event.into()).await;
        Ok(self.snapshot().await.phase == Phase::GameOver)
    }

    pub async fn vote(&self, target: impl Into<Nickname>) {
        self.request(PlayerAction::Vote(target.into())).await
    }

    pub async fn abstain(&self) {
        self.request(PlayerAction::Abstain).await
    }

    async fn request(&self, action: PlayerAction) {
        self.store.submit(action.into()).await
    }

    /// Processes inbound events and local requests until the game is over.
    pub async fn run(
        &self,
        mut player_actions: UnboundedReceiver<PlayerAction>,
    ) -> GameResult<GameSnapshot> {
        let mut subscription = self.transport.subscribe();
        let mut accepting_requests = true;

        loop {
            tokio::select! {
                biased;
                message = subscription.recv() => match message {
                    Some(message) => {
                        if self.handle(message).await? {
                            let snapshot = self.snapshot().await;
                            info!("Game over: {}", snapshot.status);
                            return Ok(snapshot);
                        }
                    }
                    None => {
                        warn!("Server closed the connection before the game ended");
                        return Err(GameError::TransportClosed);
                    }
                },
                action = player_actions.recv(), if accepting_requests => match action {
                    Some(action) => self.request(action).await,
                    None => accepting_requests = false,
                },
            }
        }
    }
}
