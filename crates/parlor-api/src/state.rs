//! Application state wiring the room together.
//!
//! AppState holds the single room service shared by the CLI, the REST
//! handlers, and the liveness sweeper. The service is generic over its
//! repositories; AppState pins it to the SQLite implementations.

use std::path::PathBuf;
use std::sync::Arc;

use parlor_core::room::service::RoomService;
use parlor_core::room::sweeper::LivenessSweeper;
use parlor_infra::config::{load_server_config, resolve_data_dir};
use parlor_infra::sqlite::message::SqliteMessageRepository;
use parlor_infra::sqlite::participant::SqliteParticipantRepository;
use parlor_infra::sqlite::pool::{DatabasePool, default_database_url};
use parlor_types::config::ServerConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteRoomService = RoomService<SqliteParticipantRepository, SqliteMessageRepository>;

pub type ConcreteSweeper = LivenessSweeper<SqliteParticipantRepository, SqliteMessageRepository>;

/// Shared application state.
///
/// Cloning is cheap: the room sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub room: Arc<ConcreteRoomService>,
    pub config: ServerConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: resolve paths, load config, connect to DB.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_server_config(&data_dir).await;
        let db_pool = DatabasePool::new(&default_database_url(&data_dir)).await?;

        Ok(Self::from_parts(db_pool, config, data_dir))
    }

    /// Wire the room over an already-open pool.
    pub fn from_parts(db_pool: DatabasePool, config: ServerConfig, data_dir: PathBuf) -> Self {
        let room = RoomService::new(
            SqliteParticipantRepository::new(db_pool.clone()),
            SqliteMessageRepository::new(db_pool),
        );

        Self {
            room: Arc::new(room),
            config,
            data_dir,
        }
    }

    /// Liveness sweeper over the same room the handlers use.
    pub fn sweeper(&self) -> ConcreteSweeper {
        LivenessSweeper::new(
            Arc::clone(&self.room),
            self.config.sweep_interval(),
            self.config.stale_after(),
        )
    }
}
