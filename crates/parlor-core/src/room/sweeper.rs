//! Liveness sweeper.
//!
//! Runs on a fixed poll interval. Each tick selects participants whose last
//! heartbeat is older than the staleness threshold, deletes them, and appends
//! a leave notice for each one actually removed. Evictions within a tick run
//! concurrently and are not ordered relative to each other.
//!
//! The sweeper does not coordinate with in-flight requests: a heartbeat that
//! lands after the tick's snapshot does not save the participant.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use parlor_types::error::RepositoryError;
use parlor_types::message::{LEAVE_TEXT, Message};
use parlor_types::participant::Participant;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::repository::message::MessageRepository;
use crate::repository::participant::ParticipantRepository;
use crate::room::service::RoomService;

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Periodic task evicting participants that stopped sending heartbeats.
pub struct LivenessSweeper<P: ParticipantRepository, M: MessageRepository> {
    room: Arc<RoomService<P, M>>,
    poll_interval: Duration,
    stale_after: chrono::Duration,
}

impl<P: ParticipantRepository, M: MessageRepository> LivenessSweeper<P, M> {
    /// Create a sweeper over the shared room.
    ///
    /// With a poll interval longer than `stale_after`, a participant can stay
    /// listed for up to one extra interval after going stale. The poll
    /// interval is clamped to at least one millisecond.
    pub fn new(
        room: Arc<RoomService<P, M>>,
        poll_interval: Duration,
        stale_after: Duration,
    ) -> Self {
        let stale_after = chrono::Duration::milliseconds(
            i64::try_from(stale_after.as_millis()).unwrap_or(i64::MAX),
        );
        Self {
            room,
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
            stale_after,
        }
    }

    /// Run one sweep as of `now`. Returns the names evicted by this tick.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> Result<Vec<String>, RepositoryError> {
        let Some(cutoff) = now.checked_sub_signed(self.stale_after) else {
            warn!(
                stale_after_ms = self.stale_after.num_milliseconds(),
                "staleness threshold reaches past the earliest timestamp, nothing to evict"
            );
            return Ok(Vec::new());
        };
        let stale = self.room.participants().list_stale(cutoff).await?;
        if stale.is_empty() {
            return Ok(Vec::new());
        }

        debug!(count = stale.len(), "stale participants found");
        let evicted = join_all(stale.into_iter().map(|p| self.evict(p, now))).await;
        Ok(evicted.into_iter().flatten().collect())
    }

    /// Delete one participant and announce the departure.
    ///
    /// The delete and the announcement are independent writes.
    async fn evict(&self, participant: Participant, now: DateTime<Utc>) -> Option<String> {
        let name = participant.name;
        match self.room.participants().delete(&name).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(participant = %name, "already gone before eviction");
                return None;
            }
            Err(e) => {
                warn!(participant = %name, error = %e, "failed to evict participant");
                return None;
            }
        }

        if let Err(e) = self
            .room
            .messages()
            .save(&Message::status(name.as_str(), LEAVE_TEXT, now))
            .await
        {
            warn!(participant = %name, error = %e, "failed to record leave notice");
        }

        info!(participant = %name, "participant left (inactive)");
        Some(name)
    }

    /// Sweep on every tick until `cancel` fires.
    ///
    /// Store errors are logged and the loop carries on with the next tick.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("liveness sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.sweep_at(Utc::now()).await {
                        warn!(error = %e, "liveness sweep failed");
                    }
                }
            }
        }
    }
}

impl<P, M> LivenessSweeper<P, M>
where
    P: ParticipantRepository + 'static,
    M: MessageRepository + 'static,
{
    /// Spawn the sweep loop onto the current tokio runtime.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::testing::{MemoryMessages, MemoryParticipants};
    use parlor_types::message::{BROADCAST, MessageKind};

    type TestRoom = RoomService<MemoryParticipants, MemoryMessages>;

    fn sweeper(room: &Arc<TestRoom>) -> LivenessSweeper<MemoryParticipants, MemoryMessages> {
        LivenessSweeper::new(
            Arc::clone(room),
            Duration::from_secs(15),
            Duration::from_secs(10),
        )
    }

    async fn seat(room: &TestRoom, name: &str, last_status: DateTime<Utc>) {
        room.participants()
            .insert(&Participant::new(name, last_status))
            .await
            .unwrap();
    }

    fn leave_notices(room: &TestRoom, name: &str) -> usize {
        room.messages()
            .all()
            .iter()
            .filter(|m| m.from == name && m.text == LEAVE_TEXT)
            .count()
    }

    #[tokio::test]
    async fn test_sweep_evicts_stale_and_announces() {
        let room = Arc::new(RoomService::new(
            MemoryParticipants::default(),
            MemoryMessages::default(),
        ));
        let now = Utc::now();
        seat(&room, "Ana", now - chrono::Duration::seconds(11)).await;
        seat(&room, "Bia", now - chrono::Duration::seconds(2)).await;

        let evicted = sweeper(&room).sweep_at(now).await.unwrap();
        assert_eq!(evicted, vec!["Ana".to_string()]);

        let names: Vec<String> = room
            .list_participants()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Bia".to_string()]);

        let log = room.messages().all();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].to, BROADCAST);
        assert_eq!(log[0].kind, MessageKind::Status);
        assert_eq!(leave_notices(&room, "Ana"), 1);
    }

    #[tokio::test]
    async fn test_threshold_is_strict() {
        let room = Arc::new(RoomService::new(
            MemoryParticipants::default(),
            MemoryMessages::default(),
        ));
        let now = Utc::now();
        seat(&room, "Ana", now - chrono::Duration::seconds(10)).await;

        let evicted = sweeper(&room).sweep_at(now).await.unwrap();
        assert!(evicted.is_empty());
        assert_eq!(room.list_participants().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_second_tick_does_not_announce_again() {
        let room = Arc::new(RoomService::new(
            MemoryParticipants::default(),
            MemoryMessages::default(),
        ));
        let now = Utc::now();
        seat(&room, "Ana", now - chrono::Duration::seconds(30)).await;

        let sweeper = sweeper(&room);
        sweeper.sweep_at(now).await.unwrap();
        let evicted = sweeper
            .sweep_at(now + chrono::Duration::seconds(15))
            .await
            .unwrap();
        assert!(evicted.is_empty());
        assert_eq!(leave_notices(&room, "Ana"), 1);
    }

    #[tokio::test]
    async fn test_heartbeat_keeps_participant() {
        let room = Arc::new(RoomService::new(
            MemoryParticipants::default(),
            MemoryMessages::default(),
        ));
        seat(&room, "Ana", Utc::now() - chrono::Duration::seconds(30)).await;
        room.heartbeat("Ana").await.unwrap();

        let evicted = sweeper(&room).sweep_at(Utc::now()).await.unwrap();
        assert!(evicted.is_empty());
    }

    #[tokio::test]
    async fn test_store_error_is_reported_and_next_tick_recovers() {
        let room = Arc::new(RoomService::new(
            MemoryParticipants::default(),
            MemoryMessages::default(),
        ));
        let now = Utc::now();
        seat(&room, "Ana", now - chrono::Duration::seconds(60)).await;

        let sweeper = sweeper(&room);
        room.participants().break_store();
        assert!(sweeper.sweep_at(now).await.is_err());

        room.participants().repair_store();
        let evicted = sweeper.sweep_at(now).await.unwrap();
        assert_eq!(evicted, vec!["Ana".to_string()]);
    }

    #[tokio::test]
    async fn test_sweep_evicts_every_stale_participant_in_one_tick() {
        let room = Arc::new(RoomService::new(
            MemoryParticipants::default(),
            MemoryMessages::default(),
        ));
        let now = Utc::now();
        for name in ["Ana", "Bia", "Caio"] {
            seat(&room, name, now - chrono::Duration::seconds(20)).await;
        }
        seat(&room, "Duda", now - chrono::Duration::seconds(1)).await;

        let mut evicted = sweeper(&room).sweep_at(now).await.unwrap();
        evicted.sort();
        assert_eq!(evicted, vec!["Ana", "Bia", "Caio"]);

        let remaining: Vec<String> = room
            .list_participants()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(remaining, vec!["Duda".to_string()]);

        for name in ["Ana", "Bia", "Caio"] {
            assert_eq!(leave_notices(&room, name), 1, "{name}");
        }
        assert_eq!(leave_notices(&room, "Duda"), 0);
        assert_eq!(room.messages().all().len(), 3);
    }

    #[tokio::test]
    async fn test_huge_threshold_evicts_nobody() {
        let room = Arc::new(RoomService::new(
            MemoryParticipants::default(),
            MemoryMessages::default(),
        ));
        seat(&room, "Ana", Utc::now() - chrono::Duration::days(365)).await;

        let sweeper = LivenessSweeper::new(
            Arc::clone(&room),
            Duration::from_secs(15),
            Duration::from_secs(20_000_000_000_000),
        );
        let evicted = sweeper.sweep_at(Utc::now()).await.unwrap();
        assert!(evicted.is_empty());
        assert_eq!(room.list_participants().await.unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_poll_interval_is_clamped() {
        let room = Arc::new(RoomService::new(
            MemoryParticipants::default(),
            MemoryMessages::default(),
        ));
        seat(&room, "Ana", Utc::now() - chrono::Duration::seconds(60)).await;

        let sweeper =
            LivenessSweeper::new(Arc::clone(&room), Duration::ZERO, Duration::from_secs(10));
        assert_eq!(sweeper.poll_interval, MIN_POLL_INTERVAL);

        let cancel = CancellationToken::new();
        let handle = sweeper.spawn(cancel.clone());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(room.list_participants().await.unwrap().is_empty());

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_loop_sweeps_until_cancelled() {
        let room = Arc::new(RoomService::new(
            MemoryParticipants::default(),
            MemoryMessages::default(),
        ));
        seat(&room, "Ana", Utc::now() - chrono::Duration::seconds(60)).await;

        let cancel = CancellationToken::new();
        let handle = sweeper(&room).spawn(cancel.clone());

        // First tick fires immediately.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(room.list_participants().await.unwrap().is_empty());
        assert_eq!(leave_notices(&room, "Ana"), 1);

        cancel.cancel();
        handle.await.unwrap();
    }
}
