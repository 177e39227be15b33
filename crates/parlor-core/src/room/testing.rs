//! In-memory repositories shared by the room service and sweeper tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use parlor_types::error::RepositoryError;
use parlor_types::message::Message;
use parlor_types::participant::Participant;
use uuid::Uuid;

use crate::repository::message::MessageRepository;
use crate::repository::participant::ParticipantRepository;

#[derive(Default)]
pub struct MemoryParticipants {
    rows: Mutex<Vec<Participant>>,
    broken: AtomicBool,
}

impl MemoryParticipants {
    /// Make every subsequent call fail with a query error.
    pub fn break_store(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn repair_store(&self) {
        self.broken.store(false, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.broken.load(Ordering::SeqCst) {
            Err(RepositoryError::Query("store offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ParticipantRepository for MemoryParticipants {
    async fn insert(&self, participant: &Participant) -> Result<(), RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|p| p.name == participant.name) {
            return Err(RepositoryError::Conflict(participant.name.clone()));
        }
        rows.push(participant.clone());
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Participant>, RepositoryError> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Participant>, RepositoryError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn touch(&self, name: &str, at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.name == name) {
            Some(p) => {
                p.last_status = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_stale(&self, cutoff: DateTime<Utc>) -> Result<Vec<Participant>, RepositoryError> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|p| p.last_status < cutoff).cloned().collect())
    }

    async fn delete(&self, name: &str) -> Result<bool, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.name != name);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryMessages {
    rows: Mutex<Vec<Message>>,
}

impl MemoryMessages {
    /// Snapshot of the log in insertion order.
    pub fn all(&self) -> Vec<Message> {
        self.rows.lock().unwrap().clone()
    }
}

impl MessageRepository for MemoryMessages {
    async fn save(&self, msg: &Message) -> Result<(), RepositoryError> {
        self.rows.lock().unwrap().push(msg.clone());
        Ok(())
    }

    async fn find(&self, id: &Uuid) -> Result<Option<Message>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|m| m.id == *id).cloned())
    }

    async fn list_visible_to(&self, participant: &str) -> Result<Vec<Message>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let mut visible: Vec<Message> = rows
            .iter()
            .filter(|m| m.is_visible_to(participant))
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(visible)
    }

    async fn update(&self, msg: &Message) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|m| m.id == msg.id) {
            Some(existing) => {
                *existing = msg.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| m.id != *id);
        Ok(rows.len() < before)
    }
}
