//! # Redis
//!
//! RAM database.
//!
//! Core purpose is to store submitted user records and hand out identifiers.
//!
//! ## Requirements
//!
//! - Append-only: records are never mutated or deleted
//! - No uniqueness enforcement, duplicate contacts are fine
//! - Small documents, three short strings each
//!
//! ## Implementation
//!
//! - `users:next_id` counter, `INCR` gives each record its id atomically
//! - One Redis hash per record, `user:{id}` with `name`/`number`/`email` fields
//! - Connection is a process-wide lazily-initialized manager reused across
//!   requests, established on first insert

use std::{
    error::Error,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use redis::{
    AsyncCommands, Client, RedisError,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use tokio::sync::OnceCell;

use crate::user::{SubmissionPayload, SubmissionRecord};

pub type StoreError = Box<dyn Error + Send + Sync>;

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert(&self, payload: &SubmissionPayload) -> Result<SubmissionRecord, StoreError>;
}

pub async fn init_redis(redis_url: &str) -> Result<ConnectionManager, RedisError> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url)?;

    client.get_connection_manager_with_config(config).await
}

pub struct RedisStore {
    redis_url: String,
    connection: OnceCell<ConnectionManager>,
}

impl RedisStore {
    pub fn new(redis_url: &str) -> Self {
        Self {
            redis_url: redis_url.to_string(),
            connection: OnceCell::new(),
        }
    }

    async fn connection(&self) -> Result<ConnectionManager, RedisError> {
        let connection = self
            .connection
            .get_or_try_init(|| init_redis(&self.redis_url))
            .await?;

        Ok(connection.clone())
    }
}

#[async_trait]
impl SubmissionStore for RedisStore {
    async fn insert(&self, payload: &SubmissionPayload) -> Result<SubmissionRecord, StoreError> {
        let mut connection = self.connection().await?;

        let id: u64 = connection.incr("users:next_id", 1).await?;

        let _: () = connection
            .hset_multiple(
                format!("user:{id}"),
                &[
                    ("name", &payload.name),
                    ("number", &payload.number),
                    ("email", &payload.email),
                ],
            )
            .await?;

        Ok(SubmissionRecord {
            id,
            name: payload.name.clone(),
            number: payload.number.clone(),
            email: payload.email.clone(),
        })
    }
}

/// In-memory stand-in for Redis, used by tests and local runs without a
/// Redis instance. The fail switch exercises the persistence-failure path.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<SubmissionRecord>>,
    next_id: AtomicU64,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    pub fn records(&self) -> Vec<SubmissionRecord> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, payload: &SubmissionPayload) -> Result<SubmissionRecord, StoreError> {
        if self.failing.load(Ordering::Relaxed) {
            return Err("store unreachable".into());
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;

        let record = SubmissionRecord {
            id,
            name: payload.name.clone(),
            number: payload.number.clone(),
            email: payload.email.clone(),
        };

        self.users.lock().unwrap().push(record.clone());

        Ok(record)
    }
}
