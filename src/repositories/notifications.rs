use crate::common::redis_pool::RedisPool;
use crate::models::notifications::MessageEdited;
use async_trait::async_trait;
use redis::AsyncCommands;
use std::fmt::{Display, Formatter};
use tracing::debug;

/// Live clients subscribe per conversation. Direct conversations are keyed
/// by the peer the request named, channels by the channel id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub server: String,
    pub target: String,
}

impl Topic {
    pub fn new(server: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            target: target.into(),
        }
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.server.is_empty() {
            true => write!(f, "direct:{}", self.target),
            false => write!(f, "{}:{}", self.server, self.target),
        }
    }
}

const BASE_KEY: &str = "chat:events";
fn make_key(topic: &Topic) -> String {
    format!("{BASE_KEY}:{topic}")
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, topic: &Topic, event: &MessageEdited) -> anyhow::Result<()>;
}

/// Publishes over redis pub/sub, so nothing is kept for clients that are
/// not connected.
pub struct RedisNotifier {
    redis: RedisPool,
}

impl RedisNotifier {
    pub fn new(redis: RedisPool) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl Notifier for RedisNotifier {
    async fn notify(&self, topic: &Topic, event: &MessageEdited) -> anyhow::Result<()> {
        let mut redis = self.redis.get().await?;
        let key = make_key(topic);
        let payload = serde_json::to_string(event)?;
        let receivers: usize = redis.publish(&key, payload).await?;
        debug!(%key, receivers, "Published message edit");
        Ok(())
    }
}
