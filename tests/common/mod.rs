#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use futures::{FutureExt, StreamExt, TryStreamExt};
use futures::stream::{self, BoxStream};
use hashbrown::HashMap;
use message_service::common::state::AppState;
use message_service::entities::messages::{Message, MessageKey, PageQuery};
use message_service::models::authorization::ChannelEditPolicy;
use message_service::models::notifications::MessageEdited;
use message_service::repositories::identities::IdentityVerifier;
use message_service::repositories::messages::MessageStore;
use message_service::repositories::notifications::{Notifier, Topic};
use sqlx::types::Json;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use uuid::Uuid;

pub const STORE_TIMEOUT: Duration = Duration::from_millis(250);

/// Keeps rows in insertion order and answers queries the way the messages
/// table is clustered: by `sent_at_time`, then `message_id`.
#[derive(Default)]
pub struct InMemoryMessageStore {
    rows: Mutex<Vec<Message>>,
    calls: AtomicUsize,
    failing: AtomicBool,
    failing_lookups: AtomicBool,
    stalled: AtomicBool,
}

impl InMemoryMessageStore {
    pub fn insert(&self, message: Message) {
        self.rows.lock().unwrap().push(message);
    }

    pub fn get(&self, key: &MessageKey) -> Option<Message> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.key() == *key)
            .cloned()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every operation fails.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Only point lookups by id fail, pages still load.
    pub fn fail_lookups(&self) {
        self.failing_lookups.store(true, Ordering::SeqCst);
    }

    /// Every operation hangs well past the store timeout.
    pub fn stall(&self) {
        self.stalled.store(true, Ordering::SeqCst);
    }

    async fn enter(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.stalled.load(Ordering::SeqCst) {
            tokio::time::sleep(STORE_TIMEOUT * 20).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("connection refused (os error 111)");
        }
        Ok(())
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    fn fetch_page(&self, query: PageQuery) -> BoxStream<'_, anyhow::Result<Message>> {
        async move {
            self.enter().await?;
            let mut rows: Vec<Message> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|row| row.target_id == query.target_id)
                .filter(|row| row.server_id == query.server_id)
                .filter(|row| query.after.is_none_or(|after| row.sent_at_time > after))
                .cloned()
                .collect();
            rows.sort_by_key(|row| (row.sent_at_time, row.message_id));
            rows.truncate(query.limit as usize);
            Ok::<_, anyhow::Error>(rows)
        }
        .into_stream()
        .map_ok(|rows| stream::iter(rows.into_iter().map(Ok::<Message, anyhow::Error>)))
        .try_flatten()
        .boxed()
    }

    async fn fetch_by_id(
        &self,
        target_id: &str,
        server_id: &str,
        message_id: Uuid,
    ) -> anyhow::Result<Option<Message>> {
        self.enter().await?;
        if self.failing_lookups.load(Ordering::SeqCst) {
            anyhow::bail!("read timeout on replica");
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| {
                row.target_id == target_id
                    && row.server_id == server_id
                    && row.message_id == message_id
            })
            .cloned())
    }

    async fn fetch_author(&self, key: &MessageKey) -> anyhow::Result<Option<Uuid>> {
        self.enter().await?;
        Ok(self.get(key).map(|row| row.sent_by))
    }

    async fn update_content(&self, key: &MessageKey, content: &str) -> anyhow::Result<bool> {
        self.enter().await?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|row| row.key() == *key) {
            Some(row) => {
                row.content = content.to_string();
                row.edited = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct StaticIdentities {
    tokens: Mutex<HashMap<String, Uuid>>,
}

impl StaticIdentities {
    pub fn issue(&self, user_id: Uuid) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens.lock().unwrap().insert(token.clone(), user_id);
        token
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentities {
    async fn verify(&self, token: &str) -> anyhow::Result<Option<Uuid>> {
        Ok(self.tokens.lock().unwrap().get(token).copied())
    }
}

pub struct RecordingNotifier {
    sender: UnboundedSender<(Topic, MessageEdited)>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, topic: &Topic, event: &MessageEdited) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("broken pipe");
        }
        let _ = self.sender.send((topic.clone(), event.clone()));
        Ok(())
    }
}

pub struct Harness {
    pub state: AppState,
    pub store: Arc<InMemoryMessageStore>,
    pub identities: Arc<StaticIdentities>,
    pub notifier: Arc<RecordingNotifier>,
    pub events: UnboundedReceiver<(Topic, MessageEdited)>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_policy(ChannelEditPolicy::TrustTarget)
    }

    pub fn with_policy(channel_edit_policy: ChannelEditPolicy) -> Self {
        let store = Arc::new(InMemoryMessageStore::default());
        let identities = Arc::new(StaticIdentities::default());
        let (sender, events) = unbounded_channel();
        let notifier = Arc::new(RecordingNotifier {
            sender,
            failing: AtomicBool::new(false),
        });
        let state = AppState {
            messages: store.clone(),
            identities: identities.clone(),
            notifier: notifier.clone(),
            store_timeout: STORE_TIMEOUT,
            channel_edit_policy,
        };
        Self {
            state,
            store,
            identities,
            notifier,
            events,
        }
    }

    /// Takes the next announced edit. Edits are announced before they return.
    pub fn next_event(&mut self) -> (Topic, MessageEdited) {
        self.events.try_recv().expect("no edit was announced")
    }

    pub fn assert_no_events(&mut self) {
        assert!(self.events.try_recv().is_err(), "unexpected edit announced");
    }
}

pub fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-03-01T09:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    pub fn new(server_id: &str, target_id: &str, sent_by: Uuid) -> Self {
        let sent_at_time = base_time();
        Self {
            message: Message {
                server_id: server_id.to_string(),
                target_id: target_id.to_string(),
                sent_at: sent_at_time.format("%Y-%m-%d").to_string(),
                sent_at_time,
                message_id: Uuid::new_v4(),
                content: String::new(),
                edited: false,
                reactions: Json(HashMap::new()),
                reply: String::new(),
                sent_by,
            },
        }
    }

    pub fn content(mut self, content: &str) -> Self {
        self.message.content = content.to_string();
        self
    }

    /// Offset from [`base_time`] in seconds.
    pub fn at(mut self, seconds: i64) -> Self {
        self.message.sent_at_time = base_time() + TimeDelta::seconds(seconds);
        self.message.sent_at = self.message.sent_at_time.format("%Y-%m-%d").to_string();
        self
    }

    pub fn reply_to(mut self, reply: &str) -> Self {
        self.message.reply = reply.to_string();
        self
    }

    pub fn reaction(mut self, reactor: Uuid, token: &str) -> Self {
        self.message.reactions.0.insert(reactor, token.to_string());
        self
    }

    pub fn build(self) -> Message {
        self.message
    }
}
