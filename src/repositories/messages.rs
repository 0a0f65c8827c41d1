use crate::entities::messages::{Message, MessageKey, PageQuery};
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use sqlx::{MySql, Pool};
use uuid::Uuid;

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Messages of one conversation ordered by `sent_at_time` ascending.
    /// The stream is drained once; it cannot be restarted.
    fn fetch_page(&self, query: PageQuery) -> BoxStream<'_, anyhow::Result<Message>>;

    async fn fetch_by_id(
        &self,
        target_id: &str,
        server_id: &str,
        message_id: Uuid,
    ) -> anyhow::Result<Option<Message>>;

    async fn fetch_author(&self, key: &MessageKey) -> anyhow::Result<Option<Uuid>>;

    /// Sets the content and marks the row as edited. Returns `false` when no
    /// row matches the key.
    async fn update_content(&self, key: &MessageKey, content: &str) -> anyhow::Result<bool>;
}

const TABLE_NAME: &str = "messages";
const READ_FIELDS: &str = "server_id, target_id, sent_at, sent_at_time, message_id, content, edited, reactions, reply, sent_by";
const KEY_FILTER: &str =
    "server_id = ? AND target_id = ? AND sent_at = ? AND sent_at_time = ? AND message_id = ?";

pub struct MySqlMessageStore {
    db: Pool<MySql>,
}

impl MySqlMessageStore {
    pub fn new(db: Pool<MySql>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessageStore for MySqlMessageStore {
    fn fetch_page(&self, query: PageQuery) -> BoxStream<'_, anyhow::Result<Message>> {
        const QUERY: &str = const_str::concat!(
            "SELECT ",
            READ_FIELDS,
            " FROM ",
            TABLE_NAME,
            " WHERE target_id = ? AND server_id = ?",
            " ORDER BY sent_at_time ASC, message_id ASC LIMIT ?"
        );
        const QUERY_AFTER: &str = const_str::concat!(
            "SELECT ",
            READ_FIELDS,
            " FROM ",
            TABLE_NAME,
            " WHERE target_id = ? AND server_id = ? AND sent_at_time > ?",
            " ORDER BY sent_at_time ASC, message_id ASC LIMIT ?"
        );
        let rows = match query.after {
            Some(after) => sqlx::query_as::<_, Message>(QUERY_AFTER)
                .bind(query.target_id)
                .bind(query.server_id)
                .bind(after)
                .bind(query.limit)
                .fetch(&self.db),
            None => sqlx::query_as::<_, Message>(QUERY)
                .bind(query.target_id)
                .bind(query.server_id)
                .bind(query.limit)
                .fetch(&self.db),
        };
        rows.map_err(anyhow::Error::from).boxed()
    }

    async fn fetch_by_id(
        &self,
        target_id: &str,
        server_id: &str,
        message_id: Uuid,
    ) -> anyhow::Result<Option<Message>> {
        const QUERY: &str = const_str::concat!(
            "SELECT ",
            READ_FIELDS,
            " FROM ",
            TABLE_NAME,
            " WHERE target_id = ? AND server_id = ? AND message_id = ?"
        );
        let message = sqlx::query_as(QUERY)
            .bind(target_id)
            .bind(server_id)
            .bind(message_id)
            .fetch_optional(&self.db)
            .await?;
        Ok(message)
    }

    async fn fetch_author(&self, key: &MessageKey) -> anyhow::Result<Option<Uuid>> {
        const QUERY: &str =
            const_str::concat!("SELECT sent_by FROM ", TABLE_NAME, " WHERE ", KEY_FILTER);
        let author = sqlx::query_scalar(QUERY)
            .bind(&key.server_id)
            .bind(&key.target_id)
            .bind(&key.sent_at)
            .bind(key.sent_at_time)
            .bind(key.message_id)
            .fetch_optional(&self.db)
            .await?;
        Ok(author)
    }

    async fn update_content(&self, key: &MessageKey, content: &str) -> anyhow::Result<bool> {
        const QUERY: &str = const_str::concat!(
            "UPDATE ",
            TABLE_NAME,
            " SET content = ?, edited = TRUE WHERE ",
            KEY_FILTER
        );
        let result = sqlx::query(QUERY)
            .bind(content)
            .bind(&key.server_id)
            .bind(&key.target_id)
            .bind(&key.sent_at)
            .bind(key.sent_at_time)
            .bind(key.message_id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
