use deadpool::managed::{Manager, Metrics, Pool, RecycleError, RecycleResult};
use redis::aio::MultiplexedConnection;
use redis::{AsyncConnectionConfig, RedisError, RedisResult};

pub struct RedisPoolManager {
    client: redis::Client,
    config: AsyncConnectionConfig,
}

impl RedisPoolManager {
    pub fn new(client: redis::Client, config: AsyncConnectionConfig) -> Self {
        Self { client, config }
    }
}

impl Manager for RedisPoolManager {
    type Type = MultiplexedConnection;
    type Error = RedisError;

    async fn create(&self) -> RedisResult<Self::Type> {
        self.client
            .get_multiplexed_async_connection_with_config(&self.config)
            .await
    }

    /// Connections that stopped answering are dropped instead of being
    /// handed to the next publisher.
    async fn recycle(&self, conn: &mut Self::Type, _metrics: &Metrics) -> RecycleResult<Self::Error> {
        redis::cmd("PING")
            .query_async::<()>(conn)
            .await
            .map_err(RecycleError::Backend)
    }
}

pub type RedisPool = Pool<RedisPoolManager>;
