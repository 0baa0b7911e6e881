//! Redis-backed store.
//!
//! Documents are plain string values. The connection manager reconnects
//! on its own, so a single instance is shared by every request.

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client, Script};

use super::{KvStore, StoreError};

/// Compare the current value with ARGV[2] (or absence when ARGV[1] is
/// `"1"`) and only then SET KEYS[1] to ARGV[3].
const CAS_SCRIPT: &str = r"
local current = redis.call('GET', KEYS[1])
if ARGV[1] == '1' then
  if current ~= false then return 0 end
else
  if current ~= ARGV[2] then return 0 end
end
redis.call('SET', KEYS[1], ARGV[3])
return 1
";

pub struct RedisStore {
    connection: ConnectionManager,
    cas: Script,
}

impl RedisStore {
    /// Connect to `redis_url` (e.g. `redis://127.0.0.1:6379`).
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        // Single retry on the initial connection.
        let config = ConnectionManagerConfig::new().set_number_of_retries(1);
        let client = Client::open(redis_url)?;
        let connection = client.get_connection_manager_with_config(config).await?;
        tracing::info!("Redis connection manager created");
        Ok(Self {
            connection,
            cas: Script::new(CAS_SCRIPT),
        })
    }
}

#[async_trait]
impl KvStore for RedisStore {
    fn backend_name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        let expect_absent = if expected.is_none() { "1" } else { "0" };
        let swapped: i64 = self
            .cas
            .key(key)
            .arg(expect_absent)
            .arg(expected.unwrap_or_default())
            .arg(new)
            .invoke_async(&mut conn)
            .await?;
        Ok(swapped == 1)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
