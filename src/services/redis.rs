//! Redis service for session revocation

use redis::{AsyncCommands, Client};

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct RedisService {
    client: Client,
}

fn revoked_key(jti: &str) -> String {
    format!("session:revoked:{}", jti)
}

impl RedisService {
    /// Create a new Redis service. The connection is opened per call, so an
    /// unreachable server only fails the requests that need it.
    pub fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;
        Ok(Self { client })
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Unavailable(format!("Failed to get Redis connection: {}", e)))
    }

    /// Check connectivity
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Unavailable(format!("Redis ping failed: {}", e)))?;
        Ok(())
    }

    /// Mark a session token as revoked until it would have expired anyway
    pub async fn revoke_session(&self, jti: &str, ttl_seconds: u64) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(revoked_key(jti), "1", ttl_seconds)
            .await
            .map_err(|e| AppError::Unavailable(format!("Failed to revoke session in Redis: {}", e)))?;
        Ok(())
    }

    pub async fn is_session_revoked(&self, jti: &str) -> AppResult<bool> {
        let mut conn = self.connection().await?;
        let exists: bool = conn
            .exists(revoked_key(jti))
            .await
            .map_err(|e| AppError::Unavailable(format!("Failed to check session in Redis: {}", e)))?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_rejected() {
        assert!(RedisService::new("not a url").is_err());
        assert!(RedisService::new("redis://127.0.0.1:6379").is_ok());
    }

    #[test]
    fn test_revoked_key() {
        assert_eq!(revoked_key("abc"), "session:revoked:abc");
    }
}
