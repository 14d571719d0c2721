use async_trait::async_trait;

/// Source of user ids. Values are strictly increasing and a value handed out
/// once is never returned again, whether or not the row it was meant for
/// was stored.
#[async_trait]
pub trait IdSequence: Send + Sync {
    async fn next_id(&self) -> anyhow::Result<i64>;
}
