use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use crate::application::ports::id_sequence::IdSequence;

#[derive(Debug)]
pub struct AtomicIdSequence {
    last: AtomicI64,
}

impl AtomicIdSequence {
    /// The first id handed out is `last + 1`.
    pub fn starting_after(last: i64) -> Self {
        Self {
            last: AtomicI64::new(last),
        }
    }
}

impl Default for AtomicIdSequence {
    fn default() -> Self {
        Self::starting_after(0)
    }
}

#[async_trait]
impl IdSequence for AtomicIdSequence {
    async fn next_id(&self) -> anyhow::Result<i64> {
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| v.checked_add(1))
            .map_err(|_| anyhow::anyhow!("user id sequence exhausted"))?;
        Ok(prev + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn starts_at_one() {
        let seq = AtomicIdSequence::default();
        assert_eq!(seq.next_id().await.unwrap(), 1);
        assert_eq!(seq.next_id().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn continues_after_seed() {
        let seq = AtomicIdSequence::starting_after(41);
        assert_eq!(seq.next_id().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn refuses_to_wrap() {
        let seq = AtomicIdSequence::starting_after(i64::MAX);
        assert!(seq.next_id().await.is_err());
        assert!(seq.next_id().await.is_err());
    }

    #[tokio::test]
    async fn concurrent_callers_never_share_an_id() {
        let seq = Arc::new(AtomicIdSequence::default());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let seq = seq.clone();
            handles.push(tokio::spawn(async move {
                let mut ids = Vec::new();
                for _ in 0..100 {
                    ids.push(seq.next_id().await.unwrap());
                }
                ids
            }));
        }
        let mut all = Vec::new();
        for h in handles {
            all.extend(h.await.unwrap());
        }
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800);
        assert_eq!(all.first(), Some(&1));
        assert_eq!(all.last(), Some(&800));
    }
}
