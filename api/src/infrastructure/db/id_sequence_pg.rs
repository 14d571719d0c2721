use async_trait::async_trait;

use crate::application::ports::id_sequence::IdSequence;
use crate::infrastructure::db::PgPool;

/// Backed by the `secuencia_usuario` database sequence. `nextval` is never
/// rolled back, so ids consumed by failed inserts stay consumed.
pub struct PgIdSequence {
    pub pool: PgPool,
}

impl PgIdSequence {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdSequence for PgIdSequence {
    async fn next_id(&self) -> anyhow::Result<i64> {
        let id = sqlx::query_scalar::<_, i64>("SELECT nextval('secuencia_usuario')")
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }
}
