//! Idempotent schema setup for the `names` table.
//!
//! Each step runs in its own transaction and reports `Applied` or
//! `AlreadyPresent`; anything else is a fatal `StorageError::Schema`. A failed
//! step is rolled back before the next one starts, so an "already exists"
//! error never poisons the statements that follow.

use sqlx::PgPool;

use crate::error::StorageError;

/// SQLSTATE `duplicate_table`, also raised for an existing index name.
const DUPLICATE_RELATION: &str = "42P07";
/// SQLSTATE `duplicate_object`, raised for an existing constraint.
const DUPLICATE_OBJECT: &str = "42710";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Applied,
    AlreadyPresent,
}

struct SchemaStep {
    name: &'static str,
    sql: &'static str,
}

const STEPS: [SchemaStep; 4] = [
    SchemaStep {
        name: "create_names_table",
        sql: r#"
        CREATE TABLE names (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            meaning TEXT,
            origin VARCHAR(100),
            choice_reason TEXT,
            search_count BIGINT NOT NULL DEFAULT 0 CHECK (search_count >= 0)
        )
        "#,
    },
    SchemaStep {
        name: "unique_name_ci",
        sql: "CREATE UNIQUE INDEX names_name_lower_key ON names (LOWER(name))",
    },
    SchemaStep { name: "index_name", sql: "CREATE INDEX idx_names_name ON names (name)" },
    SchemaStep { name: "index_origin", sql: "CREATE INDEX idx_names_origin ON names (origin)" },
];

/// Outcome of every step, in order.
#[derive(Debug, Clone, Default)]
pub struct SchemaReport {
    pub steps: Vec<(&'static str, StepOutcome)>,
}

impl SchemaReport {
    pub fn applied(&self) -> usize {
        self.steps.iter().filter(|(_, o)| *o == StepOutcome::Applied).count()
    }
}

/// Make sure the table, its case-insensitive unique key and its secondary
/// indexes exist. Safe to run on every start.
pub async fn ensure_schema(pool: &PgPool) -> Result<SchemaReport, StorageError> {
    let mut report = SchemaReport::default();
    for step in &STEPS {
        let outcome = apply_step(pool, step).await?;
        tracing::debug!(step = step.name, ?outcome, "schema step");
        report.steps.push((step.name, outcome));
    }
    tracing::info!(applied = report.applied(), total = STEPS.len(), "names schema verified");
    Ok(report)
}

async fn apply_step(pool: &PgPool, step: &SchemaStep) -> Result<StepOutcome, StorageError> {
    let mut tx = pool.begin().await?;
    match sqlx::query(step.sql).execute(&mut *tx).await {
        Ok(_) => {
            tx.commit().await?;
            Ok(StepOutcome::Applied)
        },
        Err(err) if is_already_present(&err) => {
            tx.rollback().await?;
            Ok(StepOutcome::AlreadyPresent)
        },
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(step = step.name, error = %rollback_err, "rollback after failed schema step");
            }
            Err(StorageError::Schema { step: step.name, source: err })
        },
    }
}

fn is_already_present(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code == DUPLICATE_RELATION || code == DUPLICATE_OBJECT),
        _ => false,
    }
}
