//! Database migrations.

use crate::client::{Store, StoreError, StoreResult};
use rusqlite_migration::{Migrations, M};

/// SQL schema definition.
const SCHEMA: &str = include_str!("schema.sql");

/// Run all database migrations.
pub fn run_migrations(store: &Store) -> StoreResult<()> {
    let migrations = Migrations::new(vec![M::up(SCHEMA)]);

    store.with_conn_mut(|conn| {
        migrations
            .to_latest(conn)
            .map_err(|e| StoreError::Migration(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations() {
        let store = Store::in_memory().unwrap();

        store
            .with_conn(|conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='kv'",
                    [],
                    |row| row.get(0),
                )?;
                assert_eq!(count, 1);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_migrations_are_repeatable() {
        let store = Store::in_memory().unwrap();
        run_migrations(&store).unwrap();
    }
}
