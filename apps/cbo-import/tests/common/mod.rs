//! Utilitários compartilhados pelos testes de integração

#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use common_db::{init_db_pool, DbConfig};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Banco SQLite migrado num diretório temporário
pub struct TestDb {
    pub dir: TempDir,
    pub pool: SqlitePool,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let config = DbConfig {
            db_path: dir.path().join("clinic.db").display().to_string(),
            max_connections: 2,
        };
        let pool = init_db_pool(&config).await?;
        Ok(Self { dir, pool })
    }

    /// Grava um arquivo de entrada no diretório temporário
    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Faz o SQLite abortar inserções que satisfaçam `condition` (sintaxe de WHEN de trigger)
    pub async fn fail_inserts_on(&self, table: &str, condition: &str) -> Result<()> {
        let sql = format!(
            "CREATE TRIGGER forced_failure BEFORE INSERT ON {table} WHEN {condition} \
             BEGIN SELECT RAISE(ABORT, 'falha forçada'); END;"
        );
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }
}
