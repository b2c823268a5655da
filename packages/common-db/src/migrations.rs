//! Sistema de migrações para banco de dados
//!
//! Este módulo gerencia as migrações do banco de dados SQLite. A versão aplicada
//! fica registrada em `PRAGMA user_version`.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::{error, info};

/// Lista de migrações SQL a serem aplicadas
pub const MIGRATIONS: &[&str] = &[
    // 001_cbo_tables.sql
    r#"
    -- Especialidades CBO (tabela plana código -> nome)
    CREATE TABLE IF NOT EXISTS cbo_specialties (
        code TEXT PRIMARY KEY NOT NULL CHECK (length(code) <= 10),
        name TEXT NOT NULL CHECK (length(name) <= 255),
        updated_at TIMESTAMP NOT NULL
    );

    -- Ocupações CBO com a hierarquia categoria principal / subcategoria
    CREATE TABLE IF NOT EXISTS cbo_occupations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        code TEXT UNIQUE CHECK (code IS NULL OR length(code) <= 10),
        description TEXT NOT NULL CHECK (length(description) <= 255),
        main_category TEXT NOT NULL CHECK (length(main_category) <= 255),
        sub_category TEXT CHECK (sub_category IS NULL OR length(sub_category) <= 255)
    );

    CREATE INDEX IF NOT EXISTS idx_cbo_specialties_name ON cbo_specialties (name);
    CREATE INDEX IF NOT EXISTS idx_cbo_occupations_main_category ON cbo_occupations (main_category);
    "#,

    // 002_professional_specialties.sql
    r#"
    -- Perfis de profissionais da clínica
    CREATE TABLE IF NOT EXISTS professional_profiles (
        user_id TEXT PRIMARY KEY NOT NULL,
        full_name TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL
    );

    -- Especialidades CBO atribuídas a cada profissional
    CREATE TABLE IF NOT EXISTS professional_specialties (
        professional_id TEXT NOT NULL,
        specialty_code TEXT NOT NULL,
        PRIMARY KEY (professional_id, specialty_code),
        FOREIGN KEY (professional_id) REFERENCES professional_profiles (user_id) ON DELETE CASCADE,
        FOREIGN KEY (specialty_code) REFERENCES cbo_specialties (code) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS idx_professional_specialties_code ON professional_specialties (specialty_code);
    "#,
];

/// Executa todas as migrações pendentes no banco de dados
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Aplicando migrações de banco de dados...");

    let version: i64 = match sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await
    {
        Ok(v) => v,
        Err(e) => {
            // Pode ser a primeira execução
            error!("Erro ao obter versão do banco: {}", e);
            0
        }
    };

    info!("Versão atual do banco: {}", version);

    for (i, migration_sql) in MIGRATIONS.iter().enumerate() {
        let migration_version = (i + 1) as i64;

        if migration_version <= version {
            info!("Migração {} já aplicada", migration_version);
            continue;
        }

        info!("Aplicando migração {}...", migration_version);

        let mut transaction = pool.begin().await
            .with_context(|| format!("Falha ao iniciar transação para migração {}", migration_version))?;

        sqlx::query(migration_sql)
            .execute(&mut *transaction)
            .await
            .with_context(|| format!("Falha ao executar migração {}", migration_version))?;

        sqlx::query(&format!("PRAGMA user_version = {}", migration_version))
            .execute(&mut *transaction)
            .await
            .with_context(|| format!("Falha ao atualizar versão para {}", migration_version))?;

        transaction.commit().await
            .with_context(|| format!("Falha ao confirmar transação para migração {}", migration_version))?;

        info!("Migração {} aplicada com sucesso", migration_version);
    }

    info!("Migrações concluídas. Versão atual: {}", MIGRATIONS.len());
    Ok(())
}
