//! Operações da tabela plana de especialidades CBO (`cbo_specialties`)
//!
//! Todas as funções aceitam qualquer executor SQLite: o pool, uma conexão ou
//! uma transação em andamento (`&mut *tx`).

use chrono::Utc;
use sqlx::{Executor, Sqlite};

use crate::error::DbError;
use crate::models::CboSpecialty;

/// Busca uma especialidade pelo código
pub async fn find_specialty<'e, E>(executor: E, code: &str) -> Result<Option<CboSpecialty>, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let specialty = sqlx::query_as::<_, CboSpecialty>(
        "SELECT code, name, updated_at FROM cbo_specialties WHERE code = ?",
    )
    .bind(code)
    .fetch_optional(executor)
    .await?;

    Ok(specialty)
}

/// Cria uma nova especialidade. Falha com `ConstraintViolation` se o código já existir.
pub async fn create_specialty<'e, E>(executor: E, code: &str, name: &str) -> Result<CboSpecialty, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = Utc::now();

    sqlx::query("INSERT INTO cbo_specialties (code, name, updated_at) VALUES (?, ?, ?)")
        .bind(code)
        .bind(name)
        .bind(now)
        .execute(executor)
        .await?;

    Ok(CboSpecialty {
        code: code.to_string(),
        name: name.to_string(),
        updated_at: now,
    })
}

/// Atualiza o nome de uma especialidade existente. O código nunca muda.
pub async fn update_specialty_name<'e, E>(executor: E, code: &str, name: &str) -> Result<(), DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE cbo_specialties SET name = ?, updated_at = ? WHERE code = ?")
        .bind(name)
        .bind(Utc::now())
        .bind(code)
        .execute(executor)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound(format!("Especialidade CBO {}", code)));
    }

    Ok(())
}

/// Lista todas as especialidades ordenadas por nome
pub async fn list_specialties<'e, E>(executor: E) -> Result<Vec<CboSpecialty>, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let specialties = sqlx::query_as::<_, CboSpecialty>(
        "SELECT code, name, updated_at FROM cbo_specialties ORDER BY name, code",
    )
    .fetch_all(executor)
    .await?;

    Ok(specialties)
}

pub async fn count_specialties<'e, E>(executor: E) -> Result<i64, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cbo_specialties")
        .fetch_one(executor)
        .await?;

    Ok(count)
}
