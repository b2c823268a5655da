//! Operações da tabela hierárquica de ocupações CBO (`cbo_occupations`)
//!
//! A tabela é substituída por inteiro a cada importação; por isso só existem
//! inserção, remoção total e consultas.

use sqlx::{Executor, Sqlite};

use crate::error::DbError;
use crate::models::{CboOccupation, NewCboOccupation};

/// Remove todas as ocupações. Retorna o número de linhas removidas.
pub async fn delete_all_occupations<'e, E>(executor: E) -> Result<u64, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM cbo_occupations")
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

/// Insere uma ocupação e retorna o identificador gerado
pub async fn insert_occupation<'e, E>(executor: E, occupation: &NewCboOccupation) -> Result<i64, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO cbo_occupations (code, description, main_category, sub_category)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&occupation.code)
    .bind(&occupation.description)
    .bind(&occupation.main_category)
    .bind(&occupation.sub_category)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Lista as ocupações na ordem de inserção
pub async fn list_occupations<'e, E>(executor: E) -> Result<Vec<CboOccupation>, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let occupations = sqlx::query_as::<_, CboOccupation>(
        "SELECT id, code, description, main_category, sub_category FROM cbo_occupations ORDER BY id",
    )
    .fetch_all(executor)
    .await?;

    Ok(occupations)
}

/// Busca uma ocupação pelo código (linhas de resumo não têm código e nunca são encontradas aqui)
pub async fn find_occupation_by_code<'e, E>(executor: E, code: &str) -> Result<Option<CboOccupation>, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let occupation = sqlx::query_as::<_, CboOccupation>(
        "SELECT id, code, description, main_category, sub_category FROM cbo_occupations WHERE code = ?",
    )
    .bind(code)
    .fetch_optional(executor)
    .await?;

    Ok(occupation)
}

pub async fn count_occupations<'e, E>(executor: E) -> Result<i64, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cbo_occupations")
        .fetch_one(executor)
        .await?;

    Ok(count)
}
