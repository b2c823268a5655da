//! Perfis profissionais e suas especialidades CBO

use chrono::Utc;
use sqlx::{Executor, Sqlite};

use crate::error::DbError;
use crate::models::{CboSpecialty, ProfessionalProfile};

/// Cria o perfil profissional de um usuário
pub async fn create_professional<'e, E>(
    executor: E,
    user_id: &str,
    full_name: &str,
) -> Result<ProfessionalProfile, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = Utc::now();

    sqlx::query("INSERT INTO professional_profiles (user_id, full_name, created_at) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(full_name)
        .bind(now)
        .execute(executor)
        .await?;

    Ok(ProfessionalProfile {
        user_id: user_id.to_string(),
        full_name: full_name.to_string(),
        created_at: now,
    })
}

/// Associa uma especialidade CBO ao profissional.
///
/// Retorna `false` quando a associação já existia. Um código inexistente
/// resulta em `ConstraintViolation` (chave estrangeira).
pub async fn add_specialty<'e, E>(executor: E, user_id: &str, specialty_code: &str) -> Result<bool, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO professional_specialties (professional_id, specialty_code)
        VALUES (?, ?)
        ON CONFLICT(professional_id, specialty_code) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(specialty_code)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Lista as especialidades de um profissional ordenadas por nome
pub async fn list_specialties_for<'e, E>(executor: E, user_id: &str) -> Result<Vec<CboSpecialty>, DbError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let specialties = sqlx::query_as::<_, CboSpecialty>(
        r#"
        SELECT s.code, s.name, s.updated_at
        FROM cbo_specialties s
        JOIN professional_specialties ps ON ps.specialty_code = s.code
        WHERE ps.professional_id = ?
        ORDER BY s.name, s.code
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;

    Ok(specialties)
}
