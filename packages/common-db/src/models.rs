//! Modelos de dados compartilhados entre aplicações
//!
//! Este módulo define as estruturas da classificação CBO e dos perfis profissionais

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// Especialidade CBO da tabela plana (código -> nome)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CboSpecialty {
    /// Código CBO (ex: 223208 ou 2251-25), imutável após a criação
    pub code: String,
    /// Nome da ocupação
    pub name: String,
    /// Data e hora da última gravação do nome
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Display for CboSpecialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

impl FromRow<'_, SqliteRow> for CboSpecialty {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            code: row.try_get("code")?,
            name: row.try_get("name")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Ocupação CBO com sua posição na hierarquia
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CboOccupation {
    /// Identificador sequencial (preserva a ordem do arquivo importado)
    pub id: i64,
    /// Código da ocupação; `None` para linhas de resumo ou intervalo
    pub code: Option<String>,
    pub description: String,
    pub main_category: String,
    /// Ausente quando a ocupação está diretamente sob a categoria principal
    pub sub_category: Option<String>,
}

impl std::fmt::Display for CboOccupation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} - {}", code, self.description),
            None => write!(f, "{}", self.description),
        }
    }
}

impl FromRow<'_, SqliteRow> for CboOccupation {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            code: row.try_get("code")?,
            description: row.try_get("description")?,
            main_category: row.try_get("main_category")?,
            sub_category: row.try_get("sub_category")?,
        })
    }
}

/// Dados para inserir uma nova ocupação
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCboOccupation {
    pub code: Option<String>,
    pub description: String,
    pub main_category: String,
    pub sub_category: Option<String>,
}

/// Perfil de um profissional da clínica
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalProfile {
    /// Identificador do usuário dono do perfil
    pub user_id: String,
    /// Nome completo do profissional
    pub full_name: String,
    /// Data e hora de criação
    pub created_at: DateTime<Utc>,
}

impl FromRow<'_, SqliteRow> for ProfessionalProfile {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_id: row.try_get("user_id")?,
            full_name: row.try_get("full_name")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specialty_display() {
        let specialty = CboSpecialty {
            code: "223208".to_string(),
            name: "Cirurgião dentista - clínico geral".to_string(),
            updated_at: Utc::now(),
        };
        assert_eq!(specialty.to_string(), "223208 - Cirurgião dentista - clínico geral");
    }

    #[test]
    fn test_occupation_display_with_and_without_code() {
        let leaf = CboOccupation {
            id: 1,
            code: Some("2231.05".to_string()),
            description: "Médico acupunturista".to_string(),
            main_category: "PESSOAL DE SAÚDE - NÍVEL SUPERIOR".to_string(),
            sub_category: None,
        };
        assert_eq!(leaf.to_string(), "2231.05 - Médico acupunturista");

        let summary = CboOccupation {
            code: None,
            description: "2231.. - Médicos".to_string(),
            ..leaf
        };
        assert_eq!(summary.to_string(), "2231.. - Médicos");
    }
}
