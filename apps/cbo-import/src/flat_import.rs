//! Importação da tabela plana de especialidades CBO a partir de um CSV
//!
//! O arquivo usa `;` como delimitador e precisa das colunas `CODIGO_CBO` e
//! `NOME_OCUPACAO` (em qualquer ordem; demais colunas são ignoradas). Cada
//! linha é uma unidade independente: cria, atualiza o nome ou não faz nada.
//! Uma linha com erro não interrompe as demais.

use std::path::Path;

use common_db::{specialties, DbError};
use csv::{ReaderBuilder, StringRecord};
use sqlx::SqlitePool;
use tracing::{debug, error, info, warn};

use crate::error::{ImportError, Result};

pub const CODE_COLUMN: &str = "CODIGO_CBO";
pub const NAME_COLUMN: &str = "NOME_OCUPACAO";

/// Contadores de uma execução do importador plano
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlatImportSummary {
    /// Especialidades novas
    pub created: u64,
    /// Especialidades existentes cujo nome mudou
    pub updated: u64,
    /// Especialidades existentes com o mesmo nome
    pub skipped: u64,
    /// Linhas sem código ou sem nome
    pub incomplete: u64,
    /// Linhas cuja gravação falhou
    pub errors: u64,
}

impl FlatImportSummary {
    /// Linhas válidas processadas com sucesso
    pub fn processed(&self) -> u64 {
        self.created + self.updated + self.skipped
    }
}

/// Efeito da gravação de uma linha válida
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Posição das colunas obrigatórias no cabeçalho
#[derive(Debug, Clone, Copy)]
struct Columns {
    code: usize,
    name: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        // CSVs exportados por planilhas podem começar com BOM
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
        };
        match (position(CODE_COLUMN), position(NAME_COLUMN)) {
            (Some(code), Some(name)) => Ok(Self { code, name }),
            _ => Err(ImportError::SchemaMismatch {
                expected: [CODE_COLUMN, NAME_COLUMN],
                found: headers.iter().map(str::to_string).collect(),
            }),
        }
    }

    /// Código e nome aparados; `RowSkipped` quando algum está vazio ou ausente
    fn extract<'r>(&self, record: &'r StringRecord, line: u64) -> Result<(&'r str, &'r str)> {
        let code = record.get(self.code).map(str::trim).unwrap_or_default();
        let name = record.get(self.name).map(str::trim).unwrap_or_default();

        if code.is_empty() {
            return Err(ImportError::RowSkipped { line, missing: "código" });
        }
        if name.is_empty() {
            return Err(ImportError::RowSkipped { line, missing: "nome" });
        }
        Ok((code, name))
    }
}

/// Cria a especialidade se não existir, ou atualiza o nome se ele mudou
pub async fn upsert_specialty(
    pool: &SqlitePool,
    code: &str,
    name: &str,
) -> std::result::Result<UpsertOutcome, DbError> {
    match specialties::find_specialty(pool, code).await? {
        None => {
            specialties::create_specialty(pool, code, name).await?;
            Ok(UpsertOutcome::Created)
        }
        Some(existing) if existing.name != name => {
            specialties::update_specialty_name(pool, code, name).await?;
            Ok(UpsertOutcome::Updated)
        }
        Some(_) => Ok(UpsertOutcome::Unchanged),
    }
}

/// Importa o CSV de especialidades para `cbo_specialties`
pub async fn import_specialties(pool: &SqlitePool, path: &Path) -> Result<FlatImportSummary> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let columns = Columns::locate(&headers)?;
    info!("Cabeçalhos encontrados: {:?}", headers.iter().collect::<Vec<_>>());
    info!("Iniciando leitura das linhas...");

    let mut summary = FlatImportSummary::default();
    let mut record = StringRecord::new();

    while reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let (code, name) = match columns.extract(&record, line) {
            Ok(values) => values,
            Err(skipped) => {
                warn!("{}: {:?}", skipped, record);
                summary.incomplete += 1;
                continue;
            }
        };

        match upsert_specialty(pool, code, name).await {
            Ok(UpsertOutcome::Created) => {
                debug!("Especialidade criada: {} - {}", code, name);
                summary.created += 1;
            }
            Ok(UpsertOutcome::Updated) => {
                info!("Especialidade atualizada: {} - {}", code, name);
                summary.updated += 1;
            }
            Ok(UpsertOutcome::Unchanged) => summary.skipped += 1,
            Err(source) => {
                let failure = ImportError::RowUpsertFailed {
                    line,
                    code: code.to_string(),
                    source,
                };
                error!("{}", failure);
                summary.errors += 1;
            }
        }
    }

    info!(
        created = summary.created,
        updated = summary.updated,
        skipped = summary.skipped,
        incomplete = summary.incomplete,
        errors = summary.errors,
        "Importação de especialidades concluída"
    );

    Ok(summary)
}
