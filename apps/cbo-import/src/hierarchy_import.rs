//! Importação do arquivo hierárquico da CBO para `cbo_occupations`
//!
//! A tabela é substituída por inteiro dentro de uma única transação: a
//! remoção das linhas antigas e todas as inserções são confirmadas juntas ou
//! desfeitas juntas.

use std::path::Path;

use common_db::occupations;
use sqlx::{SqliteConnection, SqlitePool};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{error, info, warn};

use crate::error::{ImportError, Result};
use crate::hierarchy::{CategoryContext, EntryKind, MainCategories, Step};

/// Contadores de uma execução do importador hierárquico
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HierarchyImportSummary {
    /// Linhas antigas removidas no início da execução
    pub removed: u64,
    /// Ocupações gravadas (folhas + resumos)
    pub created: u64,
    /// Dentre as gravadas, quantas são resumos/intervalos sem código
    pub summaries: u64,
    /// Ocupações encontradas antes de qualquer categoria principal
    pub orphaned: u64,
    /// Ocupações com código cuja inserção falhou
    pub failed: u64,
}

/// Substitui o conteúdo de `cbo_occupations` pelas ocupações do arquivo
pub async fn import_occupations(
    pool: &SqlitePool,
    path: &Path,
    categories: &MainCategories,
) -> Result<HierarchyImportSummary> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path).await?;

    let mut tx = pool.begin().await?;

    match replace_occupations(&mut *tx, BufReader::new(file), categories).await {
        Ok(summary) => {
            tx.commit()
                .await
                .map_err(|e| ImportError::TransactionAborted(Box::new(e.into())))?;
            info!(
                created = summary.created,
                removed = summary.removed,
                "Importação de ocupações concluída"
            );
            Ok(summary)
        }
        Err(e) => {
            error!("Falha durante a importação, desfazendo alterações: {}", e);
            if let Err(rollback_err) = tx.rollback().await {
                error!("Falha ao desfazer a transação: {}", rollback_err);
            }
            Err(ImportError::TransactionAborted(Box::new(e)))
        }
    }
}

/// Remove as ocupações existentes e insere as do leitor, linha a linha.
///
/// Falhas ao inserir uma ocupação com código são registradas e a linha é
/// descartada; qualquer outro erro é devolvido ao chamador, que deve desfazer
/// a transação.
pub async fn replace_occupations<R>(
    conn: &mut SqliteConnection,
    reader: BufReader<R>,
    categories: &MainCategories,
) -> Result<HierarchyImportSummary>
where
    R: AsyncRead + Unpin,
{
    let mut summary = HierarchyImportSummary {
        removed: occupations::delete_all_occupations(&mut *conn).await?,
        ..Default::default()
    };
    warn!(
        "Todos os dados antigos de ocupações foram removidos ({} linhas)",
        summary.removed
    );

    let mut context = CategoryContext::new();
    let mut lines = reader.lines();
    let mut line_number: u64 = 0;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;

        match context.advance(&line, categories) {
            Step::Ignored => {}
            Step::EnteredMainCategory(label) => {
                info!("Linha {}: categoria principal {}", line_number, label);
            }
            Step::EnteredSubCategory(label) => {
                info!("Linha {}: subcategoria {}", line_number, label);
            }
            Step::Orphan { code, description } => {
                warn!(
                    "Linha {}: ocupação \"{} - {}\" sem categoria principal definida. Ignorando.",
                    line_number, code, description
                );
                summary.orphaned += 1;
            }
            Step::Entry(entry) => match entry.kind {
                EntryKind::Summary => {
                    occupations::insert_occupation(&mut *conn, &entry.into_new_occupation()).await?;
                    summary.created += 1;
                    summary.summaries += 1;
                }
                EntryKind::Leaf => {
                    let occupation = entry.into_new_occupation();
                    match occupations::insert_occupation(&mut *conn, &occupation).await {
                        Ok(_) => summary.created += 1,
                        Err(e) => {
                            error!(
                                "Erro ao criar ocupação para linha {} ({:?}): {}",
                                line_number, line.trim(), e
                            );
                            summary.failed += 1;
                        }
                    }
                }
            },
        }
    }

    Ok(summary)
}
