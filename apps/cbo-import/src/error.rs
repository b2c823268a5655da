//! Erros dos importadores CBO

use std::path::PathBuf;

use common_db::DbError;
use thiserror::Error;

/// Erros de importação.
///
/// `FileNotFound`, `SchemaMismatch` e `TransactionAborted` encerram a execução.
/// `RowSkipped` e `RowUpsertFailed` descrevem uma única linha: são registrados
/// no log, contabilizados no resumo e a importação segue para a próxima linha.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Arquivo não encontrado: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Cabeçalhos {expected:?} não encontrados no CSV (encontrados: {found:?}). Verifique o delimitador e os nomes dos cabeçalhos.")]
    SchemaMismatch {
        expected: [&'static str; 2],
        found: Vec<String>,
    },

    #[error("Linha {line} ignorada por falta de {missing}")]
    RowSkipped { line: u64, missing: &'static str },

    #[error("Erro ao processar linha {line} (código {code}): {source}")]
    RowUpsertFailed {
        line: u64,
        code: String,
        #[source]
        source: DbError,
    },

    #[error("Importação abortada, nenhuma alteração foi mantida: {0}")]
    TransactionAborted(#[source] Box<ImportError>),

    #[error("Configuração inválida: {0}")]
    Config(String),

    #[error("Erro de leitura do CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Database(#[from] DbError),
}

impl From<sqlx::Error> for ImportError {
    fn from(error: sqlx::Error) -> Self {
        ImportError::Database(error.into())
    }
}

/// Result type dos importadores
pub type Result<T> = std::result::Result<T, ImportError>;
