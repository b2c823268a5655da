//! CBO Import - importadores da Classificação Brasileira de Ocupações
//!
//! Dois comandos independentes alimentam o banco da clínica:
//! - `import_cbo`: CSV plano `CODIGO_CBO;NOME_OCUPACAO` -> `cbo_specialties`,
//!   com criação/atualização linha a linha
//! - `import_cbo_hierarchy`: arquivo texto com categorias, subcategorias e
//!   ocupações -> `cbo_occupations`, substituindo a tabela inteira

pub mod config;
pub mod error;
pub mod flat_import;
pub mod hierarchy;
pub mod hierarchy_import;

pub use config::ImportConfig;
pub use error::{ImportError, Result};
pub use flat_import::{import_specialties, FlatImportSummary};
pub use hierarchy_import::{import_occupations, HierarchyImportSummary};

use tracing_subscriber::EnvFilter;

/// Inicializa o tracing dos comandos (filtro via `RUST_LOG`, padrão `info`), escrevendo em stderr
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
