//! Configuração dos importadores
//!
//! Os comandos recebem apenas o caminho do arquivo de entrada; o restante vem
//! do ambiente:
//! - `CLINIC_DB_PATH`: arquivo SQLite (padrão `data/clinic.db`)
//! - `CLINIC_DB_MAX_CONNECTIONS`: tamanho do pool (padrão 5)
//! - `CBO_CATEGORIES_FILE`: arquivo TOML com `main_categories = [...]`

use std::path::Path;

use common_db::DbConfig;
use serde::Deserialize;

use crate::error::{ImportError, Result};
use crate::hierarchy::MainCategories;

pub const DB_PATH_ENV: &str = "CLINIC_DB_PATH";
pub const DB_MAX_CONNECTIONS_ENV: &str = "CLINIC_DB_MAX_CONNECTIONS";
pub const CATEGORIES_FILE_ENV: &str = "CBO_CATEGORIES_FILE";

/// Configuração resolvida de uma execução
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub db: DbConfig,
    pub categories: MainCategories,
}

/// Formato do arquivo TOML de categorias
#[derive(Debug, Deserialize)]
struct CategoriesFile {
    main_categories: Vec<String>,
}

impl ImportConfig {
    /// Lê a configuração das variáveis de ambiente do processo
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de consulta de variáveis
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut db = DbConfig::default();

        if let Some(path) = lookup(DB_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            db.db_path = path;
        }

        if let Some(raw) = lookup(DB_MAX_CONNECTIONS_ENV) {
            db.max_connections = raw.trim().parse().map_err(|_| {
                ImportError::Config(format!(
                    "{} deve ser um inteiro positivo, recebeu {:?}",
                    DB_MAX_CONNECTIONS_ENV, raw
                ))
            })?;
            if db.max_connections == 0 {
                return Err(ImportError::Config(format!(
                    "{} deve ser maior que zero",
                    DB_MAX_CONNECTIONS_ENV
                )));
            }
        }

        let categories = match lookup(CATEGORIES_FILE_ENV) {
            Some(path) => load_main_categories(Path::new(&path))?,
            None => MainCategories::default(),
        };

        Ok(Self { db, categories })
    }
}

/// Carrega a lista de categorias principais de um arquivo TOML
pub fn load_main_categories(path: &Path) -> Result<MainCategories> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ImportError::Config(format!("Falha ao ler {}: {}", path.display(), e))
    })?;
    parse_main_categories(&content)
}

fn parse_main_categories(content: &str) -> Result<MainCategories> {
    let file: CategoriesFile = toml::from_str(content)
        .map_err(|e| ImportError::Config(format!("Arquivo de categorias inválido: {}", e)))?;
    MainCategories::new(file.main_categories)
}
