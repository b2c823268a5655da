//! import_cbo_hierarchy - substitui `cbo_occupations` pelo conteúdo de um
//! arquivo hierárquico da CBO
//!
//! Uso: `import_cbo_hierarchy <caminho.txt>`
//!
//! Categorias principais reconhecidas podem ser trocadas com
//! `CBO_CATEGORIES_FILE`. Qualquer erro não tratado desfaz a importação
//! inteira, inclusive a remoção das linhas antigas.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cbo_import::{import_occupations, init_tracing, ImportConfig};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "import_cbo_hierarchy")]
#[command(about = "Importa ocupações CBO de um arquivo texto hierárquico, substituindo a tabela de ocupações")]
#[command(version)]
struct Args {
    /// Caminho do arquivo de dados CBO (ex: data/cbo_data.txt)
    file_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = ImportConfig::from_env().context("Falha ao carregar configuração")?;
    info!("Banco de dados: {}", config.db.db_path);
    info!("Categorias principais: {:?}", config.categories.labels());

    println!("Iniciando importação do arquivo: {}", args.file_path.display());

    let pool = common_db::init_db_pool(&config.db).await?;
    let summary = import_occupations(&pool, &args.file_path, &config.categories)
        .await
        .with_context(|| format!("Falha ao importar {}", args.file_path.display()))?;
    pool.close().await;

    println!("Registros antigos removidos: {}", summary.removed);
    if summary.orphaned > 0 {
        println!("Ocupações sem categoria principal ignoradas: {}", summary.orphaned);
    }
    if summary.failed > 0 {
        println!("Ocupações com erro na gravação: {}", summary.failed);
    }
    println!("Importação concluída! {} registros importados para Ocupações.", summary.created);

    Ok(())
}
