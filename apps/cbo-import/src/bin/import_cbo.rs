//! import_cbo - importa especialidades CBO de um CSV para `cbo_specialties`
//!
//! Uso: `import_cbo <caminho.csv>`
//!
//! O CSV usa `;` como delimitador e deve ter os cabeçalhos `CODIGO_CBO` e
//! `NOME_OCUPACAO`. Banco de dados via `CLINIC_DB_PATH`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cbo_import::{import_specialties, init_tracing, ImportConfig};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "import_cbo")]
#[command(about = "Importa especialidades CBO de um CSV (delimitador ';', cabeçalhos CODIGO_CBO e NOME_OCUPACAO)")]
#[command(version)]
struct Args {
    /// Caminho do arquivo CSV a importar
    csv_file_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = ImportConfig::from_env().context("Falha ao carregar configuração")?;
    info!("Banco de dados: {}", config.db.db_path);

    println!("Iniciando a importação do arquivo: {}", args.csv_file_path.display());

    let pool = common_db::init_db_pool(&config.db).await?;
    let summary = import_specialties(&pool, &args.csv_file_path)
        .await
        .with_context(|| format!("Falha ao importar {}", args.csv_file_path.display()))?;
    pool.close().await;

    println!();
    println!("Importação concluída.");
    println!("Especialidades criadas: {}", summary.created);
    println!("Especialidades atualizadas: {}", summary.updated);
    println!("Especialidades já existentes/puladas: {}", summary.skipped);
    println!("Linhas ignoradas por falta de código ou nome: {}", summary.incomplete);
    println!("Erros durante a importação: {}", summary.errors);

    Ok(())
}
