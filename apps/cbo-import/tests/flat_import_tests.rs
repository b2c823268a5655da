//! Testes de integração do importador plano (CSV -> cbo_specialties)

mod common;

use anyhow::Result;
use cbo_import::{import_specialties, FlatImportSummary, ImportError};
use common::TestDb;
use common_db::specialties;

const VALID_CSV: &str = "\
CODIGO_CBO;NOME_OCUPACAO
223208;Cirurgião dentista - clínico geral
223505;Enfermeiro
225125;Médico clínico
";

#[tokio::test]
async fn creates_every_valid_row() -> Result<()> {
    let db = TestDb::new().await?;
    let path = db.write_file("cbo.csv", VALID_CSV)?;

    let summary = import_specialties(&db.pool, &path).await?;

    assert_eq!(
        summary,
        FlatImportSummary {
            created: 3,
            ..Default::default()
        }
    );
    assert_eq!(specialties::count_specialties(&db.pool).await?, 3);
    let found = specialties::find_specialty(&db.pool, "223505").await?.expect("importada");
    assert_eq!(found.name, "Enfermeiro");

    Ok(())
}

#[tokio::test]
async fn second_run_on_same_file_changes_nothing() -> Result<()> {
    let db = TestDb::new().await?;
    let path = db.write_file("cbo.csv", VALID_CSV)?;

    import_specialties(&db.pool, &path).await?;
    let second = import_specialties(&db.pool, &path).await?;

    assert_eq!(second.created, 0);
    assert_eq!(second.updated, 0);
    assert_eq!(second.skipped, 3);
    assert_eq!(second.errors, 0);
    assert_eq!(specialties::count_specialties(&db.pool).await?, 3);

    Ok(())
}

#[tokio::test]
async fn changed_name_is_updated_once() -> Result<()> {
    let db = TestDb::new().await?;
    specialties::create_specialty(&db.pool, "223208", "Cirurgião dentista").await?;

    let path = db.write_file("cbo.csv", VALID_CSV)?;
    let summary = import_specialties(&db.pool, &path).await?;

    assert_eq!(summary.updated, 1);
    assert_eq!(summary.created, 2);
    let stored = specialties::find_specialty(&db.pool, "223208").await?.expect("existente");
    assert_eq!(stored.name, "Cirurgião dentista - clínico geral");

    Ok(())
}

#[tokio::test]
async fn values_are_trimmed_before_comparison() -> Result<()> {
    let db = TestDb::new().await?;
    specialties::create_specialty(&db.pool, "223505", "Enfermeiro").await?;

    let path = db.write_file(
        "cbo.csv",
        "CODIGO_CBO;NOME_OCUPACAO\n  223505 ;  Enfermeiro  \n",
    )?;
    let summary = import_specialties(&db.pool, &path).await?;

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.updated, 0);

    Ok(())
}

#[tokio::test]
async fn incomplete_rows_are_counted_apart_and_do_not_stop_the_run() -> Result<()> {
    let db = TestDb::new().await?;
    let path = db.write_file(
        "cbo.csv",
        "\
CODIGO_CBO;NOME_OCUPACAO
223208;Cirurgião dentista - clínico geral
223505;
;Sem código
225125
225130;Médico de família
",
    )?;

    let summary = import_specialties(&db.pool, &path).await?;

    assert_eq!(summary.processed(), 2);
    assert_eq!(summary.created, 2);
    assert_eq!(summary.incomplete, 3);
    assert_eq!(summary.errors, 0);
    assert!(specialties::find_specialty(&db.pool, "225130").await?.is_some());
    assert!(specialties::find_specialty(&db.pool, "223505").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn storage_failure_on_one_row_is_isolated() -> Result<()> {
    let db = TestDb::new().await?;
    db.fail_inserts_on("cbo_specialties", "NEW.code = '223505'").await?;

    let path = db.write_file("cbo.csv", VALID_CSV)?;
    let summary = import_specialties(&db.pool, &path).await?;

    assert_eq!(summary.created, 2);
    assert_eq!(summary.errors, 1);
    assert!(specialties::find_specialty(&db.pool, "223505").await?.is_none());
    assert!(specialties::find_specialty(&db.pool, "225125").await?.is_some());

    Ok(())
}

#[tokio::test]
async fn code_too_long_counts_as_error() -> Result<()> {
    let db = TestDb::new().await?;
    let path = db.write_file(
        "cbo.csv",
        "CODIGO_CBO;NOME_OCUPACAO\n12345678901;Código inválido\n223505;Enfermeiro\n",
    )?;

    let summary = import_specialties(&db.pool, &path).await?;

    assert_eq!(summary.errors, 1);
    assert_eq!(summary.created, 1);

    Ok(())
}

#[tokio::test]
async fn columns_in_any_order_and_extra_columns_are_ignored() -> Result<()> {
    let db = TestDb::new().await?;
    let path = db.write_file(
        "cbo.csv",
        "\u{feff}ID;NOME_OCUPACAO;OBS;CODIGO_CBO\n1;Enfermeiro;x;223505\n2;Médico clínico;;225125\n",
    )?;

    let summary = import_specialties(&db.pool, &path).await?;

    assert_eq!(summary.created, 2);
    let found = specialties::find_specialty(&db.pool, "225125").await?.expect("importada");
    assert_eq!(found.name, "Médico clínico");

    Ok(())
}

#[tokio::test]
async fn missing_file_is_fatal() -> Result<()> {
    let db = TestDb::new().await?;
    let path = db.dir.path().join("nao_existe.csv");

    let err = import_specialties(&db.pool, &path).await.unwrap_err();

    assert!(matches!(err, ImportError::FileNotFound(p) if p == path));
    Ok(())
}

#[tokio::test]
async fn wrong_headers_abort_before_any_row() -> Result<()> {
    let db = TestDb::new().await?;
    // Delimitador errado: o cabeçalho vira uma única coluna
    let path = db.write_file(
        "cbo.csv",
        "CODIGO_CBO,NOME_OCUPACAO\n223505,Enfermeiro\n",
    )?;

    let err = import_specialties(&db.pool, &path).await.unwrap_err();

    match err {
        ImportError::SchemaMismatch { found, .. } => {
            assert_eq!(found, vec!["CODIGO_CBO,NOME_OCUPACAO".to_string()]);
        }
        other => panic!("erro inesperado: {other}"),
    }
    assert_eq!(specialties::count_specialties(&db.pool).await?, 0);

    Ok(())
}

#[tokio::test]
async fn header_names_are_case_sensitive() -> Result<()> {
    let db = TestDb::new().await?;
    let path = db.write_file("cbo.csv", "codigo_cbo;nome_ocupacao\n223505;Enfermeiro\n")?;

    let err = import_specialties(&db.pool, &path).await.unwrap_err();

    assert!(matches!(err, ImportError::SchemaMismatch { .. }));
    Ok(())
}
