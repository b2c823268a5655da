//! Classificação de linhas do arquivo hierárquico da CBO
//!
//! O arquivo tem três níveis:
//!
//! ```text
//! PESSOAL DE SAÚDE - NÍVEL SUPERIOR        <- categoria principal (lista fixa)
//! MÉDICOS                                  <- subcategoria (linha em maiúsculas)
//!   - 2231.. - Médicos                     <- resumo (código truncado)
//!   - 225125 a 225135 - Médicos clínicos   <- resumo (intervalo)
//!   - 2231.05 - Médico acupunturista       <- ocupação
//! ```
//!
//! [`CategoryContext`] guarda a categoria e a subcategoria correntes de uma
//! execução e avança uma linha por vez, sem nenhuma E/S.

use common_db::models::NewCboOccupation;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ImportError, Result};

/// Categorias principais reconhecidas quando nenhuma configuração é fornecida
pub const DEFAULT_MAIN_CATEGORIES: [&str; 4] = [
    "PESSOAL DE SAÚDE - NÍVEL SUPERIOR",
    "PESSOAL DE SAÚDE - NÍVEL TÉCNICO/AUXILIAR",
    "PESSOAL DE SAÚDE - QUALIFICAÇÃO ELEMENTAR",
    "PESSOAL ADMINISTRATIVO",
];

/// `- CODIGO - DESCRIÇÃO`, onde CODIGO usa maiúsculas, dígitos e pontos,
/// ou um intervalo `CODIGO a CODIGO` separado por espaços
static OCCUPATION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-\s*([A-Z0-9.]+(?: +a +[A-Z0-9.]+)?)\s*-\s*(.+)$")
        .expect("expressão regular de ocupação inválida")
});

/// Lista de rótulos de categoria principal, comparados literalmente
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainCategories(Vec<String>);

impl MainCategories {
    pub fn new(labels: Vec<String>) -> Result<Self> {
        if labels.is_empty() {
            return Err(ImportError::Config(
                "a lista de categorias principais está vazia".to_string(),
            ));
        }
        // As linhas do arquivo são aparadas antes da comparação
        let labels: Vec<String> = labels.iter().map(|l| l.trim().to_string()).collect();
        if labels.iter().any(String::is_empty) {
            return Err(ImportError::Config(
                "categoria principal em branco".to_string(),
            ));
        }
        Ok(Self(labels))
    }

    /// Retorna o rótulo quando a linha (já aparada) é exatamente uma categoria conhecida
    pub fn matches(&self, line: &str) -> Option<&str> {
        self.0.iter().map(String::as_str).find(|label| *label == line)
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }
}

impl Default for MainCategories {
    fn default() -> Self {
        Self(DEFAULT_MAIN_CATEGORIES.iter().map(|s| s.to_string()).collect())
    }
}

/// Tipo de uma linha, em ordem de prioridade
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Occupation { code: String, description: String },
    MainCategory(String),
    SubCategory(String),
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Ocupação com código próprio
    Leaf,
    /// Código truncado (`2231..`) ou intervalo (`225125 a 225135`); gravado sem código
    Summary,
}

/// Ocupação extraída do arquivo, já posicionada na hierarquia
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub kind: EntryKind,
    pub code: Option<String>,
    pub description: String,
    pub main_category: String,
    pub sub_category: Option<String>,
}

impl ParsedEntry {
    pub fn into_new_occupation(self) -> NewCboOccupation {
        NewCboOccupation {
            code: self.code,
            description: self.description,
            main_category: self.main_category,
            sub_category: self.sub_category,
        }
    }
}

/// Resultado de avançar o contexto por uma linha
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Linha em branco ou não reconhecida
    Ignored,
    /// Ocupação antes de qualquer categoria principal
    Orphan { code: String, description: String },
    EnteredMainCategory(String),
    EnteredSubCategory(String),
    Entry(ParsedEntry),
}

/// Categoria e subcategoria correntes de uma execução
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryContext {
    main_category: Option<String>,
    sub_category: Option<String>,
}

impl CategoryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn main_category(&self) -> Option<&str> {
        self.main_category.as_deref()
    }

    pub fn sub_category(&self) -> Option<&str> {
        self.sub_category.as_deref()
    }

    /// Classifica uma linha sem alterar o contexto
    pub fn classify(&self, raw_line: &str, categories: &MainCategories) -> LineKind {
        let line = raw_line.trim();
        if line.is_empty() {
            return LineKind::Blank;
        }

        if let Some(caps) = OCCUPATION_LINE.captures(line) {
            return LineKind::Occupation {
                code: caps[1].trim().to_string(),
                description: caps[2].trim().to_string(),
            };
        }

        if let Some(label) = categories.matches(line) {
            return LineKind::MainCategory(label.to_string());
        }

        if self.main_category.is_some() && is_upper_case(line) && !line.starts_with('-') {
            return LineKind::SubCategory(line.to_string());
        }

        LineKind::Unrecognized
    }

    /// Classifica a linha e aplica a transição correspondente
    pub fn advance(&mut self, raw_line: &str, categories: &MainCategories) -> Step {
        match self.classify(raw_line, categories) {
            LineKind::Blank | LineKind::Unrecognized => Step::Ignored,
            LineKind::Occupation { code, description } => {
                let Some(main_category) = self.main_category.clone() else {
                    return Step::Orphan { code, description };
                };
                let entry = if is_summary_code(&code) {
                    ParsedEntry {
                        kind: EntryKind::Summary,
                        description: format!("{} - {}", code, description),
                        code: None,
                        main_category,
                        sub_category: self.sub_category.clone(),
                    }
                } else {
                    ParsedEntry {
                        kind: EntryKind::Leaf,
                        code: Some(code),
                        description,
                        main_category,
                        sub_category: self.sub_category.clone(),
                    }
                };
                Step::Entry(entry)
            }
            LineKind::MainCategory(label) => {
                self.main_category = Some(label.clone());
                self.sub_category = None;
                Step::EnteredMainCategory(label)
            }
            LineKind::SubCategory(label) => {
                self.sub_category = Some(label.clone());
                Step::EnteredSubCategory(label)
            }
        }
    }
}

/// Intervalos (`X a Y`) e códigos truncados (`2231.`, `2231..`) não identificam uma ocupação
pub fn is_summary_code(code: &str) -> bool {
    code.contains(" a ") || code.ends_with('.')
}

/// Ao menos um caractere com caixa e nenhum minúsculo
fn is_upper_case(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}
