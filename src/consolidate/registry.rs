use serde::Deserialize;

use super::table::SourceRow;
use super::SourceTable;

/// One row of the CNPJ lookup export. Only the columns the
/// consolidated sheet carries are kept; the scraper's bookkeeping
/// columns (`Fonte`, `Tempo_ms`, `Tentativas`, `Status`) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RegistryRecord {
    #[serde(rename = "Nome", default)]
    pub(crate) nome: String,
    #[serde(rename = "CNPJ_Formatado", default)]
    pub(crate) cnpj: String,
    #[serde(rename = "Razao_Social", default)]
    pub(crate) razao_social: String,
    #[serde(rename = "Nome_Fantasia", default)]
    pub(crate) nome_fantasia: String,
    #[serde(rename = "Telefones", default)]
    pub(crate) telefones: String,
    #[serde(rename = "Socios", default)]
    pub(crate) socios: String,
}

impl SourceRow for RegistryRecord {
    const TABLE: SourceTable = SourceTable::Registry;
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "Nome",
        "CNPJ_Formatado",
        "Razao_Social",
        "Nome_Fantasia",
        "Telefones",
        "Socios",
    ];

    fn raw_name(&self) -> &str {
        &self.nome
    }
}
