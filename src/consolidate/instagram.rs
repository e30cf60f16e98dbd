use serde::Deserialize;

use super::table::SourceRow;
use super::SourceTable;

/// One row of the Instagram discovery export. Profiles the scraper
/// could not resolve still get a row, with the handle and URL left
/// empty. Follower counts are carried as text, exactly as exported.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InstagramRecord {
    #[serde(rename = "Nome", default)]
    pub(crate) nome: String,
    #[serde(rename = "Handle", default)]
    pub(crate) handle: String,
    #[serde(rename = "URL", default)]
    pub(crate) url: String,
    #[serde(rename = "Followers", default)]
    pub(crate) followers: String,
}

impl SourceRow for InstagramRecord {
    const TABLE: SourceTable = SourceTable::Instagram;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["Nome", "Handle", "URL", "Followers"];

    fn raw_name(&self) -> &str {
        &self.nome
    }
}
