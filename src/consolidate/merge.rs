use serde::Serialize;

use super::instagram::InstagramRecord;
use super::normalizer::title_case_name;
use super::registry::RegistryRecord;
use super::table::NameIndex;

/// One consolidated row. Registry fields are always populated from the
/// CNPJ export; the Instagram fields stay empty when the name has no
/// profile row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ConsolidatedRecord {
    #[serde(rename = "Nome")]
    pub(crate) nome: String,
    #[serde(rename = "CNPJ")]
    pub(crate) cnpj: String,
    #[serde(rename = "Razao_Social")]
    pub(crate) razao_social: String,
    #[serde(rename = "Nome_Fantasia")]
    pub(crate) nome_fantasia: String,
    #[serde(rename = "Telefones")]
    pub(crate) telefones: String,
    #[serde(rename = "Socios")]
    pub(crate) socios: String,
    #[serde(rename = "Instagram_Handle")]
    pub(crate) instagram_handle: String,
    #[serde(rename = "Instagram_URL")]
    pub(crate) instagram_url: String,
    #[serde(rename = "Seguidores")]
    pub(crate) seguidores: String,
}

/// Joins the profile index onto the registry index. Every registry
/// name produces exactly one row, in the order names first appeared in
/// the registry export; profile rows without a registry match are
/// dropped.
pub(crate) fn merge(
    registry: &NameIndex<RegistryRecord>,
    profiles: &NameIndex<InstagramRecord>,
) -> Vec<ConsolidatedRecord> {
    registry
        .iter()
        .map(|(name, entry)| {
            let profile = profiles.get(name);
            ConsolidatedRecord {
                nome: title_case_name(name),
                cnpj: entry.cnpj.clone(),
                razao_social: entry.razao_social.clone(),
                nome_fantasia: entry.nome_fantasia.clone(),
                telefones: entry.telefones.clone(),
                socios: entry.socios.clone(),
                instagram_handle: profile.map(|row| row.handle.clone()).unwrap_or_default(),
                instagram_url: profile.map(|row| row.url.clone()).unwrap_or_default(),
                seguidores: profile.map(|row| row.followers.clone()).unwrap_or_default(),
            }
        })
        .collect()
}
