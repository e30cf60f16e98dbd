use std::collections::HashMap;
use std::io::Read;

use serde::de::DeserializeOwned;
use tracing::warn;

use super::normalizer::normalize_key;
use super::{ConsolidateError, SourceTable};

/// How repeated normalized names are handled while indexing an export.
/// Source lists repeat names and case variants collapse to one key, so
/// the default keeps the latest row read for a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    Overwrite,
    Reject,
}

/// A deserializable export row that carries the company name used as
/// the join key.
pub(crate) trait SourceRow: DeserializeOwned {
    const TABLE: SourceTable;
    /// Header columns the export must declare, name column included.
    const REQUIRED_COLUMNS: &'static [&'static str];

    fn raw_name(&self) -> &str;
}

/// Name keyed records in first-seen order. Re-inserting a key replaces
/// the record but keeps the key's original position, so iteration
/// follows the order names first appeared in the export.
#[derive(Debug)]
pub(crate) struct NameIndex<T> {
    entries: Vec<(String, T)>,
    positions: HashMap<String, usize>,
}

impl<T> NameIndex<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Inserts a record, returning the previous one when the key was
    /// already present.
    pub(crate) fn insert(&mut self, key: String, record: T) -> Option<T> {
        match self.positions.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, record)),
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
                None
            }
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&T> {
        self.positions.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, record)| (key.as_str(), record))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Reads an export and indexes its rows by normalized name.
///
/// The header must declare every required column before any row is
/// deserialized. A name that normalizes to the empty string keys its
/// row under the empty key like any other name, so such rows still
/// count toward the output.
pub(crate) fn load_index<T, R>(
    reader: R,
    policy: DuplicatePolicy,
) -> Result<NameIndex<T>, ConsolidateError>
where
    T: SourceRow,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| ConsolidateError::MalformedRecord {
            table: T::TABLE,
            source,
        })?
        .clone();
    for &column in T::REQUIRED_COLUMNS {
        if !headers.iter().any(|name| name == column) {
            return Err(ConsolidateError::MissingColumn {
                table: T::TABLE,
                column,
            });
        }
    }

    let mut index = NameIndex::new();
    for row in csv_reader.deserialize::<T>() {
        let record = row.map_err(|source| ConsolidateError::MalformedRecord {
            table: T::TABLE,
            source,
        })?;
        let key = normalize_key(record.raw_name());
        if index.insert(key.clone(), record).is_some() {
            match policy {
                DuplicatePolicy::Overwrite => {
                    warn!(table = %T::TABLE, name = %key, "duplicate name, keeping the later row");
                }
                DuplicatePolicy::Reject => {
                    return Err(ConsolidateError::DuplicateName {
                        table: T::TABLE,
                        name: key,
                    });
                }
            }
        }
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{load_index, DuplicatePolicy, NameIndex};
    use crate::consolidate::registry::RegistryRecord;
    use crate::consolidate::{ConsolidateError, SourceTable};

    #[test]
    fn insert_keeps_first_position_on_overwrite() {
        let mut index = NameIndex::new();
        assert!(index.insert("acme".to_string(), 1).is_none());
        assert!(index.insert("loja x".to_string(), 2).is_none());
        assert_eq!(index.insert("acme".to_string(), 3), Some(1));

        let entries: Vec<(&str, &i32)> = index.iter().collect();
        assert_eq!(entries, vec![("acme", &3), ("loja x", &2)]);
        assert_eq!(index.get("acme"), Some(&3));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn load_index_keys_rows_by_normalized_name() {
        let data = "\
Nome,CNPJ_Formatado,Razao_Social,Nome_Fantasia,Telefones,Socios
  LOJA X ,11.111.111/0001-11,Loja X Comercio LTDA,Loja X,(43) 99999-0001,Maria Silva
Padaria Sul,22.222.222/0001-22,Padaria Sul ME,,(43) 98888-0002,Joao Souza
";
        let index = load_index::<RegistryRecord, _>(Cursor::new(data), DuplicatePolicy::Overwrite)
            .expect("export loads");

        assert_eq!(index.len(), 2);
        let keys: Vec<&str> = index.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["loja x", "padaria sul"]);
        let record = index.get("loja x").expect("keyed by normalized name");
        assert_eq!(record.cnpj, "11.111.111/0001-11");
    }

    #[test]
    fn load_index_requires_every_declared_column() {
        let data = "Nome,CNPJ_Formatado,Razao_Social\nLoja X,11,Loja X LTDA\n";
        let err = load_index::<RegistryRecord, _>(Cursor::new(data), DuplicatePolicy::Overwrite)
            .expect_err("missing columns rejected");

        match err {
            ConsolidateError::MissingColumn { table, column } => {
                assert_eq!(table, SourceTable::Registry);
                assert_eq!(column, "Nome_Fantasia");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_index_reports_the_name_column_first() {
        let data = "CNPJ_Formatado,Razao_Social\n11,Loja X LTDA\n";
        let err = load_index::<RegistryRecord, _>(Cursor::new(data), DuplicatePolicy::Overwrite)
            .expect_err("missing name column rejected");

        match err {
            ConsolidateError::MissingColumn { column, .. } => assert_eq!(column, "Nome"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_index_keys_unnamed_rows_under_the_empty_key() {
        let data = "\
Nome,CNPJ_Formatado,Razao_Social,Nome_Fantasia,Telefones,Socios
,11.111.111/0001-11,Sem Nome LTDA,,,
   ,22.222.222/0001-22,So Espacos ME,,,
Loja X,33.333.333/0001-33,Loja X LTDA,,,
";
        let index = load_index::<RegistryRecord, _>(Cursor::new(data), DuplicatePolicy::Overwrite)
            .expect("export loads");

        assert_eq!(index.len(), 2);
        let record = index.get("").expect("unnamed rows keyed under the empty string");
        assert_eq!(record.razao_social, "So Espacos ME");
        assert!(index.get("loja x").is_some());
    }

    #[test]
    fn load_index_overwrites_duplicates_by_default() {
        let data = "\
Nome,CNPJ_Formatado,Razao_Social,Nome_Fantasia,Telefones,Socios
Loja X,11.111.111/0001-11,Primeira LTDA,,,
loja x,99.999.999/0001-99,Ultima LTDA,,,
";
        let index = load_index::<RegistryRecord, _>(Cursor::new(data), DuplicatePolicy::Overwrite)
            .expect("export loads");

        assert_eq!(index.len(), 1);
        let record = index.get("loja x").expect("single surviving record");
        assert_eq!(record.razao_social, "Ultima LTDA");
    }

    #[test]
    fn load_index_can_reject_duplicates() {
        let data = "\
Nome,CNPJ_Formatado,Razao_Social,Nome_Fantasia,Telefones,Socios
Loja X,11.111.111/0001-11,Primeira LTDA,,,
LOJA X,99.999.999/0001-99,Ultima LTDA,,,
";
        let err = load_index::<RegistryRecord, _>(Cursor::new(data), DuplicatePolicy::Reject)
            .expect_err("duplicate rejected");

        match err {
            ConsolidateError::DuplicateName { table, name } => {
                assert_eq!(table, SourceTable::Registry);
                assert_eq!(name, "loja x");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_index_tolerates_short_rows() {
        let data = "\
Nome,CNPJ_Formatado,Razao_Social,Nome_Fantasia,Telefones,Socios
Loja X,11.111.111/0001-11
";
        let index = load_index::<RegistryRecord, _>(Cursor::new(data), DuplicatePolicy::Overwrite)
            .expect("short rows fill missing cells with empty text");

        let record = index.get("loja x").expect("row indexed");
        assert_eq!(record.cnpj, "11.111.111/0001-11");
        assert_eq!(record.telefones, "");
    }
}
