mod instagram;
mod merge;
mod normalizer;
mod registry;
mod table;
mod writer;

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::info;

use instagram::InstagramRecord;
use registry::RegistryRecord;
use table::{load_index, NameIndex, SourceRow};

pub use table::DuplicatePolicy;

/// Which export a load error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTable {
    Registry,
    Instagram,
}

impl SourceTable {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Registry => "registry",
            Self::Instagram => "instagram",
        }
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConsolidateError {
    #[error("could not open the {table} export at {}", .path.display())]
    SourceUnavailable {
        table: SourceTable,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("the {table} export is missing required column `{column}`")]
    MissingColumn {
        table: SourceTable,
        column: &'static str,
    },
    #[error("the {table} export contains a malformed record")]
    MalformedRecord {
        table: SourceTable,
        #[source]
        source: csv::Error,
    },
    #[error("duplicate name `{name}` in the {table} export")]
    DuplicateName { table: SourceTable, name: String },
    #[error("could not write the consolidated sheet to {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Paths for one consolidation run plus the duplicate name policy.
#[derive(Debug, Clone)]
pub struct ConsolidatorConfig {
    pub registry_csv: PathBuf,
    pub instagram_csv: PathBuf,
    pub output_csv: PathBuf,
    pub duplicates: DuplicatePolicy,
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidateSummary {
    pub registry_names: usize,
    pub instagram_profiles: usize,
    pub matched: usize,
    pub rows_written: usize,
    pub output_csv: PathBuf,
}

pub struct Consolidator {
    config: ConsolidatorConfig,
}

impl Consolidator {
    pub fn new(config: ConsolidatorConfig) -> Self {
        Self { config }
    }

    /// Runs the pipeline over the configured paths. Both inputs are
    /// read before the destination is touched, so a load failure
    /// leaves any previous sheet in place.
    pub fn run(&self) -> Result<ConsolidateSummary, ConsolidateError> {
        let registry = self.load_source::<RegistryRecord>(&self.config.registry_csv)?;
        info!(names = registry.len(), "registry export indexed");
        let profiles = self.load_source::<InstagramRecord>(&self.config.instagram_csv)?;
        info!(profiles = profiles.len(), "instagram export indexed");

        let matched = registry
            .iter()
            .filter(|(name, _)| profiles.get(name).is_some())
            .count();
        let records = merge::merge(&registry, &profiles);

        let output = File::create(&self.config.output_csv).map_err(|source| {
            ConsolidateError::OutputWrite {
                path: self.config.output_csv.clone(),
                source: csv::Error::from(source),
            }
        })?;
        writer::write_consolidated(&records, output).map_err(|source| {
            ConsolidateError::OutputWrite {
                path: self.config.output_csv.clone(),
                source,
            }
        })?;

        info!(
            rows = records.len(),
            matched,
            output = %self.config.output_csv.display(),
            "consolidated sheet written"
        );

        Ok(ConsolidateSummary {
            registry_names: registry.len(),
            instagram_profiles: profiles.len(),
            matched,
            rows_written: records.len(),
            output_csv: self.config.output_csv.clone(),
        })
    }

    fn load_source<T: SourceRow>(&self, path: &Path) -> Result<NameIndex<T>, ConsolidateError> {
        let file = File::open(path).map_err(|source| ConsolidateError::SourceUnavailable {
            table: T::TABLE,
            path: path.to_path_buf(),
            source,
        })?;
        load_index(file, self.config.duplicates)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{ConsolidateError, Consolidator, ConsolidatorConfig, DuplicatePolicy, SourceTable};

    #[test]
    fn run_reports_a_missing_registry_export() {
        let consolidator = Consolidator::new(ConsolidatorConfig {
            registry_csv: PathBuf::from("./does-not-exist/resultados_cnpj.csv"),
            instagram_csv: PathBuf::from("./does-not-exist/resultados_instagram.csv"),
            output_csv: PathBuf::from("./does-not-exist/resultados_consolidados.csv"),
            duplicates: DuplicatePolicy::Overwrite,
        });

        let err = consolidator.run().expect_err("missing export surfaces");
        match err {
            ConsolidateError::SourceUnavailable { table, path, .. } => {
                assert_eq!(table, SourceTable::Registry);
                assert!(path.ends_with("resultados_cnpj.csv"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn source_table_labels_are_stable() {
        assert_eq!(SourceTable::Registry.label(), "registry");
        assert_eq!(SourceTable::Instagram.to_string(), "instagram");
    }
}
