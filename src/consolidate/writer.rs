use std::io::Write;

use super::merge::ConsolidatedRecord;

/// Header of the consolidated sheet. Written unconditionally, so an
/// empty registry export still produces a sheet downstream tooling can
/// open.
pub(crate) const OUTPUT_COLUMNS: [&str; 9] = [
    "Nome",
    "CNPJ",
    "Razao_Social",
    "Nome_Fantasia",
    "Telefones",
    "Socios",
    "Instagram_Handle",
    "Instagram_URL",
    "Seguidores",
];

pub(crate) fn write_consolidated<W: Write>(
    records: &[ConsolidatedRecord],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
