use super::domain::{CompanyRecord, EmployeeCount};
use super::normalizer::clean_cell;
use crate::config::{ColumnMapping, InputConfig};
use std::io::Read;

/// Reads the source table positionally. Rows before `data_start_row`
/// (1-based) are headers; rows without a company name are skipped.
pub(crate) fn parse_records<R: Read>(
    reader: R,
    input: &InputConfig,
    delimiter: u8,
) -> Result<Vec<CompanyRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;
        let row_number = index + 1;
        if row_number < input.data_start_row {
            continue;
        }

        if let Some(record) = map_row(&row, &input.columns) {
            records.push(record);
        }
    }

    Ok(records)
}

fn map_row(row: &csv::StringRecord, columns: &ColumnMapping) -> Option<CompanyRecord> {
    let cell = |column: Option<usize>| column.and_then(|index| row.get(index)).and_then(clean_cell);

    let name = cell(Some(columns.company_name))?;

    Some(CompanyRecord {
        name,
        industry: cell(columns.industry),
        employees: cell(columns.employees)
            .as_deref()
            .and_then(EmployeeCount::from_cell),
        website: cell(columns.website),
        linkedin: cell(columns.linkedin),
        revenue: cell(columns.revenue),
        founded: cell(columns.founded),
        description: cell(columns.description),
        keywords: cell(columns.keywords),
    })
}
