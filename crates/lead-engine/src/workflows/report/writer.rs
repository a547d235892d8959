use super::views::{enrichment_cells, scored_cells, RankCounter, ENRICHMENT_HEADERS, SCORED_HEADERS};
use super::ReportError;
use crate::config::OutputConfig;
use crate::workflows::enrichment::EnrichedCompany;
use crate::workflows::scoring::{ScoredCompany, DISQUALIFIED};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes ranked results as CSV, one row per company in the given order.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    description_chars: usize,
}

impl ResultWriter {
    pub fn new(output: &OutputConfig) -> Self {
        Self {
            description_chars: output.description_chars,
        }
    }

    pub fn write_scored<W: Write>(
        &self,
        writer: W,
        results: &[ScoredCompany],
    ) -> Result<(), ReportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(SCORED_HEADERS)?;

        let mut ranks = RankCounter::default();
        for company in results {
            let rank = ranks.assign(!company.is_disqualified());
            csv_writer.write_record(scored_cells(rank, company, self.description_chars))?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Pass 2 table: the Pass 1 columns followed by the enrichment columns,
    /// ranked on the Pass 2 tier.
    pub fn write_enriched<W: Write>(
        &self,
        writer: W,
        results: &[EnrichedCompany],
    ) -> Result<(), ReportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(SCORED_HEADERS.iter().chain(ENRICHMENT_HEADERS.iter()))?;

        let mut ranks = RankCounter::default();
        for company in results {
            let rank = ranks.assign(company.pass2_tier != DISQUALIFIED);
            let mut cells = scored_cells(rank, &company.scored, self.description_chars);
            cells.extend(enrichment_cells(company));
            csv_writer.write_record(&cells)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_scored_to_path<P: AsRef<Path>>(
        &self,
        path: P,
        results: &[ScoredCompany],
    ) -> Result<(), ReportError> {
        let file = File::create(path)?;
        self.write_scored(file, results)
    }

    pub fn write_enriched_to_path<P: AsRef<Path>>(
        &self,
        path: P,
        results: &[EnrichedCompany],
    ) -> Result<(), ReportError> {
        let file = File::create(path)?;
        self.write_enriched(file, results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::leads::CompanyRecord;
    use crate::workflows::scoring::KeywordScan;

    fn output(description_chars: usize) -> OutputConfig {
        OutputConfig {
            file_name: "scored.csv".to_string(),
            enriched_file_name: "enriched.csv".to_string(),
            description_chars,
        }
    }

    fn qualified(name: &str, total: i32) -> ScoredCompany {
        ScoredCompany::qualified(
            CompanyRecord {
                industry: Some("Software".to_string()),
                website: Some("https://acme.example".to_string()),
                description: Some("Employee engagement platform".to_string()),
                ..CompanyRecord::named(name)
            },
            Some(500),
            "A".to_string(),
            15,
            20,
            KeywordScan {
                score: total - 35,
                signals: vec!["Engagement".to_string(), "Growth".to_string()],
                flags: Vec::new(),
            },
            "A — Hot",
        )
    }

    fn written(bytes: Vec<u8>) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes.as_slice());
        reader
            .records()
            .map(|record| {
                record
                    .expect("valid csv")
                    .iter()
                    .map(str::to_string)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn scored_table_ranks_only_qualified_rows() {
        let writer = ResultWriter::new(&output(8));
        let results = vec![
            qualified("Acme", 45),
            ScoredCompany::disqualified(
                CompanyRecord::named("Tiny"),
                Some(3),
                "C".to_string(),
                &["Too small (3 employees)".to_string()],
            ),
            qualified("Beta", 35),
        ];
        let mut buffer = Vec::new();

        writer.write_scored(&mut buffer, &results).expect("write succeeds");
        let rows = written(buffer);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], SCORED_HEADERS.map(str::to_string).to_vec());
        assert_eq!(rows[1][0], "1");
        assert_eq!(rows[1][8], "45");
        assert_eq!(rows[1][10], "Engagement, Growth");
        assert_eq!(rows[1][11], "—");
        assert_eq!(rows[1][12], "—");
        assert_eq!(rows[1][15], "Employee");
        assert_eq!(rows[2][0], "—");
        assert_eq!(rows[2][2], "—");
        assert_eq!(rows[2][9], "Disqualified");
        assert_eq!(rows[2][12], "Too small (3 employees)");
        assert_eq!(rows[3][0], "2");
    }

    #[test]
    fn enriched_table_appends_enrichment_columns() {
        let writer = ResultWriter::new(&output(200));
        let results = vec![EnrichedCompany::pass_through(qualified("Acme", 45))];
        let mut buffer = Vec::new();

        writer
            .write_enriched(&mut buffer, &results)
            .expect("write succeeds");
        let rows = written(buffer);

        assert_eq!(rows[0].len(), SCORED_HEADERS.len() + ENRICHMENT_HEADERS.len());
        assert_eq!(rows[0][16], "Enrichment Bonus");
        assert_eq!(rows[1][16], "0");
        assert_eq!(rows[1][17], "—");
        assert_eq!(rows[1][18], "45");
        assert_eq!(rows[1][19], "A — Hot");
        assert_eq!(rows[1][20], "Not enriched (outside top N)");
        assert_eq!(rows[1][21], "—");
    }
}
