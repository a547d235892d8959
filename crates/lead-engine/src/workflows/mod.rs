pub mod enrichment;
pub mod leads;
pub mod report;
pub mod scoring;
