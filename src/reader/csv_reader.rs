use crate::models::{ListingRow, columns};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::EUC_KR;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Reads a listing export CSV. Spreadsheet tools on Korean Windows still
/// save CP949, so decoding tries strict UTF-8 first and falls back to
/// EUC-KR (encoding_rs maps it to windows-949, the CP949 superset).
pub struct CsvReader {
    delimiter: u8,
}

impl CsvReader {
    pub fn new() -> Self {
        CsvReader { delimiter: b',' }
    }

    #[allow(dead_code)]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn read_file(&self, path: &Path) -> Result<Vec<ListingRow>> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;

        let (content, encoding) = decode(&bytes)
            .with_context(|| format!("Failed to decode input file: {}", path.display()))?;
        info!("Decoded {} as {}", path.display(), encoding);

        let rows = self.parse_content(&content)?;
        info!("Read {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    pub fn parse_content(&self, content: &str) -> Result<Vec<ListingRow>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .context("Failed to read CSV headers")?
            .clone();
        self.warn_missing_columns(&headers);

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.with_context(|| format!("Failed to parse CSV row {}", index))?;
            rows.push(build_row(index, &headers, &record));
        }

        Ok(rows)
    }

    fn warn_missing_columns(&self, headers: &StringRecord) {
        let present: Vec<&str> = headers.iter().collect();
        let missing: Vec<&str> = columns::EXPECTED
            .iter()
            .copied()
            .filter(|expected| !present.contains(expected))
            .collect();

        if !missing.is_empty() {
            warn!(
                "Input is missing {} expected column(s): {}",
                missing.len(),
                missing.join(", ")
            );
        }
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

fn build_row(index: usize, headers: &StringRecord, record: &StringRecord) -> ListingRow {
    let mut fields = HashMap::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        let value = record.get(idx).unwrap_or("");
        fields.insert(header.to_string(), value.to_string());
    }
    ListingRow::new(index, fields)
}

/// Strict UTF-8 first, EUC-KR second. Both failing is a real error: a file
/// that malforms under both encodings is not a listing export.
pub fn decode(bytes: &[u8]) -> Result<(String, &'static str)> {
    if let Ok(content) = std::str::from_utf8(bytes) {
        return Ok((content.to_string(), "utf-8"));
    }

    let (content, _, had_errors) = EUC_KR.decode(bytes);
    if had_errors {
        anyhow::bail!("input is neither valid UTF-8 nor valid EUC-KR");
    }
    Ok((content.into_owned(), "euc-kr"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "매물명,소재지,거래유형,금액\n\
                          래미안아파트,서울시 서초구,월세,1억/900\n\
                          한강뷰오피스텔,서울시 용산구,매매,5억\n";

    #[test]
    fn test_parse_korean_headers() {
        let reader = CsvReader::new();
        let rows = reader.parse_content(SAMPLE).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(columns::PROPERTY_NAME), "래미안아파트");
        assert_eq!(rows[0].get(columns::PRICE), "1억/900");
        assert_eq!(rows[1].get(columns::LOCATION), "서울시 용산구");
        assert_eq!(rows[1].index(), 1);
    }

    #[test]
    fn test_short_record_reads_empty() {
        let reader = CsvReader::new();
        let rows = reader
            .parse_content("매물명,소재지,금액\n장미빌라,부산시 해운대구\n")
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(columns::PRICE), "");
    }

    #[test]
    fn test_decode_utf8() {
        let (content, encoding) = decode("매물명,소재지".as_bytes()).unwrap();
        assert_eq!(encoding, "utf-8");
        assert!(content.starts_with("매물명"));
    }

    #[test]
    fn test_decode_euc_kr_fallback() {
        let original = "매물명,소재지\n신축빌라,인천시";
        let (encoded, _, _) = EUC_KR.encode(original);
        assert!(std::str::from_utf8(&encoded).is_err());

        let (content, encoding) = decode(&encoded).unwrap();
        assert_eq!(encoding, "euc-kr");
        assert_eq!(content, original);
    }

    #[test]
    fn test_decode_same_rows_either_encoding() {
        let reader = CsvReader::new();
        let utf8_rows = reader.parse_content(SAMPLE).unwrap();

        let (encoded, _, _) = EUC_KR.encode(SAMPLE);
        let (content, _) = decode(&encoded).unwrap();
        let euc_kr_rows = reader.parse_content(&content).unwrap();

        assert_eq!(utf8_rows.len(), euc_kr_rows.len());
        for (a, b) in utf8_rows.iter().zip(&euc_kr_rows) {
            assert_eq!(a.get(columns::PROPERTY_NAME), b.get(columns::PROPERTY_NAME));
            assert_eq!(a.get(columns::PRICE), b.get(columns::PRICE));
        }
    }
}
