use crate::models::{ListingRow, PropertyRecord, columns};
use crate::processor::normalizer::CategoryNormalizer;
use crate::processor::price_parser::{parse_area, parse_price};
use tracing::warn;

/// Why a row was left out of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingPropertyName,
    MissingLocation,
}

impl SkipReason {
    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::MissingPropertyName => "property name column is blank",
            SkipReason::MissingLocation => "location column is blank",
        }
    }
}

/// Per-row result. Skips are data, not log noise, so callers and tests can
/// assert on the reason.
#[derive(Debug, Clone)]
pub enum RowOutcome {
    Converted(PropertyRecord),
    Skipped { row: usize, reason: SkipReason },
}

impl RowOutcome {
    pub fn record(&self) -> Option<&PropertyRecord> {
        match self {
            RowOutcome::Converted(record) => Some(record),
            RowOutcome::Skipped { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformSummary {
    pub total_rows: usize,
    pub converted: usize,
    pub skipped: usize,
}

/// Builds `PropertyRecord`s out of raw rows. One bad row never aborts the
/// run: rows missing a required field are skipped with a logged reason and
/// processing continues.
pub struct RowTransformer {
    normalizer: CategoryNormalizer,
    manager_id: String,
}

impl RowTransformer {
    pub fn new(manager_id: impl Into<String>) -> Self {
        RowTransformer {
            normalizer: CategoryNormalizer::new(),
            manager_id: manager_id.into(),
        }
    }

    pub fn transform_rows(&self, rows: &[ListingRow]) -> (Vec<RowOutcome>, TransformSummary) {
        let mut outcomes = Vec::with_capacity(rows.len());
        let mut summary = TransformSummary {
            total_rows: rows.len(),
            ..Default::default()
        };

        for row in rows {
            let outcome = self.transform_row(row);
            match &outcome {
                RowOutcome::Converted(_) => summary.converted += 1,
                RowOutcome::Skipped { row, reason } => {
                    summary.skipped += 1;
                    warn!("Row {}: {}, skipping", row, reason.describe());
                }
            }
            outcomes.push(outcome);
        }

        (outcomes, summary)
    }

    pub fn transform_row(&self, row: &ListingRow) -> RowOutcome {
        if !row.has_value(columns::PROPERTY_NAME) {
            return RowOutcome::Skipped {
                row: row.index(),
                reason: SkipReason::MissingPropertyName,
            };
        }
        if !row.has_value(columns::LOCATION) {
            return RowOutcome::Skipped {
                row: row.index(),
                reason: SkipReason::MissingLocation,
            };
        }

        let raw_property_type = row.get(columns::PROPERTY_TYPE);
        let transaction_type = self.normalizer.transaction_type(row.get(columns::TRANSACTION_TYPE));
        let price = parse_price(row.get(columns::PRICE), transaction_type);
        let (supply_area, private_area) = parse_area(row.get(columns::AREA));

        RowOutcome::Converted(PropertyRecord {
            property_name: row.get_trimmed(columns::PROPERTY_NAME).to_string(),
            location: row.get_trimmed(columns::LOCATION).to_string(),
            property_type: self.normalizer.property_type(raw_property_type),
            transaction_type,
            property_status: self.normalizer.status(row.get(columns::STATUS)),
            sale_price: price.sale_price,
            lease_deposit: price.lease_deposit,
            monthly_rent: price.monthly_rent,
            building: row.get_trimmed(columns::BUILDING).to_string(),
            unit: row.get_trimmed(columns::UNIT).to_string(),
            supply_area_sqm: supply_area,
            private_area_sqm: private_area,
            floor_info: row.get_trimmed(columns::FLOOR_INFO).to_string(),
            rooms_bathrooms: row.get_trimmed(columns::ROOMS_BATHROOMS).to_string(),
            direction: row.get_trimmed(columns::DIRECTION).to_string(),
            maintenance_fee: row.get_trimmed(columns::MAINTENANCE_FEE).to_string(),
            parking: row.get_trimmed(columns::PARKING).to_string(),
            move_in_date: row.get_trimmed(columns::MOVE_IN_DATE).to_string(),
            approval_date: row.get_trimmed(columns::APPROVAL_DATE).to_string(),
            special_notes: row.get_trimmed(columns::SPECIAL_NOTES).to_string(),
            manager_memo: row.get_trimmed(columns::MANAGER_MEMO).to_string(),
            is_commercial: raw_property_type.contains("상가"),
            manager_id: self.manager_id.clone(),
        })
    }
}

/// Collapses outcomes into the surviving records, preserving row order.
pub fn into_records(outcomes: Vec<RowOutcome>) -> Vec<PropertyRecord> {
    outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            RowOutcome::Converted(record) => Some(record),
            RowOutcome::Skipped { .. } => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PropertyStatus, PropertyType, TransactionType};
    use std::collections::HashMap;

    fn row(index: usize, pairs: &[(&str, &str)]) -> ListingRow {
        let fields: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ListingRow::new(index, fields)
    }

    fn full_row(index: usize) -> ListingRow {
        row(
            index,
            &[
                (columns::PROPERTY_NAME, "래미안아파트"),
                (columns::LOCATION, "서울시 서초구 반포동"),
                (columns::PROPERTY_TYPE, "아파트"),
                (columns::TRANSACTION_TYPE, "월세"),
                (columns::STATUS, "거래가능"),
                (columns::PRICE, "1억/900"),
                (columns::AREA, "137.46 / 122.97"),
                (columns::BUILDING, "101"),
                (columns::UNIT, "1503"),
                (columns::FLOOR_INFO, "15/25"),
                (columns::ROOMS_BATHROOMS, "3/2"),
                (columns::DIRECTION, "남향"),
                (columns::MAINTENANCE_FEE, "15만원"),
                (columns::PARKING, "2대"),
                (columns::MOVE_IN_DATE, "즉시"),
                (columns::APPROVAL_DATE, "2009.05"),
                (columns::SPECIAL_NOTES, "역세권"),
                (columns::MANAGER_MEMO, "집주인 연락처 확인"),
            ],
        )
    }

    #[test]
    fn test_full_row_transformation() {
        let transformer = RowTransformer::new("manager-1");
        let outcome = transformer.transform_row(&full_row(0));
        let record = outcome.record().expect("row should convert");

        assert_eq!(record.property_name, "래미안아파트");
        assert_eq!(record.location, "서울시 서초구 반포동");
        assert_eq!(record.property_type, PropertyType::Apt);
        assert_eq!(record.transaction_type, TransactionType::Rent);
        assert_eq!(record.property_status, PropertyStatus::Available);
        assert_eq!(record.sale_price, 0.0);
        assert_eq!(record.lease_deposit, 100_000_000.0);
        assert_eq!(record.monthly_rent, 9_000_000.0);
        assert_eq!(record.supply_area_sqm, 137.46);
        assert_eq!(record.private_area_sqm, 122.97);
        assert_eq!(record.floor_info, "15/25");
        assert_eq!(record.manager_memo, "집주인 연락처 확인");
        assert!(!record.is_commercial);
        assert_eq!(record.manager_id, "manager-1");
    }

    #[test]
    fn test_missing_location_is_skipped_with_reason() {
        let transformer = RowTransformer::new("manager-1");
        let incomplete = row(3, &[(columns::PROPERTY_NAME, "상가건물"), (columns::LOCATION, " ")]);

        match transformer.transform_row(&incomplete) {
            RowOutcome::Skipped { row, reason } => {
                assert_eq!(row, 3);
                assert_eq!(reason, SkipReason::MissingLocation);
            }
            RowOutcome::Converted(_) => panic!("row without location must not convert"),
        }
    }

    #[test]
    fn test_missing_name_is_skipped_with_reason() {
        let transformer = RowTransformer::new("manager-1");
        let incomplete = row(0, &[(columns::LOCATION, "서울시 강남구")]);

        match transformer.transform_row(&incomplete) {
            RowOutcome::Skipped { reason, .. } => {
                assert_eq!(reason, SkipReason::MissingPropertyName);
            }
            RowOutcome::Converted(_) => panic!("row without name must not convert"),
        }
    }

    #[test]
    fn test_output_never_exceeds_input() {
        let transformer = RowTransformer::new("manager-1");
        let rows = vec![
            full_row(0),
            row(1, &[(columns::PROPERTY_NAME, "이름만 있는 매물")]),
            full_row(2),
        ];

        let (outcomes, summary) = transformer.transform_rows(&rows);
        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.converted, 2);
        assert_eq!(summary.skipped, 1);

        let records = into_records(outcomes);
        assert_eq!(records.len(), 2);
        assert!(records.len() <= rows.len());
    }

    #[test]
    fn test_commercial_flag_from_raw_text() {
        let transformer = RowTransformer::new("manager-1");
        let commercial = row(
            0,
            &[
                (columns::PROPERTY_NAME, "테헤란로 상가"),
                (columns::LOCATION, "서울시 강남구"),
                (columns::PROPERTY_TYPE, "상가"),
            ],
        );

        let record = transformer.transform_row(&commercial);
        let record = record.record().unwrap();
        assert!(record.is_commercial);
        assert_eq!(record.property_type, PropertyType::Commercial);

        // 사무실 normalizes to commercial but the flag tracks the raw 상가
        // substring only.
        let office = row(
            1,
            &[
                (columns::PROPERTY_NAME, "공유 사무실"),
                (columns::LOCATION, "서울시 마포구"),
                (columns::PROPERTY_TYPE, "사무실"),
            ],
        );
        let record = transformer.transform_row(&office);
        let record = record.record().unwrap();
        assert!(!record.is_commercial);
        assert_eq!(record.property_type, PropertyType::Commercial);
    }

    #[test]
    fn test_defaults_for_absent_optional_columns() {
        let transformer = RowTransformer::new("manager-1");
        let minimal = row(
            0,
            &[
                (columns::PROPERTY_NAME, "신축빌라"),
                (columns::LOCATION, "인천시 부평구"),
            ],
        );

        let record = transformer.transform_row(&minimal);
        let record = record.record().unwrap();
        assert_eq!(record.property_type, PropertyType::Apt);
        assert_eq!(record.transaction_type, TransactionType::Sale);
        assert_eq!(record.property_status, PropertyStatus::Available);
        assert_eq!(record.sale_price, 0.0);
        assert_eq!(record.supply_area_sqm, 0.0);
        assert_eq!(record.building, "");
        assert_eq!(record.special_notes, "");
    }
}
