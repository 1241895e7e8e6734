use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Expected column labels of the listing export. The header is matched by
/// label, not by position, so column order in the source file is free.
pub mod columns {
    pub const PROPERTY_NAME: &str = "매물명";
    pub const LOCATION: &str = "소재지";
    pub const PROPERTY_TYPE: &str = "매물종류";
    pub const TRANSACTION_TYPE: &str = "거래유형";
    pub const STATUS: &str = "매물상태";
    pub const PRICE: &str = "금액";
    pub const AREA: &str = "공급/전용(㎡)";
    pub const BUILDING: &str = "동";
    pub const UNIT: &str = "호";
    pub const FLOOR_INFO: &str = "해당층/총층";
    pub const ROOMS_BATHROOMS: &str = "룸/욕실";
    pub const DIRECTION: &str = "방향";
    pub const MAINTENANCE_FEE: &str = "관리비";
    pub const PARKING: &str = "주차";
    pub const MOVE_IN_DATE: &str = "입주가능일";
    pub const APPROVAL_DATE: &str = "사용승인";
    pub const SPECIAL_NOTES: &str = "특이사항";
    pub const MANAGER_MEMO: &str = "담당자MEMO";

    pub const EXPECTED: [&str; 18] = [
        PROPERTY_NAME,
        LOCATION,
        PROPERTY_TYPE,
        TRANSACTION_TYPE,
        STATUS,
        PRICE,
        AREA,
        BUILDING,
        UNIT,
        FLOOR_INFO,
        ROOMS_BATHROOMS,
        DIRECTION,
        MAINTENANCE_FEE,
        PARKING,
        MOVE_IN_DATE,
        APPROVAL_DATE,
        SPECIAL_NOTES,
        MANAGER_MEMO,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apt,
    Officetel,
    Villa,
    House,
    Commercial,
}

impl Default for PropertyType {
    fn default() -> Self {
        PropertyType::Apt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Sale,
    Lease,
    Rent,
}

impl Default for TransactionType {
    fn default() -> Self {
        TransactionType::Sale
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Available,
    Completed,
    Reserved,
}

impl Default for PropertyStatus {
    fn default() -> Self {
        PropertyStatus::Available
    }
}

/// One normalized listing, shaped for the remote `properties` table.
/// Price fields are mutually exclusive per transaction type and stay 0
/// when unused; `supply_area_sqm == private_area_sqm` when the source
/// carried a single area value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub property_name: String,
    pub location: String,
    pub property_type: PropertyType,
    pub transaction_type: TransactionType,
    pub property_status: PropertyStatus,
    pub sale_price: f64,
    pub lease_deposit: f64,
    pub monthly_rent: f64,
    pub building: String,
    pub unit: String,
    pub supply_area_sqm: f64,
    pub private_area_sqm: f64,
    pub floor_info: String,
    pub rooms_bathrooms: String,
    pub direction: String,
    pub maintenance_fee: String,
    pub parking: String,
    pub move_in_date: String,
    pub approval_date: String,
    pub special_notes: String,
    pub manager_memo: String,
    pub is_commercial: bool,
    pub manager_id: String,
}

/// A raw input row indexed by header label. Missing columns read as empty,
/// so default-on-missing policy lives here instead of being scattered
/// through the transformation.
#[derive(Debug, Clone)]
pub struct ListingRow {
    index: usize,
    fields: HashMap<String, String>,
}

impl ListingRow {
    pub fn new(index: usize, fields: HashMap<String, String>) -> Self {
        ListingRow { index, fields }
    }

    /// Zero-based position in the source file, headers excluded.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn get_trimmed(&self, column: &str) -> &str {
        self.get(column).trim()
    }

    pub fn has_value(&self, column: &str) -> bool {
        !self.get_trimmed(column).is_empty()
    }
}
