use crate::models::{PropertyStatus, PropertyType, TransactionType};
use std::collections::HashMap;

/// Maps free-text Korean category labels onto the canonical enums.
/// Lookup is exact after trimming; anything unmapped (including empty
/// input) falls back to the documented default rather than erroring.
pub struct CategoryNormalizer {
    property_types: HashMap<&'static str, PropertyType>,
    transaction_types: HashMap<&'static str, TransactionType>,
    statuses: HashMap<&'static str, PropertyStatus>,
}

impl CategoryNormalizer {
    pub fn new() -> Self {
        let mut property_types = HashMap::new();
        property_types.insert("아파트", PropertyType::Apt);
        property_types.insert("오피스텔", PropertyType::Officetel);
        property_types.insert("빌라", PropertyType::Villa);
        property_types.insert("연립", PropertyType::Villa);
        property_types.insert("빌라/연립", PropertyType::Villa);
        property_types.insert("단독주택", PropertyType::House);
        property_types.insert("상가", PropertyType::Commercial);
        property_types.insert("사무실", PropertyType::Commercial);
        property_types.insert("점포", PropertyType::Commercial);

        let mut transaction_types = HashMap::new();
        transaction_types.insert("매매", TransactionType::Sale);
        transaction_types.insert("전세", TransactionType::Lease);
        transaction_types.insert("월세", TransactionType::Rent);
        transaction_types.insert("월세/렌트", TransactionType::Rent);
        transaction_types.insert("렌트", TransactionType::Rent);

        let mut statuses = HashMap::new();
        statuses.insert("거래가능", PropertyStatus::Available);
        statuses.insert("거래중", PropertyStatus::Available);
        statuses.insert("판매중", PropertyStatus::Available);
        statuses.insert("임대가능", PropertyStatus::Available);
        statuses.insert("거래완료", PropertyStatus::Completed);
        statuses.insert("계약완료", PropertyStatus::Completed);
        statuses.insert("판매완료", PropertyStatus::Completed);
        statuses.insert("임대완료", PropertyStatus::Completed);
        statuses.insert("거래보류", PropertyStatus::Reserved);
        statuses.insert("보류", PropertyStatus::Reserved);

        CategoryNormalizer {
            property_types,
            transaction_types,
            statuses,
        }
    }

    pub fn property_type(&self, raw: &str) -> PropertyType {
        self.property_types
            .get(raw.trim())
            .copied()
            .unwrap_or_default()
    }

    pub fn transaction_type(&self, raw: &str) -> TransactionType {
        self.transaction_types
            .get(raw.trim())
            .copied()
            .unwrap_or_default()
    }

    pub fn status(&self, raw: &str) -> PropertyStatus {
        self.statuses.get(raw.trim()).copied().unwrap_or_default()
    }
}

impl Default for CategoryNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
