use crate::models::TransactionType;

const EOK: f64 = 100_000_000.0;
const MAN: f64 = 10_000.0;

/// Price fields split per transaction type. Exactly one group is populated
/// per type; the others stay 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceFields {
    pub sale_price: f64,
    pub lease_deposit: f64,
    pub monthly_rent: f64,
}

impl PriceFields {
    fn sale(amount: f64) -> Self {
        PriceFields {
            sale_price: amount,
            ..Default::default()
        }
    }

    fn lease(deposit: f64) -> Self {
        PriceFields {
            lease_deposit: deposit,
            ..Default::default()
        }
    }

    fn rent(deposit: f64, monthly: f64) -> Self {
        PriceFields {
            lease_deposit: deposit,
            monthly_rent: monthly,
            ..Default::default()
        }
    }
}

/// Parses a raw price string (e.g. "5억", "1억/900", "3,000만원") into won
/// amounts, branching on the transaction type. Total: unparseable input
/// degrades to 0 instead of erroring.
pub fn parse_price(raw: &str, transaction_type: TransactionType) -> PriceFields {
    let cleaned: String = raw.replace(' ', "").replace(',', "");
    if cleaned.is_empty() {
        return PriceFields::default();
    }

    match transaction_type {
        TransactionType::Sale => PriceFields::sale(convert_amount(&cleaned)),
        TransactionType::Lease => PriceFields::lease(convert_amount(&cleaned)),
        TransactionType::Rent => match cleaned.split_once('/') {
            Some((deposit, monthly)) => {
                PriceFields::rent(convert_amount(deposit), convert_monthly(monthly))
            }
            // A lone rent amount carries no unit marker scaling; the raw
            // digits are taken as won, matching the upstream export.
            None => PriceFields::rent(0.0, convert_amount(&cleaned)),
        },
    }
}

/// Converts one amount token: 억 scales by 1e8, 만 by 1e4, bare digits are
/// taken literally. A trailing 원 is tolerated. Non-numeric residue → 0.
fn convert_amount(token: &str) -> f64 {
    if token.contains('억') {
        let digits = token.replace('억', "").replace('원', "");
        parse_number(&digits) * EOK
    } else if token.contains('만') {
        let digits = token.replace('만', "").replace('원', "");
        parse_number(&digits) * MAN
    } else {
        parse_number(&token.replace('원', ""))
    }
}

/// The monthly half of a deposit/monthly pair is always in ten-thousand-won
/// units, with or without an explicit 만 marker ("900" and "900만" agree).
fn convert_monthly(token: &str) -> f64 {
    let digits = token.replace('만', "").replace('원', "");
    parse_number(&digits) * MAN
}

fn parse_number(digits: &str) -> f64 {
    digits.trim().parse::<f64>().unwrap_or(0.0)
}

/// Parses a "supply / private" area pair in square meters. A single value
/// is assigned to both sides; anything non-numeric reads as 0. Never errors.
pub fn parse_area(raw: &str) -> (f64, f64) {
    match raw.split_once('/') {
        Some((supply, private)) => (parse_number(supply), parse_number(private)),
        None => {
            let area = parse_number(raw);
            (area, area)
        }
    }
}
