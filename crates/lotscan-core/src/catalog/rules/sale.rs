//! Auction house, sale date and lot number.

use super::patterns::SALE_LOT;
use super::{ExtractionMatch, FieldExtractor, Result, RuleCascade};
use crate::models::record::SaleInfo;

/// Extracts "###SALE### <house>: <date> [Lot <n>]".
pub struct SaleExtractor {
    rules: RuleCascade,
}

impl SaleExtractor {
    pub fn new() -> Self {
        Self {
            rules: RuleCascade::new("sale").with_pattern("sale_lot", &SALE_LOT),
        }
    }
}

impl Default for SaleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for SaleExtractor {
    type Output = SaleInfo;

    fn field(&self) -> &'static str {
        self.rules.field()
    }

    fn extract(&self, segment: &str) -> Result<Option<ExtractionMatch<SaleInfo>>> {
        Ok(self.rules.first_match(segment).map(|m| {
            m.map(|caps| {
                let (auction_house, sale_date) = split_venue(caps.group(0));
                SaleInfo {
                    auction_house,
                    sale_date,
                    lot_number: caps.group(1).to_string(),
                }
            })
        }))
    }
}

/// Split the sale span on its first colon: house before, date after.
fn split_venue(span: &str) -> (String, String) {
    match span.split_once(':') {
        Some((house, date)) => (house.trim().to_string(), date.trim().to_string()),
        None => (span.trim().to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sale_with_date() {
        let m = SaleExtractor::new()
            .extract("###SALE### Christie's: 10 May 2022 [Lot 14A] ###EST###")
            .unwrap()
            .unwrap();
        assert_eq!(
            m.value,
            SaleInfo {
                auction_house: "Christie's".to_string(),
                sale_date: "10 May 2022".to_string(),
                lot_number: "14A".to_string(),
            }
        );
    }

    #[test]
    fn test_sale_without_colon() {
        let m = SaleExtractor::new()
            .extract("###SALE### Phillips New York\n[Lot 208]")
            .unwrap()
            .unwrap();
        assert_eq!(m.value.auction_house, "Phillips New York");
        assert_eq!(m.value.sale_date, "");
        assert_eq!(m.value.lot_number, "208");
    }

    #[test]
    fn test_colon_in_date_kept() {
        let (house, date) = split_venue("Sotheby's: Contemporary Evening: 17 Nov");
        assert_eq!(house, "Sotheby's");
        assert_eq!(date, "Contemporary Evening: 17 Nov");
    }

    #[test]
    fn test_sale_without_lot_is_missing() {
        assert!(SaleExtractor::new()
            .extract("###SALE### Christie's: 10 May 2022")
            .unwrap()
            .is_none());
    }
}
