//! Common regex patterns for auction catalog extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// A price figure: "1,250,000", "1250000", "65,000.50".
const AMOUNT: &str = r"(?:\d{1,3}(?:,\d{3})*(?:\.\d+)?|\d+)";

/// A dimension figure: "40", "101.6", "40.".
const MEASURE: &str = r"(\d+\.?\d*)";

lazy_static! {
    // Normalization
    pub static ref SENTINEL_HASHES: Regex = Regex::new(r"#{3,}").unwrap();

    pub static ref SENTINEL_ATS: Regex = Regex::new(r"@{4,}").unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    // A line holding only a lot index and a name: "12 Jonas Wood"
    pub static ref INDEX_ANCHOR_LINE: Regex = Regex::new(
        r"(?m)^[ \t]*(\d{1,4})[ \t]+(\p{Lu}[\p{L} .'\-]*[\p{L}.])[ \t]*\r?$"
    ).unwrap();

    pub static ref FIELD_LABEL: Regex = Regex::new(
        r"\b(Year of Work|Description|Sold For|Estimate|Sale of|Medium|Title|Size)\b(?:\s*:)?"
    ).unwrap();

    pub static ref BIRTH_YEAR: Regex = Regex::new(r"\bb\.\s*(\d{4})\b").unwrap();

    pub static ref LOT_BRACKET: Regex = Regex::new(r"\[Lot").unwrap();

    pub static ref CURRENCY_PREMIUM: Regex = Regex::new(r"\b([A-Z]{3})\s+Premium\b").unwrap();

    // Segmentation fallback when no index line survived: "12 Jonas Wood ###TITLE###".
    // The index must follow whitespace so "65,000 USD Name" is not an anchor.
    pub static ref INDEX_FALLBACK_ANCHOR: Regex = Regex::new(
        r"(?:^|\s)(\d{1,4}\s+\p{Lu}[\p{L} .'\-]*?\s*###TITLE###)"
    ).unwrap();

    // Artist
    pub static ref ARTIST_INDEXED: Regex = Regex::new(
        r"^\s*\d+\s+(\p{L}[\p{L}\s.'\-]*)"
    ).unwrap();

    // Labeled spans
    pub static ref TITLE_SPAN: Regex = Regex::new(r"(?s)###TITLE###(.*?)(?:###|$)").unwrap();

    pub static ref MEDIUM_SPAN: Regex = Regex::new(r"###MEDIUM###([^\n]*?)(?:###|\n|$)").unwrap();

    // Year
    pub static ref YEAR_LABELED: Regex = Regex::new(r"(?i)###YEAR###\s*(\d{4})").unwrap();

    pub static ref YEAR_DATED: Regex = Regex::new(r#"(?i)dated\s*['"]?(\d{4})"#).unwrap();

    pub static ref YEAR_SIGNED_DATED: Regex = Regex::new(r"(?is)signed.*?dated.*?(\d{4})").unwrap();

    pub static ref YEAR_SIGNATURE_CORNER: Regex = Regex::new(
        r"(?i)(\d{4})'?\s*(?:lower|upper)\s*(?:right|left)"
    ).unwrap();

    pub static ref YEAR_CREATED_IN: Regex = Regex::new(r"(?i)created in\s*(\d{4})").unwrap();

    // Dimensions, strictest first. Captures: height in, width in, height cm, width cm.
    pub static ref DIMENSIONS_EXACT: Regex = Regex::new(&format!(
        r"(?is)Size.*?Height\s*{m}\s*in\.?\s*;\s*Width\s*{m}\s*in\.?\s*/\s*Height\s*{m}\s*cm\.?\s*;\s*Width\s*{m}\s*cm",
        m = MEASURE
    )).unwrap();

    pub static ref DIMENSIONS_UNITLESS: Regex = Regex::new(&format!(
        r"(?is)Height\s*{m}\s*[^0-9]*Width\s*{m}\s*[^0-9]*Height\s*{m}\s*[^0-9]*Width\s*{m}",
        m = MEASURE
    )).unwrap();

    pub static ref DIMENSIONS_ABBREVIATED: Regex = Regex::new(&format!(
        r"(?is)Size.*?H\w*\s*{m}\s*in\w*\s*[;,.]?\s*W\w*\s*{m}\s*in\w*\s*/?\s*H\w*\s*{m}\s*cm\w*\s*[;,.]?\s*W\w*\s*{m}\s*cm",
        m = MEASURE
    )).unwrap();

    pub static ref DIMENSIONS_LENIENT: Regex = Regex::new(&format!(
        r"(?is)Height.*?{m}\s*in.*?Width.*?{m}\s*in.*?Height.*?{m}\s*cm.*?Width.*?{m}\s*cm",
        m = MEASURE
    )).unwrap();

    // Sale: "###SALE### Christie's: 10 May 2022 [Lot 14A]"
    pub static ref SALE_LOT: Regex = Regex::new(r"(?s)###SALE###(.*?)\[Lot\s*(\d+[A-Z]?)\]").unwrap();

    // Prices
    pub static ref ESTIMATE_RANGE: Regex = Regex::new(&format!(
        r"###EST###\s*({a}\s*(?:-|–|to)\s*{a}\s*[A-Z]{{3}}(?:\s*\([^)]*\))?)",
        a = AMOUNT
    )).unwrap();

    pub static ref SOLD_WITH_USD_EQUIVALENT: Regex = Regex::new(&format!(
        r"###SOLD###\s*({a}\s*[A-Z]{{3}})(?:\s*(?:Premium|Hammer))?\s*\(\s*({a}\s*USD)\s*\)",
        a = AMOUNT
    )).unwrap();

    pub static ref SOLD_AMOUNT: Regex = Regex::new(&format!(
        r"###SOLD###\s*({a}\s*[A-Z]{{3}})\b",
        a = AMOUNT
    )).unwrap();
}

/// Sold-price values for lots that did not sell for a price.
pub const DISPOSITION_TOKENS: [&str; 4] = ["Bought In", "Withdrawn", "Passed", "Not Sold"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_alternatives() {
        let caps = SOLD_AMOUNT.captures("###SOLD### 1500000 USD").unwrap();
        assert_eq!(&caps[1], "1500000 USD");

        let caps = SOLD_AMOUNT.captures("###SOLD### 1,250,000.50 HKD").unwrap();
        assert_eq!(&caps[1], "1,250,000.50 HKD");
    }

    #[test]
    fn test_index_anchor_line() {
        let text = "intro\n12 Jonas Wood\nTitle Untitled\n40 in.\n";
        let anchors: Vec<&str> = INDEX_ANCHOR_LINE
            .captures_iter(text)
            .map(|c| c.get(2).unwrap().as_str())
            .collect();
        assert_eq!(anchors, vec!["Jonas Wood"]);
    }

    #[test]
    fn test_field_label_word_bounded() {
        assert!(FIELD_LABEL.is_match("Title: Untitled"));
        assert!(!FIELD_LABEL.is_match("Subtitle and Estimated"));
    }
}
