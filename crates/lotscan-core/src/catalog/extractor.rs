//! Per-segment field extraction.

use serde::Serialize;
use tracing::debug;

use super::rules::{
    ArtistExtractor, DimensionsExtractor, EstimateExtractor, FieldExtractor,
    LabeledSpanExtractor, SaleExtractor, SoldPriceExtractor, YearExtractor,
};
use super::segmenter::Segment;
use super::Result;
use crate::models::config::SegmentationMode;
use crate::models::record::AuctionRecord;

/// Which rule produced a populated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldProvenance {
    pub field: &'static str,
    pub rule: &'static str,
    /// Position of the rule in its cascade (0 = strictest).
    pub tier: usize,
}

/// Record extracted from one segment, with field provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotExtraction {
    pub record: AuctionRecord,
    /// One entry per populated field, in column order.
    pub provenance: Vec<FieldProvenance>,
}

impl LotExtraction {
    /// Provenance of a field, if it was populated.
    pub fn provenance_of(&self, field: &str) -> Option<&FieldProvenance> {
        self.provenance.iter().find(|p| p.field == field)
    }
}

/// Runs every field cascade over a segment.
pub struct LotExtractor {
    artist: ArtistExtractor,
    title: LabeledSpanExtractor,
    medium: LabeledSpanExtractor,
    year: YearExtractor,
    dimensions: DimensionsExtractor,
    sale: SaleExtractor,
    estimate: EstimateExtractor,
    sold: SoldPriceExtractor,
}

impl LotExtractor {
    pub fn new(mode: SegmentationMode) -> Self {
        Self {
            artist: ArtistExtractor::new(mode),
            title: LabeledSpanExtractor::title(),
            medium: LabeledSpanExtractor::medium(),
            year: YearExtractor::new(),
            dimensions: DimensionsExtractor::new(),
            sale: SaleExtractor::new(),
            estimate: EstimateExtractor::new(),
            sold: SoldPriceExtractor::new(mode),
        }
    }

    /// Extract one record. Fields with no matching rule are empty.
    pub fn extract(&self, segment: &Segment) -> Result<LotExtraction> {
        let text = segment.text();
        let mut provenance = Vec::new();

        let artist = take(&self.artist, text, &mut provenance)?;
        let title = take(&self.title, text, &mut provenance)?;
        let medium = take(&self.medium, text, &mut provenance)?;
        let year = take(&self.year, text, &mut provenance)?;
        let dimensions = take(&self.dimensions, text, &mut provenance)?;
        let sale = take(&self.sale, text, &mut provenance)?;
        let estimate_price = take(&self.estimate, text, &mut provenance)?;
        let sold_price = take(&self.sold, text, &mut provenance)?;

        let record = AuctionRecord {
            artist: artist.unwrap_or_default(),
            title: title.unwrap_or_default(),
            medium: medium.unwrap_or_default(),
            year: year.unwrap_or_default(),
            dimensions: dimensions.unwrap_or_default(),
            sale: sale.unwrap_or_default(),
            estimate_price: estimate_price.unwrap_or_default(),
            sold_price: sold_price.unwrap_or_default(),
        };

        debug!(
            "Segment {}: {} of 8 fields populated",
            segment.index(),
            provenance.len()
        );

        Ok(LotExtraction { record, provenance })
    }
}

impl Default for LotExtractor {
    fn default() -> Self {
        Self::new(SegmentationMode::default())
    }
}

fn take<E: FieldExtractor>(
    extractor: &E,
    text: &str,
    provenance: &mut Vec<FieldProvenance>,
) -> Result<Option<E::Output>> {
    let Some(m) = extractor.extract(text)? else {
        return Ok(None);
    };

    debug!("{}: rule {} (tier {})", extractor.field(), m.rule, m.tier);
    provenance.push(FieldProvenance {
        field: extractor.field(),
        rule: m.rule,
        tier: m.tier,
    });
    Ok(Some(m.value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::models::record::{Dimensions, SaleInfo};
    use pretty_assertions::assert_eq;

    const LOT: &str = "12 Jonas Wood ###TITLE### Untitled ###MEDIUM### Oil on canvas ###YEAR### 2015 Size \
        Height 40 in.; Width 30 in. / Height 101.6 cm.; Width 76.2 cm. ###SALE### Christie's: 10 May \
        2022 [Lot 14A] ###EST### 50,000-70,000 USD ###SOLD### 65,000 USD";

    fn extract(mode: SegmentationMode, text: &str) -> LotExtraction {
        LotExtractor::new(mode).extract(&Segment::new(0, text)).unwrap()
    }

    #[test]
    fn test_full_lot() {
        let expected = AuctionRecord {
            artist: "Jonas Wood".to_string(),
            title: "Untitled".to_string(),
            medium: "Oil on canvas".to_string(),
            year: "2015".to_string(),
            dimensions: Dimensions {
                height_in: "40".to_string(),
                width_in: "30".to_string(),
                height_cm: "101.6".to_string(),
                width_cm: "76.2".to_string(),
            },
            sale: SaleInfo {
                auction_house: "Christie's".to_string(),
                sale_date: "10 May 2022".to_string(),
                lot_number: "14A".to_string(),
            },
            estimate_price: "50,000-70,000 USD".to_string(),
            sold_price: "65,000 USD".to_string(),
        };

        for mode in [SegmentationMode::NameAnchored, SegmentationMode::IndexAnchored] {
            let extraction = extract(mode, LOT);
            assert_eq!(extraction.record, expected);
            assert_eq!(extraction.provenance.len(), 8);
        }
    }

    #[test]
    fn test_full_lot_provenance() {
        let extraction = extract(SegmentationMode::IndexAnchored, LOT);
        assert_eq!(
            extraction.provenance_of("artist"),
            Some(&FieldProvenance { field: "artist", rule: "indexed_name", tier: 0 })
        );
        assert_eq!(extraction.provenance_of("dimensions").map(|p| p.rule), Some("size_exact"));
        assert_eq!(extraction.provenance_of("sold_price").map(|p| p.rule), Some("sold_amount"));
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let extraction = extract(SegmentationMode::NameAnchored, "Lucy Bull ###TITLE### Rise");
        let record = &extraction.record;

        assert_eq!(record.artist, "Lucy Bull");
        assert_eq!(record.title, "Rise");
        assert_eq!(record.medium, "");
        assert_eq!(record.year, "");
        assert!(record.dimensions.is_empty());
        assert_eq!(record.sale, SaleInfo::default());
        assert_eq!(record.estimate_price, "");
        assert_eq!(record.sold_price, "");
        assert_eq!(extraction.provenance_of("year"), None);
    }

    #[test]
    fn test_disposition_in_lot() {
        let extraction = extract(
            SegmentationMode::NameAnchored,
            "Harold Ancart ###TITLE### Subliminal ###EST### 80,000-120,000 USD ###SOLD### Bought In",
        );
        assert_eq!(extraction.record.sold_price, "Bought In");
        assert_eq!(extraction.record.estimate_price, "80,000-120,000 USD");
    }

    #[test]
    fn test_inconsistent_dimensions_fail_segment() {
        let segment = Segment::new(
            3,
            "Scott Kahn ###TITLE### Moon ###SIZE### Height 123456789012345678901234567890123 in.; \
             Width 30 in. / Height 1 cm.; Width 2 cm",
        );
        let err = LotExtractor::default().extract(&segment).unwrap_err();
        assert!(matches!(err, ExtractionError::InconsistentMatch { field: "dimensions", .. }));
    }
}
