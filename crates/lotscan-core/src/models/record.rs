//! Auction lot records and the flat output dataset.

use serde::{Deserialize, Serialize};

/// Output table columns, in order.
pub const COLUMNS: [&str; 13] = [
    "Artist",
    "Title",
    "Medium",
    "Year",
    "Height (in)",
    "Width (in)",
    "Height (cm)",
    "Width (cm)",
    "Auction House",
    "Sale Date",
    "Lot Number",
    "Estimate Price",
    "Sold Price",
];

/// One auction lot extracted from a catalog segment.
///
/// Every attribute is a string; an empty string means the field was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionRecord {
    /// Artist name.
    pub artist: String,

    /// Work title.
    pub title: String,

    /// Medium (e.g. "Oil on canvas").
    pub medium: String,

    /// Year of the work (4 digits or empty).
    pub year: String,

    /// Height and width in inches and centimetres.
    pub dimensions: Dimensions,

    /// Sale venue, date, and lot number.
    pub sale: SaleInfo,

    /// Estimate range, with its original currency text.
    pub estimate_price: String,

    /// Sold price, or a disposition token such as "Bought In".
    pub sold_price: String,
}

/// Dimension quadruple. All four values come from one matched rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height_in: String,
    pub width_in: String,
    pub height_cm: String,
    pub width_cm: String,
}

impl Dimensions {
    /// Whether no dimension rule matched.
    pub fn is_empty(&self) -> bool {
        self.height_in.is_empty()
            && self.width_in.is_empty()
            && self.height_cm.is_empty()
            && self.width_cm.is_empty()
    }
}

/// Sale venue information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleInfo {
    /// Auction house (the whole sale span when no colon separates a date).
    pub auction_house: String,

    /// Sale date text.
    pub sale_date: String,

    /// Lot number, possibly with a letter suffix ("14A").
    pub lot_number: String,
}

impl AuctionRecord {
    /// Field values in [`COLUMNS`] order.
    pub fn to_row(&self) -> [&str; 13] {
        [
            self.artist.as_str(),
            self.title.as_str(),
            self.medium.as_str(),
            self.year.as_str(),
            self.dimensions.height_in.as_str(),
            self.dimensions.width_in.as_str(),
            self.dimensions.height_cm.as_str(),
            self.dimensions.width_cm.as_str(),
            self.sale.auction_house.as_str(),
            self.sale.sale_date.as_str(),
            self.sale.lot_number.as_str(),
            self.estimate_price.as_str(),
            self.sold_price.as_str(),
        ]
    }
}

/// Ordered records across all processed documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<AuctionRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one document's records, keeping their order.
    pub fn extend(&mut self, records: impl IntoIterator<Item = AuctionRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[AuctionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
