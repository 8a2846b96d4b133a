//! Sentinel tokens inserted into normalized catalog text.

/// Marks the start of a lot. Natural text never contains it after normalization.
pub const BOUNDARY_MARKER: &str = "@@@@";

/// Every field marker starts and ends with this delimiter.
pub const FIELD_MARKER_DELIMITER: &str = "###";

/// Field labels recognized in catalog text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldLabel {
    Title,
    Description,
    Medium,
    YearOfWork,
    Size,
    SaleOf,
    Estimate,
    SoldFor,
}

impl FieldLabel {
    pub const ALL: [FieldLabel; 8] = [
        FieldLabel::Title,
        FieldLabel::Description,
        FieldLabel::Medium,
        FieldLabel::YearOfWork,
        FieldLabel::Size,
        FieldLabel::SaleOf,
        FieldLabel::Estimate,
        FieldLabel::SoldFor,
    ];

    /// The label as printed in catalogs.
    pub fn label(&self) -> &'static str {
        match self {
            FieldLabel::Title => "Title",
            FieldLabel::Description => "Description",
            FieldLabel::Medium => "Medium",
            FieldLabel::YearOfWork => "Year of Work",
            FieldLabel::Size => "Size",
            FieldLabel::SaleOf => "Sale of",
            FieldLabel::Estimate => "Estimate",
            FieldLabel::SoldFor => "Sold For",
        }
    }

    /// The marker that replaces the label.
    pub fn marker(&self) -> &'static str {
        match self {
            FieldLabel::Title => "###TITLE###",
            FieldLabel::Description => "###DESC###",
            FieldLabel::Medium => "###MEDIUM###",
            FieldLabel::YearOfWork => "###YEAR###",
            FieldLabel::Size => "###SIZE###",
            FieldLabel::SaleOf => "###SALE###",
            FieldLabel::Estimate => "###EST###",
            FieldLabel::SoldFor => "###SOLD###",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_delimited() {
        for field in FieldLabel::ALL {
            let marker = field.marker();
            assert!(marker.starts_with(FIELD_MARKER_DELIMITER));
            assert!(marker.ends_with(FIELD_MARKER_DELIMITER));
            assert!(!marker.contains(BOUNDARY_MARKER));
        }
    }

    #[test]
    fn test_from_label() {
        assert_eq!(FieldLabel::from_label("Year of Work"), Some(FieldLabel::YearOfWork));
        assert_eq!(FieldLabel::from_label("Sold For"), Some(FieldLabel::SoldFor));
        assert_eq!(FieldLabel::from_label("Provenance"), None);
    }
}
