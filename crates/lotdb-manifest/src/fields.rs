//! Canonical manifest fields and the header-synonym table that maps the
//! vendors' loosely-named spreadsheet columns onto them.

/// A canonical manifest column. Every vendor export maps onto this set;
/// columns that match nothing are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestField {
    ListingId,
    ListingTitle,
    Category,
    ProductName,
    Upc,
    Asin,
    Quantity,
    UnitRetail,
    TotalRetail,
}

impl ManifestField {
    pub const COUNT: usize = 9;

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            ManifestField::ListingId => 0,
            ManifestField::ListingTitle => 1,
            ManifestField::Category => 2,
            ManifestField::ProductName => 3,
            ManifestField::Upc => 4,
            ManifestField::Asin => 5,
            ManifestField::Quantity => 6,
            ManifestField::UnitRetail => 7,
            ManifestField::TotalRetail => 8,
        }
    }
}

impl std::fmt::Display for ManifestField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ManifestField::ListingId => "listing_id",
            ManifestField::ListingTitle => "listing_title",
            ManifestField::Category => "category",
            ManifestField::ProductName => "product_name",
            ManifestField::Upc => "upc",
            ManifestField::Asin => "asin",
            ManifestField::Quantity => "quantity",
            ManifestField::UnitRetail => "unit_retail",
            ManifestField::TotalRetail => "total_retail",
        };
        write!(f, "{name}")
    }
}

enum Rule {
    Contains(&'static str),
    Equals(&'static str),
}

impl Rule {
    fn matches(&self, header: &str) -> bool {
        match self {
            Rule::Contains(needle) => header.contains(needle),
            Rule::Equals(expected) => header == *expected,
        }
    }
}

/// Header synonyms in priority order. Order matters for overlapping names:
/// `orig. retail` must resolve via the exact-match rule before the
/// `total orig` substring rule is consulted, so a unit-retail column is
/// never misread as total retail.
const SYNONYMS: [(ManifestField, Rule); 9] = [
    (ManifestField::ListingId, Rule::Contains("listing id")),
    (ManifestField::ListingTitle, Rule::Contains("listing title")),
    (ManifestField::Category, Rule::Contains("category")),
    (ManifestField::ProductName, Rule::Contains("product name")),
    (ManifestField::Upc, Rule::Equals("upc")),
    (ManifestField::Asin, Rule::Equals("asin")),
    (ManifestField::Quantity, Rule::Equals("quantity")),
    (ManifestField::UnitRetail, Rule::Equals("orig. retail")),
    (ManifestField::TotalRetail, Rule::Contains("total orig")),
];

/// The fixed vocabulary used to recognize a header row. A row is a header
/// when at least one cell's trimmed, lowercased text is an exact member.
/// `stock image` participates in detection only; it maps to no field.
const HEADER_VOCABULARY: [&str; 10] = [
    "listing id",
    "listing title",
    "category",
    "product name",
    "upc",
    "asin",
    "quantity",
    "orig. retail",
    "total orig. retail",
    "stock image",
];

/// Classify one header cell against the synonym table.
///
/// Matching is case-insensitive on the trimmed text; rules are consulted in
/// the fixed priority order of [`SYNONYMS`].
#[must_use]
pub fn match_header(header: &str) -> Option<ManifestField> {
    let normalized = header.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    SYNONYMS
        .iter()
        .find(|(_, rule)| rule.matches(&normalized))
        .map(|(field, _)| *field)
}

/// Whether one cell's text identifies its row as the header row.
#[must_use]
pub fn is_header_cell(text: &str) -> bool {
    HEADER_VOCABULARY.contains(&text.trim().to_lowercase().as_str())
}

#[cfg(test)]
#[path = "fields_test.rs"]
mod tests;
