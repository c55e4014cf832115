pub mod coerce;
pub mod discover;
pub mod error;
pub mod fields;
pub mod normalize;
pub mod orders;
pub mod workbook;

pub use discover::{find_manifest_files, ManifestFile};
pub use error::ManifestError;
pub use fields::ManifestField;
pub use normalize::normalize_row;
pub use orders::load_orders;
pub use workbook::{extract_rows, parse_manifest_file, RawFields};
