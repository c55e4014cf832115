use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse orders file {path}: {source}")]
    OrdersParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read workbook {path}: {source}")]
    Workbook {
        path: String,
        #[source]
        source: calamine::XlsxError,
    },
}
