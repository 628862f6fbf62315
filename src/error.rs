use thiserror::Error;

/// Errors surfaced at the library boundary.
///
/// `MalformedRecord` is row-scoped: the loader reports it per rejected row
/// and keeps going, since the register extracts are known to contain
/// suppressed cells and the remaining table stays usable.
#[derive(Debug, Error)]
pub enum BevError {
    #[error("malformed record at line {line}, column '{column}': '{value}' is not a count")]
    MalformedRecord {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("unreadable row at line {line}: {source}")]
    UnreadableRow {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("unknown territorial unit '{0}'")]
    UnknownTerritory(String),

    #[error("no register extract available for year {0}")]
    UnknownYear(u16),

    #[error("median of an empty distribution is undefined")]
    EmptyDistribution,

    #[error("join key '{key}' is shared by '{first}' and '{second}' within one granularity")]
    AmbiguousJoinKey {
        key: String,
        first: String,
        second: String,
    },
}
