//! Process-wide setup: logging and the shared classification table.

use std::path::Path;
use std::sync::Arc;

use volprep_core::{ClassificationTable, Result, SharedTable};

static CLASSIFICATION_TABLE: SharedTable = SharedTable::new();

/// Installs `env_logger` as the log backend.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Returns the process-wide classification table, parsing `source` on first use.
///
/// Only the first successful call parses its source. Once a table has been
/// published, later calls return it and ignore their argument.
///
/// # Errors
///
/// Returns the parse error if no table has been published yet and `source`
/// is malformed. Nothing is published in that case.
pub fn classification_table(source: &str) -> Result<Arc<ClassificationTable>> {
    CLASSIFICATION_TABLE.get_or_load(|| {
        let table = ClassificationTable::parse(source)?;
        log::info!("classification table initialized with {} labels", table.len());
        Ok(table)
    })
}

/// Like [`classification_table`], reading the source from `path`.
pub fn classification_table_from_file(path: impl AsRef<Path>) -> Result<Arc<ClassificationTable>> {
    CLASSIFICATION_TABLE.get_or_load(|| {
        let table = ClassificationTable::load(path.as_ref())?;
        log::info!(
            "classification table initialized from {} with {} labels",
            path.as_ref().display(),
            table.len()
        );
        Ok(table)
    })
}

/// Returns the process-wide table if one has been published.
pub fn published_classification_table() -> Option<Arc<ClassificationTable>> {
    CLASSIFICATION_TABLE.get()
}
