use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::model::task::TIMESTAMP_FORMAT;

/// Error log file, created next to the database.
const LOG_FILE: &str = "taskui-errors.log";

/// Where the error log lives for a database at `db_path`.
pub fn log_path_for(db_path: &Path) -> PathBuf {
    db_path.with_file_name(LOG_FILE)
}

/// Append one line describing a swallowed storage failure. The controller
/// keeps running either way; logging itself must never fail the caller.
pub fn log_storage_error(log_path: &Path, context: &str, err: &dyn Display) {
    let line = format!(
        "{} | {} | {}\n",
        Utc::now().format(TIMESTAMP_FORMAT),
        context,
        err
    );
    let _ = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .and_then(|mut file| file.write_all(line.as_bytes()));
}
