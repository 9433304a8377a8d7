use crate::constants::{FILE_DATE_FORMAT, OK_FILE_SUFFIX, OUTPUT_EXTENSION, REJECT_FILE_SUFFIX};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Paths of the accepted and rejected files for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub accepted: PathBuf,
    pub rejected: PathBuf,
}

impl OutputPaths {
    /// `<stem>_<YYYYMMDD>_ok.json` and `<stem>_<YYYYMMDD>_reject.json`.
    ///
    /// The stem is the input path without its final extension. When
    /// `output_dir` is set, only the input's file stem is kept and the files
    /// land in that directory instead of next to the input.
    pub fn for_input(input: &Path, output_dir: Option<&Path>, run_date: NaiveDate) -> Self {
        let stem = match output_dir {
            Some(dir) => dir.join(input.file_stem().unwrap_or(input.as_os_str())),
            None => input.with_extension(""),
        };
        let date = run_date.format(FILE_DATE_FORMAT).to_string();
        Self {
            accepted: suffixed(&stem, &date, OK_FILE_SUFFIX),
            rejected: suffixed(&stem, &date, REJECT_FILE_SUFFIX),
        }
    }
}

fn suffixed(stem: &Path, date: &str, suffix: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_os_string();
    name.push(format!("_{date}_{suffix}.{OUTPUT_EXTENSION}"));
    PathBuf::from(name)
}
