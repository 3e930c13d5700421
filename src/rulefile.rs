//! Rule-file provenance checks.

use std::fs::File;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::error::RuleFileError;

/// The "write by others" permission bit.
const S_IWOTH: u32 = 0o002;

/// Open the rule file read-only and confirm it is safe to trust.
///
/// The metadata comes from the open handle, not a second path lookup, so the
/// file that was checked is the file that gets read. The returned handle is
/// closed when dropped; on every error path it is dropped here.
pub fn open_rule_file(path: &Path) -> Result<File, RuleFileError> {
    let file = File::open(path).map_err(|source| RuleFileError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let meta = file.metadata().map_err(|source| RuleFileError::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    if meta.permissions().mode() & S_IWOTH != 0 {
        return Err(RuleFileError::Insecure {
            path: path.to_path_buf(),
        });
    }
    if !meta.file_type().is_file() {
        return Err(RuleFileError::NotRegular {
            path: path.to_path_buf(),
        });
    }

    Ok(file)
}
