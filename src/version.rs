use crate::error::PublishError;

/// Bump the patch component of a `MAJOR.MINOR.PATCH` version.
pub fn increment_patch(version: &str) -> Result<String, PublishError> {
    let invalid = || PublishError::InvalidVersion {
        version: version.to_string(),
    };

    let parts = version
        .split('.')
        .map(|part| part.parse::<u64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    let [major, minor, patch] = parts[..] else {
        return Err(invalid());
    };
    let patch = patch.checked_add(1).ok_or_else(invalid)?;

    Ok(format!("{major}.{minor}.{patch}"))
}
