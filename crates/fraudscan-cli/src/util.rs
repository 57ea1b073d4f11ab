use anyhow::Result;
use std::path::PathBuf;

/// Check that `path` names an existing `.csv` or `.tsv` file.
pub fn validate_tsv_or_csv_file(path: &str) -> Result<()> {
    let pb = PathBuf::from(path);

    let ext = pb
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("tsv") | Some("csv") => {}
        _ => anyhow::bail!("Data file must have a .tsv or .csv extension: {}", path),
    }

    if !pb.is_file() {
        anyhow::bail!("Data file does not exist: {}", path);
    }

    Ok(())
}
