use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Concatenate every `.md` file directly inside `folder`, sorted by file
/// name, into `output_file`. Returns how many files were merged.
///
/// Section files carry a zero-padded index prefix, so file-name order is
/// document order.
pub fn merge_markdown(folder: &Path, output_file: &Path) -> Result<usize> {
    let skip = fs::canonicalize(output_file).ok();

    let mut files = Vec::new();
    for entry in fs::read_dir(folder)
        .with_context(|| format!("Failed to read folder: {}", folder.display()))?
    {
        let path = entry?.path();
        let is_markdown = path.extension().is_some_and(|ext| ext == "md");
        if !is_markdown || !path.is_file() {
            continue;
        }
        if skip.is_some() && fs::canonicalize(&path).ok() == skip {
            continue;
        }
        files.push(path);
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut merged = String::new();
    for path in &files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        merged.push_str(&content);
        merged.push_str("\n\n");
    }

    if let Some(parent) = output_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output_file, merged)
        .with_context(|| format!("Failed to write merged file: {}", output_file.display()))?;

    log::info!(
        "Concatenated {} files into {}",
        files.len(),
        output_file.display()
    );
    Ok(files.len())
}
