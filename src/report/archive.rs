use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Bundles the given report files into a deflated zip archive and deletes
/// the loose CSVs afterwards; the archive is the deliverable.
pub fn bundle_reports(files: &[PathBuf], zip_path: &Path) -> Result<()> {
    let archive = File::create(zip_path)
        .with_context(|| format!("Failed to create archive {}", zip_path.display()))?;
    let mut writer = ZipWriter::new(archive);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in files {
        if !path.exists() {
            warn!("Report file {} does not exist, skipping", path.display());
            continue;
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        writer
            .start_file(name, options)
            .with_context(|| format!("Failed to add {} to archive", path.display()))?;
        let mut source = File::open(path)?;
        io::copy(&mut source, &mut writer)?;
    }
    writer.finish()?;
    info!("Created archive {}", zip_path.display());

    for path in files {
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }
    Ok(())
}
