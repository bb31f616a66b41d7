use log::{error, info, warn};
use std::fs;
use std::path::Path;

use crate::config::AppConfig;
use crate::routes::upload::UploadKind;

/// Create missing directories and verify the writable ones.
/// Returns the warning count; `Err` means the server cannot run.
pub fn run(config: &AppConfig) -> Result<u32, String> {
    info!("Folio boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    let mut dirs: Vec<String> = Vec::new();
    if let Some(db_dir) = config.db_dir() {
        dirs.push(db_dir.to_string_lossy().to_string());
    }
    dirs.push(config.upload_dir.clone());
    for kind in UploadKind::ALL {
        dirs.push(
            Path::new(&config.upload_dir)
                .join(kind.subdir())
                .to_string_lossy()
                .to_string(),
        );
    }

    for dir in &dirs {
        let path = Path::new(dir);
        if !path.exists() {
            match fs::create_dir_all(path) {
                Ok(_) => info!("  Created directory: {}", dir),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir, e);
                    errors += 1;
                }
            }
        }
    }

    // ── 2. Database directory writable ──────────────────
    if let Some(db_dir) = config.db_dir() {
        if !is_writable(db_dir) {
            error!("  Database directory not writable: {}", db_dir.display());
            errors += 1;
        }
    }

    // ── 3. Uploads directory writable ───────────────────
    let uploads_dir = Path::new(&config.upload_dir);
    if uploads_dir.exists() && !is_writable(uploads_dir) {
        warn!("  Uploads directory not writable (file uploads will fail)");
        warnings += 1;
    }

    // ── 4. Bootstrap admin configured ───────────────────
    if config.bootstrap_admin_email.is_none() {
        warn!("  No bootstrap_admin_email set; the first admin must already exist");
        warnings += 1;
    }

    // ── Summary ─────────────────────────────────────────
    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        return Err(format!("{} boot error(s)", errors));
    }

    if warnings > 0 {
        warn!("Boot check passed with {} warning(s).", warnings);
    } else {
        info!("Boot check passed. All systems go.");
    }
    Ok(warnings)
}

fn is_writable(dir: &Path) -> bool {
    let test_file = dir.join(".write_test");
    match fs::write(&test_file, "test") {
        Ok(_) => {
            let _ = fs::remove_file(&test_file);
            true
        }
        Err(_) => false,
    }
}
