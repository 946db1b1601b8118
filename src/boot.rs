use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config::{SiteConfig, CONFIG_FILE};

/// Required directories that will be created if missing
const REQUIRED_DIRS: &[&str] = &[
    "site",
    "site/data",
    "site/static",
    "site/static/css",
    "site/outbox",
];

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories, warns about missing optional files, and
/// aborts if the server cannot do its job at all.
pub fn run(config: &SiteConfig) {
    info!("Portfolite boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    for dir in REQUIRED_DIRS {
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

    // ── 2. Posts feed ──────────────────────────────────
    if config.feed_is_remote() {
        info!("  Posts feed is remote: {}", config.content.feed);
    } else if !Path::new(&config.content.feed).exists() {
        warn!(
            "  Posts feed not found: {} (pages will show the error state until it exists)",
            config.content.feed
        );
        warnings += 1;
    }

    // ── 3. Outbox directory writable ───────────────────
    if config.contact.enabled {
        let outbox_dir = Path::new(&config.contact.outbox)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| Path::new(".").to_path_buf());
        if outbox_dir.exists() {
            let test_file = outbox_dir.join(".write_test");
            match fs::write(&test_file, "test") {
                Ok(_) => {
                    let _ = fs::remove_file(&test_file);
                }
                Err(e) => {
                    error!("  Outbox directory not writable: {}", e);
                    errors += 1;
                }
            }
        }
    }

    // ── 4. Stylesheet present ──────────────────────────
    if !Path::new("site/static/css/site.css").exists() {
        warn!("  Missing site/static/css/site.css (pages will be unstyled)");
        warnings += 1;
    }

    // ── 5. Config file exists ──────────────────────────
    if !Path::new(CONFIG_FILE).exists() {
        warn!("  {} not found — using default config", CONFIG_FILE);
        warnings += 1;
    }

    // ── Summary ────────────────────────────────────────
    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some features may not work correctly.",
            warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}
