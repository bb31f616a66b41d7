use rocket::figment::Figment;
use serde::Deserialize;

use crate::store::DEFAULT_QUOTA_BYTES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    /// Nothing survives a restart. Previews and demos only.
    Memory,
}

/// `[default.folio]` table of Rocket.toml (or `ROCKET_FOLIO={...}`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreBackend,
    pub db_path: String,
    pub upload_dir: String,
    pub quota_bytes: u64,
    /// The only email allowed to claim the first admin seat.
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store: StoreBackend::Sqlite,
            db_path: "website/db/folio.db".to_string(),
            upload_dir: "website/uploads".to_string(),
            quota_bytes: DEFAULT_QUOTA_BYTES,
            bootstrap_admin_email: None,
            bootstrap_admin_name: "Admin".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_figment(figment: &Figment) -> Self {
        match figment.extract_inner::<AppConfig>("folio") {
            Ok(config) => config,
            Err(e) => {
                if !e.missing() {
                    log::warn!("invalid [folio] config, using defaults: {}", e);
                }
                AppConfig::default()
            }
        }
    }

    /// Directory holding the database file.
    pub fn db_dir(&self) -> Option<&std::path::Path> {
        std::path::Path::new(&self.db_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
    }
}
