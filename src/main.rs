#[macro_use]
extern crate rocket;

use std::process;
use std::sync::Arc;

use log::{info, warn};
use rocket::fs::{FileServer, Options};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Build, Request, Rocket};
use serde_json::{json, Value};

mod boot;
mod config;
mod consumer;
mod db;
mod migrate;
mod models;
mod origin;
mod render;
mod repository;
mod routes;
mod security;
mod signal;
mod store;


use config::{AppConfig, StoreBackend};
use origin::Origin;
use security::{Binding, IdentityBinder};
use store::memory::MemoryStore;
use store::sqlite::SqliteStore;
use store::KeyedRecordStore;

#[catch(default)]
fn api_catcher(status: Status, _req: &Request<'_>) -> Json<Value> {
    Json(json!({
        "error": status.reason().unwrap_or("error"),
        "status": status.code,
    }))
}

/// Migrate the store, bind the configured bootstrap admin, and assemble the
/// server around one origin and one server-side document.
pub fn build(config: AppConfig, store: Arc<dyn KeyedRecordStore>) -> Result<Rocket<Build>, String> {
    let version = migrate::run(store.as_ref()).map_err(|e| e.to_string())?;
    info!("content schema at version {}", version);
    if let Ok(used) = store.usage_bytes() {
        info!("content store holds {} of {} bytes", used, store.quota_bytes());
    }

    let origin = Origin::new(store);
    let doc = origin.open_document();
    let binder = IdentityBinder::new(&doc, config.bootstrap_admin_email.clone());

    if let Some(email) = config.bootstrap_admin_email.as_deref() {
        if binder.resolve(email) == Binding::Unbound {
            if let Err(e) = binder.bootstrap_admin(email, &config.bootstrap_admin_name) {
                warn!("bootstrap admin not created: {}", e);
            }
        }
    }

    let sections = routes::sections::Sections::mount(&doc);

    Ok(rocket::build()
        .manage(sections)
        .manage(doc)
        .manage(binder)
        .manage(config.clone())
        .mount("/uploads", FileServer::new(&config.upload_dir, Options::Missing))
        .mount("/api", routes::api::routes())
        .mount("/api", routes::sections::routes())
        .mount("/api", routes::upload::routes())
        .register("/", catchers![api_catcher]))
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let config = AppConfig::from_figment(&rocket::Config::figment());

    // Boot check: verify/create directories
    if boot::run(&config).is_err() {
        process::exit(1);
    }

    let store: Arc<dyn KeyedRecordStore> = match config.store {
        StoreBackend::Sqlite => {
            let store = SqliteStore::open(&config.db_path, config.quota_bytes)
                .expect("Failed to open content store");
            eprintln!("Content store: {}", config.db_path);
            Arc::new(store)
        }
        StoreBackend::Memory => {
            warn!("using the in-memory content store; edits are lost on restart");
            Arc::new(MemoryStore::with_quota(config.quota_bytes))
        }
    };

    build(config, store).expect("Failed to assemble server")
}
