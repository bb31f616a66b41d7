use std::path::Path;

use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use super::{api_error, ApiError};
use crate::config::AppConfig;
use crate::security::auth::AuthenticatedUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Model,
    Document,
    Video,
}

impl UploadKind {
    pub const ALL: [UploadKind; 4] = [
        UploadKind::Image,
        UploadKind::Model,
        UploadKind::Document,
        UploadKind::Video,
    ];

    pub fn parse(value: &str) -> Option<UploadKind> {
        match value.trim().to_lowercase().as_str() {
            "image" | "images" | "avatar" | "cover" => Some(UploadKind::Image),
            "model" | "models" | "3d" => Some(UploadKind::Model),
            "document" | "documents" | "resume" | "pdf" => Some(UploadKind::Document),
            "video" | "videos" => Some(UploadKind::Video),
            _ => None,
        }
    }

    pub fn subdir(self) -> &'static str {
        match self {
            UploadKind::Image => "images",
            UploadKind::Model => "models",
            UploadKind::Document => "documents",
            UploadKind::Video => "videos",
        }
    }

    fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            UploadKind::Image => &["jpg", "jpeg", "png", "gif", "webp", "svg", "avif"],
            UploadKind::Model => &["glb", "gltf", "obj", "fbx"],
            UploadKind::Document => &["pdf", "doc", "docx", "txt", "md"],
            UploadKind::Video => &["mp4", "webm", "mov"],
        }
    }

    pub fn allows(self, ext: &str) -> bool {
        self.allowed_extensions().contains(&ext)
    }
}

/// `<prefix>_<uuid>.<ext>` under the kind's subdirectory; returns the path
/// relative to the upload root, which is also the public path under /uploads.
pub fn stored_name(kind: UploadKind, ext: &str) -> String {
    format!(
        "{}/{}_{}.{}",
        kind.subdir(),
        kind.subdir().trim_end_matches('s'),
        uuid::Uuid::new_v4(),
        ext
    )
}

#[derive(FromForm)]
pub struct UploadForm<'f> {
    pub file: TempFile<'f>,
    pub kind: String,
}

fn detect_extension(file: &TempFile<'_>) -> Option<String> {
    // Original filename first: content types for 3D models are unreliable
    file.raw_name()
        .and_then(|rn| {
            let s = rn.dangerous_unsafe_unsanitized_raw().as_str().to_string();
            s.rsplit_once('.').map(|(_, e)| e.to_lowercase())
        })
        .or_else(|| {
            file.content_type()
                .and_then(|ct| ct.extension())
                .map(|e| e.to_string().to_lowercase())
        })
}

#[post("/upload", data = "<form>")]
pub async fn upload(
    user: AuthenticatedUser,
    config: &State<AppConfig>,
    mut form: Form<UploadForm<'_>>,
) -> Result<Json<Value>, ApiError> {
    user.require(|p| p.can_upload_media)
        .map_err(|s| api_error(s, "not allowed to upload"))?;

    let kind = UploadKind::parse(&form.kind)
        .ok_or_else(|| api_error(Status::BadRequest, "unknown upload kind"))?;
    if form.file.len() == 0 {
        return Err(api_error(Status::BadRequest, "empty file"));
    }
    let ext = detect_extension(&form.file)
        .filter(|e| kind.allows(e))
        .ok_or_else(|| api_error(Status::UnsupportedMediaType, "file type not allowed"))?;

    let relative = stored_name(kind, &ext);
    let upload_root = Path::new(&config.upload_dir);
    let _ = std::fs::create_dir_all(upload_root.join(kind.subdir()));
    let dest = upload_root.join(&relative);

    if let Err(e) = form.file.persist_to(&dest).await {
        log::error!("upload to {} failed: {}", dest.display(), e);
        return Err(api_error(Status::InternalServerError, "upload failed"));
    }

    log::info!("{} uploaded {}", user.user.email, relative);
    Ok(Json(json!({ "path": format!("/uploads/{}", relative) })))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![upload]
}
