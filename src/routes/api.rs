use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use super::{api_error, repository_error, ApiError};
use crate::models::new_id;
use crate::models::page::{PageContent, PageContents, PageForm};
use crate::models::project::{Project, ProjectForm};
use crate::models::skill::{Skill, SkillForm};
use crate::models::timeline::TimelineItem;
use crate::origin::Document;
use crate::render;
use crate::repository::{CollectionRepository, Resource, SingletonRepository};
use crate::security::auth::AuthenticatedUser;

// ── Projects ───────────────────────────────────────────

#[get("/projects")]
pub fn projects_list(doc: &State<Document>) -> Json<Vec<Project>> {
    Json(CollectionRepository::<Project>::new(doc).read_all())
}

#[post("/projects", format = "json", data = "<form>")]
pub fn projects_create(
    user: AuthenticatedUser,
    doc: &State<Document>,
    form: Json<ProjectForm>,
) -> Result<(Status, Json<Project>), ApiError> {
    user.require(|p| p.can_manage_projects)
        .map_err(|s| api_error(s, "not allowed to manage projects"))?;
    let form = form.into_inner();
    if form.title.trim().is_empty() {
        return Err(api_error(Status::UnprocessableEntity, "title is required"));
    }

    let project = form.into_project(new_id(Project::ID_PREFIX));
    let created = CollectionRepository::<Project>::new(doc)
        .insert(project)
        .map_err(repository_error)?;
    Ok((Status::Created, Json(created)))
}

// ── Timeline ───────────────────────────────────────────

/// Newest first.
#[get("/timeline")]
pub fn timeline_list(doc: &State<Document>) -> Json<Vec<TimelineItem>> {
    let items = CollectionRepository::<TimelineItem>::new(doc).read_all();
    Json(render::timeline_entries(&items).into_iter().cloned().collect())
}

// ── Skills ─────────────────────────────────────────────

#[get("/skills")]
pub fn skills_list(doc: &State<Document>) -> Json<Vec<Skill>> {
    Json(CollectionRepository::<Skill>::new(doc).read_all())
}

#[get("/skills/<id>")]
pub fn skills_get(doc: &State<Document>, id: &str) -> Option<Json<Skill>> {
    CollectionRepository::<Skill>::new(doc).find(id).map(Json)
}

#[put("/skills/<id>", format = "json", data = "<form>")]
pub fn skills_update(
    user: AuthenticatedUser,
    doc: &State<Document>,
    id: &str,
    form: Json<SkillForm>,
) -> Result<Json<Skill>, ApiError> {
    user.require(|p| p.can_manage_skills)
        .map_err(|s| api_error(s, "not allowed to manage skills"))?;
    let skill = form.into_inner().into_skill(id.to_string());
    CollectionRepository::<Skill>::new(doc)
        .update(skill)
        .map(Json)
        .map_err(repository_error)
}

// ── Pages ──────────────────────────────────────────────

#[post("/pages", format = "json", data = "<form>")]
pub fn pages_create(
    user: AuthenticatedUser,
    doc: &State<Document>,
    form: Json<PageForm>,
) -> Result<(Status, Json<Value>), ApiError> {
    user.require(|p| p.can_manage_pages)
        .map_err(|s| api_error(s, "not allowed to manage pages"))?;
    let form = form.into_inner();
    let slug = form
        .resolved_slug()
        .ok_or_else(|| api_error(Status::UnprocessableEntity, "page needs a title or slug"))?;

    let repo = SingletonRepository::<PageContents>::new(doc);
    let mut pages = repo.read();
    let page = pages.upsert(slug.clone(), form.title, form.content).clone();
    repo.write(&pages).map_err(repository_error)?;

    Ok((Status::Created, Json(json!({ "slug": slug, "page": page }))))
}

#[get("/pages/<slug>")]
pub fn pages_get(doc: &State<Document>, slug: &str) -> Option<Json<PageContent>> {
    SingletonRepository::<PageContents>::new(doc)
        .read()
        .get(slug)
        .cloned()
        .map(Json)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        projects_list,
        projects_create,
        timeline_list,
        skills_list,
        skills_get,
        skills_update,
        pages_create,
        pages_get
    ]
}
