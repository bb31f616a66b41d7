use std::collections::BTreeMap;

use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::consumer::ResourceConsumer;
use crate::models::blog::BlogPost;
use crate::models::navigation::NavigationItem;
use crate::models::project::Project;
use crate::models::service::Service;
use crate::models::settings::{FooterConfig, HeroSettings, SiteConfig};
use crate::models::skill::Skill;
use crate::models::testimonial::Testimonial;
use crate::origin::Document;
use crate::render::{self, NavLink, SkillBar};
use crate::repository::{CollectionRepository, SingletonRepository};

type Collection<T> = ResourceConsumer<CollectionRepository<T>>;
type Single<T> = ResourceConsumer<SingletonRepository<T>>;

/// Mounted consumers for every public section. Each one refreshes itself when
/// its resource changes, so handlers only read the current snapshot.
pub struct Sections {
    nav: Collection<NavigationItem>,
    skills: Collection<Skill>,
    projects: Collection<Project>,
    testimonials: Collection<Testimonial>,
    posts: Collection<BlogPost>,
    services: Collection<Service>,
    site: Single<SiteConfig>,
    hero: Single<HeroSettings>,
    footer: Single<FooterConfig>,
}

fn mounted<S: crate::consumer::Source>(source: S) -> ResourceConsumer<S> {
    let mut consumer = ResourceConsumer::new(source);
    consumer.mount();
    consumer
}

impl Sections {
    pub fn mount(doc: &Document) -> Self {
        Sections {
            nav: mounted(CollectionRepository::new(doc)),
            skills: mounted(CollectionRepository::new(doc)),
            projects: mounted(CollectionRepository::new(doc)),
            testimonials: mounted(CollectionRepository::new(doc)),
            posts: mounted(CollectionRepository::new(doc)),
            services: mounted(CollectionRepository::new(doc)),
            site: mounted(SingletonRepository::new(doc)),
            hero: mounted(SingletonRepository::new(doc)),
            footer: mounted(SingletonRepository::new(doc)),
        }
    }

    pub fn nav_menu(&self) -> Vec<NavLink> {
        render::nav_menu(&self.nav.value().unwrap_or_default())
    }

    pub fn skill_groups(&self) -> BTreeMap<String, Vec<SkillBar>> {
        render::skills_by_category(&self.skills.value().unwrap_or_default())
    }
}

#[get("/sections/navigation")]
pub fn navigation(sections: &State<Sections>) -> Json<Vec<NavLink>> {
    Json(sections.nav_menu())
}

#[get("/sections/skills")]
pub fn skills(sections: &State<Sections>) -> Json<BTreeMap<String, Vec<SkillBar>>> {
    Json(sections.skill_groups())
}

#[get("/sections/projects")]
pub fn projects(sections: &State<Sections>) -> Json<Value> {
    let all = sections.projects.value().unwrap_or_default();
    let featured: Vec<&Project> = render::featured_projects(&all);
    Json(json!({ "featured": featured, "all": all }))
}

#[get("/sections/blog")]
pub fn blog(sections: &State<Sections>) -> Json<Vec<BlogPost>> {
    let posts = sections.posts.value().unwrap_or_default();
    Json(render::published_posts(&posts).into_iter().cloned().collect())
}

#[get("/sections/testimonials")]
pub fn testimonials(sections: &State<Sections>) -> Json<Vec<Testimonial>> {
    Json(sections.testimonials.value().unwrap_or_default())
}

#[get("/sections/services")]
pub fn services(sections: &State<Sections>) -> Json<Vec<Service>> {
    Json(sections.services.value().unwrap_or_default())
}

#[get("/sections/site")]
pub fn site(sections: &State<Sections>) -> Json<Value> {
    Json(json!({
        "site": sections.site.value().unwrap_or_default(),
        "hero": sections.hero.value().unwrap_or_default(),
        "footer": sections.footer.value().unwrap_or_default(),
    }))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![navigation, skills, projects, blog, testimonials, services, site]
}
