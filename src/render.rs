//! View models built from consumer snapshots. Markup is out of scope; these
//! are the values a display section binds to.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::blog::BlogPost;
use crate::models::navigation::NavigationItem;
use crate::models::project::Project;
use crate::models::skill::{clamp_level, Skill};
use crate::models::timeline::TimelineItem;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillBar {
    pub id: String,
    pub name: String,
    pub level: u8,
    /// Bar fill, 20% per level.
    pub width_percent: u8,
}

pub fn skill_bar(skill: &Skill) -> SkillBar {
    let level = clamp_level(skill.level);
    SkillBar {
        id: skill.id.clone(),
        name: skill.name.clone(),
        level,
        width_percent: level * 20,
    }
}

pub fn skill_bars(skills: &[Skill]) -> Vec<SkillBar> {
    skills.iter().map(skill_bar).collect()
}

/// Skills grouped by category, categories alphabetical, skills in stored order.
pub fn skills_by_category(skills: &[Skill]) -> BTreeMap<String, Vec<SkillBar>> {
    let mut groups: BTreeMap<String, Vec<SkillBar>> = BTreeMap::new();
    for skill in skills {
        groups
            .entry(skill.category.clone())
            .or_default()
            .push(skill_bar(skill));
    }
    groups
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLink {
    pub name: String,
    pub href: String,
}

/// Active items sorted by `order`; ties keep stored order.
pub fn nav_menu(items: &[NavigationItem]) -> Vec<NavLink> {
    let mut active: Vec<&NavigationItem> = items.iter().filter(|i| i.is_active).collect();
    active.sort_by_key(|i| i.order);
    active
        .into_iter()
        .map(|i| NavLink {
            name: i.name.clone(),
            href: i.href.clone(),
        })
        .collect()
}

pub fn featured_projects(projects: &[Project]) -> Vec<&Project> {
    projects.iter().filter(|p| p.featured).collect()
}

/// Published posts, newest first.
pub fn published_posts(posts: &[BlogPost]) -> Vec<&BlogPost> {
    let mut published: Vec<&BlogPost> = posts.iter().filter(|p| p.published).collect();
    published.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    published
}

/// Newest first by leading year.
pub fn timeline_entries(items: &[TimelineItem]) -> Vec<&TimelineItem> {
    let mut sorted: Vec<&TimelineItem> = items.iter().collect();
    sorted.sort_by(|a, b| b.start_year().cmp(&a.start_year()));
    sorted
}
