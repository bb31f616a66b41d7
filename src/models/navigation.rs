use serde::{Deserialize, Serialize};

use super::ResourceKind;
use crate::repository::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub id: String,
    pub name: String,
    pub href: String,
    /// Sort key, >= 1. Only relative order matters.
    pub order: u32,
    pub is_active: bool,
}

fn item(id: &str, name: &str, href: &str, order: u32) -> NavigationItem {
    NavigationItem {
        id: id.to_string(),
        name: name.to_string(),
        href: href.to_string(),
        order,
        is_active: true,
    }
}

impl Resource for NavigationItem {
    const KIND: ResourceKind = ResourceKind::NavItems;
    const ID_PREFIX: &'static str = "nav";
    const PERSIST_DEFAULTS: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        vec![
            item("nav-1", "Home", "/", 1),
            item("nav-2", "About", "/#about", 2),
            item("nav-3", "Projects", "/projects", 3),
            item("nav-4", "Services", "/services", 4),
            item("nav-5", "Blog", "/blog", 5),
            item("nav-6", "Contact", "/#contact", 6),
        ]
    }
}

/// Hrefs that appear on more than one active item. Routing needs these to be
/// unique; editors surface the result instead of rejecting the write.
pub fn duplicate_active_hrefs(items: &[NavigationItem]) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut dupes = std::collections::BTreeSet::new();
    for item in items.iter().filter(|i| i.is_active) {
        if !seen.insert(item.href.as_str()) {
            dupes.insert(item.href.clone());
        }
    }
    dupes.into_iter().collect()
}
