use serde::{Deserialize, Serialize};

use super::ResourceKind;
use crate::repository::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    #[default]
    Work,
    Education,
    Achievement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub id: String,
    pub year: String,
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub kind: TimelineKind,
}

impl TimelineItem {
    /// Leading year of values such as "2021" or "2019 - 2021". Unparseable
    /// years sort last.
    pub fn start_year(&self) -> i32 {
        self.year
            .split(|c: char| !c.is_ascii_digit())
            .find(|part| !part.is_empty())
            .and_then(|part| part.parse().ok())
            .unwrap_or(i32::MIN)
    }
}

fn entry(id: &str, year: &str, title: &str, org: &str, kind: TimelineKind) -> TimelineItem {
    TimelineItem {
        id: id.to_string(),
        year: year.to_string(),
        title: title.to_string(),
        organization: org.to_string(),
        description: String::new(),
        kind,
    }
}

impl Resource for TimelineItem {
    const KIND: ResourceKind = ResourceKind::Timeline;
    const ID_PREFIX: &'static str = "timeline";

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        vec![
            entry("timeline-1", "2018", "BSc Computer Science", "State University", TimelineKind::Education),
            entry("timeline-2", "2019 - 2021", "Frontend Developer", "Pixel Studio", TimelineKind::Work),
            entry("timeline-3", "2022", "Senior Developer", "Northwind Labs", TimelineKind::Work),
        ]
    }
}
