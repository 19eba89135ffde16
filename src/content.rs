use std::sync::LazyLock;

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::motion::ProjectFilter;

const SITE_FILE: &str = "site.json";

static SITE: LazyLock<Result<SiteContent, ContentError>> = LazyLock::new(|| load(SITE_FILE));

#[derive(Embed)]
#[folder = "content"]
pub struct Assets;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Site content not found: {0}")]
    NotFound(String),
    #[error("Couldn't parse site content: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavSection {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub group: String,
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub coming_soon: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub name: String,
    pub title: String,
    pub about: Vec<String>,
    /// Phrases the hero headline scrambles between.
    pub hero_phrases: Vec<String>,
    pub sections: Vec<NavSection>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    pub email: String,
}

impl SiteContent {
    /// `All` followed by each project category in first-seen order.
    pub fn filters(&self) -> Vec<ProjectFilter> {
        let mut filters = vec![ProjectFilter::All];
        for project in &self.projects {
            let filter = ProjectFilter::Category(project.category.clone());
            if !filters.contains(&filter) {
                filters.push(filter);
            }
        }
        filters
    }

    /// Skill groups in first-seen order, each with its skills.
    pub fn skill_groups(&self) -> Vec<(String, Vec<Skill>)> {
        let mut groups: Vec<(String, Vec<Skill>)> = Vec::new();
        for skill in &self.skills {
            match groups.iter_mut().find(|(g, _)| *g == skill.group) {
                Some((_, skills)) => skills.push(skill.clone()),
                None => groups.push((skill.group.clone(), vec![skill.clone()])),
            }
        }
        groups
    }
}

pub fn parse(json: &str) -> Result<SiteContent, ContentError> {
    serde_json::from_str(json).map_err(|e| ContentError::Parse(e.to_string()))
}

pub fn load(name: &str) -> Result<SiteContent, ContentError> {
    let file = Assets::get(name).ok_or_else(|| ContentError::NotFound(name.to_string()))?;
    let json = std::str::from_utf8(&file.data).map_err(|e| ContentError::Parse(e.to_string()))?;
    parse(json)
}

/// The embedded site content, parsed once.
pub fn site() -> Result<&'static SiteContent, ContentError> {
    SITE.as_ref().map_err(Clone::clone)
}
