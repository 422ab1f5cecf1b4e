//! Resume profile
//!
//! Mirrors the subset of a Reactive Resume export the site reads. Every field
//! defaults when absent so partial resumes still load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Basics {
    pub name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Picture {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Website {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileItem {
    pub network: String,
    pub username: String,
    pub website: Option<Website>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub website: Option<Website>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceItem {
    pub company: String,
    pub position: String,
    pub date: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationItem {
    pub institution: String,
    pub study_type: String,
    pub area: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillItem {
    pub name: String,
    pub description: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sections {
    pub profiles: Section<ProfileItem>,
    pub projects: Section<ProjectItem>,
    pub experience: Section<ExperienceItem>,
    pub education: Section<EducationItem>,
    pub skills: Section<SkillItem>,
}

/// The parsed resume
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub basics: Basics,
    pub summary: Summary,
    pub picture: Picture,
    pub sections: Sections,
}

/// A project card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Empty when the project has no website
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub network: String,
    pub username: String,
    pub url: String,
}

impl Profile {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a resume export from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let profile = Self::from_json(&json)?;
        tracing::info!(
            "Loaded profile '{}' with {} projects from {}",
            profile.basics.name,
            profile.sections.projects.items.len(),
            path.as_ref().display()
        );
        Ok(profile)
    }

    pub fn projects(&self) -> Vec<ProjectEntry> {
        self.sections
            .projects
            .items
            .iter()
            .map(|project| ProjectEntry {
                id: project.id.clone(),
                name: project.name.clone(),
                description: project.description.clone(),
                url: project.website.as_ref().map(|w| w.url.clone()).unwrap_or_default(),
            })
            .collect()
    }

    pub fn social_links(&self) -> Vec<SocialLink> {
        self.sections
            .profiles
            .items
            .iter()
            .map(|item| SocialLink {
                network: item.network.clone(),
                username: item.username.clone(),
                url: item.website.as_ref().map(|w| w.url.clone()).unwrap_or_default(),
            })
            .collect()
    }

    pub fn skills(&self) -> &[SkillItem] {
        &self.sections.skills.items
    }

    /// Headline typed out on the about slide
    pub fn typed_headline(&self) -> String {
        format!("system.initialize('{}');", self.basics.headline)
    }
}
