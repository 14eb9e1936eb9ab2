//! Profile record and exact-name lookups
//!
//! The profile is the read-only knowledge base the assistant answers from.
//! It is built once at process start (see [`Profile::builtin`]), shared as an
//! `Arc<Profile>`, and never mutated afterwards.

mod data;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Contact details and public links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub portfolio: String,
    pub github: String,
    pub linkedin: String,
}

/// One entry of the education history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub score: String,
    pub period: String,
}

/// A showcased project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub technologies: Vec<String>,
    /// Demo video URL, empty when there is none
    pub demo_video: String,
    /// Repository URL, empty when there is none
    pub github: String,
    /// Live site URL, empty when there is none
    pub website: String,
}

/// A position held
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub organization: String,
    pub period: String,
    pub responsibilities: Vec<String>,
}

/// A named group of technical skills
///
/// Groups are kept in a `Vec` so rendering order is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<String>,
}

/// The complete profile record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub contact: ContactInfo,
    pub summary: String,
    pub education: Vec<Education>,
    pub technical_skills: Vec<SkillGroup>,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub achievements: Vec<String>,
}

/// Named slices of the profile addressable by exact name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Contact,
    Projects,
    Skills,
    Education,
    Experience,
    Achievements,
    Summary,
}

impl Category {
    /// Every category, in the order they are advertised to callers
    pub const ALL: [Category; 7] = [
        Category::Contact,
        Category::Projects,
        Category::Skills,
        Category::Education,
        Category::Experience,
        Category::Achievements,
        Category::Summary,
    ];

    /// Canonical lower-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Education => "education",
            Self::Experience => "experience",
            Self::Achievements => "achievements",
            Self::Summary => "summary",
        }
    }

    /// Comma-separated list of accepted names, used in error messages
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_assistant::profile::Category;
    ///
    /// assert!(Category::accepted_names().starts_with("contact, projects"));
    /// ```
    pub fn accepted_names() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category name is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category '{}', expected one of: {}",
            self.0,
            Category::accepted_names()
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Exact-name parse; no keyword matching and no case folding
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl Profile {
    /// Builds the profile the assistant ships with
    pub fn builtin() -> Self {
        data::builtin_profile()
    }

    /// Structured projection of one category
    pub fn get(&self, category: Category) -> Value {
        match category {
            Category::Contact => serde_json::json!(self.contact),
            Category::Projects => serde_json::json!(self.projects),
            Category::Skills => {
                let groups: serde_json::Map<String, Value> = self
                    .technical_skills
                    .iter()
                    .map(|g| (g.category.clone(), serde_json::json!(g.skills)))
                    .collect();
                Value::Object(groups)
            }
            Category::Education => serde_json::json!(self.education),
            Category::Experience => serde_json::json!(self.experience),
            Category::Achievements => serde_json::json!(self.achievements),
            Category::Summary => Value::String(self.summary.clone()),
        }
    }

    /// Quick lookup by exact category name
    ///
    /// Returns `None` for names that are not a [`Category`], so callers can
    /// report "not found" without any error plumbing.
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_assistant::profile::Profile;
    ///
    /// let profile = Profile::builtin();
    /// assert!(profile.lookup("contact").is_some());
    /// assert!(profile.lookup("hobbies").is_none());
    /// ```
    pub fn lookup(&self, name: &str) -> Option<Value> {
        name.parse::<Category>().ok().map(|c| self.get(c))
    }
}
