//! Keyword-driven profile context for outgoing prompts
//!
//! Before each turn the user's message is matched against a fixed, ordered
//! list of keyword categories. The first category that matches is rendered
//! from the profile into a plain-text block that gets attached to the
//! outgoing prompt. Order matters: a message mentioning both "github" and
//! "project" resolves to contact details because contact is checked first.

use crate::profile::{Category, Profile};
use std::sync::Arc;

/// Ordered keyword table; earlier entries win ties
const KEYWORD_CATEGORIES: &[(Category, &[&str])] = &[
    (
        Category::Contact,
        &["contact", "email", "phone", "reach", "linkedin", "github"],
    ),
    (
        Category::Projects,
        &["project", "rag", "rockfall", "chatbot", "portfolio"],
    ),
    (
        Category::Skills,
        &["skill", "technology", "tech stack", "tools"],
    ),
    (
        Category::Education,
        &["education", "degree", "college", "university"],
    ),
    (
        Category::Experience,
        &["experience", "work", "job", "position"],
    ),
    (
        Category::Achievements,
        &["achievement", "award", "accomplishment"],
    ),
];

/// Resolves free-text queries to profile context blocks
///
/// Resolution is pure: the same query against the same profile always
/// produces byte-identical output.
///
/// # Examples
///
/// ```
/// use profile_assistant::context::ContextResolver;
/// use profile_assistant::profile::Profile;
/// use std::sync::Arc;
///
/// let resolver = ContextResolver::new(Arc::new(Profile::builtin()));
/// assert!(resolver.resolve("What is his email?").contains("Email:"));
/// assert_eq!(resolver.resolve("hello there"), "");
/// ```
#[derive(Debug, Clone)]
pub struct ContextResolver {
    profile: Arc<Profile>,
}

impl ContextResolver {
    /// Creates a resolver over a shared profile
    pub fn new(profile: Arc<Profile>) -> Self {
        Self { profile }
    }

    /// Returns the first category whose keywords occur in the query
    pub fn classify(&self, query: &str) -> Option<Category> {
        let query = query.to_lowercase();
        KEYWORD_CATEGORIES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| query.contains(k)))
            .map(|(category, _)| *category)
    }

    /// Renders the context block for a query, or an empty string
    pub fn resolve(&self, query: &str) -> String {
        match self.classify(query) {
            Some(category) => self.render(category),
            None => String::new(),
        }
    }

    fn render(&self, category: Category) -> String {
        let profile = &self.profile;
        match category {
            Category::Contact => {
                let c = &profile.contact;
                format!(
                    "Contact Information:\n- Email: {}\n- Phone: {}\n- Portfolio: {}\n- GitHub: {}\n- LinkedIn: {}\n",
                    c.email, c.phone, c.portfolio, c.github, c.linkedin
                )
            }
            Category::Projects => {
                let blocks: Vec<String> = profile
                    .projects
                    .iter()
                    .map(|p| {
                        format!(
                            "**{}**\n{}\nDemo: {}\nGitHub: {}\nWebsite: {}",
                            p.name, p.description, p.demo_video, p.github, p.website
                        )
                    })
                    .collect();
                format!("Projects:\n{}", blocks.join("\n\n"))
            }
            Category::Skills => {
                let lines: Vec<String> = profile
                    .technical_skills
                    .iter()
                    .map(|g| format!("**{}:** {}", g.category, g.skills.join(", ")))
                    .collect();
                format!("Technical Skills:\n{}", lines.join("\n"))
            }
            Category::Education => {
                let lines: Vec<String> = profile
                    .education
                    .iter()
                    .map(|e| {
                        format!(
                            "- {} at {} ({}) | {}",
                            e.degree, e.institution, e.score, e.period
                        )
                    })
                    .collect();
                format!("Education:\n{}", lines.join("\n"))
            }
            Category::Experience => {
                let blocks: Vec<String> = profile
                    .experience
                    .iter()
                    .map(|e| {
                        let bullets: Vec<String> = e
                            .responsibilities
                            .iter()
                            .map(|r| format!("  • {}", r))
                            .collect();
                        format!(
                            "**{}** at {} ({})\n{}",
                            e.title,
                            e.organization,
                            e.period,
                            bullets.join("\n")
                        )
                    })
                    .collect();
                format!("Experience:\n{}", blocks.join("\n"))
            }
            Category::Achievements => {
                let lines: Vec<String> = profile
                    .achievements
                    .iter()
                    .map(|a| format!("• {}", a))
                    .collect();
                format!("Achievements:\n{}", lines.join("\n"))
            }
            Category::Summary => format!("Summary:\n{}", profile.summary),
        }
    }
}
