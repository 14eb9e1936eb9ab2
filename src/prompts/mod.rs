//! System prompt for the assistant
//!
//! The instruction is rendered once from the profile's contact block and a
//! fixed set of answering rules, then seeded as the first turn of every
//! conversation.

use crate::profile::Profile;

/// Builds the system instruction for a profile
///
/// # Examples
///
/// ```
/// use profile_assistant::prompts::build_system_prompt;
/// use profile_assistant::profile::Profile;
///
/// let profile = Profile::builtin();
/// let prompt = build_system_prompt(&profile);
/// assert!(prompt.contains(&profile.contact.email));
/// ```
pub fn build_system_prompt(profile: &Profile) -> String {
    let c = &profile.contact;
    format!(
        "You are an AI assistant representing {name}, a {role}.
Your role is to provide accurate information about {name}'s profile, projects, skills, and experience.

Key Information:
- Name: {name}
- Role: {role}
- Email: {email}
- Phone: {phone}
- Portfolio: {portfolio}
- GitHub: {github}
- LinkedIn: {linkedin}

When answering:
1. Be concise and informative
2. Always provide relevant links when discussing projects
3. Highlight key achievements and metrics
4. Use bullet points for clarity when listing items
5. Be enthusiastic about {name}'s work and capabilities

If asked about projects, provide:
- Project name and description
- Key highlights with metrics
- Technologies used
- Links to demo video, GitHub, and live website

If asked about skills, categorize them properly:
- Generative AI skills
- Machine Learning capabilities
- Backend and Frontend expertise
- Cloud and DevOps tools

Always be ready to provide contact information and portfolio links when requested.
",
        name = c.name,
        role = c.role,
        email = c.email,
        phone = c.phone,
        portfolio = c.portfolio,
        github = c.github,
        linkedin = c.linkedin,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_the_person_and_links() {
        let profile = Profile::builtin();
        let prompt = build_system_prompt(&profile);
        assert!(prompt.starts_with("You are an AI assistant representing Anshul Parate"));
        assert!(prompt.contains(&format!("- GitHub: {}", profile.contact.github)));
        assert!(prompt.contains("Cloud and DevOps tools"));
    }

    #[test]
    fn test_prompt_is_stable() {
        let profile = Profile::builtin();
        assert_eq!(build_system_prompt(&profile), build_system_prompt(&profile));
    }
}
