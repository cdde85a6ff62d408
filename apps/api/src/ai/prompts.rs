// Prompt construction for the AI content endpoints. The "general" platform
// is deliberately omitted from prompts so the model is not steered toward
// any network's conventions.

/// Prompt for generating a fresh post from a topic.
pub fn build_generate_prompt(platform: &str, tone: &str, content_type: &str, topic: &str) -> String {
    let mut prompt = String::from("Create a social media post ");

    if platform != "general" {
        prompt.push_str(&format!("for {platform} "));
    }

    prompt.push_str(&format!("with a {tone} tone about: {topic}"));

    if content_type == "post" {
        prompt.push_str("\n\nMake it engaging and optimized for social media engagement.");
    }

    prompt
}

/// Prompt for improving existing content, with optional extra context.
pub fn build_improve_prompt(
    platform: &str,
    tone: &str,
    existing_content: &str,
    context: Option<&str>,
) -> String {
    let mut prompt = String::from("Improve the following social media content to make it more engaging ");

    if platform != "general" {
        prompt.push_str(&format!("for {platform} "));
    }

    prompt.push_str(&format!("with a {tone} tone:\n\n{existing_content}"));

    if let Some(context) = context {
        prompt.push_str(&format!("\n\nAdditional context: {context}"));
    }

    prompt
}

/// Prompt for hashtag suggestions based on existing content or the topic.
pub fn build_hashtag_prompt(platform: &str, source: &str) -> String {
    let mut prompt = String::from("Generate relevant hashtags ");

    if platform != "general" {
        prompt.push_str(&format!("for {platform} "));
    }

    prompt.push_str(&format!("based on this content: {source}"));
    prompt.push_str("\n\nProvide 5-10 relevant hashtags, each on a new line starting with #");

    prompt
}

/// Prompt for three alternative renditions of the same content.
pub fn build_variations_prompt(platform: &str, tone: &str, source: &str) -> String {
    let mut prompt = String::from("Create 3 different variations of this social media content ");

    if platform != "general" {
        prompt.push_str(&format!("for {platform} "));
    }

    prompt.push_str(&format!("with a {tone} tone:\n\n{source}"));
    prompt.push_str("\n\nSeparate each variation with a blank line.");

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_prompt_omits_general_platform() {
        let prompt = build_generate_prompt("general", "neutral", "post", "rust tips");
        assert!(prompt.starts_with("Create a social media post with a neutral tone"));
        assert!(prompt.contains("rust tips"));
        assert!(prompt.contains("optimized for social media engagement"));
    }

    #[test]
    fn generate_prompt_names_specific_platform() {
        let prompt = build_generate_prompt("linkedin", "professional", "post", "hiring");
        assert!(prompt.contains("for linkedin "));
        assert!(prompt.contains("with a professional tone about: hiring"));
    }

    #[test]
    fn generate_prompt_skips_engagement_line_for_non_posts() {
        let prompt = build_generate_prompt("general", "neutral", "thread", "rust tips");
        assert!(!prompt.contains("optimized for social media engagement"));
    }

    #[test]
    fn improve_prompt_appends_context_when_present() {
        let with = build_improve_prompt("general", "witty", "old text", Some("make it shorter"));
        assert!(with.contains("Additional context: make it shorter"));

        let without = build_improve_prompt("general", "witty", "old text", None);
        assert!(!without.contains("Additional context"));
    }

    #[test]
    fn hashtag_prompt_requests_hash_prefixed_lines() {
        let prompt = build_hashtag_prompt("twitter", "launch day");
        assert!(prompt.contains("for twitter "));
        assert!(prompt.contains("each on a new line starting with #"));
    }

    #[test]
    fn variations_prompt_requests_blank_line_separation() {
        let prompt = build_variations_prompt("general", "casual", "our new feature");
        assert!(prompt.contains("Create 3 different variations"));
        assert!(prompt.contains("Separate each variation with a blank line."));
    }
}
