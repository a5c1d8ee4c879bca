//! Prompt templates for synonym generation.

/// Default system message sent with every generation request.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "\
You are an assistant that creates icon descriptions and synonyms to improve icon searchability.
Your only task is to analyze the icon and return a list of relevant keywords separated by commas, all in lowercase.
Do not use markdown, formatting, bullets, or numbering. Just plain text.
Format your response as a simple comma-separated list.";

/// Default user prompt describing the expected answer structure.
pub const DEFAULT_USER_PROMPT: &str = "\
Look at the icon and generate a list of relevant keywords, separated by commas. Include:

- [Required] First item: Description of WHAT is shown in the icon, without commas (e.g., \"folder with blue gear\").
  - Most importantly describe objects in the icon, not what it means or does.
  - Don't separate words here, just describe the icon as a whole (e.g., \"folder with blue gear\" instead of \"folder, blue, gear\")
  - Use numbers instead of words in counts (e.g., \"2 squares\" instead of \"two squares\")
  - Don't use words like \"icon\", \"symbol\", \"image\", \"outline\", \"shape\", because they are not relevant to the icon's purpose
  - Always describe color, if it's other than gray. Don't add gray as a color, because all icons are gray by default.
  - Always describe direction of arrows (e.g., \"arrow down with bracket\")

- [Optional] Other items: What the icon is typically used for in UI (e.g., \"settings\", \"delete\", \"add\")";

/// Follow-up prompt asking the model to re-check its own answer.
pub const REVIEW_PROMPT: &str = "\
Please review the answer.
Make sure that all the rules from the first message are followed.
Double check:
- Color is included if it's not gray
- Direction of arrows is included
- Words like \"outlined\", \"filled\" are excluded
- Numbers are used as numbers, not words, e.g. \"2\" instead of \"two\"
If your previous answer already meets these criteria, you can return it unchanged.";

/// Assembled system/user prompt pair for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system_message: String,
    pub user_prompt: String,
}

/// Build the prompt pair for an icon, folding its name and any existing
/// description in front of the user prompt. Overrides replace the default
/// templates wholesale when present.
pub fn icon_synonyms_prompt(
    icon_name: &str,
    existing_description: Option<&str>,
    system_override: Option<&str>,
    user_override: Option<&str>,
) -> PromptPair {
    let mut icon_info = format!("Context from the document:\nThis is an icon named \"{}\".\n", icon_name);
    if let Some(description) = existing_description.filter(|d| !d.trim().is_empty()) {
        icon_info.push_str(&format!(
            "It currently has this description: \"{}\"\n",
            description
        ));
    }
    icon_info.push_str("\n---\n");

    PromptPair {
        system_message: system_override.unwrap_or(DEFAULT_SYSTEM_MESSAGE).to_string(),
        user_prompt: format!(
            "{}{}",
            icon_info,
            user_override.unwrap_or(DEFAULT_USER_PROMPT)
        ),
    }
}
