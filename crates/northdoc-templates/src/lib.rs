use std::collections::HashMap;

/// Page template with `{{lang}}`, `{{dir}}`, `{{title}}`, `{{nav}}` and
/// `{{content}}` placeholders.
pub const MAIN_TEMPLATE: &str = include_str!("../templates/main.html");

/// File name the page template is exported and looked up under.
pub const MAIN_TEMPLATE_NAME: &str = "main.html";

#[must_use]
pub fn all_templates() -> HashMap<&'static str, &'static str> {
  let mut templates = HashMap::new();
  templates.insert(MAIN_TEMPLATE_NAME, MAIN_TEMPLATE);
  templates
}
