use serde::{Deserialize, Serialize};

/// One titled block of an assembled demand.
///
/// Created once per assembly run and never changed afterwards. `order` need
/// not be contiguous; ties keep insertion order when sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    key: String,
    title: String,
    content: String,
    order: u32,
    required: bool,
}

impl Section {
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        order: u32,
        required: bool,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            content: content.into(),
            order,
            required,
        }
    }

    /// Section-key used in the filled-section map (e.g. "proof_of_service")
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn required(&self) -> bool {
        self.required
    }

    /// `# {title}\n\n{content}`
    pub fn to_markdown(&self) -> String {
        format!("# {}\n\n{}", self.title, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_markdown() {
        let section = Section::new("liability", "Liability", "Defendant ran the light.", 30, true);
        assert_eq!(section.to_markdown(), "# Liability\n\nDefendant ran the light.");
        assert_eq!(section.key(), "liability");
        assert!(section.required());
    }
}
