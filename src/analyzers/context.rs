use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ContextTags, Conversation, Message};

/// Technology detectors: label and case-insensitive keyword alternation
pub const TECHNOLOGY_PATTERNS: &[(&str, &str)] = &[
    ("python", "python|django|flask|pip"),
    ("javascript", "javascript|node|npm|react|vue|angular"),
    ("css", "css|scss|sass|styling|flexbox|grid"),
    ("database", "sql|mongodb|database|query"),
    ("git", "git|commit|merge|branch"),
    ("docker", "docker|container|image|kubernetes"),
];

/// Category detectors (Russian and English variants)
pub const CATEGORY_PATTERNS: &[(&str, &str)] = &[
    ("coding", "функция|код|программирование|разработка|function|code|programming"),
    ("architecture", "архитектура|дизайн|паттерн|структура|architecture|design|pattern"),
    ("debugging", "отладка|ошибка|исключение|баг|debug|error|exception"),
    ("optimization", "оптимизация|производительность|улучшение|optimize|performance"),
    ("learning", "обучение|изучение|tutorial|learn|guide"),
];

/// A labelled keyword detector
#[derive(Debug, Clone)]
pub struct Detector {
    pub label: String,
    pattern: Regex,
}

impl Detector {
    pub fn new(label: &str, alternation: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!("(?i){}", alternation))?;
        Ok(Self { label: label.to_string(), pattern })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

fn compile_table(table: &[(&str, &str)]) -> Vec<Detector> {
    table
        .iter()
        .map(|(label, alternation)| {
            Detector::new(label, alternation).expect("built-in detector patterns are valid")
        })
        .collect()
}

static TECHNOLOGY_DETECTORS: LazyLock<Vec<Detector>> =
    LazyLock::new(|| compile_table(TECHNOLOGY_PATTERNS));
static CATEGORY_DETECTORS: LazyLock<Vec<Detector>> =
    LazyLock::new(|| compile_table(CATEGORY_PATTERNS));

/// Detects technology and category labels by keyword matching over the whole conversation
#[derive(Debug, Clone)]
pub struct ContextAnalyzer {
    technologies: Vec<Detector>,
    categories: Vec<Detector>,
}

impl ContextAnalyzer {
    /// Analyzer over the built-in detector tables
    pub fn new() -> Self {
        Self { technologies: TECHNOLOGY_DETECTORS.clone(), categories: CATEGORY_DETECTORS.clone() }
    }

    /// Analyzer over custom detector tables
    pub fn with_detectors(technologies: Vec<Detector>, categories: Vec<Detector>) -> Self {
        Self { technologies, categories }
    }

    pub fn analyze(&self, messages: &[Message]) -> ContextTags {
        let text = Conversation::joined_text(messages);
        let mut context = ContextTags::default();

        if text.is_empty() {
            return context;
        }

        for detector in self.technologies.iter().filter(|d| d.matches(&text)) {
            context.technologies.insert(detector.label.clone());
        }
        for detector in self.categories.iter().filter(|d| d.matches(&text)) {
            context.categories.insert(detector.label.clone());
        }

        context
    }
}

impl Default for ContextAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn analyze(contents: &[&str]) -> ContextTags {
        let messages: Vec<Message> = contents.iter().map(|c| Message::new(Role::User, *c)).collect();
        ContextAnalyzer::new().analyze(&messages)
    }

    #[test]
    fn test_no_matches() {
        let context = analyze(&["hello there"]);
        assert!(context.technologies.is_empty());
        assert!(context.categories.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let context = ContextAnalyzer::new().analyze(&[]);
        assert_eq!(context, ContextTags::default());
    }

    #[test]
    fn test_case_insensitive_match() {
        let context = analyze(&["I use DJANGO daily"]);
        assert_eq!(context.technologies.as_slice(), &["python".to_string()]);
    }

    #[test]
    fn test_russian_category_match() {
        let context = analyze(&["Нужна ОТЛАДКА сервиса"]);
        assert!(context.categories.contains(&"debugging".to_string()));
    }

    #[test]
    fn test_labels_follow_table_order() {
        let context = analyze(&["docker container", "git commit", "python script"]);
        assert_eq!(
            context.technologies.as_slice(),
            &["python".to_string(), "git".to_string(), "docker".to_string()]
        );
    }

    #[test]
    fn test_scans_every_message() {
        let context = analyze(&["", "read the guide", "then run npm"]);
        assert_eq!(context.categories.as_slice(), &["learning".to_string()]);
        assert_eq!(context.technologies.as_slice(), &["javascript".to_string()]);
    }

    #[test]
    fn test_every_detector_can_fire() {
        let context = analyze(&[
            "python javascript css sql git docker code design error performance tutorial",
        ]);
        assert_eq!(context.technologies.len(), TECHNOLOGY_PATTERNS.len());
        assert_eq!(context.categories.len(), CATEGORY_PATTERNS.len());
    }

    #[test]
    fn test_custom_detector_table() {
        let analyzer = ContextAnalyzer::with_detectors(
            vec![Detector::new("rust", "rust|cargo").unwrap()],
            vec![],
        );
        let context = analyzer.analyze(&[Message::new(Role::User, "cargo build")]);
        assert_eq!(context.technologies.as_slice(), &["rust".to_string()]);
        assert!(context.categories.is_empty());
    }
}
