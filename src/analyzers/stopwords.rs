use std::collections::HashSet;

/// Generic words with no topical signal (English and Russian)
pub const BUILTIN_COMMON: &[&str] = &[
    // Common technical terms
    "value", "button", "return", "const", "let", "var", "function", "class", "import", "export",
    "default", "true", "false", "null", "undefined",
    // HTML/CSS
    "div", "span", "style", "width", "height",
    // English
    "this", "that", "then", "than", "when", "what", "which", "while", "from", "into", "onto",
    "under",
    // Russian
    "это", "как", "так", "где", "когда", "что", "чтобы", "если", "или", "для",
];

/// Programming vocabulary too common in coding chats to be a useful keyword
pub const BUILTIN_TECHNICAL: &[&str] = &[
    "string", "number", "boolean", "object", "array", "async", "await", "promise", "callback",
    "component", "template", "script", "props", "emit", "computed", "methods", "watch", "mounted",
    "created",
];

/// Case-insensitive stop-word set
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    pub fn new<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let mut set = Self::default();
        set.extend(words);
        set
    }

    /// Built-in common and technical lists merged
    pub fn builtin() -> Self {
        Self::new(BUILTIN_COMMON.iter().chain(BUILTIN_TECHNICAL.iter()).copied())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn extend<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        self.words.extend(words.into_iter().map(str::to_lowercase));
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
