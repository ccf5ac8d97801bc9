use rust_stemmers::Algorithm;

use crate::config::StemmerLanguage;

/// Reduces a token to its stem
pub trait Stemmer: Send + Sync {
    fn stem(&self, token: &str) -> String;
}

/// Snowball stemmer for one language; input is lowercased first
pub struct SnowballStemmer {
    language: StemmerLanguage,
    inner: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    pub fn russian() -> Self {
        Self {
            language: StemmerLanguage::Russian,
            inner: rust_stemmers::Stemmer::create(Algorithm::Russian),
        }
    }

    pub fn english() -> Self {
        Self {
            language: StemmerLanguage::English,
            inner: rust_stemmers::Stemmer::create(Algorithm::English),
        }
    }
}

impl std::fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballStemmer").field("language", &self.language).finish()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, token: &str) -> String {
        self.inner.stem(&token.to_lowercase()).into_owned()
    }
}

/// Russian stemming for tokens containing Cyrillic, English for the rest
#[derive(Debug)]
pub struct BilingualStemmer {
    russian: SnowballStemmer,
    english: SnowballStemmer,
}

impl BilingualStemmer {
    pub fn new() -> Self {
        Self { russian: SnowballStemmer::russian(), english: SnowballStemmer::english() }
    }
}

impl Default for BilingualStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for BilingualStemmer {
    fn stem(&self, token: &str) -> String {
        if token.chars().any(is_cyrillic) {
            self.russian.stem(token)
        } else {
            self.english.stem(token)
        }
    }
}

fn is_cyrillic(ch: char) -> bool {
    matches!(ch, '\u{0400}'..='\u{04FF}')
}

/// Build the stemmer configured for `language`
pub fn stemmer_for(language: StemmerLanguage) -> Box<dyn Stemmer> {
    match language {
        StemmerLanguage::Russian => Box::new(SnowballStemmer::russian()),
        StemmerLanguage::English => Box::new(SnowballStemmer::english()),
        StemmerLanguage::Bilingual => Box::new(BilingualStemmer::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_russian_inflections_share_stem() {
        let stemmer = SnowballStemmer::russian();
        let stem = stemmer.stem("ошибка");
        assert_eq!(stemmer.stem("ошибки"), stem);
        assert_eq!(stemmer.stem("Ошибку"), stem);
        assert!(stem.starts_with("ошибк"));
    }

    #[test]
    fn test_russian_stemmer_leaves_latin_words() {
        let stemmer = SnowballStemmer::russian();
        assert_eq!(stemmer.stem("Docker"), "docker");
    }

    #[test]
    fn test_english_stemmer() {
        let stemmer = SnowballStemmer::english();
        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("Connections"), stemmer.stem("connection"));
    }

    #[test]
    fn test_bilingual_dispatches_by_script() {
        let stemmer = BilingualStemmer::new();
        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("ошибки"), SnowballStemmer::russian().stem("ошибки"));
    }

    #[test]
    fn test_stemmer_for_language() {
        assert_eq!(stemmer_for(StemmerLanguage::English).stem("running"), "run");
        assert_eq!(stemmer_for(StemmerLanguage::Russian).stem("running"), "running");
    }
}
