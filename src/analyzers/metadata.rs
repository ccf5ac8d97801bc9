use super::content::ContentAnalyzer;
use super::context::ContextAnalyzer;
use super::tags::TagExtractor;
use crate::config::Config;
use crate::models::{ContextTags, Conversation, Metadata, Term};
use crate::utils::OrderedSet;

/// Runs the three analyzers over one conversation and synthesizes its tags
#[derive(Default)]
pub struct MetadataGenerator {
    content: ContentAnalyzer,
    context: ContextAnalyzer,
    tags: TagExtractor,
}

impl MetadataGenerator {
    pub fn new(content: ContentAnalyzer, context: ContextAnalyzer, tags: TagExtractor) -> Self {
        Self { content, context, tags }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ContentAnalyzer::new(),
            ContextAnalyzer::new(),
            TagExtractor::from_config(&config.analysis, &config.stop_words),
        )
    }

    pub fn generate(&self, conversation: &Conversation) -> Metadata {
        let messages = &conversation.messages;
        let content = self.content.analyze(messages);
        let context = self.context.analyze(messages);
        let terms = self.tags.extract(messages);
        let tags = synthesize_tags(&context, &terms);

        Metadata { content, context, terms, tags }
    }
}

/// `#technology`, then `#category`, then `#stem(count)`; duplicates keep their first position
pub fn synthesize_tags(context: &ContextTags, terms: &[Term]) -> Vec<String> {
    let mut tags = OrderedSet::new();
    tags.extend(context.technologies.iter().map(|tech| format!("#{}", tech)));
    tags.extend(context.categories.iter().map(|category| format!("#{}", category)));
    tags.extend(terms.iter().map(|term| format!("#{}({})", term.stem, term.count)));
    tags.into_vec()
}
