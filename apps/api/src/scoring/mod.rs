// Scoring pipeline: tokenize → exact keyword match → TF-IDF similarity → blend.
// Every stage is a pure function except the estimator's cache.
pub mod blend;
pub mod cache;
pub mod catalog;
pub mod exact;
pub mod handlers;
pub mod report;
pub mod semantic;
pub mod stop_words;
pub mod tokenizer;
