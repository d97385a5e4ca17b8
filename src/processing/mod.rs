//! Text cleaning and relevance scoring

pub mod scorer;
pub mod text_processor;
pub mod tfidf;
