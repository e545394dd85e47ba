pub mod analyzer;
pub mod facts;
pub mod fetch;
pub mod rules;

pub use analyzer::{evaluate, Analysis, HtmlAnalyzer};
pub use facts::PageFacts;
pub use fetch::{PageFetcher, DOCUMENT_TIMEOUT, RESOURCE_TIMEOUT};
pub use rules::{Rule, Verdict, RULES};
