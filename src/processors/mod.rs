pub mod normalizer;
pub mod reply_parser;

pub use normalizer::{NormalizationReport, ResponseNormalizer};
pub use reply_parser::parse_reply;
