pub mod tag_analyzer;

pub use tag_analyzer::{TagAnalyzer, TagFrequencyTable};
