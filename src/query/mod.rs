pub mod builder;

pub use builder::{default_filters, QueryBuilder, TagFilter};
