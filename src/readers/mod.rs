pub mod node_reader;

pub use node_reader::NodeReader;
