pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod image;
pub mod progress;

pub use constants::*;
pub use coordinates::format_location;
pub use filename::{generate_default_csv_filename, generate_default_json_filename};
pub use image::{encode_image, mime_type_for, EncodedImage};
pub use progress::ProgressReporter;
