pub mod assessment;
pub mod gemini;
pub mod overpass;
pub mod point;

pub use assessment::{ImageAssessment, RatingSource};
pub use gemini::{GenerateContentRequest, GenerateContentResponse};
pub use overpass::{OverpassElement, OverpassResponse};
pub use point::{FeatureKind, PointRecord};
