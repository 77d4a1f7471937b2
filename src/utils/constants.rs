/// Overpass endpoint and target area
pub const DEFAULT_OVERPASS_URL: &str = "http://overpass-api.de/api/interpreter";
pub const DEFAULT_AREA_NAME: &str = "Troy";
pub const DEFAULT_AREA_PLACE: &str = "city";
pub const DEFAULT_AREA_STATE: &str = "New York";
pub const DEFAULT_AREA_HANDLE: &str = "troy";
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 25;

/// Tag filters selected when no feature type is requested
pub const DEFAULT_NODE_FILTERS: [(&str, Option<&str>); 6] = [
    ("amenity", None),
    ("shop", None),
    ("leisure", None),
    ("highway", Some("bus_stop")),
    ("historic", None),
    ("tourism", None),
];

/// Overpass element discriminators
pub const ELEMENT_TYPE_NODE: &str = "node";

/// Output defaults
pub const OUTPUT_STEM_SUFFIX: &str = "_nodes";
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Fixed leading CSV columns
pub const CSV_BASE_COLUMNS: [&str; 3] = ["id", "lat", "lon"];

/// Gemini generative-AI API
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const GEMINI_API_KEY_HEADER: &str = "x-goog-api-key";
pub const GEMINI_API_KEY_ENV: &str = "GEN_AI_KEY";
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Settings file and environment prefix
pub const DEFAULT_CONFIG_FILE: &str = "overpass-survey";
pub const ENV_PREFIX: &str = "OVERPASS_SURVEY";
