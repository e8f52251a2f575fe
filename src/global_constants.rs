pub const APPLICATION_NAME: &str = "sauce-resolver";

pub const LOG_TAG_MAIN: &str = "[MAIN]";
pub const LOG_TAG_HTTP: &str = "[HTTP]";
pub const LOG_TAG_GOOGLE_IMAGES: &str = "[GOOGLE_IMAGES]";
pub const LOG_TAG_SAUCENAO: &str = "[SAUCENAO]";
pub const LOG_TAG_ORCHESTRATOR: &str = "[ORCHESTRATOR]";
pub const LOG_TAG_SETTINGS: &str = "[SETTINGS]";
pub const LOG_TAG_STASH: &str = "[STASH]";

pub const SETTINGS_FILE_NAME: &str = "config.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

pub const GOOGLE_UPLOAD_FIELD_NAME: &str = "encoded_image";
pub const SAUCENAO_UPLOAD_FIELD_NAME: &str = "file";
pub const AUXILIARY_FIELD_NAME: &str = "image_content";
pub const FALLBACK_UPLOAD_FILE_NAME: &str = "image";

pub const LOCALE_PARAMETER: &str = "hl=en";
pub const MATCHING_IMAGES_MARKER: &str = "Pages that include matching images";
pub const MAX_SCRAPED_LINKS: usize = 4;

pub const LOW_SIMILARITY_THRESHOLD: f64 = 60.0;
pub const LOW_SIMILARITY_WARNING: &str = "Similarity is below 60%, results might be bad";
pub const GOOGLE_IMAGES_HEADLINE: &str = "Google Images says this is:";
pub const TITLES_HEADING: &str = "Titles:";
pub const SOURCES_HEADING: &str = "Sources:";

pub const STASHED_IMAGE_PREFIX: &str = "sauce-";
pub const MAX_STASHED_IMAGE_BYTES: usize = 20 * 1024 * 1024;
