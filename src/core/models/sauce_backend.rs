use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SauceBackend {
    GoogleImages,
    Saucenao,
}

impl fmt::Display for SauceBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SauceBackend::GoogleImages => write!(f, "Google Images"),
            SauceBackend::Saucenao => write!(f, "SauceNAO"),
        }
    }
}

impl FromStr for SauceBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "google" | "images" | "google-images" => Ok(SauceBackend::GoogleImages),
            "saucenao" | "anime" => Ok(SauceBackend::Saucenao),
            other => Err(format!(
                "unknown backend `{other}`; expected one of google, images, saucenao, anime"
            )),
        }
    }
}
