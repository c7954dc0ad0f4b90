use strum_macros::{Display, EnumString};
use url::Url;

use crate::error::{LensError, Result};

/// Maximum number of analyses kept in the session history.
pub const HISTORY_CAPACITY: usize = 10;

/// How many object types the report lists under "Most Common Object Types".
pub const TOP_TYPES_LIMIT: usize = 5;

pub const REPORT_FILE_PREFIX: &str = "InventoryLens-Report";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Environment::Development => "http://localhost:8000",
            Environment::Production => "https://inventorylens-demo.onrender.com",
        }
    }
}

/// Where the detection service lives.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| LensError::Config(format!("invalid API base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(LensError::Config(format!("API base URL {base_url} cannot be a base")));
        }
        // Url::join replaces the last path segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url })
    }

    /// Picks the base URL for `environment`, unless `override_url` is given.
    pub fn resolve(environment: Environment, override_url: Option<&str>) -> Result<Self> {
        match override_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Self::new(url),
            None => Self::new(environment.default_base_url()),
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn analyze_url(&self) -> Result<String> {
        self.base_url
            .join("analyze")
            .map(String::from)
            .map_err(|e| LensError::Config(e.to_string()))
    }
}

/// One entry of the bundled sample gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleImage {
    pub id: u32,
    pub src: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub media_type: &'static str,
}

impl SampleImage {
    /// Inline SVG tile with the sample id, shown when `src` fails to load.
    pub fn placeholder_uri(&self) -> String {
        format!(
            "data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' width='60' height='60' \
             viewBox='0 0 60 60'><rect width='60' height='60' fill='%23f5f5f5' stroke='%23ddd'/>\
             <text x='30' y='35' text-anchor='middle' font-size='10' fill='%23999'>{}</text></svg>",
            self.id
        )
    }
}

pub const SAMPLE_IMAGES: &[SampleImage] = &[
    SampleImage {
        id: 1,
        src: "samples/1.jpg",
        name: "Sample Image 1",
        description: "Test inventory image",
        media_type: "image/jpeg",
    },
    SampleImage {
        id: 2,
        src: "samples/2.jpg",
        name: "Sample Image 2",
        description: "Test inventory image",
        media_type: "image/jpeg",
    },
    SampleImage {
        id: 3,
        src: "samples/3.jpg",
        name: "Sample Image 3",
        description: "Test inventory image",
        media_type: "image/jpeg",
    },
    SampleImage {
        id: 4,
        src: "samples/4.jpg",
        name: "Sample Image 4",
        description: "Test inventory image",
        media_type: "image/jpeg",
    },
];

pub fn sample_by_id(id: u32) -> Option<&'static SampleImage> {
    SAMPLE_IMAGES.iter().find(|sample| sample.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn environment_defaults() {
        let dev = ApiConfig::resolve(Environment::Development, None).unwrap();
        assert_eq!(dev.analyze_url().unwrap(), "http://localhost:8000/analyze");

        let prod = ApiConfig::resolve(Environment::Production, None).unwrap();
        assert_eq!(
            prod.analyze_url().unwrap(),
            "https://inventorylens-demo.onrender.com/analyze"
        );
    }

    #[test]
    fn override_keeps_base_path() {
        let config =
            ApiConfig::resolve(Environment::Production, Some("https://example.com/lens")).unwrap();
        assert_eq!(config.analyze_url().unwrap(), "https://example.com/lens/analyze");
        assert_eq!(config.base_url(), "https://example.com/lens");
    }

    #[test]
    fn blank_override_is_ignored() {
        let config = ApiConfig::resolve(Environment::Development, Some("  ")).unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000");
    }

    #[test]
    fn invalid_url_is_config_error() {
        assert!(matches!(ApiConfig::new("not a url"), Err(LensError::Config(_))));
        assert!(matches!(ApiConfig::new("mailto:ops@example.com"), Err(LensError::Config(_))));
    }

    #[test]
    fn environment_names() {
        assert_eq!(Environment::Production.to_string(), "production");
        assert_eq!(Environment::from_str("development").unwrap(), Environment::Development);
    }

    #[test]
    fn samples_have_unique_ids() {
        for sample in SAMPLE_IMAGES {
            assert_eq!(sample_by_id(sample.id), Some(sample));
            assert!(sample.media_type.starts_with("image/"));
        }
    }

    #[test]
    fn placeholder_shows_sample_id() {
        let uri = SAMPLE_IMAGES[2].placeholder_uri();
        assert!(uri.starts_with("data:image/svg+xml,<svg "));
        assert!(uri.contains(">3</text></svg>"));
        // '#' would end the data URI early.
        assert!(!uri.contains('#'));
    }
}
