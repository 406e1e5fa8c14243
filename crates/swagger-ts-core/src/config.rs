//! Configuration for a single client generation run.
//!
//! A [`GenerateConfig`] names the spec to read, the directory to write into and
//! the options that shape the generated client. It can be built in code or
//! loaded from a YAML or TOML file.
//!
//! # Examples
//!
//! ```no_run
//! use swagger_ts_core::config::GenerateConfig;
//! use swagger_ts_core::templates::HttpClientType;
//!
//! let mut config = GenerateConfig::new("swagger/api/API_swagger.json", "swagger/api/typescript");
//! config.http_client_type = HttpClientType::Axios;
//! config.single_http_client = true;
//! config.extract_request_body = true;
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::path::{Path, PathBuf};

use crate::templates::HttpClientType;
use crate::utils::{is_valid_identifier, RESERVED_TYPE_NAMES};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

/// Where a spec document is read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpecSource {
    /// Remote document fetched over HTTP(S)
    Url(Url),
    /// Local file
    Path(PathBuf),
}

impl From<String> for SpecSource {
    fn from(location: String) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            if let Ok(url) = Url::parse(&location) {
                return Self::Url(url);
            }
        }
        Self::Path(PathBuf::from(location))
    }
}

impl From<&str> for SpecSource {
    fn from(location: &str) -> Self {
        Self::from(location.to_string())
    }
}

impl From<PathBuf> for SpecSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for SpecSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Url> for SpecSource {
    fn from(url: Url) -> Self {
        Self::Url(url)
    }
}

impl From<SpecSource> for String {
    fn from(source: SpecSource) -> Self {
        source.to_string()
    }
}

impl fmt::Display for SpecSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Options for one `generate` invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Spec document to read
    pub input: SpecSource,

    /// Directory the generated client is written into
    pub output: PathBuf,

    /// Name of the generated file inside `output`
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Name of the generated API class
    #[serde(default = "default_api_class_name")]
    pub api_class_name: String,

    /// Transport the generated `HttpClient` is built on
    #[serde(default)]
    pub http_client_type: HttpClientType,

    /// Let the API class take a shared `HttpClient` instead of extending it
    #[serde(default)]
    pub single_http_client: bool,

    /// Declare a named `<Route>Payload` type for every request body
    #[serde(default)]
    pub extract_request_body: bool,

    /// Declare a named `<Route>Data` type for every success response body
    #[serde(default)]
    pub extract_response_body: bool,

    /// Count the `default` response as a success response
    #[serde(default)]
    pub default_response_as_success: bool,

    /// Directory with `*.tera` files overriding the built-in templates
    #[serde(default)]
    pub templates: Option<PathBuf>,

    /// Remove everything in `output` before writing
    #[serde(default)]
    pub clean_output: bool,
}

impl GenerateConfig {
    /// Create a new GenerateConfig with default values
    pub fn new(input: impl Into<SpecSource>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            file_name: default_file_name(),
            api_class_name: default_api_class_name(),
            http_client_type: HttpClientType::default(),
            single_http_client: false,
            extract_request_body: false,
            extract_response_body: false,
            default_response_as_success: false,
            templates: None,
            clean_output: false,
        }
    }

    /// Path of the file the generator writes
    pub fn output_file(&self) -> PathBuf {
        self.output.join(&self.file_name)
    }

    /// Check the options that the generator cannot recover from
    pub fn validate(&self) -> crate::Result<()> {
        if self.file_name.trim().is_empty() {
            return Err(crate::Error::config("file_name must not be empty"));
        }
        if Path::new(&self.file_name).components().count() != 1 {
            return Err(crate::Error::config(format!(
                "file_name must be a plain file name, got '{}'",
                self.file_name
            )));
        }
        if !is_valid_identifier(&self.api_class_name) {
            return Err(crate::Error::config(format!(
                "api_class_name '{}' is not a valid TypeScript identifier",
                self.api_class_name
            )));
        }
        if RESERVED_TYPE_NAMES.contains(&self.api_class_name.as_str()) {
            return Err(crate::Error::config(format!(
                "api_class_name '{}' clashes with a generated HTTP client declaration",
                self.api_class_name
            )));
        }
        Ok(())
    }

    /// Load configuration from a YAML or TOML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::of(path)?;
        let content = fs::read_to_string(path).await?;
        let config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };
        Ok(config)
    }

    /// Save configuration to a YAML or TOML file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        let content = match ConfigFormat::of(path)? {
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
            ConfigFormat::Toml => toml::to_string(self)?,
        };
        fs::write(path, content).await?;
        Ok(())
    }
}

enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    fn of(path: &Path) -> crate::Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => Err(crate::Error::config(format!(
                "Unsupported config file format: {}",
                path.display()
            ))),
        }
    }
}

fn default_file_name() -> String {
    "Api.ts".to_string()
}

fn default_api_class_name() -> String {
    "Api".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_roundtrip_yaml() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("config.yaml");

        let mut config = GenerateConfig::new("spec/openapi.json", "out");
        config.http_client_type = HttpClientType::Axios;
        config.extract_response_body = true;
        config.save(&file_path).await?;

        let loaded = GenerateConfig::from_file(&file_path).await?;
        assert_eq!(loaded, config);
        assert_eq!(loaded.file_name, "Api.ts");
        assert_eq!(loaded.api_class_name, "Api");
        assert!(!loaded.single_http_client);

        Ok(())
    }

    #[tokio::test]
    async fn test_config_from_toml_uses_defaults() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("gen.toml");
        tokio::fs::write(
            &file_path,
            "input = \"https://example.com/openapi.json\"\noutput = \"client\"\nhttp_client_type = \"axios\"\n",
        )
        .await?;

        let config = GenerateConfig::from_file(&file_path).await?;
        assert!(matches!(config.input, SpecSource::Url(_)));
        assert_eq!(config.output, PathBuf::from("client"));
        assert_eq!(config.http_client_type, HttpClientType::Axios);
        assert_eq!(config.templates, None);
        assert!(!config.clean_output);

        Ok(())
    }

    #[tokio::test]
    async fn test_config_unknown_extension() {
        let result = GenerateConfig::from_file("config.ini").await;
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_spec_source_from_location() {
        assert!(matches!(
            SpecSource::from("https://petstore.swagger.io/v2/swagger.json"),
            SpecSource::Url(_)
        ));
        assert_eq!(
            SpecSource::from("../../swagger/api/API_swagger.json"),
            SpecSource::Path(PathBuf::from("../../swagger/api/API_swagger.json"))
        );
    }

    #[test]
    fn test_validate() {
        let config = GenerateConfig::new("a.json", "out");
        assert!(config.validate().is_ok());
        assert_eq!(config.output_file(), PathBuf::from("out/Api.ts"));

        let mut bad = config.clone();
        bad.file_name = String::new();
        assert!(bad.validate().is_err());

        let mut bad = config.clone();
        bad.file_name = "nested/Api.ts".to_string();
        assert!(bad.validate().is_err());

        let mut bad = config;
        bad.api_class_name = "1Api".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_client_declaration_names() {
        for name in ["HttpClient", "ContentType", "RequestParams"] {
            let mut config = GenerateConfig::new("a.json", "out");
            config.api_class_name = name.to_string();
            let err = config.validate().unwrap_err();
            assert!(matches!(err, crate::Error::Config(_)));
            assert!(err.to_string().contains(name));
        }
    }

    #[tokio::test]
    async fn test_config_extension_checked_before_reading() -> crate::Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("missing.json");
        let result = GenerateConfig::from_file(&missing).await;
        assert!(matches!(result, Err(crate::Error::Config(_))));

        let missing_yaml = dir.path().join("missing.yaml");
        let result = GenerateConfig::from_file(&missing_yaml).await;
        assert!(matches!(result, Err(crate::Error::Io(_))));
        Ok(())
    }
}
