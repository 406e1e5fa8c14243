//! The two fixed generation runs, in order.

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use swagger_ts_core::{ClientGenerator, GenerateConfig, HttpClientType};
use tracing::info;

/// Environment variable that replaces the crate directory as the base
pub const BASE_DIR_ENV: &str = "SWAGGER_TS_GEN_BASE_DIR";

const API_SPEC: &str = "../../swagger/api/API_swagger.json";
const API_OUTPUT: &str = "../../swagger/api/typescript";
const DASH_SPEC: &str = "../../swagger/dash/Dash_swagger.json";
const DASH_OUTPUT: &str = "../../swagger/dash/typescript";

/// Directory the relative spec and output paths are resolved against
pub fn base_dir() -> PathBuf {
    match std::env::var_os(BASE_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(env!("CARGO_MANIFEST_DIR")),
    }
}

fn client_config(input: PathBuf, output: PathBuf, http_client_type: HttpClientType) -> GenerateConfig {
    let mut config = GenerateConfig::new(input, output);
    config.http_client_type = http_client_type;
    config.single_http_client = true;
    config.extract_request_body = true;
    config.extract_response_body = true;
    config.default_response_as_success = true;
    config
}

/// Public API client, using `fetch`
pub fn api_config(base: &Path) -> GenerateConfig {
    client_config(base.join(API_SPEC), base.join(API_OUTPUT), HttpClientType::Fetch)
}

/// Dashboard client, using `axios`
pub fn dash_config(base: &Path) -> GenerateConfig {
    client_config(base.join(DASH_SPEC), base.join(DASH_OUTPUT), HttpClientType::Axios)
}

/// Generate the api client, then the dash client. The first error stops the run.
pub async fn run<G: ClientGenerator>(base: &Path, generator: &G) -> swagger_ts_core::Result<()> {
    for config in [api_config(base), dash_config(base)] {
        info!("Generating {} client from {}", config.http_client_type, config.input);
        let report = generator.generate(&config).await?;
        info!(
            "Wrote {} ({} contracts, {} routes)",
            report.output_file.display(),
            report.contracts,
            report.routes
        );
    }
    Ok(())
}
