//! Code generation entry point for the TypeScript client

use std::path::{Path, PathBuf};

use crate::{
    builders::ApiContext,
    config::GenerateConfig,
    error::Result,
    openapi::OpenApiContext,
    templates::TemplateManager,
    utils::collapse_blank_lines,
};

use tokio::fs;

/// Summary of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// The file that was written
    pub output_file: PathBuf,
    /// Number of exported type declarations
    pub contracts: usize,
    /// Number of API methods
    pub routes: usize,
}

/// Something that turns one [`GenerateConfig`] into a client on disk
#[allow(async_fn_in_trait)]
pub trait ClientGenerator {
    async fn generate(&self, config: &GenerateConfig) -> Result<GenerationReport>;
}

/// The template-backed TypeScript generator
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptClientGenerator;

impl ClientGenerator for TypeScriptClientGenerator {
    async fn generate(&self, config: &GenerateConfig) -> Result<GenerationReport> {
        generate(config).await
    }
}

/// Main entry point for code generation.
///
/// The spec is loaded, resolved and rendered completely before the output
/// directory is touched, so a failing run leaves previous output in place.
pub async fn generate(config: &GenerateConfig) -> Result<GenerationReport> {
    // 1. Validate configuration
    config.validate()?;

    // 2. Load OpenAPI schema
    let spec = OpenApiContext::from_source(&config.input).await?;
    log::debug!("Loaded OpenAPI spec from {}", config.input);

    // 3. Build the template context
    let ctx = ApiContext::build(&spec, config)?;

    // 4. Render
    let templates = TemplateManager::new(config.templates.as_deref())?;
    let source = collapse_blank_lines(&templates.render(&ctx)?);

    // 5. Write
    if config.clean_output {
        clean_dir(&config.output).await?;
    }
    fs::create_dir_all(&config.output).await?;
    let output_file = config.output_file();
    fs::write(&output_file, source).await?;

    log::info!("Generated {}", output_file.display());

    Ok(GenerationReport {
        output_file,
        contracts: ctx.contracts.len(),
        routes: ctx.route_count(),
    })
}

/// Remove everything inside `dir`, keeping the directory itself
async fn clean_dir(dir: &Path) -> Result<()> {
    if !fs::try_exists(dir).await? {
        return Ok(());
    }

    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_dir() {
            fs::remove_dir_all(&path).await?;
        } else {
            fs::remove_file(&path).await?;
        }
    }
    log::debug!("Cleaned output directory {}", dir.display());
    Ok(())
}
