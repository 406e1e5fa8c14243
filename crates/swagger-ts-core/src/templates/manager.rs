//! Template system for the generated client

// Internal imports (std, crate)
use std::error::Error as StdError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::builders::ApiContext;
use crate::error::{Error, Result};

// External imports (alphabetized)
use once_cell::sync::Lazy;
use tera::{Context, Tera};

/// Name of the entry template every render starts from
pub const ENTRY_TEMPLATE: &str = "api.ts.tera";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (ENTRY_TEMPLATE, include_str!("../../templates/api.ts.tera")),
    ("macros.tera", include_str!("../../templates/macros.tera")),
    (
        "data-contracts.ts.tera",
        include_str!("../../templates/data-contracts.ts.tera"),
    ),
    (
        "http-client-fetch.ts.tera",
        include_str!("../../templates/http-client-fetch.ts.tera"),
    ),
    (
        "http-client-axios.ts.tera",
        include_str!("../../templates/http-client-axios.ts.tera"),
    ),
];

// Parsed once per process; managers clone it before layering overrides.
static BUILTIN: Lazy<std::result::Result<Tera, String>> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_templates(BUILTIN_TEMPLATES.to_vec())
        .map_err(|e| error_chain(&e))?;
    Ok(tera)
});

/// Manages loading and rendering of the client templates
#[derive(Debug, Clone)]
pub struct TemplateManager {
    tera: Arc<Tera>,
    /// Directory whose templates override the built-in ones
    template_dir: Option<PathBuf>,
}

impl TemplateManager {
    /// Create a new TemplateManager.
    ///
    /// # Arguments
    /// * `template_dir` - Optional directory of `.tera` files. A file named like a
    ///   built-in template (for example `http-client-fetch.ts.tera`) replaces it;
    ///   every other built-in stays available.
    ///
    /// # Returns
    /// A new `TemplateManager`, or an error if the directory does not exist or a
    /// template fails to parse.
    pub fn new(template_dir: Option<&Path>) -> Result<Self> {
        let mut tera = BUILTIN.as_ref().map_err(Error::template)?.clone();

        if let Some(dir) = template_dir {
            if !dir.is_dir() {
                return Err(Error::template(format!(
                    "Template directory not found: {}",
                    dir.display()
                )));
            }

            let files = Self::discover_template_files(dir)?;
            log::debug!(
                "Loading {} template override(s) from {}",
                files.len(),
                dir.display()
            );
            tera.add_template_files(files)
                .map_err(|e| Error::template(error_chain(&e)))?;
        }

        Ok(Self {
            tera: Arc::new(tera),
            template_dir: template_dir.map(Path::to_path_buf),
        })
    }

    /// Directory the overrides were loaded from, if any
    pub fn template_dir(&self) -> Option<&Path> {
        self.template_dir.as_deref()
    }

    /// Names of every loaded template, sorted
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }

    /// Render the whole `Api.ts` source for the given context
    pub fn render(&self, ctx: &ApiContext) -> Result<String> {
        let context = Context::from_serialize(ctx)?;
        self.tera
            .render(ENTRY_TEMPLATE, &context)
            .map_err(|e| Error::template(format!("{}: {}", ENTRY_TEMPLATE, error_chain(&e))))
    }

    /// Collects every `.tera` file under `dir`, named by its path relative to `dir`.
    fn discover_template_files(dir: &Path) -> Result<Vec<(PathBuf, Option<String>)>> {
        fn walk_dir(
            root: &Path,
            dir: &Path,
            templates: &mut Vec<(PathBuf, Option<String>)>,
        ) -> std::io::Result<()> {
            for entry in std::fs::read_dir(dir)? {
                let path = entry?.path();

                if path.is_dir() {
                    walk_dir(root, &path, templates)?;
                } else if path.extension().and_then(|s| s.to_str()) == Some("tera") {
                    let name = path
                        .strip_prefix(root)
                        .unwrap_or(&path)
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    templates.push((path, Some(name)));
                }
            }
            Ok(())
        }

        let mut templates = Vec::new();
        walk_dir(dir, dir, &mut templates)?;
        templates.sort();
        Ok(templates)
    }
}

/// Flatten a tera error and its sources into one message
fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
