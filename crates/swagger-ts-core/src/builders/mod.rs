//! Context builders turning a parsed spec into the template context.
pub mod contracts;
pub mod routes;

use crate::config::GenerateConfig;
use crate::openapi::OpenApiContext;
use crate::utils::{comment_lines, escape_ts_string, RESERVED_TYPE_NAMES};
use serde::{Deserialize, Serialize};

pub use contracts::{Contract, ContractField, EnumMember};
pub use routes::{RouteBuilder, RouteContext, RouteOptions};

/// Routes sharing the first path segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteModule {
    pub name: String,
    pub routes: Vec<RouteContext>,
}

/// The full context handed to the templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiContext {
    pub title: String,
    pub version: String,
    pub description: Vec<String>,
    /// Base URL for doc comments
    pub base_url: String,
    /// Base URL escaped for a double-quoted string literal
    pub base_url_literal: String,
    pub api_class_name: String,
    pub http_client_type: String,
    pub single_http_client: bool,
    /// Receiver of `request` calls inside the API class
    pub client: String,
    pub contracts: Vec<Contract>,
    pub modules: Vec<RouteModule>,
    /// Routes with no module, declared directly on the API class
    pub routes: Vec<RouteContext>,
}

impl ApiContext {
    pub fn build(spec: &OpenApiContext, config: &GenerateConfig) -> crate::Result<Self> {
        let mut contracts = contracts::collect_contracts(spec);
        let options = RouteOptions {
            extract_request_body: config.extract_request_body,
            extract_response_body: config.extract_response_body,
            default_response_as_success: config.default_response_as_success,
            global_security: spec.has_global_security(),
        };

        let reserved = contracts
            .iter()
            .map(|c| c.name().to_string())
            .chain(RESERVED_TYPE_NAMES.iter().map(|name| name.to_string()))
            .chain(std::iter::once(config.api_class_name.clone()));
        let mut builder = RouteBuilder::new(options, reserved);

        let mut modules: Vec<RouteModule> = Vec::new();
        let mut routes = Vec::new();
        for op in spec.operations()? {
            let route = builder.build(&op);
            match route.module.clone() {
                Some(name) => match modules.iter_mut().find(|m| m.name == name) {
                    Some(module) => module.routes.push(route),
                    None => modules.push(RouteModule {
                        name,
                        routes: vec![route],
                    }),
                },
                None => routes.push(route),
            }
        }
        contracts.extend(builder.into_extracted());

        // Sort alphabetically for consistent output
        modules.sort_by(|a, b| a.name.cmp(&b.name));
        for module in &mut modules {
            module.routes.sort_by(|a, b| a.name.cmp(&b.name));
        }
        routes.sort_by(|a, b| a.name.cmp(&b.name));

        log::debug!(
            "Built context: {} contracts, {} modules, {} top-level routes",
            contracts.len(),
            modules.len(),
            routes.len()
        );

        let base_url = spec.base_path().unwrap_or_default();
        Ok(Self {
            title: comment_text(spec.title()),
            version: comment_text(spec.version()),
            description: spec.description().map(comment_lines).unwrap_or_default(),
            base_url: comment_text(Some(base_url.as_str())),
            base_url_literal: escape_ts_string(&base_url),
            api_class_name: config.api_class_name.clone(),
            http_client_type: config.http_client_type.as_str().to_string(),
            single_http_client: config.single_http_client,
            client: if config.single_http_client {
                "this.http".to_string()
            } else {
                "this".to_string()
            },
            contracts,
            modules,
            routes,
        })
    }

    pub fn route_count(&self) -> usize {
        self.routes.len() + self.modules.iter().map(|m| m.routes.len()).sum::<usize>()
    }
}

/// Single-line text that is safe inside a `/** */` block
fn comment_text(text: Option<&str>) -> String {
    text.map(|t| comment_lines(t).join(" ")).unwrap_or_default()
}
