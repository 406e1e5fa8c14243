//! swagger-ts Core Library
//!
//! This library turns Swagger 2.0 and OpenAPI 3.x documents into a single
//! TypeScript API client file, using either a `fetch` or an `axios` transport.

pub mod builders;
pub mod config;
pub mod error;
pub mod generate;
pub mod openapi;
pub mod templates;
pub mod utils;

pub use crate::{
    builders::ApiContext,
    config::{GenerateConfig, SpecSource},
    error::{Error, Result},
    generate::{generate, ClientGenerator, GenerationReport, TypeScriptClientGenerator},
    openapi::OpenApiContext,
    templates::{HttpClientType, TemplateManager},
};
