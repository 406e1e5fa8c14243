//! OpenAPI/Swagger document loading and operation extraction.
//!
//! This module loads a spec document (Swagger 2.0 or OpenAPI 3.x, JSON or
//! YAML, from a file or a URL) and flattens its `paths` into a list of
//! [`OpenApiOperation`]s. The two spec generations describe bodies and
//! responses differently; both are normalized here so the builders never
//! need to know which one they are looking at.
//!
//! # Examples
//!
//! ```no_run
//! use swagger_ts_core::openapi::OpenApiContext;
//! use swagger_ts_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let spec = OpenApiContext::from_file("swagger/api/API_swagger.json").await?;
//!
//! if let Some(title) = spec.title() {
//!     println!("API Title: {}", title);
//! }
//! for op in spec.operations()? {
//!     println!("{} {}", op.method.to_uppercase(), op.path);
//! }
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::SpecSource;
use crate::Error;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use serde_json::{json, Map as JsonMap, Value as JsonValue};
use tokio::fs;

/// HTTP methods a path item may define, in output order
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

const JSON_CONTENT: &str = "application/json";
const FORM_DATA_CONTENT: &str = "multipart/form-data";
const URL_ENCODED_CONTENT: &str = "application/x-www-form-urlencoded";

/// Represents an OpenAPI specification
#[derive(Debug, serde::Serialize)]
#[serde(transparent)]
pub struct OpenApiContext {
    /// The raw JSON value of the OpenAPI spec
    pub json: JsonValue,
}

impl OpenApiContext {
    /// Load a spec from wherever `source` points
    pub async fn from_source(source: &SpecSource) -> crate::Result<Self> {
        match source {
            SpecSource::Url(url) => Self::from_url(url.as_str()).await,
            SpecSource::Path(path) => Self::from_file(path).await,
        }
    }

    /// Create a new OpenApiContext from a file (supports both YAML and JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::openapi(format!(
                "Failed to read OpenAPI spec at {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse_content(&content).map_err(|e| {
            Error::openapi(format!(
                "Failed to parse OpenAPI spec at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Create a new OpenApiContext from a URL (supports both YAML and JSON)
    pub async fn from_url(url: &str) -> crate::Result<Self> {
        let response = reqwest::get(url).await.map_err(|e| {
            Error::openapi(format!("Failed to fetch OpenAPI spec from {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(Error::openapi(format!(
                "Failed to fetch OpenAPI spec from {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content = response.text().await?;

        Self::parse_content(&content).map_err(|e| {
            Error::openapi(format!("Failed to parse OpenAPI spec from {}: {}", url, e))
        })
    }

    /// Parse content as either JSON or YAML
    pub fn parse_content(content: &str) -> Result<Self, String> {
        let json: JsonValue = match serde_json::from_str(content) {
            Ok(json) => json,
            // Going through serde_yaml::Value keeps integer keys such as `200:` usable.
            Err(_) => serde_yaml::from_str::<serde_yaml::Value>(content)
                .ok()
                .and_then(|yaml| serde_json::to_value(yaml).ok())
                .ok_or_else(|| "content is neither valid JSON nor YAML".to_string())?,
        };

        let doc = json
            .as_object()
            .ok_or_else(|| "document root is not an object".to_string())?;
        if !doc.contains_key("swagger") && !doc.contains_key("openapi") {
            return Err("document has no 'swagger' or 'openapi' version field".to_string());
        }

        Ok(Self { json })
    }

    /// Whether this is a Swagger 2.0 document
    pub fn is_swagger2(&self) -> bool {
        self.json.get("swagger").is_some()
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Get the version of the API
    pub fn version(&self) -> Option<&str> {
        self.json.get("info")?.get("version")?.as_str()
    }

    /// Get the description of the API
    pub fn description(&self) -> Option<&str> {
        self.json.get("info")?.get("description")?.as_str()
    }

    /// Get the base path of the API
    pub fn base_path(&self) -> Option<String> {
        // Try OpenAPI 3.0+ servers format first
        if let Some(url) = self
            .json
            .get("servers")
            .and_then(JsonValue::as_array)
            .and_then(|servers| servers.first())
            .and_then(|server| server.get("url"))
            .and_then(JsonValue::as_str)
        {
            return Some(url.to_string());
        }

        // Fall back to Swagger 2.0 host + basePath format
        let host = self.json.get("host").and_then(JsonValue::as_str);
        let base_path = self.json.get("basePath").and_then(JsonValue::as_str);
        if host.is_none() && base_path.is_none() {
            return None;
        }
        let Some(host) = host else {
            return base_path.map(String::from);
        };

        let scheme = match self.json.get("schemes").and_then(JsonValue::as_array) {
            Some(schemes) if schemes.iter().any(|s| s.as_str() == Some("https")) => "https",
            Some(schemes) => schemes.first().and_then(JsonValue::as_str).unwrap_or("http"),
            None => "http",
        };

        Some(format!(
            "{}://{}{}",
            scheme,
            host,
            base_path.unwrap_or("").trim_end_matches('/')
        ))
    }

    /// Named schemas: `definitions` for Swagger 2.0, `components.schemas` otherwise
    pub fn schemas(&self) -> Option<&JsonMap<String, JsonValue>> {
        if self.is_swagger2() {
            self.json.get("definitions")?.as_object()
        } else {
            self.json.get("components")?.get("schemas")?.as_object()
        }
    }

    /// Whether the document requires authentication for operations by default
    pub fn has_global_security(&self) -> bool {
        self.json
            .get("security")
            .and_then(JsonValue::as_array)
            .is_some_and(|s| !s.is_empty())
    }

    /// Look up a local `$ref` such as `#/definitions/v1.User`
    pub fn resolve_ref(&self, reference: &str) -> Option<&JsonValue> {
        let pointer = reference.strip_prefix('#')?;
        self.json.pointer(pointer)
    }

    /// Follow `$ref` chains until a non-reference value is reached
    pub fn resolve<'a>(&'a self, value: &'a JsonValue) -> crate::Result<&'a JsonValue> {
        let mut current = value;
        // A cycle of pure references can never terminate, so cap the depth.
        for _ in 0..32 {
            match current.get("$ref").and_then(JsonValue::as_str) {
                Some(reference) => {
                    current = self.resolve_ref(reference).ok_or_else(|| {
                        Error::openapi(format!("Unresolvable reference '{}'", reference))
                    })?;
                }
                None => return Ok(current),
            }
        }
        Err(Error::openapi("Reference chain is too deep"))
    }

    /// Flatten every path item into operations, sorted by path then method
    pub fn operations(&self) -> crate::Result<Vec<OpenApiOperation>> {
        let paths = self
            .json
            .get("paths")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| Error::openapi("Missing 'paths' object"))?;

        let mut operations = Vec::new();
        for (path, item) in paths {
            let item = self.resolve(item)?;
            let shared_params = self.extract_parameters(item.get("parameters"))?;

            for method in HTTP_METHODS {
                let Some(op) = item.get(method).and_then(JsonValue::as_object) else {
                    continue;
                };
                let own_params = self.extract_parameters(op.get("parameters"))?;
                let parameters = merge_parameters(shared_params.clone(), own_params);
                operations.push(self.build_operation(path, method, op, parameters)?);
            }
        }
        Ok(operations)
    }

    fn build_operation(
        &self,
        path: &str,
        method: &str,
        op: &JsonMap<String, JsonValue>,
        parameters: Vec<OpenApiParameter>,
    ) -> crate::Result<OpenApiOperation> {
        let get_str = |key: &str| op.get(key).and_then(JsonValue::as_str).map(String::from);

        let (parameters, body_params): (Vec<_>, Vec<_>) = parameters
            .into_iter()
            .partition(|p| p.in_ != "body" && p.in_ != "formData");

        let request_body = if self.is_swagger2() {
            self.swagger2_request_body(op, body_params)
        } else {
            match op.get("requestBody") {
                Some(body) => self.openapi3_request_body(body)?,
                None => None,
            }
        };

        let mut responses = BTreeMap::new();
        if let Some(map) = op.get("responses").and_then(JsonValue::as_object) {
            for (status, response) in map {
                if status.starts_with("x-") {
                    continue;
                }
                let response = self.resolve(response)?;
                responses.insert(status.clone(), self.extract_response(response));
            }
        }

        Ok(OpenApiOperation {
            id: get_str("operationId"),
            method: method.to_string(),
            path: path.to_string(),
            tags: op
                .get("tags")
                .and_then(JsonValue::as_array)
                .map(|arr| {
                    arr.iter()
                        .filter_map(JsonValue::as_str)
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            summary: get_str("summary"),
            description: get_str("description"),
            deprecated: op
                .get("deprecated")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
            parameters,
            request_body,
            responses,
            security: op.get("security").and_then(JsonValue::as_array).cloned(),
        })
    }

    /// Parse a `parameters` array, resolving `$ref` entries
    pub fn extract_parameters(
        &self,
        parameters: Option<&JsonValue>,
    ) -> crate::Result<Vec<OpenApiParameter>> {
        let Some(list) = parameters.and_then(JsonValue::as_array) else {
            return Ok(Vec::new());
        };

        let mut result = Vec::with_capacity(list.len());
        for param in list {
            let param = self.resolve(param)?;
            let raw: RawParameter = serde_json::from_value(param.clone()).map_err(|e| {
                Error::openapi(format!("Invalid parameter definition {}: {}", param, e))
            })?;
            result.push(raw.into_parameter());
        }
        Ok(result)
    }

    fn swagger2_request_body(
        &self,
        op: &JsonMap<String, JsonValue>,
        body_params: Vec<OpenApiParameter>,
    ) -> Option<OpenApiRequestBody> {
        let consumes = self.media_types(op, "consumes");

        if let Some(body) = body_params.iter().find(|p| p.in_ == "body") {
            let content_type = if consumes.is_empty() || consumes.iter().any(|c| is_json(c)) {
                JSON_CONTENT.to_string()
            } else {
                consumes[0].clone()
            };
            return Some(OpenApiRequestBody {
                content_type,
                schema: body.schema.clone(),
                required: body.required,
                description: body.description.clone(),
            });
        }

        let fields: Vec<_> = body_params.iter().filter(|p| p.in_ == "formData").collect();
        if fields.is_empty() {
            return None;
        }

        let has_file = fields
            .iter()
            .any(|p| p.schema.get("type").and_then(JsonValue::as_str) == Some("file"));
        let content_type =
            if !has_file && consumes.iter().any(|c| c == URL_ENCODED_CONTENT) {
                URL_ENCODED_CONTENT
            } else {
                FORM_DATA_CONTENT
            };

        let mut properties = JsonMap::new();
        let mut required = Vec::new();
        for field in &fields {
            let mut schema = field.schema.clone();
            if let (Some(obj), Some(desc)) = (schema.as_object_mut(), &field.description) {
                obj.entry("description").or_insert_with(|| json!(desc));
            }
            properties.insert(field.name.clone(), schema);
            if field.required {
                required.push(json!(field.name));
            }
        }

        Some(OpenApiRequestBody {
            content_type: content_type.to_string(),
            required: !required.is_empty(),
            schema: json!({
                "type": "object",
                "properties": properties,
                "required": required,
            }),
            description: None,
        })
    }

    fn openapi3_request_body(&self, body: &JsonValue) -> crate::Result<Option<OpenApiRequestBody>> {
        let body = self.resolve(body)?;
        let Some(content) = body.get("content").and_then(JsonValue::as_object) else {
            return Ok(None);
        };
        let Some((content_type, media)) = pick_media_type(content) else {
            return Ok(None);
        };

        Ok(Some(OpenApiRequestBody {
            content_type: content_type.to_string(),
            schema: media.get("schema").cloned().unwrap_or_else(|| json!({})),
            required: body
                .get("required")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
            description: body
                .get("description")
                .and_then(JsonValue::as_str)
                .map(String::from),
        }))
    }

    fn extract_response(&self, response: &JsonValue) -> OpenApiResponse {
        let description = response
            .get("description")
            .and_then(JsonValue::as_str)
            .map(String::from);

        if self.is_swagger2() {
            return OpenApiResponse {
                description,
                content_type: response.get("schema").map(|_| JSON_CONTENT.to_string()),
                schema: response.get("schema").cloned(),
            };
        }

        let picked = response
            .get("content")
            .and_then(JsonValue::as_object)
            .and_then(pick_media_type);
        OpenApiResponse {
            description,
            content_type: picked.map(|(content_type, _)| content_type.to_string()),
            schema: picked.and_then(|(_, media)| media.get("schema").cloned()),
        }
    }

    fn media_types(&self, op: &JsonMap<String, JsonValue>, key: &str) -> Vec<String> {
        op.get(key)
            .or_else(|| self.json.get(key))
            .and_then(JsonValue::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(JsonValue::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn is_json(content_type: &str) -> bool {
    content_type.contains("json")
}

/// Prefer JSON, then form encodings, then whatever comes first
fn pick_media_type(content: &JsonMap<String, JsonValue>) -> Option<(&str, &JsonValue)> {
    content
        .iter()
        .find(|(k, _)| is_json(k))
        .or_else(|| content.iter().find(|(k, _)| *k == FORM_DATA_CONTENT))
        .or_else(|| content.iter().find(|(k, _)| *k == URL_ENCODED_CONTENT))
        .or_else(|| content.iter().next())
        .map(|(k, v)| (k.as_str(), v))
}

/// Operation-level parameters replace path-level ones with the same name and location
fn merge_parameters(
    shared: Vec<OpenApiParameter>,
    own: Vec<OpenApiParameter>,
) -> Vec<OpenApiParameter> {
    let mut merged: Vec<OpenApiParameter> = shared
        .into_iter()
        .filter(|s| !own.iter().any(|o| o.name == s.name && o.in_ == s.in_))
        .collect();
    merged.extend(own);
    merged
}

#[derive(Deserialize)]
struct RawParameter {
    name: String,
    #[serde(rename = "in")]
    in_: String,
    description: Option<String>,
    #[serde(default)]
    required: bool,
    schema: Option<JsonValue>,
    content: Option<JsonMap<String, JsonValue>>,
    #[serde(flatten)]
    rest: JsonMap<String, JsonValue>,
}

impl RawParameter {
    fn into_parameter(self) -> OpenApiParameter {
        // Swagger 2.0 puts type/format/items/enum on the parameter itself.
        let schema = self
            .schema
            .or_else(|| {
                self.content
                    .as_ref()
                    .and_then(pick_media_type)
                    .and_then(|(_, media)| media.get("schema").cloned())
            })
            .unwrap_or(JsonValue::Object(self.rest));
        OpenApiParameter {
            required: self.required || self.in_ == "path",
            name: self.name,
            in_: self.in_,
            description: self.description,
            schema,
        }
    }
}

/// One operation (path + method) with spec-version differences normalized away
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OpenApiOperation {
    /// The `operationId`, if the spec gives one
    pub id: Option<String>,
    /// Lowercase HTTP method
    pub method: String,
    /// The path where this operation is defined (e.g., "/api/user/{id}")
    pub path: String,
    /// Tags used to group operations in documentation
    pub tags: Vec<String>,
    /// A short summary of what the operation does.
    pub summary: Option<String>,
    /// A verbose explanation of the operation behavior.
    pub description: Option<String>,
    /// Declares this operation to be deprecated.
    pub deprecated: bool,
    /// Path, query, header and cookie parameters
    pub parameters: Vec<OpenApiParameter>,
    /// The request body, from `requestBody`, an `in: body` parameter or `in: formData` fields
    pub request_body: Option<OpenApiRequestBody>,
    /// Responses keyed by status code (or `default`)
    pub responses: BTreeMap<String, OpenApiResponse>,
    /// Operation-level security requirements; `None` inherits the global ones
    pub security: Option<Vec<JsonValue>>,
}

/// A single non-body parameter
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OpenApiParameter {
    /// The name of the parameter. Parameter names are case sensitive.
    pub name: String,
    /// The location of the parameter: "query", "header", "path", "cookie", "body" or "formData".
    #[serde(rename = "in")]
    pub in_: String,
    /// A brief description of the parameter.
    pub description: Option<String>,
    /// Whether the parameter is mandatory. Always true for path parameters.
    pub required: bool,
    /// The schema of the parameter value
    pub schema: JsonValue,
}

/// A request body with its chosen media type
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OpenApiRequestBody {
    pub content_type: String,
    pub schema: JsonValue,
    pub required: bool,
    pub description: Option<String>,
}

/// A response with its chosen media type and schema
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct OpenApiResponse {
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub schema: Option<JsonValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn swagger2() -> OpenApiContext {
        OpenApiContext {
            json: json!({
                "swagger": "2.0",
                "info": {"title": "sphere", "version": "1.0.0", "description": "sphere dash docs"},
                "host": "localhost:8800",
                "security": [{"ApiKeyAuth": []}],
                "parameters": {
                    "pageParam": {"name": "page", "in": "query", "type": "integer"}
                },
                "paths": {
                    "/api/user/{id}": {
                        "parameters": [
                            {"name": "id", "in": "path", "type": "integer"},
                            {"name": "trace", "in": "header", "type": "string"}
                        ],
                        "get": {
                            "operationId": "getUser",
                            "parameters": [
                                {"$ref": "#/parameters/pageParam"},
                                {"name": "trace", "in": "header", "type": "string", "required": true}
                            ],
                            "responses": {
                                "200": {"description": "OK", "schema": {"$ref": "#/definitions/v1.User"}}
                            }
                        },
                        "post": {
                            "consumes": ["application/x-www-form-urlencoded"],
                            "parameters": [
                                {"name": "nick", "in": "formData", "type": "string", "required": true},
                                {"name": "age", "in": "formData", "type": "integer"}
                            ],
                            "responses": {"default": {"$ref": "#/responses/Error"}}
                        },
                        "put": {
                            "parameters": [
                                {"name": "body", "in": "body", "required": true, "schema": {"$ref": "#/definitions/v1.User"}}
                            ],
                            "responses": {"204": {"description": "No Content"}}
                        }
                    }
                },
                "responses": {
                    "Error": {"description": "failure", "schema": {"type": "string"}}
                },
                "definitions": {"v1.User": {"type": "object"}}
            }),
        }
    }

    #[tokio::test]
    async fn test_from_file() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("openapi.json");
        let json_content = r#"
        {
            "openapi": "3.0.0",
            "info": {
                "title": "Test API Async",
                "version": "2.0.0"
            },
            "servers": [
                {
                    "url": "https://api.example.com/v2"
                }
            ],
            "paths": {}
        }
        "#;
        tokio::fs::write(&file_path, json_content).await?;

        let spec = OpenApiContext::from_file(&file_path).await?;
        assert_eq!(spec.title(), Some("Test API Async"));
        assert_eq!(spec.version(), Some("2.0.0"));
        assert!(!spec.is_swagger2());
        assert_eq!(
            spec.base_path(),
            Some("https://api.example.com/v2".to_string())
        );
        assert!(spec.operations()?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_from_file_yaml() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("openapi.yaml");
        tokio::fs::write(
            &file_path,
            "swagger: '2.0'\ninfo:\n  title: Yaml API\n  version: 0.1.0\npaths:\n  /ping:\n    get:\n      responses:\n        200:\n          description: pong\n",
        )
        .await?;

        let spec = OpenApiContext::from_file(&file_path).await?;
        assert!(spec.is_swagger2());
        assert_eq!(spec.title(), Some("Yaml API"));
        let ops = spec.operations()?;
        assert!(ops[0].responses.contains_key("200"));
        Ok(())
    }

    #[tokio::test]
    async fn test_from_file_missing() {
        let err = OpenApiContext::from_file("/nonexistent/API_swagger.json")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::OpenApi(_)));
        assert!(err.to_string().contains("API_swagger.json"));
    }

    #[test]
    fn test_parse_content_rejects_non_specs() {
        assert!(OpenApiContext::parse_content("{ \"paths\": ").is_err());
        assert!(OpenApiContext::parse_content("just some text").is_err());
        assert!(OpenApiContext::parse_content("{\"info\": {}}").is_err());
        assert!(OpenApiContext::parse_content("{\"openapi\": \"3.1.0\"}").is_ok());
    }

    #[test]
    fn test_swagger2_base_path() {
        let spec = swagger2();
        assert_eq!(spec.base_path(), Some("http://localhost:8800".to_string()));

        let spec = OpenApiContext {
            json: json!({"swagger": "2.0", "host": "api.example.com", "basePath": "/v1/", "schemes": ["http", "https"]}),
        };
        assert_eq!(spec.base_path(), Some("https://api.example.com/v1".to_string()));

        let spec = OpenApiContext { json: json!({"swagger": "2.0"}) };
        assert_eq!(spec.base_path(), None);
    }

    #[test]
    fn test_operations_merge_and_resolve_parameters() -> crate::Result<()> {
        let spec = swagger2();
        let ops = spec.operations()?;
        let methods: Vec<_> = ops.iter().map(|op| op.method.as_str()).collect();
        assert_eq!(methods, vec!["get", "put", "post"]);

        let get = &ops[0];
        assert_eq!(get.id.as_deref(), Some("getUser"));
        let names: Vec<_> = get.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "page", "trace"]);
        assert!(get.parameters[0].required, "path parameters are always required");
        assert!(get.parameters[2].required, "operation level overrides path level");
        assert_eq!(get.parameters[1].schema["type"], "integer");
        assert!(get.request_body.is_none());
        assert_eq!(
            get.responses["200"].schema,
            Some(json!({"$ref": "#/definitions/v1.User"}))
        );
        Ok(())
    }

    #[test]
    fn test_swagger2_bodies() -> crate::Result<()> {
        let spec = swagger2();
        let ops = spec.operations()?;

        let put = ops.iter().find(|op| op.method == "put").unwrap();
        let body = put.request_body.as_ref().unwrap();
        assert_eq!(body.content_type, "application/json");
        assert!(body.required);
        assert_eq!(body.schema, json!({"$ref": "#/definitions/v1.User"}));
        assert!(put.responses["204"].schema.is_none());

        let post = ops.iter().find(|op| op.method == "post").unwrap();
        let form = post.request_body.as_ref().unwrap();
        assert_eq!(form.content_type, "application/x-www-form-urlencoded");
        assert_eq!(form.schema["properties"]["nick"]["type"], "string");
        assert_eq!(form.schema["required"], json!(["nick"]));
        assert_eq!(post.responses["default"].schema, Some(json!({"type": "string"})));
        Ok(())
    }

    #[test]
    fn test_openapi3_bodies_and_responses() -> crate::Result<()> {
        let spec = OpenApiContext {
            json: json!({
                "openapi": "3.0.0",
                "paths": {
                    "/files": {
                        "post": {
                            "requestBody": {"$ref": "#/components/requestBodies/Upload"},
                            "responses": {
                                "201": {"content": {"text/plain": {"schema": {"type": "string"}}, "application/json": {"schema": {"type": "object"}}}},
                                "x-ignored": {}
                            }
                        }
                    }
                },
                "components": {
                    "requestBodies": {
                        "Upload": {
                            "required": true,
                            "content": {"multipart/form-data": {"schema": {"type": "object", "properties": {"file": {"type": "string", "format": "binary"}}}}}
                        }
                    }
                }
            }),
        };
        let ops = spec.operations()?;
        assert_eq!(ops.len(), 1);
        let body = ops[0].request_body.as_ref().unwrap();
        assert_eq!(body.content_type, "multipart/form-data");
        assert!(body.required);
        assert_eq!(ops[0].responses.len(), 1);
        assert_eq!(
            ops[0].responses["201"].content_type.as_deref(),
            Some("application/json")
        );
        Ok(())
    }

    #[test]
    fn test_missing_paths_and_bad_refs() {
        let spec = OpenApiContext { json: json!({"openapi": "3.0.0"}) };
        assert!(spec.operations().is_err());

        let spec = OpenApiContext {
            json: json!({"openapi": "3.0.0", "paths": {"/a": {"get": {"parameters": [{"$ref": "#/nope"}]}}}}),
        };
        let err = spec.operations().unwrap_err();
        assert!(err.to_string().contains("#/nope"));
    }

    #[test]
    fn test_global_security_and_schemas() {
        let spec = swagger2();
        assert!(spec.has_global_security());
        assert!(spec.schemas().unwrap().contains_key("v1.User"));
        assert_eq!(spec.description(), Some("sphere dash docs"));
    }
}
