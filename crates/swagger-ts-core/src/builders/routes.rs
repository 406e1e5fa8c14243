//! Route contexts: one generated API method per OpenAPI operation.

use std::collections::{HashMap, HashSet};

use super::contracts::{build_contract, is_plain_object, ts_type, Contract};
use crate::openapi::{OpenApiOperation, OpenApiParameter, OpenApiResponse};
use crate::utils::{comment_lines, property_key, to_lower_camel_case, to_upper_camel_case};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Members the API class owns, through `http` or inherited from `HttpClient`
const CLASS_MEMBERS: &[&str] = &[
    "abortControllers",
    "abortRequest",
    "addArrayQueryParam",
    "addQueryParam",
    "addQueryParams",
    "baseApiParams",
    "baseUrl",
    "constructor",
    "contentFormatters",
    "createAbortSignal",
    "createFormData",
    "customFetch",
    "encodeQueryParam",
    "format",
    "http",
    "instance",
    "mergeRequestParams",
    "request",
    "secure",
    "securityData",
    "securityWorker",
    "setSecurityData",
    "stringifyFormItem",
    "toQueryString",
];

static PATH_PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}/]+)\}").expect("valid path parameter regex"));

/// Options that change how operations turn into routes
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteOptions {
    pub extract_request_body: bool,
    pub extract_response_body: bool,
    pub default_response_as_success: bool,
    /// Whether the spec declares a non-empty global `security`
    pub global_security: bool,
}

/// Everything a template needs to render one API method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteContext {
    /// Method name on the module object (lowerCamelCase)
    pub name: String,
    /// PascalCase name used in docs and for extracted types
    pub request_name: String,
    /// Module the route is grouped under, if any
    pub module: Option<String>,
    /// Uppercase HTTP method
    pub method: String,
    /// Path as a template literal body, e.g. `/api/user/${id}`
    pub path: String,
    /// Path as written in the spec
    pub raw_path: String,
    /// Rendered argument list, in call order
    pub args: Vec<String>,
    pub has_query: bool,
    pub has_body: bool,
    pub secure: bool,
    /// `ContentType.*` member of the request body
    pub content_type: Option<String>,
    /// Response format passed to the client, e.g. `json`
    pub format: Option<String>,
    pub response_type: String,
    pub error_type: String,
    /// Lines of the `/** */` block above the method
    pub docs: Vec<String>,
}

/// Builds route contexts and the contracts extracted from their bodies
pub struct RouteBuilder {
    options: RouteOptions,
    type_names: HashSet<String>,
    route_names: HashMap<Option<String>, HashSet<String>>,
    /// Path segment module name to the property name it was given on the class
    module_names: HashMap<String, String>,
    extracted: Vec<Contract>,
}

impl RouteBuilder {
    /// `reserved` holds type names already taken by the spec's own contracts
    pub fn new(options: RouteOptions, reserved: impl IntoIterator<Item = String>) -> Self {
        Self {
            options,
            type_names: reserved.into_iter().collect(),
            // modules and top-level routes share the class namespace
            route_names: HashMap::from([(
                None,
                CLASS_MEMBERS.iter().map(|m| m.to_string()).collect::<HashSet<_>>(),
            )]),
            module_names: HashMap::new(),
            extracted: Vec::new(),
        }
    }

    /// Contracts declared for extracted request and response bodies, in route order
    pub fn into_extracted(self) -> Vec<Contract> {
        self.extracted
    }

    pub fn build(&mut self, op: &OpenApiOperation) -> RouteContext {
        let module = module_name(&op.path).map(|name| self.claim_module_name(name));
        let base_name = op
            .id
            .as_deref()
            .map(to_lower_camel_case)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| fallback_route_name(&op.method, &op.path));
        let name = self.claim_route_name(&module, base_name);
        let request_name = to_upper_camel_case(&name);

        let path_params = path_parameters(op);
        let path = PATH_PARAM_RE
            .replace_all(&op.path, |caps: &Captures| {
                format!("${{{}}}", param_arg_name(&caps[1]))
            })
            .into_owned();

        let query_params: Vec<&OpenApiParameter> =
            op.parameters.iter().filter(|p| p.in_ == "query").collect();

        let mut required_args = Vec::new();
        let mut optional_args = Vec::new();
        if !query_params.is_empty() {
            let query_required = query_params.iter().any(|p| p.required);
            let fields: Vec<String> = query_params
                .iter()
                .map(|p| {
                    format!(
                        "{}{}: {}",
                        property_key(&p.name),
                        if p.required { "" } else { "?" },
                        ts_type(&p.schema)
                    )
                })
                .collect();
            let arg = format!(
                "query{}: {{ {} }}",
                if query_required { "" } else { "?" },
                fields.join("; ")
            );
            if query_required {
                required_args.push(arg);
            } else {
                optional_args.push(arg);
            }
        }

        let mut content_type = None;
        if let Some(body) = &op.request_body {
            let body_type = if self.options.extract_request_body {
                let type_name = self.claim_type_name(format!("{}Payload", request_name));
                let contract = if is_plain_object(&body.schema) {
                    build_contract(type_name.clone(), &body.schema)
                } else {
                    Contract::Type {
                        name: type_name.clone(),
                        description: Vec::new(),
                        body: ts_type(&body.schema),
                    }
                };
                self.extracted.push(contract);
                type_name
            } else {
                ts_type(&body.schema)
            };
            if body.required {
                required_args.push(format!("data: {}", body_type));
            } else {
                optional_args.push(format!("data?: {}", body_type));
            }
            content_type = content_type_member(&body.content_type).map(String::from);
        }

        let mut args: Vec<String> = path_params
            .iter()
            .map(|(name, schema_type)| format!("{}: {}", param_arg_name(name), schema_type))
            .collect();
        args.extend(required_args);
        args.extend(optional_args);
        args.push("params: RequestParams = {}".to_string());

        let (success, errors): (Vec<_>, Vec<_>) = op
            .responses
            .iter()
            .partition(|(status, _)| self.is_success(status));

        let mut response_type = union_type(&success);
        if self.options.extract_response_body && response_type != "any" && response_type != "void"
        {
            let type_name = self.claim_type_name(format!("{}Data", request_name));
            self.extracted.push(Contract::Type {
                name: type_name.clone(),
                description: Vec::new(),
                body: response_type,
            });
            response_type = type_name;
        }

        let format = success
            .iter()
            .any(|(_, r)| r.schema.is_some() && r.content_type.as_deref().is_some_and(|c| c.contains("json")))
            .then(|| "json".to_string());

        let secure = match &op.security {
            Some(requirements) => !requirements.is_empty(),
            None => self.options.global_security,
        };

        RouteContext {
            docs: route_docs(op, &request_name, secure),
            name,
            request_name,
            module,
            method: op.method.to_uppercase(),
            path,
            raw_path: op.path.clone(),
            args,
            has_query: !query_params.is_empty(),
            has_body: op.request_body.is_some(),
            secure,
            content_type,
            format,
            response_type,
            error_type: union_type(&errors),
        }
    }

    fn is_success(&self, status: &str) -> bool {
        status.starts_with('2') || (status == "default" && self.options.default_response_as_success)
    }

    fn claim_type_name(&mut self, base: String) -> String {
        claim(&mut self.type_names, base)
    }

    fn claim_module_name(&mut self, name: String) -> String {
        if let Some(claimed) = self.module_names.get(&name) {
            return claimed.clone();
        }
        let claimed = claim(self.route_names.entry(None).or_default(), name.clone());
        self.module_names.insert(name, claimed.clone());
        claimed
    }

    fn claim_route_name(&mut self, module: &Option<String>, base: String) -> String {
        claim(self.route_names.entry(module.clone()).or_default(), base)
    }
}

/// Take `base`, or `base2`, `base3`, ... when it is already used
fn claim(used: &mut HashSet<String>, base: String) -> String {
    if used.insert(base.clone()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}{}", base, n);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// First static path segment, which routes are grouped under
pub fn module_name(path: &str) -> Option<String> {
    path.split('/')
        .find(|segment| !segment.is_empty())
        .filter(|segment| !segment.starts_with('{'))
        .map(to_lower_camel_case)
        .filter(|name| !name.is_empty())
}

fn fallback_route_name(method: &str, path: &str) -> String {
    let path = PATH_PARAM_RE.replace_all(path, "by_$1");
    to_lower_camel_case(&format!("{} {}", method, path))
}

fn param_arg_name(name: &str) -> String {
    let arg = to_lower_camel_case(name);
    if arg.is_empty() {
        "param".to_string()
    } else {
        arg
    }
}

/// Path parameters in the order they appear in the path, with their TypeScript types
fn path_parameters(op: &OpenApiOperation) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    PATH_PARAM_RE
        .captures_iter(&op.path)
        .map(|caps| caps[1].to_string())
        .filter(|name| seen.insert(name.clone()))
        .map(|name| {
            let ts = op
                .parameters
                .iter()
                .find(|p| p.in_ == "path" && p.name == name)
                .map(|p| ts_type(&p.schema))
                .filter(|ts| ts != "any")
                .unwrap_or_else(|| "string".to_string());
            (name, ts)
        })
        .collect()
}

fn union_type(responses: &[(&String, &OpenApiResponse)]) -> String {
    let mut types: Vec<String> = Vec::new();
    for (_, response) in responses {
        let ts = response
            .schema
            .as_ref()
            .map(ts_type)
            .unwrap_or_else(|| "void".to_string());
        if !types.contains(&ts) {
            types.push(ts);
        }
    }
    if types.is_empty() {
        "any".to_string()
    } else {
        types.join(" | ")
    }
}

fn content_type_member(content_type: &str) -> Option<&'static str> {
    match content_type {
        c if c.contains("json") => Some("ContentType.Json"),
        "multipart/form-data" => Some("ContentType.FormData"),
        "application/x-www-form-urlencoded" => Some("ContentType.UrlEncoded"),
        c if c.starts_with("text/") => Some("ContentType.Text"),
        _ => None,
    }
}

fn route_docs(op: &OpenApiOperation, request_name: &str, secure: bool) -> Vec<String> {
    let mut docs = Vec::new();
    if let Some(description) = &op.description {
        let mut lines = comment_lines(description).into_iter();
        if let Some(first) = lines.next() {
            docs.push(format!("@description {}", first));
            docs.extend(lines);
            docs.push(String::new());
        }
    }
    if !op.tags.is_empty() {
        docs.push(format!("@tags {}", op.tags.join(", ")));
    }
    docs.push(format!("@name {}", request_name));
    if let Some(summary) = &op.summary {
        let summary = comment_lines(summary).join(" ");
        if !summary.is_empty() {
            docs.push(format!("@summary {}", summary));
        }
    }
    docs.push(format!("@request {}:{}", op.method.to_uppercase(), op.path));
    if secure {
        docs.push("@secure".to_string());
    }
    if op.deprecated {
        docs.push("@deprecated".to_string());
    }
    docs
}
