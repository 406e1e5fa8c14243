use std::path::{Path, PathBuf};

use swagger_ts_core::{
    generate, ClientGenerator, GenerateConfig, HttpClientType, OpenApiContext, Result,
    TypeScriptClientGenerator,
};
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn driver_config(input: PathBuf, output: &Path, http_client_type: HttpClientType) -> GenerateConfig {
    let mut config = GenerateConfig::new(input, output);
    config.http_client_type = http_client_type;
    config.single_http_client = true;
    config.extract_request_body = true;
    config.extract_response_body = true;
    config.default_response_as_success = true;
    config
}

#[tokio::test]
async fn test_swagger2_fetch_client() -> Result<()> {
    let dir = tempdir()?;
    let output = dir.path().join("api/typescript");
    let config = driver_config(fixture("swagger2.json"), &output, HttpClientType::Fetch);

    let report = generate(&config).await?;
    assert_eq!(report.output_file, output.join("Api.ts"));
    assert_eq!(report.routes, 3);

    let source = std::fs::read_to_string(&report.output_file)?;

    // header and doc block
    assert!(source.starts_with("/* eslint-disable */\n"));
    assert!(source.contains(" * @title sphere\n"));
    assert!(source.contains(" * @baseUrl http://localhost:8800\n"));
    assert!(source.contains(" * All endpoints return JSON.\n"));

    // contracts
    assert!(source.contains("export interface V1User {"));
    assert!(source.contains("  id: number;"));
    assert!(source.contains("  role?: V1UserRole;"));
    assert!(source.contains("  tags?: string[];"));
    assert!(source.contains("  avatar?: string | null;"));
    assert!(source.contains("export enum V1UserRole {\n  RoleUser = 0,\n  RoleAdmin = 1,\n}"));
    assert!(source.contains("export type LoginPayload = V1LoginRequest;"));
    assert!(source.contains("export type GetUserData = V1User;"));

    // transport
    assert!(source.contains("public baseUrl: string = \"http://localhost:8800\";"));
    assert!(source.contains("export class Api<SecurityDataType extends unknown> {"));
    assert!(source.contains("  http: HttpClient<SecurityDataType>;"));

    // routes
    assert!(source.contains("  api = {"));
    assert!(source.contains(
        "    getApiUserList: (query: { page?: number; status: string }, params: RequestParams = {}) =>"
    ));
    assert!(source.contains("      this.http.request<GetApiUserListData, any>({"));
    assert!(source.contains("     * @secure"));
    assert!(source.contains("    getUser: (id: number, params: RequestParams = {}) =>"));
    assert!(source.contains("        path: `/api/user/${id}`,"));
    assert!(source.contains("      this.http.request<GetUserData, WebErrorResponse>({"));
    assert!(source.contains("    login: (data: LoginPayload, params: RequestParams = {}) =>"));
    assert!(source.contains("        type: ContentType.Json,"));
    assert!(source.contains("        format: \"json\","));
    Ok(())
}

#[tokio::test]
async fn test_openapi3_yaml_axios_client() -> Result<()> {
    let dir = tempdir()?;
    let output = dir.path().join("dash/typescript");
    let config = driver_config(fixture("openapi3.yaml"), &output, HttpClientType::Axios);

    let report = TypeScriptClientGenerator.generate(&config).await?;
    let source = std::fs::read_to_string(&report.output_file)?;

    assert!(source.contains("import axios from \"axios\";"));
    assert!(source.contains("baseURL: axiosConfig.baseURL || \"https://dash.example.com/v2\""));
    assert!(source.contains("export interface Admin {"));
    assert!(source.contains("export interface UpdateAdminPayload {"));
    assert!(source.contains("export type UpdateAdminData = Admin;"));

    assert!(source.contains(
        "    updateAdmin: (adminId: string, data: UpdateAdminPayload, params: RequestParams = {}) =>"
    ));
    assert!(source.contains("        path: `/admin/${adminId}`,"));
    assert!(source.contains("        method: \"PUT\","));

    assert!(source.contains("  upload = {"));
    assert!(source.contains("    postUpload: (data?: PostUploadPayload, params: RequestParams = {}) =>"));
    assert!(source.contains("      this.http.request<void, any>({"));
    assert!(source.contains("        type: ContentType.FormData,"));
    assert!(source.contains("  file?: File;"));
    Ok(())
}

#[tokio::test]
async fn test_separate_http_client_extends_base_class() -> Result<()> {
    let dir = tempdir()?;
    let mut config = driver_config(fixture("swagger2.json"), dir.path(), HttpClientType::Fetch);
    config.single_http_client = false;

    let source = std::fs::read_to_string(generate(&config).await?.output_file)?;
    assert!(source.contains(
        "export class Api<SecurityDataType extends unknown> extends HttpClient<SecurityDataType> {"
    ));
    assert!(source.contains("      this.request<GetUserData, WebErrorResponse>({"));
    assert!(!source.contains("this.http."));
    Ok(())
}

#[tokio::test]
async fn test_fixture_specs_parse() -> Result<()> {
    let swagger = OpenApiContext::from_file(fixture("swagger2.json")).await?;
    assert!(swagger.is_swagger2());
    assert_eq!(swagger.operations()?.len(), 3);

    let openapi = OpenApiContext::from_file(fixture("openapi3.yaml")).await?;
    assert!(!openapi.is_swagger2());
    assert_eq!(openapi.base_path().as_deref(), Some("https://dash.example.com/v2"));
    Ok(())
}
