//! services/api/src/bin/openapi.rs
//!
//! This binary generates the OpenAPI 3.0 document for the catalogue endpoints
//! and saves it to `openapi.json` (or the path given as the first argument).

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

/// Renders the document and writes it to `path`.
fn write_openapi_json(
    api_doc: utoipa::openapi::OpenApi,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = api_doc.to_pretty_json()?;
    std::fs::write(path, json)?;
    println!("✅ OpenAPI document for the catalogue API written to {}", path);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    write_openapi_json(ApiDoc::openapi(), &path)
}
