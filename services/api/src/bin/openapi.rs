//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI 3 document for the lecture API, by default to `openapi.json`.

use api_lib::web::rest::ApiDoc;
use clap::Parser;
use std::path::PathBuf;
use utoipa::OpenApi;

#[derive(Parser, Debug)]
#[command(about = "Generate the OpenAPI document for the lecture API")]
struct Args {
    /// Where to write the document.
    #[arg(default_value = "openapi.json")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let spec_json = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(&args.output, spec_json)?;
    println!("OpenAPI specification generated at {}", args.output.display());
    Ok(())
}
