use std::env;

use recipe_extractor::api::ApiResponse;
use recipe_extractor::{RecipeImporter, DEFAULT_AUTHOR};
use serde::Serialize;

const USAGE: &str = "Usage: recipe-extractor <url>\n       recipe-extractor --image <path> [--author <name>]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut image = None;
    let mut author = None;
    let mut url = None;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--image" => image = Some(iter.next().ok_or(USAGE)?),
            "--author" => author = Some(iter.next().ok_or(USAGE)?),
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ if url.is_none() && !arg.starts_with("--") => url = Some(arg),
            _ => return Err(USAGE.into()),
        }
    }

    let succeeded = match (url, image) {
        (Some(url), None) => {
            let result = RecipeImporter::builder().url(url).build().await;
            print_envelope(result.map(|r| r.into_page()))?
        }
        (None, Some(path)) => {
            let result = RecipeImporter::builder()
                .image_path(path)
                .author(author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()))
                .build()
                .await;
            print_envelope(result.map(|r| r.into_scan()))?
        }
        _ => return Err(USAGE.into()),
    };

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the same JSON envelope an HTTP front end would send.
fn print_envelope<T: Serialize>(
    result: Result<Option<T>, recipe_extractor::ImportError>,
) -> Result<bool, serde_json::Error> {
    let envelope = match result {
        Ok(Some(recipe)) => ApiResponse::ok(recipe),
        Ok(None) => ApiResponse::err("Unexpected import result"),
        Err(e) => ApiResponse::err(e.user_message()),
    };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(envelope.success)
}
