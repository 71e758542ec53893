use log::debug;
use recipe_capture::RecipeCapture;
use std::env;
use std::io::Read;

const USAGE: &str = "Usage: recipe-capture [--local] [--image <url>] <url | file | ->";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    let mut local_only = false;
    let mut image = None;
    let mut source = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--local" => local_only = true,
            "--image" => image = Some(args.next().ok_or(USAGE)?),
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => source = Some(arg),
        }
    }
    let source = source.ok_or(USAGE)?;

    let mut builder = RecipeCapture::builder();
    if source.starts_with("http://") || source.starts_with("https://") {
        builder = builder.url(source);
    } else if source == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        builder = builder.text(text);
    } else {
        debug!("Reading recipe text from {}", source);
        builder = builder.text(tokio::fs::read_to_string(&source).await?);
    }

    if let Some(image) = image {
        builder = builder.image(image);
    }
    if local_only {
        builder = builder.local_only();
    }

    let recipe = builder.build().await?;
    println!("{}", serde_json::to_string_pretty(&recipe)?);

    Ok(())
}
