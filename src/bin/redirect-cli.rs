use clap::{Parser, Subcommand};
use reqwest::header::{HeaderValue, LOCATION};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use serde_json::json;

#[derive(Parser)]
#[command(name = "redirect-cli")]
#[command(about = "Management CLI for the Drive redirector", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:80")]
    url: String,

    #[arg(long, default_value = "admin")]
    user: String,

    #[arg(long, default_value = "")]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show where the redirect currently points
    Show,
    /// Repoint the redirect to a new file id
    Set {
        /// File id the redirect points to now
        current: String,
        /// File id to point it to
        new: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()?;
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Show => {
            let res = client.get(format!("{}/", base)).send().await?;
            let location = redirect_location(res.status(), res.headers().get(LOCATION))?;
            println!("{}", location);
        }
        Commands::Set { current, new } => {
            let res = client
                .put(format!("{}/{}", base, current))
                .basic_auth(&cli.user, Some(&cli.password))
                .json(&json!({ "new_file_id": new }))
                .send()
                .await?;
            let status = res.status();
            let text = res.text().await?;
            println!("{}", update_result(status, text)?);
        }
    }

    Ok(())
}

fn redirect_location(status: StatusCode, location: Option<&HeaderValue>) -> Result<String, String> {
    match location.map(|v| v.to_str()) {
        Some(Ok(location)) => Ok(location.to_string()),
        _ => Err(format!("no redirect returned (status {})", status)),
    }
}

fn update_result(status: StatusCode, text: String) -> Result<String, String> {
    if !status.is_success() {
        return Err(format!(
            "redirector returned status {}\nResponse: {}",
            status, text
        ));
    }
    Ok(text)
}
