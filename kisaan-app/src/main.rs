use anyhow::Result;
use async_trait::async_trait;
use dotenv::dotenv;
use std::io::Write;
use tokio::io::{self, AsyncBufReadExt, BufReader};

use kisaan_app::pages::{CropPricesPage, GovSchemesPage, HomePage, WeatherPage};
use kisaan_app::voice::{VoiceCapture, VoiceSession};
use kisaan_app::{ApiClient, Route};

/// Typed stand-in for a platform speech recognizer: the "transcript" is a
/// line the user types at the mic prompt. Plays the same role as the text
/// fallback when no recognition engine is available.
struct TypedCapture {
    heard: Option<String>,
}

#[async_trait]
impl VoiceCapture for TypedCapture {
    async fn start(&mut self, _lang: &str) -> Result<()> {
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    async fn transcript(&mut self) -> Result<Option<String>> {
        Ok(self.heard.take())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    println!("🌾 Kisaan Ki Aawaaz");
    println!("=================================");
    println!("Ask about the weather, mandi prices or anything farming related.");
    println!("Type /voice to dictate a query. Press Ctrl+C to exit\n");

    let api = ApiClient::from_env();
    let lang = std::env::var("KISAAN_LANG").unwrap_or_else(|_| "en".to_string());
    let mut home = HomePage::new();
    let mut weather = WeatherPage::new();
    let mut crop_prices = CropPricesPage::new();

    let stdin = BufReader::new(io::stdin());
    let mut lines = stdin.lines();

    print!("> ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let query = line.trim().to_string();
        if query.is_empty() {
            print!("> ");
            std::io::stdout().flush()?;
            continue;
        }

        let query = if query == "/voice" {
            print!("🎤 ");
            std::io::stdout().flush()?;
            let heard = lines.next_line().await?;

            let mut session = VoiceSession::new(TypedCapture { heard });
            session.start(&lang).await?;
            match session.finish().await? {
                Some(transcript) => transcript,
                None => {
                    println!("Didn't catch that.");
                    print!("> ");
                    std::io::stdout().flush()?;
                    continue;
                }
            }
        } else {
            query
        };

        dispatch(&query, &api, &mut home, &mut weather, &mut crop_prices).await;

        print!("> ");
        std::io::stdout().flush()?;
    }

    Ok(())
}

/// Runs one query through the home page and opens whichever view its
/// intent routes to. Typed and dictated queries share this path.
async fn dispatch(
    query: &str,
    api: &ApiClient,
    home: &mut HomePage,
    weather: &mut WeatherPage,
    crop_prices: &mut CropPricesPage,
) {
    match home.submit(api, query).await {
        Some(Route::Weather { city, duration }) => {
            weather.set_redirect(city, duration);
            weather.open_redirected(api).await;
            println!("{}", weather.render());
        }
        Some(Route::CropPrices { crop, location }) => {
            crop_prices.set_redirect(crop, location);
            crop_prices.open_redirected(api).await;
            println!("{}", crop_prices.render());
        }
        Some(Route::GovSchemes { search_term }) => {
            let page = GovSchemesPage::open(search_term);
            println!("{}", page.render());
        }
        None => {
            println!("{}", home.render());
        }
    }
}
