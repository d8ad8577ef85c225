use itad_client::utils::game_url;
use itad_client::{Config, Core};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ITAD_API_KEY, ITAD_CLIENT_ID and ITAD_CLIENT_SECRET must be set
    let config = Config::from_env()?;
    let core = Core::with_console_prompt(config)?;

    let results = core.search_games("the witcher 3", Some(5)).await?;
    println!("Search results:");
    for game in &results {
        println!("  {} ({})", game.title(), game.id());
    }

    // Asks for authorization on the first run
    let waitlist = core.waitlist().await?;
    println!("\n{} has {} games waitlisted", core.user_info().await?.username(), waitlist.len());
    for game in &waitlist {
        let added = game
            .added()
            .as_ref()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!("  {:<50} {:>10}  {}", game.title(), added, game_url(game.id()));
    }

    Ok(())
}
