use msweeper_client::{ApiResult, ClientConfig, GameResult, MSweeperClient};

fn report(action: &str, outcome: &ApiResult<GameResult>) {
    match outcome {
        Ok(game) => {
            println!("✅ {}: {} (paused: {})", action, game.game_status, game.paused);
            print!("{}", game.minefield);
            println!("Cell counts: {:?}", game.minefield.count_cells());
        }
        Err(result) => println!("❌ {}: {}", action, result),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // MSWEEPER_BASE_URL and friends override the defaults
    let client = MSweeperClient::from_config(ClientConfig::from_env()?)?;

    let game = client.new_game("demo", Some(5), Some(5), Some(3)).await?;
    println!("Game started! Game ID: {}", game.game_id);
    let id = game.game_id.as_str();

    report("Flag (0, 1)", &client.mark_spot_with_flag(id, 0, 1).await);
    report("Question (1, 0)", &client.mark_spot_with_question(id, 1, 0).await);
    report("Unmark (1, 0)", &client.remove_mark(id, 1, 0).await);
    report("Reveal (2, 2)", &client.reveal_spot(id, 2, 2).await);
    report("Pause", &client.pause_game(id).await);
    report("Reveal while paused", &client.reveal_spot(id, 4, 4).await);
    report("Resume", &client.resume_game(id).await);
    report("Bogus mark", &client.send_mark_to_spot(id, 0, 0, "AnyString").await);

    match client.get_game_history(id).await {
        Ok(history) => {
            println!("\n=== History: {} snapshots ===", history.historic.len());
            for (step, snapshot) in history.historic.iter().enumerate() {
                println!("Step {}: {}", step, snapshot.game_status);
            }
        }
        Err(result) => println!("❌ History: {}", result),
    }

    Ok(())
}
