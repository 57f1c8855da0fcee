//! Print the hall's persistent records

use bingohall::game_store::GameStore;
use bingohall::storage::OptimizedStorage;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "inspect_history")]
#[command(about = "Show approved chats, recent games and tournament winners", long_about = None)]
struct Args {
    /// Database directory
    #[arg(long, default_value = "./DB/bingo_data")]
    db_path: String,

    /// Rows per section
    #[arg(long, default_value = "10")]
    limit: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let storage = OptimizedStorage::open_read_only(&args.db_path)?;
    let store = GameStore::new(storage, 0);

    let chats = store.approved_chats()?;
    println!("📋 Approved chats: {}", chats.len());
    for chat in chats {
        println!("   {} {}", chat.chat_id, chat.title);
    }

    let games = store.recent_games(args.limit)?;
    println!("\n🎮 Recent games: {}", games.len());
    for game in games {
        println!(
            "   #{} chat {} game {} | {} {} | {} after {} numbers | jackpot {}",
            game.id,
            game.chat_id,
            game.ordinal,
            game.game_type,
            game.pattern,
            game.winner_name,
            game.numbers.len(),
            game.jackpot
        );
    }

    let wins = store.tournament_history(args.limit)?;
    println!("\n🏆 Tournament winners: {}", wins.len());
    for win in wins {
        println!(
            "   tournament {} | {} from chat {} | prize {}",
            win.tournament_id, win.winner_name, win.chat_id, win.prize
        );
    }

    let scheduled = store.scheduled_games()?;
    println!("\n📅 Scheduled games: {}", scheduled.len());
    for game in scheduled {
        println!(
            "   #{} {} {} | {} {} | {} points/card",
            game.id, game.game_date, game.game_time, game.game_type, game.pattern, game.entry_cost
        );
    }

    Ok(())
}
