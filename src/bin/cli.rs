use clap::{Parser, Subcommand};
use meeple_engine::{fits_player_count, CatalogEngine, EngineConfig, SearchQuery};

#[derive(Parser)]
#[command(name = "meeple-cli")]
#[command(about = "Meeple catalog CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database path (overrides DB_PATH)
    #[arg(short, long)]
    db: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog by name
    Search {
        /// Search query
        query: String,

        /// Maximum results
        #[arg(short, long, default_value = "10")]
        max_results: usize,

        /// Disable cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Load one catalog item by id
    Load {
        /// Catalog id
        id: String,

        /// Check whether this player count is recommended
        #[arg(short, long)]
        players: Option<u32>,
    },

    /// Get cache statistics
    Stats,

    /// Clean up old cache entries
    Cleanup {
        /// Maximum age in days
        #[arg(short, long, default_value = "30")]
        max_age_days: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = EngineConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    let engine = CatalogEngine::new(&config).await?;

    match cli.command {
        Commands::Search { query, max_results, no_cache } => {
            println!("🔍 Searching for: {}", query);

            let search_query = SearchQuery {
                query,
                max_results,
                use_cache: !no_cache,
            };

            let result = engine.search(search_query).await?;

            if result.is_empty() {
                println!("\nNo matches.");
            }
            for (i, hit) in result.hits.iter().enumerate() {
                println!("   {}. {} [{}]", i + 1, hit.display_name(), hit.id);
            }
            println!("\n   Cached: {}", result.from_cache);
            println!("   Latency: {:.2}ms", result.latency_ms);
        }

        Commands::Load { id, players } => {
            let game = engine.load_item(&id).await?;

            println!("\n✅ {}", game.name);
            println!("   Players: {}", game.players());
            println!("   Recommended: {}", game.recommended_player_range);
            println!("   Rating: {}", game.rating_average);
            println!("   Picture: {}", game.picture_url);

            if let Some(count) = players {
                let fits = fits_player_count(&game.recommended_player_range, count);
                println!("   Good with {}: {}", count, if fits { "yes" } else { "no" });
            }
        }

        Commands::Stats => {
            let stats = engine.cache_stats().await?;

            println!("📊 Cache Statistics:");
            println!("   Total entries: {}", stats.total_entries);
            println!("   Total hits: {}", stats.total_hits);
            println!("   Avg hits/entry: {:.2}", stats.avg_hit_count);

            if let Some(oldest) = stats.oldest_entry {
                println!("   Oldest entry: {}", oldest.format("%Y-%m-%d %H:%M:%S"));
            }

            if let Some(newest) = stats.newest_entry {
                println!("   Newest entry: {}", newest.format("%Y-%m-%d %H:%M:%S"));
            }
        }

        Commands::Cleanup { max_age_days } => {
            println!("🧹 Cleaning up entries older than {} days...", max_age_days);

            let deleted = engine.cleanup_cache(max_age_days).await?;

            println!("✅ Deleted {} entries", deleted);
        }
    }

    Ok(())
}
