use anyhow::{Context, Result, anyhow};
use catalog::{Catalog, CatalogOptions, UserStore};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use engine::{Recommendation, RecommendationEngine, RecommendationRequest};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// CineRecs - hybrid movie recommendation engine
#[derive(Parser)]
#[command(name = "cine-recs")]
#[command(about = "Movie recommendations blending genre similarity with diversification", long_about = None)]
struct Cli {
    /// Path to the catalog CSV file
    #[arg(long, default_value = "data/movies.csv")]
    catalog: PathBuf,

    /// Path to the user profiles CSV file
    #[arg(long, default_value = "data/users.csv")]
    users: PathBuf,

    /// Genres dropped from the catalog at build time
    #[arg(long, value_delimiter = ',', default_value = "Documentary,Music")]
    exclude_genres: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movie recommendations for a user
    Recommend {
        /// User id to recommend for
        #[arg(long)]
        user_id: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = RecommendationRequest::DEFAULT_COUNT)]
        count: usize,

        /// Fraction of the result drawn from the diversified pool [0, 1]
        #[arg(long, default_value_t = RecommendationRequest::DEFAULT_DIVERSIFIED_RATIO)]
        diversified_ratio: f32,

        /// Exclude items rated below this threshold
        #[arg(long, default_value_t = RecommendationRequest::DEFAULT_MIN_RATING)]
        min_rating: f32,
    },

    /// Show a stored user profile
    User {
        /// User id to display
        #[arg(long)]
        user_id: String,
    },

    /// Search the catalog by title
    Search {
        /// Title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Export recommendations for many users as one flat table
    Export {
        /// User ids to evaluate (default: every stored profile)
        #[arg(long, value_delimiter = ',')]
        user_ids: Option<Vec<String>>,

        /// Output file path
        #[arg(long, default_value = "recommendations.csv")]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Number of recommendations per user
        #[arg(long, default_value_t = RecommendationRequest::DEFAULT_COUNT)]
        count: usize,

        /// Fraction of each result drawn from the diversified pool [0, 1]
        #[arg(long, default_value_t = RecommendationRequest::DEFAULT_DIVERSIFIED_RATIO)]
        diversified_ratio: f32,

        /// Exclude items rated below this threshold
        #[arg(long, default_value_t = RecommendationRequest::DEFAULT_MIN_RATING)]
        min_rating: f32,
    },

    /// Generate a synthetic user profile file
    GenerateUsers {
        /// Total number of profiles (includes the fixed personas)
        #[arg(long, default_value = "100")]
        count: usize,

        /// Output file path
        #[arg(long, default_value = "custom_users.csv")]
        output: PathBuf,

        /// Seed for reproducible generation
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Profile generation writes the users file, so it runs before any load
    if let Commands::GenerateUsers {
        count,
        output,
        seed,
    } = &cli.command
    {
        return handle_generate_users(*count, output, *seed);
    }

    println!("Loading catalog from {}...", cli.catalog.display());
    let start = Instant::now();
    let options = CatalogOptions::with_excluded_genres(cli.exclude_genres.iter().cloned());
    let catalog = Arc::new(
        Catalog::load_from_file(&cli.catalog, &options)
            .context("Failed to load catalog")?,
    );
    let users = Arc::new(
        UserStore::load_from_file(&cli.users).context("Failed to load user profiles")?,
    );
    println!(
        "{} Loaded {} items and {} profiles in {:?}",
        "✓".green(),
        catalog.len(),
        users.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend {
            user_id,
            count,
            diversified_ratio,
            min_rating,
        } => {
            let engine = build_engine(catalog, users)?;
            let request = RecommendationRequest::for_user(user_id)
                .with_count(count)
                .with_diversified_ratio(diversified_ratio)
                .with_min_rating(min_rating);
            let recommendations = engine.recommend(&request)?;
            print_recommendations(&recommendations);
        }
        Commands::User { user_id } => handle_user(&users, &user_id)?,
        Commands::Search { title } => handle_search(&catalog, &title),
        Commands::Export {
            user_ids,
            output,
            format,
            count,
            diversified_ratio,
            min_rating,
        } => {
            let engine = build_engine(catalog, users.clone())?;
            handle_export(
                &engine,
                &users,
                user_ids,
                &output,
                format,
                count,
                diversified_ratio,
                min_rating,
            )?;
        }
        Commands::GenerateUsers { .. } => unreachable!("handled before loading"),
    }

    Ok(())
}

fn build_engine(catalog: Arc<Catalog>, users: Arc<UserStore>) -> Result<RecommendationEngine> {
    let start = Instant::now();
    let engine = RecommendationEngine::new(catalog, users)?;
    println!("{} Built similarity index in {:?}", "✓".green(), start.elapsed());
    Ok(engine)
}

/// Print a ranked recommendation list
fn print_recommendations(recommendations: &[Recommendation]) {
    println!("{}", "Movie Recommendations:".bold().blue());
    if recommendations.is_empty() {
        println!("  (no items matched the request)");
        return;
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}] - Score: {:.2} ({}, {} min)",
            (rank + 1).to_string().green(),
            rec.title,
            rec.genres.join(", "),
            rec.total_score,
            rec.average_rating
                .map(|r| format!("rated {:.1}", r))
                .unwrap_or_else(|| "unrated".to_string()),
            rec.runtime_minutes,
        );
    }
}

/// Handle the 'user' command
fn handle_user(users: &UserStore, user_id: &str) -> Result<()> {
    let profile = users
        .get(user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;

    println!("{}", format!("User ID: {}", profile.user_id).bold().blue());
    println!(
        "{}Preferred genres: {}",
        "• ".green(),
        profile.preferred_genres.join(", ")
    );
    println!(
        "{}Average watch time: {} min",
        "• ".green(),
        profile.average_watch_time
    );

    let mut favorites: Vec<&str> = profile
        .favorite_movies
        .iter()
        .map(String::as_str)
        .collect();
    favorites.sort_unstable();
    println!(
        "{}Favorites ({}): {}",
        "• ".cyan(),
        favorites.len(),
        favorites.join(", ")
    );
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: &Catalog, title: &str) {
    let needle = title.to_lowercase();

    // (movie, exact-match flag) pairs; exact matches sort first, then rating
    let mut matches: Vec<(&catalog::Movie, bool)> = catalog
        .movies()
        .iter()
        .filter_map(|movie| {
            let haystack = movie.title.to_lowercase();
            if haystack == needle {
                Some((movie, true))
            } else if haystack.contains(&needle) {
                Some((movie, false))
            } else {
                None
            }
        })
        .collect();

    matches.sort_by(|a, b| {
        b.1.cmp(&a.1).then_with(|| {
            b.0.average_rating
                .unwrap_or(0.0)
                .partial_cmp(&a.0.average_rating.unwrap_or(0.0))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    for (movie, _) in matches.iter().take(20) {
        println!(
            "{}: {} [{}] {} ({} min)",
            movie.id,
            movie.title,
            movie.genres.join(", "),
            movie
                .average_rating
                .map(|r| format!("avg {:.1}", r))
                .unwrap_or_else(|| "unrated".to_string()),
            movie.runtime_minutes,
        );
    }
}

/// Handle the 'export' command
#[allow(clippy::too_many_arguments)]
fn handle_export(
    engine: &RecommendationEngine,
    users: &UserStore,
    user_ids: Option<Vec<String>>,
    output: &Path,
    format: ExportFormat,
    count: usize,
    diversified_ratio: f32,
    min_rating: f32,
) -> Result<()> {
    let ids: Vec<String> = match user_ids {
        Some(ids) => ids,
        None => users.user_ids().into_iter().map(String::from).collect(),
    };

    let requests: Vec<RecommendationRequest> = ids
        .iter()
        .map(|id| {
            RecommendationRequest::for_user(id.clone())
                .with_count(count)
                .with_diversified_ratio(diversified_ratio)
                .with_min_rating(min_rating)
        })
        .collect();

    let start = Instant::now();
    let results = engine.recommend_many(&requests);

    let mut rows: Vec<Recommendation> = Vec::new();
    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(mut user_rows) => rows.append(&mut user_rows),
            Err(err) => tracing::warn!("skipping {}: {}", id, err),
        }
    }

    match format {
        ExportFormat::Csv => write_csv(output, &rows)?,
        ExportFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)?;
            fs::write(output, json)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
    }

    println!(
        "{} Exported {} rows for {} users to {} in {:?}",
        "✓".green(),
        rows.len(),
        ids.len(),
        output.display(),
        start.elapsed()
    );
    Ok(())
}

fn write_csv(path: &Path, rows: &[Recommendation]) -> Result<()> {
    let mut out = String::from("user_id,item_id,title,genres,runtimeMinutes,averageRating,total_score\n");
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{},{},{:.2}\n",
            csv_escape(&row.user_id),
            csv_escape(&row.item_id),
            csv_escape(&row.title),
            csv_escape(&row.genres.join(", ")),
            row.runtime_minutes,
            row.average_rating.map(|r| r.to_string()).unwrap_or_default(),
            row.total_score,
        ));
    }
    fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))
}

fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Genres used for random profile generation
const AVAILABLE_GENRES: &[&str] = &[
    "Action", "Comedy", "Drama", "Thriller", "Romance", "Sci-Fi", "Horror",
    "Fantasy", "Adventure", "Animation", "Family", "Crime", "Mystery",
];

/// Fixed personas with sharply defined tastes, useful as a stable smoke-test
/// surface for the recommendation pipeline
const PERSONAS: &[(&str, &str, u32, &str)] = &[
    ("user_superhero", "Action, Adventure, Fantasy", 150, "tt0000001, tt0000002"),
    ("user_drama", "Drama, Romance", 120, "tt0000003, tt0000004"),
    ("user_scifi", "Sci-Fi, Thriller", 130, "tt0000005, tt0000006"),
];

/// Handle the 'generate-users' command
fn handle_generate_users(count: usize, output: &Path, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut lines =
        vec!["user_id,preferred_genres,average_watch_time,favorite_movies".to_string()];

    for (user_id, genres, watch_time, favorites) in PERSONAS.iter().take(count) {
        lines.push(format!(
            "{},\"{}\",{},\"{}\"",
            user_id, genres, watch_time, favorites
        ));
    }

    for i in 1..=count.saturating_sub(PERSONAS.len()) {
        let num_genres = rng.random_range(2..=4);
        let genres: Vec<&str> = AVAILABLE_GENRES
            .choose_multiple(&mut rng, num_genres)
            .copied()
            .collect();

        let num_favorites = rng.random_range(3..=6);
        let favorites: Vec<String> = (0..num_favorites)
            .map(|_| format!("tt{:07}", rng.random_range(1_000_000..=9_999_999)))
            .collect();

        lines.push(format!(
            "user_random_{},\"{}\",{},\"{}\"",
            i,
            genres.join(", "),
            rng.random_range(60..=180),
            favorites.join(", "),
        ));
    }

    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(output, content)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} Wrote {} profiles to {}",
        "✓".green(),
        lines.len() - 1,
        output.display()
    );
    Ok(())
}
