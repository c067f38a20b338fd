use std::env;
use std::path::{Path, PathBuf};

use menusearch_core::config::Config;
use menusearch_core::menu::MenuLoader;
use menusearch_hybrid::SearchService;
use tracing_subscriber::EnvFilter;

// Build an index over a static menu and print grouped results.
// Usage:
//   cargo run -p menusearch-hybrid --example search_menu -- "your query" \
//     [--menu test_data/menu.json] [--limit 5]

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: cargo run -p menusearch-hybrid --example search_menu -- <query> [--menu FILE] [--limit N]");
        std::process::exit(1);
    }
    let mut query = String::new();
    let mut menu: Option<PathBuf> = None;
    let mut limit: Option<usize> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--menu" => {
                if i + 1 >= args.len() { eprintln!("--menu requires a path"); std::process::exit(2); }
                menu = Some(PathBuf::from(&args[i + 1]));
                i += 2; continue;
            }
            "--limit" => {
                if i + 1 >= args.len() { eprintln!("--limit requires a number"); std::process::exit(2); }
                limit = args[i + 1].parse().ok();
                i += 2; continue;
            }
            s if s.starts_with("--") => {
                eprintln!("Unknown flag: {}", s); std::process::exit(2);
            }
            s => {
                if query.is_empty() { query = s.to_string(); } else { query = format!("{query} {s}"); }
                i += 1; continue;
            }
        }
    }

    // crates/menusearch-hybrid -> crates -> repo root
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap_or(Path::new("."));
    let config = Config::load_in(root)?;
    let mut settings = config.search_settings()?;
    if limit.is_some() {
        settings.max_results = limit;
    }

    // Menu precedence: flag > menu.path > menu.dir > bundled sample
    let service = SearchService::with_settings(&settings);
    let indexed = if let Some(path) = menu.or_else(|| config.menu_path()) {
        println!("Menu: {}", path.display());
        service.initialize_from_file(path).await?
    } else if let Some(dir) = config.menu_dir() {
        println!("Menu dir: {}", dir.display());
        let items = MenuLoader::new().load_dir(&dir)?;
        service.initialize_index(items).await?
    } else {
        let path = root.join("test_data/menu.json");
        println!("Menu: {}", path.display());
        service.initialize_from_file(path).await?
    };

    println!("Indexed {} items", indexed);
    println!("Query: {}\n", query);

    let response = service.search(&query).await?;
    if response.is_empty() {
        println!("No matching items");
        return Ok(());
    }
    for (category, results) in &response.grouped {
        println!("{}", category);
        for r in results {
            println!("  {:.3}  {:<24} {:>7.2}  {}", r.score, r.item.name, r.item.price, r.item.description);
        }
    }
    Ok(())
}
