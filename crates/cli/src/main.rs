//! Stride CLI - query the demo catalog from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Running shoes under $250, cheapest first
//! stride-cli catalog --category 1 --max-price 250 --sort price-asc
//!
//! # Black shoes in size 9, second page of four
//! stride-cli catalog --color black --size 9 --page 2 --page-size 4
//!
//! # Free-text search
//! stride-cli search premium
//!
//! # Dump the seed catalog
//! stride-cli seed
//! ```
//!
//! Every command prints pretty JSON on stdout.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use stride_core::{CategoryId, SortKey};

mod commands;

#[derive(Parser)]
#[command(name = "stride-cli")]
#[command(author, version, about = "Stride catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter, sort and paginate the catalog
    Catalog(CatalogArgs),
    /// Search products by name, description or tag
    Search {
        /// Text to look for (case-insensitive)
        query: String,
    },
    /// Print the seed catalog
    Seed,
}

#[derive(clap::Args)]
struct CatalogArgs {
    /// Category id (repeatable)
    #[arg(long = "category")]
    categories: Vec<CategoryId>,

    /// Lowest effective price, inclusive
    #[arg(long)]
    min_price: Option<Decimal>,

    /// Highest effective price, inclusive
    #[arg(long)]
    max_price: Option<Decimal>,

    /// Color (repeatable)
    #[arg(long = "color")]
    colors: Vec<String>,

    /// Size (repeatable)
    #[arg(long = "size")]
    sizes: Vec<String>,

    /// featured, price-asc, price-desc or newest
    #[arg(long, default_value_t = SortKey::Featured)]
    sort: SortKey,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Products per page (defaults to `STOREFRONT_PAGE_SIZE` or 6)
    #[arg(long)]
    page_size: Option<u32>,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Catalog(args) => commands::catalog::run(commands::catalog::CatalogOptions {
            categories: args.categories,
            min_price: args.min_price,
            max_price: args.max_price,
            colors: args.colors,
            sizes: args.sizes,
            sort: args.sort,
            page: args.page,
            page_size: args.page_size,
        }),
        Commands::Search { query } => commands::search::run(&query),
        Commands::Seed => commands::seed::run(),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_catalog_flags() {
        let cli = Cli::try_parse_from([
            "stride-cli",
            "catalog",
            "--category",
            "1",
            "--category",
            "3",
            "--max-price",
            "199.99",
            "--sort",
            "price-low",
            "--color",
            "black",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        let Commands::Catalog(args) = cli.command else {
            panic!("expected catalog command");
        };
        assert_eq!(args.categories, [CategoryId::new(1), CategoryId::new(3)]);
        assert_eq!(args.max_price, Some(Decimal::new(19999, 2)));
        assert_eq!(args.sort, SortKey::PriceAscending);
        assert_eq!(args.colors, ["black"]);
        assert_eq!(args.page, 1);
        assert_eq!(args.page_size, None);
    }

    #[test]
    fn test_rejects_unknown_sort() {
        assert!(Cli::try_parse_from(["stride-cli", "catalog", "--sort", "random"]).is_err());
    }
}
