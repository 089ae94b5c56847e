mod catalog_cmd;
mod config;
mod garden_cmd;
mod place_cmd;
mod resolve;
mod tasks_cmd;
mod watch_cmd;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use trellis_db::pool;

use config::{CatalogSection, ConfigFile, DatabaseSection, TrellisConfig};

#[derive(Parser)]
#[command(name = "trellis", about = "Garden tracker with plant compatibility checks")]
struct Cli {
    /// Database URL (overrides TRELLIS_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a trellis config file (no database required)
    Init {
        /// PostgreSQL connection URL
        #[arg(long, default_value = "postgresql://localhost:5432/trellis")]
        db_url: String,
        /// Remote catalog URL
        #[arg(long)]
        catalog_url: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Initialize the trellis database (creates it and runs migrations)
    DbInit,
    /// Fetch the remote plant catalog into the local snapshot
    Sync {
        /// Catalog URL (overrides config file and TRELLIS_CATALOG_URL)
        #[arg(long)]
        url: Option<String>,
    },
    /// Browse the plant catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Garden management
    Garden {
        #[command(subcommand)]
        command: GardenCommands,
    },
    /// Location management
    Location {
        #[command(subcommand)]
        command: LocationCommands,
    },
    /// Check a plant's compatibility at a location without placing it
    Check {
        /// Catalog plant (id or name)
        plant: String,
        /// Location (uuid, garden/location, or unique name)
        #[arg(long)]
        location: String,
    },
    /// Place a plant at a location
    Place {
        /// Catalog plant (id or name)
        plant: String,
        /// Location (uuid, garden/location, or unique name)
        #[arg(long)]
        location: String,
    },
    /// Remove a placed plant
    Remove {
        /// Placement ID to remove
        placement_id: String,
    },
    /// List placed plants (omit --location to list all)
    Placements {
        /// Limit to one location
        #[arg(long)]
        location: Option<String>,
    },
    /// Show care tasks whose window contains today
    Tasks {
        /// Limit to one location
        #[arg(long)]
        location: Option<String>,
    },
    /// Watch a location and print a report whenever it changes
    Watch {
        /// Location to watch
        #[arg(long)]
        location: String,
        /// Poll interval in seconds
        #[arg(long, default_value_t = 30)]
        interval: u64,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List catalog plants
    List {
        /// Only plants whose sowing window is open today
        #[arg(long)]
        sowable: bool,
    },
    /// Show one catalog plant in full
    Show {
        /// Catalog plant (id or name)
        plant: String,
    },
}

#[derive(Subcommand)]
pub enum GardenCommands {
    /// Create a garden
    Add {
        /// Garden name (unique)
        name: String,
    },
    /// List gardens
    List,
}

#[derive(Subcommand)]
pub enum LocationCommands {
    /// Create a location within a garden
    Add {
        /// Garden the location belongs to
        #[arg(long)]
        garden: String,
        /// Location name (unique within the garden)
        name: String,
    },
    /// List locations grouped by garden
    List,
}

/// `trellis init`: write the config file without touching the database.
fn cmd_init(db_url: &str, catalog_url: Option<&str>, force: bool) -> Result<()> {
    let config = ConfigFile {
        database: DatabaseSection {
            url: db_url.to_owned(),
        },
        catalog: CatalogSection {
            url: catalog_url.map(str::to_owned),
        },
    };
    let path = config::write_config_file(&config, force)?;
    println!("Wrote config to {}.", path.display());
    println!("Next: `trellis db-init`, then `trellis sync`.");
    Ok(())
}

/// `trellis db-init`: create the database if needed and run migrations.
async fn cmd_db_init(database_url_flag: Option<&str>) -> Result<()> {
    let resolved = TrellisConfig::resolve(database_url_flag, None)?;

    // 1. Create the database if it does not exist.
    pool::ensure_database_exists(&resolved.db_config).await?;

    // 2. Connect and run migrations.
    let db_pool = pool::create_pool(&resolved.db_config).await?;
    pool::run_migrations(&db_pool).await?;

    // 3. Print success with table counts.
    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready. Tables:");
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }

    db_pool.close().await;
    println!("trellis db-init complete.");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            db_url,
            catalog_url,
            force,
        } => {
            cmd_init(&db_url, catalog_url.as_deref(), force)?;
        }
        Commands::DbInit => {
            cmd_db_init(cli.database_url.as_deref()).await?;
        }
        Commands::Sync { url } => {
            let resolved = TrellisConfig::resolve(cli.database_url.as_deref(), url.as_deref())?;
            let catalog_url = resolved.require_catalog_url()?.to_owned();
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = catalog_cmd::run_sync(&db_pool, &catalog_url).await;
            db_pool.close().await;
            result?;
        }
        Commands::Catalog { command } => {
            let resolved = TrellisConfig::resolve(cli.database_url.as_deref(), None)?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = match command {
                CatalogCommands::List { sowable } => {
                    catalog_cmd::run_catalog_list(&db_pool, sowable).await
                }
                CatalogCommands::Show { plant } => {
                    catalog_cmd::run_catalog_show(&db_pool, &plant).await
                }
            };
            db_pool.close().await;
            result?;
        }
        Commands::Garden { command } => {
            let resolved = TrellisConfig::resolve(cli.database_url.as_deref(), None)?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = match command {
                GardenCommands::Add { name } => garden_cmd::run_garden_add(&db_pool, &name).await,
                GardenCommands::List => garden_cmd::run_garden_list(&db_pool).await,
            };
            db_pool.close().await;
            result?;
        }
        Commands::Location { command } => {
            let resolved = TrellisConfig::resolve(cli.database_url.as_deref(), None)?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = match command {
                LocationCommands::Add { garden, name } => {
                    garden_cmd::run_location_add(&db_pool, &garden, &name).await
                }
                LocationCommands::List => garden_cmd::run_location_list(&db_pool).await,
            };
            db_pool.close().await;
            result?;
        }
        Commands::Check { plant, location } => {
            let resolved = TrellisConfig::resolve(cli.database_url.as_deref(), None)?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = place_cmd::run_check(&db_pool, &plant, &location).await;
            db_pool.close().await;
            result?;
        }
        Commands::Place { plant, location } => {
            let resolved = TrellisConfig::resolve(cli.database_url.as_deref(), None)?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = place_cmd::run_place(&db_pool, &plant, &location).await;
            db_pool.close().await;
            result?;
        }
        Commands::Remove { placement_id } => {
            let resolved = TrellisConfig::resolve(cli.database_url.as_deref(), None)?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = place_cmd::run_remove(&db_pool, &placement_id).await;
            db_pool.close().await;
            result?;
        }
        Commands::Placements { location } => {
            let resolved = TrellisConfig::resolve(cli.database_url.as_deref(), None)?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = place_cmd::run_placements(&db_pool, location.as_deref()).await;
            db_pool.close().await;
            result?;
        }
        Commands::Tasks { location } => {
            let resolved = TrellisConfig::resolve(cli.database_url.as_deref(), None)?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = tasks_cmd::run_tasks(&db_pool, location.as_deref()).await;
            db_pool.close().await;
            result?;
        }
        Commands::Watch { location, interval } => {
            let resolved = TrellisConfig::resolve(cli.database_url.as_deref(), None)?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = watch_cmd::run_watch(&db_pool, &location, interval).await;
            db_pool.close().await;
            result?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_owned();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}
