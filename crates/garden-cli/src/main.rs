mod config;
mod plant_cmds;
mod serve_cmd;
#[cfg(test)]
mod test_util;
mod web;

use clap::{Parser, Subcommand};

use garden_db::pool;

use config::{CliOverrides, GardenConfig};

#[derive(Parser)]
#[command(name = "garden", about = "Web journal for garden plants and harvests")]
struct Cli {
    /// Database URL (overrides GARDEN_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a garden config file (no database required)
    Init {
        /// PostgreSQL connection URL
        #[arg(long, default_value = garden_db::config::DbConfig::DEFAULT_URL)]
        db_url: String,
        /// Address the web server listens on
        #[arg(long, default_value = config::DEFAULT_BIND)]
        bind: String,
        /// Port the web server listens on
        #[arg(long, default_value_t = config::DEFAULT_PORT)]
        port: u16,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Create the database if needed and apply migrations
    DbInit,
    /// Run the web application
    Serve {
        /// Address to listen on (overrides GARDEN_BIND and the config file)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (overrides GARDEN_PORT and the config file)
        #[arg(long)]
        port: Option<u16>,
        /// Skip applying pending migrations at startup
        #[arg(long)]
        no_migrate: bool,
    },
    /// Inspect plants from the terminal
    Plant {
        #[command(subcommand)]
        command: PlantCommands,
    },
}

#[derive(Subcommand)]
pub enum PlantCommands {
    /// List all plants
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one plant and its harvests
    Show {
        /// Plant ID to show
        plant_id: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Execute the `garden init` command: write config file.
fn cmd_init(db_url: &str, bind: &str, port: u16, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            url: db_url.to_string(),
        },
        server: config::ServerSection {
            bind: bind.to_string(),
            port,
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    println!("  server       = {bind}:{port}");
    println!();
    println!("Next: run `garden db-init` to create and migrate the database.");

    Ok(())
}

/// Execute the `garden db-init` command: create database and run migrations.
async fn cmd_db_init(cli_db_url: Option<&str>) -> anyhow::Result<()> {
    let resolved = GardenConfig::resolve(&CliOverrides {
        database_url: cli_db_url,
        ..CliOverrides::default()
    })?;

    println!("Initializing garden database...");

    pool::ensure_database_exists(&resolved.db_config).await?;
    let db_pool = pool::create_pool(&resolved.db_config).await?;
    pool::run_migrations(&db_pool).await?;

    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready. Tables:");
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }

    db_pool.close().await;

    println!("garden db-init complete.");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
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
            bind,
            port,
            force,
        } => {
            cmd_init(&db_url, &bind, port, force)?;
        }
        Commands::DbInit => {
            cmd_db_init(cli.database_url.as_deref()).await?;
        }
        Commands::Serve {
            bind,
            port,
            no_migrate,
        } => {
            let resolved = GardenConfig::resolve(&CliOverrides {
                database_url: cli.database_url.as_deref(),
                bind: bind.as_deref(),
                port,
            })?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            if !no_migrate {
                pool::run_migrations(&db_pool).await?;
            }
            let result = serve_cmd::run_serve(db_pool.clone(), &resolved.bind, resolved.port).await;
            db_pool.close().await;
            result?;
        }
        Commands::Plant { command } => {
            let resolved = GardenConfig::resolve(&CliOverrides {
                database_url: cli.database_url.as_deref(),
                ..CliOverrides::default()
            })?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = plant_cmds::run_plant_command(command, &db_pool).await;
            db_pool.close().await;
            result?;
        }
    }

    Ok(())
}
