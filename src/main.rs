use std::fs::File;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use tabledit::core::config::{self, CliOverrides};
use tabledit::core::schema::Schema;
use tabledit::core::state::App;
use tabledit::db::{Gateway, MemoryGateway, PgGateway};
use tabledit::tui;

#[derive(Parser)]
#[command(name = "tabledit", about = "Edit a Postgres table from the terminal")]
struct Args {
    /// Table layout to edit
    #[arg(short, long, value_enum)]
    schema: Option<Schema>,

    /// Postgres connection string (URL or key=value form)
    #[arg(long)]
    database_url: Option<String>,

    /// Keep records in memory instead of connecting to Postgres
    #[arg(long)]
    in_memory: bool,

    /// Delete every stored record before loading
    #[arg(long)]
    reset: bool,

    /// Log level written to the log file (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config().context("failed to load config file")?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            schema: args.schema,
            database_url: args.database_url.as_deref(),
            log_level: args.log_level.as_deref(),
        },
    );

    // File logger: the terminal belongs to the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = LevelFilter::from_str(&resolved.log_level).unwrap_or(LevelFilter::Info);
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    log::info!(
        "tabledit starting: schema={} in_memory={} reset={}",
        resolved.schema,
        args.in_memory,
        args.reset
    );

    let mut gateway: Box<dyn Gateway> = if args.in_memory {
        Box::new(MemoryGateway::new())
    } else {
        Box::new(
            PgGateway::connect(&resolved.connection_string, resolved.schema)
                .context("could not connect to the database")?,
        )
    };

    if args.reset {
        gateway
            .clear_all()
            .with_context(|| format!("failed to clear table {}", resolved.schema))?;
        log::info!("Cleared table {}", resolved.schema);
    }

    let mut app = App::load(gateway, resolved.schema, resolved.table_height as usize)
        .with_context(|| format!("failed to load records from {}", resolved.schema))?;

    tui::run(&mut app, resolved.table_height)?;

    log::info!("tabledit exiting");
    Ok(())
}
