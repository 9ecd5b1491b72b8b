use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use sql_template::cli::Args;
use sql_template::db::{DatabaseConfig, SqlExecutor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "sql_template=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = DatabaseConfig::resolve(args.db.as_deref())?;
    let mut executor = SqlExecutor::new(config.connect()?);
    let output = args.command.run(&mut executor, args.format)?;
    println!("{}", output);
    Ok(())
}
