use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use planner::QueryTranslator;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod load;
mod output;

#[derive(Parser)]
#[command(
    name = "lambdaq",
    version = "0.1.0",
    about = "Compiles lambda predicates into FlexibleSearch queries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger; stdout is reserved for results
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            query,
            schema,
            suffix,
            json,
            output,
        } => {
            info!("Compiling lambda query: {}", query);

            let lambda_query = load::load_query(&query).await?;
            let metadata = load::load_metadata(schema.as_deref(), &suffix).await?;
            let compiled = QueryTranslator::new(metadata).translate(&lambda_query)?;

            let content = if json {
                output::render_json(&compiled)?
            } else {
                output::render_text(&compiled)
            };
            output::emit(content, output).await?;
        }
        Commands::Ast { query } => {
            let lambda_query = load::load_query(&query).await?;
            let json =
                serde_json::to_string_pretty(&lambda_query).map_err(CliError::JsonSerialize)?;
            println!("{json}");
        }
    }

    Ok(())
}
