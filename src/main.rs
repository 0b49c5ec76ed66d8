use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod classify;
mod cli;
mod context;
mod extract;
mod flatten;
mod generate;
mod output;
mod prompt;
mod schema;

use cli::Args;
use extract::Extraction;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let mode = args.mode;
    tracing::info!(
        mode = mode.label(),
        query = %args.query,
        docs = %args.docs.display(),
        "starting generation run"
    );

    let candidates = classify::classify(&args.docs, mode)?;
    let context = context::assemble(&candidates, mode);
    let prompt = prompt::build(&context.text, mode);

    let reply = generate::request_completion(&args.model, &prompt)?;

    let extraction = extract::extract(&reply, mode.columns());
    let path = output::output_path(mode.label());
    output::write(&path, &extraction, mode.columns())?;

    match &extraction {
        Extraction::Records(records) => tracing::info!(
            rows = records.len(),
            path = %path.display(),
            "wrote column-mapped test cases"
        ),
        Extraction::RawTable(_) => tracing::info!(
            path = %path.display(),
            "wrote fallback table text"
        ),
    }
    Ok(())
}
