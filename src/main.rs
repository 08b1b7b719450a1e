use anyhow::Context as _;
use clap::Parser as _;
use std::{
    fs::File,
    io::{self, BufWriter, IsTerminal as _},
    process::ExitCode,
};
use tfr::{
    app::{
        config::{Args, Config, Input},
        log,
    },
    core::Pipeline,
};

fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    log::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::resolve(args, io::stdin().is_terminal())?;
    tracing::debug!(kind = %config.kind, max_records = config.max_records, inputs = config.inputs.len(), "starting");

    let stdout = BufWriter::new(io::stdout().lock());
    let mut pipeline = Pipeline::new(stdout, config.kind, config.max_records);

    for input in &config.inputs {
        let progress = match input {
            Input::Stdin => pipeline.feed(io::stdin().lock()),
            Input::Path(path) => {
                let file = File::open(path).with_context(|| format!("failed to open {input}"))?;
                pipeline.feed(file)
            }
        }
        .with_context(|| format!("failed to read {input}"))?;

        if !progress.wants_more() {
            break;
        }
    }

    pipeline.finish().context("failed to flush output")?;
    Ok(())
}
