use bmpfx::filter::PipelineConfig;
use bmpfx::logger::{self, debug, error};
use bmpfx::{cli, process_file};
use std::process::ExitCode;

fn run() -> anyhow::Result<()> {
    let args = cli::parse_args(std::env::args_os())?;
    let config = PipelineConfig::from_env();
    debug!(?args, ?config, "parsed command line");

    process_file(&args.input, &args.output, &args.filters, config)?;
    Ok(())
}

fn main() -> ExitCode {
    logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}
