use clap::Parser;
use inference::{
    ConsoleReport, InferenceConfig, app,
    cli::{Cli, USAGE_EXAMPLE},
    logging::setup_logging,
};
use std::process::ExitCode;

#[cfg(feature = "ort-backend")]
use inference::backend::ort::OrtBackend as Backend;

#[cfg(not(feature = "ort-backend"))]
compile_error!("The 'ort-backend' feature must be enabled");

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            eprintln!("{}", USAGE_EXAMPLE);
            return ExitCode::FAILURE;
        }
    };

    let mut report = ConsoleReport::stdio();

    let config = InferenceConfig::from_env();

    setup_logging(&config);

    tracing::info!(
        environment = config.environment.as_str(),
        config = ?config,
        "Loaded configuration"
    );

    match app::run::<Backend, _, _>(&cli.input_image, &cli.output_image, &config, &mut report) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Run failed");
            report.error(&e);
            ExitCode::FAILURE
        }
    }
}
