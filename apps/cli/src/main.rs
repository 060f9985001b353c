use clap::Parser;
use std::process::ExitCode;
use tuner_cli::args::Cli;

/// Exit status clap uses for usage errors.
const USAGE_EXIT_CODE: u8 = 2;

#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    let result = Cli::try_parse()
        .map_err(|err| {
            // Help and version requests also arrive here and print to stdout.
            let _ = err.print();
            u8::try_from(err.exit_code()).unwrap_or(USAGE_EXIT_CODE)
        })
        .and_then(|cli| {
            tuner_cli::run(cli, &mut std::io::stdout().lock()).map_err(|err| {
                eprintln!("Error: {err:#}");
                1
            })
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}
