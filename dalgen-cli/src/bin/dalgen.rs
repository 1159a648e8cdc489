use clap::Parser;
use dalgen::BuildInfo;
use dalgen_cli::{handle_error, init_tracing, run_generate_command, Cli, Commands};
use dotenvy::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate(args) => {
            run_generate_command(args)
                .await
                .map(|_| ())
                .unwrap_or_else(handle_error);
        }
        Commands::Version => BuildInfo::current()
            .print_full_version()
            .unwrap_or_else(handle_error),
    }
}
