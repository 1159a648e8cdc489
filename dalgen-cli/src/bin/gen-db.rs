use dalgen_cli::{handle_error, init_tracing, presets, run_preset};
use dotenvy::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing(false);

    run_preset(presets::DB)
        .await
        .map(|_| ())
        .unwrap_or_else(handle_error);
}
