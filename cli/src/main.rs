use clap::Parser;
use partest_cli::cmd::Args;

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();
    args.exec().await.unwrap_or_else(|e| {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    });
}
