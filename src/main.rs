#[tokio::main]
async fn main() {
    if let Err(e) = carctl_lib::cli::run_cli().await {
        eprintln!("CLI Error: {:#}", e);
        std::process::exit(1);
    }
}
