use log::{error, info};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    info!("Bot starting...");

    match audioscribe::bot::dispatcher::run().await {
        Ok(_) => info!("Bot stopped"),
        Err(e) => {
            error!("Fatal: {e}");
            std::process::exit(1);
        }
    }
}
