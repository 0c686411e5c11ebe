#[tokio::main]
async fn main() -> jyle::error::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("jyle=info,serenity=warn"),
    )
    .init();
    log::info!("Starting Jyle Discord bot");

    match jyle::run().await {
        Ok(()) => {
            log::info!("Bot shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Bot encountered an error: {e}");
            Err(e)
        }
    }
}
