use featureship_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (database, state, routes)
    let (_state, router) = featureship_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    featureship_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
