use filemeta_core::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (storage, record store, routes)
    let (_state, router) = filemeta_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    filemeta_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
