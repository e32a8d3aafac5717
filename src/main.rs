use rerides::config::Config;
use rerides::engine::Engine;
use rerides::error::Error;
use rerides::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let addr = config.listen_addr;

    let engine = Engine::new(config);

    serve(engine, addr).await
}
