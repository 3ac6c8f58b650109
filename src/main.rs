use carriole::auth::Signer;
use carriole::config::Config;
use carriole::db::PgPool;
use carriole::engine::Engine;
use carriole::server::serve;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().unwrap();

    let PgPool(pool) = PgPool::new(&config.database_url, config.max_connections)
        .await
        .unwrap();

    let signer = Signer::new(&config.token_secret);
    let engine = Engine::new(pool, signer.clone(), &config).await.unwrap();

    serve(engine, signer, config.bind_addr).await;
}
