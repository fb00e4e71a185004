//! Predictor-preprocessor service entrypoint.

use mimalloc::MiMalloc;

use preprocessor::colleges::CollegeIndex;
use preprocessor::config::Config;
use preprocessor::dispatcher::{AmqpPredictor, Dispatcher};
use preprocessor::rpc::connect_with_retry;
use preprocessor::schema::RedisSchemaSource;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        request_queue = %config.request_queue,
        predictor_queue = %config.predictor_queue,
        "predictor-preprocessor starting"
    );

    let colleges = CollegeIndex::load(&config.colleges_path)?;
    tracing::info!(entries = colleges.len(), "college index loaded");

    tracing::info!(url = %config.amqp_url, "attempting broker connection");
    let connection = connect_with_retry(&config.amqp_url, config.retry_interval()).await;
    let channel = connection.create_channel().await?;

    let schema_source = RedisSchemaSource::new(&config.redis_url, &config.schema_key)?;
    let predictor = AmqpPredictor::new(
        &config.amqp_url,
        &config.predictor_queue,
        config.retry_interval(),
    );

    let dispatcher = Dispatcher::new(
        schema_source,
        predictor,
        colleges,
        config.retry_interval(),
    );

    dispatcher.run(&channel, &config.request_queue).await?;

    tracing::info!("request channel closed, shutting down");
    Ok(())
}
