use anyhow::Context;
use chatbot_qa::api::{create_router, AppState};
use chatbot_qa::application::AnswerEngine;
use chatbot_qa::infrastructure::{
    AppConfig, HuggingFaceEmbedding, HuggingFaceGeneration, PineconeIndex,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatbot_qa=debug,server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    let pinecone_api_key = config
        .index
        .api_key
        .clone()
        .context("PINECONE_API_KEY is not set")?;

    let embedding = Arc::new(HuggingFaceEmbedding::new(&config.embedding));
    let index = Arc::new(PineconeIndex::connect(&pinecone_api_key, &config.index.name).await?);
    let generation = Arc::new(HuggingFaceGeneration::new(&config.generation));
    let engine =
        Arc::new(AnswerEngine::new(embedding, index, generation).with_top_k(config.index.top_k));
    info!(
        index = %config.index.name,
        model = %config.generation.model,
        "answer engine ready"
    );

    let host = config.server.host.clone();
    let port = config.server.port;

    let state = AppState::new(engine, config);
    let app = create_router(state);

    let addr = SocketAddr::new(host.parse()?, port);
    info!("chat server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
