use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub embedding: EmbeddingConfig,
    pub index: IndexConfig,
    pub generation: GenerationConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimension: usize,
    pub api_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub name: String,
    pub api_key: Option<String>,
    pub top_k: usize,
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f32,
    pub top_k: u32,
    pub api_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub greeting: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            embedding: EmbeddingConfig {
                model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
                dimension: 384,
                api_token: None,
            },
            index: IndexConfig {
                name: "chatbotqa-index".to_string(),
                api_key: None,
                top_k: 3,
            },
            generation: GenerationConfig {
                model: "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string(),
                temperature: 0.8,
                top_k: 50,
                api_token: None,
            },
            chat: ChatConfig {
                greeting: "Welcome, how may I help you!!".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Builds the configuration from the process environment, falling back
    /// to the defaults above. `HUGGING_FACE_API_TOKEN` authenticates both
    /// Hugging Face collaborators; `PINECONE_API_KEY` the vector index.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = env::var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            config.server.port = port.parse()?;
        }
        if let Ok(model) = env::var("EMBEDDING_MODEL") {
            config.embedding.model = model;
        }
        if let Ok(name) = env::var("PINECONE_INDEX") {
            config.index.name = name;
        }
        if let Ok(model) = env::var("GENERATION_MODEL") {
            config.generation.model = model;
        }

        let hf_token = env::var("HUGGING_FACE_API_TOKEN").ok();
        config.embedding.api_token = hf_token.clone();
        config.generation.api_token = hf_token;
        config.index.api_key = env::var("PINECONE_API_KEY").ok();

        Ok(config)
    }
}
