//! Chat configuration and provider selection.

use crate::types::ChatProvider;

pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-01";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: usize = 800;
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Chat provider credentials and generation settings.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// `auto`, `azure` or `openai`.
    pub preferred_provider: String,
    pub azure_endpoint: Option<String>,
    pub azure_api_key: Option<String>,
    /// Azure deployment name, also sent as the model id.
    pub azure_deployment: Option<String>,
    pub azure_api_version: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub max_tokens: usize,
    pub temperature: f64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            preferred_provider: "auto".into(),
            azure_endpoint: None,
            azure_api_key: None,
            azure_deployment: None,
            azure_api_version: DEFAULT_AZURE_API_VERSION.into(),
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.into(),
            openai_model: DEFAULT_OPENAI_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Where and how to send a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderTarget {
    pub provider: ChatProvider,
    pub url: String,
    pub model: String,
    pub api_key: String,
}

impl ChatConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build config from any variable source. Empty values count as unset and
    /// unparseable limits fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            preferred_provider: var("DOCSIGHT_CHAT_PROVIDER").unwrap_or(defaults.preferred_provider),
            azure_endpoint: var("AZURE_OPENAI_ENDPOINT"),
            azure_api_key: var("AZURE_OPENAI_API_KEY"),
            azure_deployment: var("AZURE_OPENAI_DEPLOYMENT"),
            azure_api_version: var("AZURE_OPENAI_API_VERSION")
                .unwrap_or(defaults.azure_api_version),
            openai_api_key: var("OPENAI_API_KEY"),
            openai_base_url: var("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            openai_model: var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            max_tokens: var("DOCSIGHT_MAX_TOKENS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_tokens),
            temperature: var("DOCSIGHT_TEMPERATURE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.temperature),
        }
    }

    fn azure_target(&self) -> Option<ProviderTarget> {
        let endpoint = self.azure_endpoint.as_ref()?;
        let api_key = self.azure_api_key.as_ref()?;
        let deployment = self.azure_deployment.as_ref()?;
        Some(ProviderTarget {
            provider: ChatProvider::Azure,
            url: format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                endpoint.trim_end_matches('/'),
                deployment,
                self.azure_api_version
            ),
            model: deployment.clone(),
            api_key: api_key.clone(),
        })
    }

    fn openai_target(&self) -> Option<ProviderTarget> {
        let api_key = self.openai_api_key.as_ref()?;
        Some(ProviderTarget {
            provider: ChatProvider::OpenAI,
            url: format!(
                "{}/chat/completions",
                self.openai_base_url.trim_end_matches('/')
            ),
            model: self.openai_model.clone(),
            api_key: api_key.clone(),
        })
    }

    /// Resolve which provider to call.
    pub fn resolve_provider(&self) -> Option<ProviderTarget> {
        match self.preferred_provider.as_str() {
            "azure" => self.azure_target(),
            "openai" => self.openai_target(),
            // Auto mode: Azure > OpenAI
            "auto" => self.azure_target().or_else(|| self.openai_target()),
            _ => None,
        }
    }
}
