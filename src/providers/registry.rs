use std::fmt;

use serde::{Deserialize, Serialize};

use super::adapter::ShapingStrategy;
use super::google::GoogleStrategy;
use super::openai::OpenAiStrategy;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
  Groq,
  Anthropic,
  OpenRouter,
  Google,
  Cohere,
  Deepseek,
  HuggingFace,
  Hyperbolic,
  Mistral,
  Ollama,
  OpenAI,
  Perplexity,
}

pub const ALL_PROVIDERS: &[Provider] = &[
  Provider::Groq,
  Provider::Anthropic,
  Provider::OpenRouter,
  Provider::Google,
  Provider::Cohere,
  Provider::Deepseek,
  Provider::HuggingFace,
  Provider::Hyperbolic,
  Provider::Mistral,
  Provider::Ollama,
  Provider::OpenAI,
  Provider::Perplexity,
];

const PROVIDER_ENDPOINTS: &[(Provider, &str)] = &[
  (Provider::Groq, "https://api.groq.com/openai/v1/chat/completions"),
  (Provider::Anthropic, "https://api.anthropic.com/v1/messages"),
  (Provider::OpenRouter, "https://openrouter.ai/api/v1/chat/completions"),
  (
    Provider::Google,
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.0-pro:generateContent",
  ),
  (Provider::Cohere, "https://api.cohere.ai/v1/generate"),
  (Provider::Deepseek, "https://api.deepseek.com/v1/chat/completions"),
  (Provider::HuggingFace, "https://api-inference.huggingface.co/models"),
  (Provider::Hyperbolic, "https://api.hyperbolic.ai/v1/chat/completions"),
  (Provider::Mistral, "https://api.mistral.ai/v1/chat/completions"),
  (Provider::Ollama, "http://localhost:11434/api/chat"),
  (Provider::OpenAI, "https://api.openai.com/v1/chat/completions"),
  (Provider::Perplexity, "https://api.perplexity.ai/chat/completions"),
];

const DEFAULT_MODELS: &[(Provider, &str)] = &[
  (Provider::Groq, "llama-3.1-8b-instant"),
  (Provider::OpenRouter, "openrouter/auto"),
  (Provider::Google, "gemini-1.0-pro"),
  (Provider::Deepseek, "deepseek-chat"),
  (Provider::Hyperbolic, "meta-llama/Meta-Llama-3.1-8B-Instruct"),
  (Provider::Mistral, "mistral-small-latest"),
  (Provider::OpenAI, "gpt-3.5-turbo"),
  (Provider::Perplexity, "sonar"),
];

static GOOGLE_STRATEGY: GoogleStrategy = GoogleStrategy;
static OPENAI_STRATEGY: OpenAiStrategy = OpenAiStrategy;

impl Provider {
  pub fn name(&self) -> &'static str {
    match self {
      Provider::Groq => "Groq",
      Provider::Anthropic => "Anthropic",
      Provider::OpenRouter => "OpenRouter",
      Provider::Google => "Google",
      Provider::Cohere => "Cohere",
      Provider::Deepseek => "Deepseek",
      Provider::HuggingFace => "HuggingFace",
      Provider::Hyperbolic => "Hyperbolic",
      Provider::Mistral => "Mistral",
      Provider::Ollama => "Ollama",
      Provider::OpenAI => "OpenAI",
      Provider::Perplexity => "Perplexity",
    }
  }

  pub fn from_name(name: &str) -> Option<Provider> {
    ALL_PROVIDERS
      .iter()
      .find(|provider| provider.name().eq_ignore_ascii_case(name.trim()))
      .copied()
  }
}

impl fmt::Display for Provider {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

pub fn endpoint(provider: Provider) -> &'static str {
  PROVIDER_ENDPOINTS
    .iter()
    .find(|(candidate, _)| *candidate == provider)
    .map(|(_, url)| *url)
    .unwrap_or_default()
}

pub fn default_model(provider: Provider) -> Option<&'static str> {
  DEFAULT_MODELS
    .iter()
    .find(|(candidate, _)| *candidate == provider)
    .map(|(_, model)| *model)
}

pub fn strategy_for(provider: Provider) -> Option<&'static dyn ShapingStrategy> {
  match provider {
    Provider::Google => Some(&GOOGLE_STRATEGY),
    Provider::OpenAI
    | Provider::Groq
    | Provider::OpenRouter
    | Provider::Deepseek
    | Provider::Hyperbolic
    | Provider::Mistral
    | Provider::Perplexity => Some(&OPENAI_STRATEGY),
    Provider::Anthropic | Provider::Cohere | Provider::HuggingFace | Provider::Ollama => None,
  }
}

pub fn is_wired(provider: Provider) -> bool {
  strategy_for(provider).is_some()
}
