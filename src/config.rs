//! Configuração do WashBay carregada a partir de `washbay.toml`.
//!
//! A struct [`WashbayConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! `GEMINI_API_KEY` (ou a antiga `API_KEY`) tem precedência sobre o arquivo.

use serde::Deserialize;
use std::path::Path;

use crate::error::WashbayError;

const CONFIG_FILE: &str = "washbay.toml";

/// Variáveis de ambiente consultadas para a chave, nesta ordem.
const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Configuração de nível superior carregada de `washbay.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct WashbayConfig {
    /// Chave da API Gemini. Vazia significa análises em modo de fallback.
    #[serde(default)]
    pub api_key: String,

    /// Modelo de geração de texto usado nas análises diárias.
    #[serde(default = "default_model")]
    pub model: String,

    /// Se cada novo job rende um ponto de fidelidade ao cliente.
    #[serde(default = "default_loyalty_enabled")]
    pub loyalty_enabled: bool,

    /// Prefixo de moeda impresso antes dos valores.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Nome usado nos recibos e nos prompts de análise.
    #[serde(default = "default_business_name")]
    pub business_name: String,

    /// Número de baias de lavagem, numeradas a partir de 1.
    #[serde(default = "default_bays")]
    pub bays: u8,

    /// Tempo máximo de uma requisição de análise.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_loyalty_enabled() -> bool {
    true
}

fn default_currency() -> String {
    "GHS".to_string()
}

fn default_business_name() -> String {
    "WashBay Pro".to_string()
}

fn default_bays() -> u8 {
    5
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for WashbayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            loyalty_enabled: default_loyalty_enabled(),
            currency: default_currency(),
            business_name: default_business_name(),
            bays: default_bays(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl WashbayConfig {
    /// Carrega a configuração de `washbay.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self, WashbayError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, WashbayError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<WashbayConfig>(&contents)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.is_empty())
        {
            config.api_key = key;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), WashbayError> {
        if self.bays == 0 {
            return Err(WashbayError::Config("bays must be at least 1".into()));
        }
        if self.model.trim().is_empty() {
            return Err(WashbayError::Config("model must not be empty".into()));
        }
        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let config = WashbayConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.loyalty_enabled);
        assert_eq!(config.currency, "GHS");
        assert_eq!(config.business_name, "WashBay Pro");
        assert_eq!(config.bays, 5);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.api_key.is_empty());
        assert!(!config.has_api_key());
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            loyalty_enabled = false
            bays = 3
        "#;
        let config: WashbayConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.loyalty_enabled);
        assert_eq!(config.bays, 3);
        assert_eq!(config.currency, "GHS");
        assert_eq!(config.model, "gemini-2.5-flash");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "business_name = \"Spotless Accra\"\nbays = 2").unwrap();

        let config = WashbayConfig::load_from(file.path()).unwrap();
        assert_eq!(config.business_name, "Spotless Accra");
        assert_eq!(config.bays, 2);
    }

    #[test]
    fn load_rejects_zero_bays() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bays = 0").unwrap();

        let err = WashbayConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, WashbayError::Config(_)));
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bays = \"lots\"").unwrap();

        let err = WashbayConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, WashbayError::Toml(_)));
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = WashbayConfig::load_from(&dir.path().join("missing.toml"))
            .unwrap();
        assert_eq!(config.bays, 5);
    }
}
