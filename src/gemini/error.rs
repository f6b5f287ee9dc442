//! Tipos de erro para o cliente da API Gemini.
//!
//! Define [`GeminiError`] com variantes para rate limiting, erros da API,
//! erros de rede e respostas sem texto. Usa `thiserror` para derivar
//! `Display` e `Error` a partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros possíveis ao chamar a Generative Language API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// O servidor respondeu HTTP 429.
    /// `retry_after_ms` indica quanto tempo esperar antes de tentar de novo.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Qualquer outro status de erro (chave inválida, cota, erro do servidor).
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Falha de DNS, conexão recusada, timeout ou corpo ilegível.
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// A chamada funcionou, mas nenhum candidato trouxe texto.
    #[error("response contained no text")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_display() {
        let err = GeminiError::RateLimited {
            retry_after_ms: 5000,
        };
        assert_eq!(err.to_string(), "rate limited, retry after 5000ms");
    }

    #[test]
    fn api_error_display() {
        let err = GeminiError::ApiError {
            status: 403,
            message: "API key not valid".into(),
        };
        assert_eq!(err.to_string(), "API error (status 403): API key not valid");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeminiError>();
    }
}
