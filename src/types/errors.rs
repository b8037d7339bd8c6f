//! Tipos de erro do Cachorro.

use std::path::PathBuf;

use thiserror::Error;

/// Tipo de resultado padrão do Cachorro.
pub type CacheResult<T> = Result<T, CacheError>;

/// Erros possíveis no Cachorro.
///
/// Falhas da função envolvida não passam por aqui: elas são devolvidas
/// ao chamador no tipo de erro original.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Erro de configuração: {0}")]
    Configuration(String),

    #[error("Erro de IO em {path}: {source}")]
    Io {
        /// Caminho envolvido na operação.
        path: PathBuf,
        /// Erro de IO original.
        source: std::io::Error,
    },

    #[error("Erro ao serializar valor: {0}")]
    Serialization(String),

    #[error("Arquivo de cache corrompido em {path}: {reason}")]
    Corrupted {
        /// Arquivo que falhou na desserialização.
        path: PathBuf,
        /// Motivo reportado pelo decodificador.
        reason: String,
    },

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl CacheError {
    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Cria um erro de IO associado a um caminho.
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = CacheError::io(
            "saved_states/app_double.bin",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("app_double.bin"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_corrupted_display() {
        let err = CacheError::Corrupted {
            path: PathBuf::from("saved_states/app_load.json"),
            reason: "expected value".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("corrompido"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn test_config_helper() {
        let err = CacheError::config("nome de programa vazio");
        assert!(matches!(err, CacheError::Configuration(_)));
        assert!(err.to_string().contains("nome de programa vazio"));
    }

    #[test]
    fn test_error_converts_into_anyhow() {
        let err: anyhow::Error = CacheError::config("sem programa").into();
        assert!(err.downcast_ref::<CacheError>().is_some());
    }
}
