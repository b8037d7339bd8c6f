//! Formatos de serialização dos arquivos de cache.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{CacheError, CacheResult};

/// Formato usado para gravar os valores em disco.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Binário compacto via bincode.
    #[default]
    Bincode,
    /// JSON legível, útil para inspecionar o cache.
    Json,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Bincode => write!(f, "bincode"),
            Format::Json => write!(f, "json"),
        }
    }
}

impl Format {
    /// Extensão dos arquivos gravados neste formato.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Bincode => "bin",
            Format::Json => "json",
        }
    }

    /// Serializa um valor para bytes.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> CacheResult<Vec<u8>> {
        match self {
            Format::Bincode => bincode::serde::encode_to_vec(value, bincode::config::standard())
                .map_err(|e| CacheError::Serialization(e.to_string())),
            Format::Json => {
                serde_json::to_vec(value).map_err(|e| CacheError::Serialization(e.to_string()))
            }
        }
    }

    /// Desserializa bytes lidos de `path`.
    ///
    /// Qualquer falha vira [`CacheError::Corrupted`], inclusive bytes
    /// sobrando depois do valor (arquivo com lixo no final).
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8], path: &Path) -> CacheResult<T> {
        let corrupted = |reason: String| CacheError::Corrupted {
            path: path.to_path_buf(),
            reason,
        };

        match self {
            Format::Bincode => {
                let (value, consumed): (T, usize) =
                    decode_bincode(bytes).map_err(|e| corrupted(e.to_string()))?;
                if consumed != bytes.len() {
                    return Err(corrupted(format!(
                        "{} bytes sobrando após o valor",
                        bytes.len() - consumed
                    )));
                }
                Ok(value)
            }
            Format::Json => serde_json::from_slice(bytes).map_err(|e| corrupted(e.to_string())),
        }
    }
}

/// Decodifica bincode com limite de alocação proporcional ao arquivo.
///
/// Strings e buffers reservam o tamanho declarado antes de ler; um prefixo
/// de tamanho forjado não pode passar do limite. Um valor válido nunca
/// reserva mais bytes do que o arquivo contém.
fn decode_bincode<T: DeserializeOwned>(
    bytes: &[u8],
) -> Result<(T, usize), bincode::error::DecodeError> {
    let config = bincode::config::standard();

    macro_rules! limited {
        ($limit:expr) => {
            bincode::serde::decode_from_slice(bytes, config.with_limit::<{ $limit }>())
        };
    }

    match bytes.len() {
        n if n <= 1 << 16 => limited!(1 << 16),
        n if n <= 1 << 20 => limited!(1 << 20),
        n if n <= 1 << 24 => limited!(1 << 24),
        n if n <= 1 << 28 => limited!(1 << 28),
        n if n <= u32::MAX as usize => limited!(u32::MAX as usize),
        _ => limited!(usize::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(Format::Bincode.extension(), "bin");
        assert_eq!(Format::Json.extension(), "json");
        assert_eq!(Format::default(), Format::Bincode);
    }

    #[test]
    fn test_bincode_decodes_what_it_encodes() {
        let bytes = Format::Bincode.encode(&vec![2, 4, 6]).unwrap();
        let value: Vec<i32> = Format::Bincode.decode(&bytes, Path::new("x.bin")).unwrap();
        assert_eq!(value, vec![2, 4, 6]);
    }

    #[test]
    fn test_json_is_readable() {
        let bytes = Format::Json.encode(&vec!["a", "b"]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_truncated_bincode_is_corrupted() {
        let mut bytes = Format::Bincode.encode(&vec![2, 4, 6]).unwrap();
        bytes.pop();

        let result: CacheResult<Vec<i32>> = Format::Bincode.decode(&bytes, Path::new("x.bin"));
        assert!(matches!(result, Err(CacheError::Corrupted { .. })));
    }

    #[test]
    fn test_trailing_bytes_are_corrupted() {
        let mut bytes = Format::Bincode.encode(&42u32).unwrap();
        bytes.extend_from_slice(b"lixo");

        let result: CacheResult<u32> = Format::Bincode.decode(&bytes, Path::new("x.bin"));
        match result {
            Err(CacheError::Corrupted { reason, .. }) => assert!(reason.contains("sobrando")),
            other => panic!("esperava Corrupted, veio {:?}", other),
        }
    }

    #[test]
    fn test_forged_length_is_corrupted() {
        // Varint u64 declarando uma string de 2^40 bytes
        let bytes = [253u8, 0, 0, 0, 0, 0, 1, 0, 0];

        let result: CacheResult<String> = Format::Bincode.decode(&bytes, Path::new("x.bin"));
        assert!(matches!(result, Err(CacheError::Corrupted { .. })));

        let result: CacheResult<Vec<u8>> = Format::Bincode.decode(&bytes, Path::new("x.bin"));
        assert!(matches!(result, Err(CacheError::Corrupted { .. })));
    }

    #[test]
    fn test_limit_accepts_string_filling_the_file() {
        let text = "x".repeat(70_000);
        let bytes = Format::Bincode.encode(&text).unwrap();

        let value: String = Format::Bincode.decode(&bytes, Path::new("x.bin")).unwrap();
        assert_eq!(value, text);
    }

    #[test]
    fn test_invalid_json_is_corrupted() {
        let result: CacheResult<Vec<i32>> = Format::Json.decode(b"{not json", Path::new("x.json"));
        assert!(matches!(result, Err(CacheError::Corrupted { .. })));
    }

    #[test]
    fn test_format_serde_names() {
        assert_eq!(serde_json::to_string(&Format::Json).unwrap(), "\"json\"");
        let parsed: Format = serde_json::from_str("\"bincode\"").unwrap();
        assert_eq!(parsed, Format::Bincode);
    }
}
