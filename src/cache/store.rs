//! Armazenamento dos valores em arquivos.
//!
//! Cada entrada é um único arquivo serializado. A presença do arquivo
//! indica que uma gravação anterior terminou com sucesso: falhas de
//! gravação e de leitura apagam o arquivo.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{Format, PathResolver};
use crate::types::config::CacheConfig;
use crate::{CacheError, CacheResult};

/// Arquivo de cache encontrado na pasta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Caminho completo do arquivo.
    pub path: PathBuf,

    /// Nome do arquivo (`<programa>_<função>.<extensão>`).
    pub file_name: String,

    /// Tamanho em bytes.
    pub size_bytes: u64,

    /// Última modificação, quando o sistema de arquivos informa.
    pub modified: Option<DateTime<Utc>>,
}

/// Store de cache baseado em arquivos.
#[derive(Debug, Clone)]
pub struct CacheStore {
    resolver: PathResolver,
    format: Format,
}

impl CacheStore {
    /// Cria um store a partir da configuração.
    pub fn from_config(config: &CacheConfig) -> CacheResult<Self> {
        Ok(Self {
            resolver: PathResolver::from_config(config)?,
            format: config.format,
        })
    }

    /// Cria um store com pasta e programa explícitos.
    pub fn open<P: Into<PathBuf>, S: Into<String>>(
        folder: P,
        program_name: S,
        format: Format,
    ) -> CacheResult<Self> {
        Ok(Self {
            resolver: PathResolver::new(folder, program_name, format)?,
            format,
        })
    }

    /// Store padrão: `saved_states/`, bincode, programa em execução.
    pub fn with_defaults() -> CacheResult<Self> {
        Self::from_config(&CacheConfig::default())
    }

    /// Resolver usado por este store.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Formato de serialização.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Caminho do cache de uma função.
    pub fn path(&self, function_name: &str, program_name: Option<&str>) -> CacheResult<PathBuf> {
        self.resolver.resolve(function_name, program_name)
    }

    /// Garante que a pasta do cache existe.
    pub fn ensure_folder(&self) -> CacheResult<()> {
        let folder = self.resolver.folder();
        std::fs::create_dir_all(folder).map_err(|e| CacheError::io(folder, e))
    }

    /// Carrega o valor em cache de uma função.
    ///
    /// Retorna `Ok(None)` se não existe arquivo. Um arquivo corrompido é
    /// registrado em log, apagado, e também resulta em `Ok(None)`.
    pub fn load<T: DeserializeOwned>(
        &self,
        function_name: &str,
        program_name: Option<&str>,
    ) -> CacheResult<Option<T>> {
        let path = self.path(function_name, program_name)?;
        self.load_path(&path)
    }

    /// Grava `value` no cache da função, sobrescrevendo o anterior.
    pub fn save<T: Serialize + ?Sized>(
        &self,
        value: &T,
        function_name: &str,
        program_name: Option<&str>,
    ) -> CacheResult<()> {
        let path = self.path(function_name, program_name)?;
        self.ensure_folder()?;
        self.save_path(value, &path)
    }

    /// Remove o cache de uma função.
    ///
    /// Retorna `false` (sem erro) quando não havia arquivo.
    pub fn clear(&self, function_name: &str, program_name: Option<&str>) -> CacheResult<bool> {
        let path = self.path(function_name, program_name)?;
        let removed = self.discard(&path)?;
        if removed {
            tracing::info!("Cache removido: {}", path.display());
        } else {
            tracing::info!("Nenhum cache para remover em {}", path.display());
        }
        Ok(removed)
    }

    /// Lista os arquivos de cache da pasta, em ordem de nome.
    ///
    /// Com `program_name`, lista os arquivos com prefixo `<programa>_`, o
    /// que inclui programas cujo nome começa com esse prefixo. Pasta
    /// inexistente equivale a cache vazio.
    pub fn entries(&self, program_name: Option<&str>) -> CacheResult<Vec<CacheEntry>> {
        let folder = self.resolver.folder();
        let dir = match std::fs::read_dir(folder) {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CacheError::io(folder, e)),
        };

        let prefix = program_name.map(|p| format!("{}_", p));
        let mut entries = Vec::new();

        for item in dir {
            let item = item.map_err(|e| CacheError::io(folder, e))?;
            let path = item.path();

            if path.extension().and_then(|e| e.to_str()) != Some(self.resolver.extension()) {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string)
            else {
                continue;
            };
            if let Some(prefix) = &prefix {
                if !file_name.starts_with(prefix.as_str()) {
                    continue;
                }
            }

            let metadata = item.metadata().map_err(|e| CacheError::io(&path, e))?;
            if !metadata.is_file() {
                continue;
            }

            entries.push(CacheEntry {
                file_name,
                size_bytes: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Utc>::from),
                path,
            });
        }

        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(entries)
    }

    /// Remove todas as entradas listadas por [`entries`](Self::entries).
    ///
    /// Com `program_name`, recusa (sem apagar nada) quando algum arquivo
    /// casado tem `_` depois do prefixo: `etl_x_b.bin` tanto pode ser a
    /// função `x_b` de `etl` quanto a função `b` de `etl_x`. Nesse caso use
    /// [`clear`](Self::clear) por função. Retorna o número de arquivos
    /// removidos.
    pub fn purge(&self, program_name: Option<&str>) -> CacheResult<usize> {
        let entries = self.entries(program_name)?;

        if let Some(program) = program_name {
            let prefix_len = program.len() + 1;
            let ambiguous: Vec<&str> = entries
                .iter()
                .filter(|e| {
                    let stem = e.path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
                    stem.get(prefix_len..).is_some_and(|func| func.contains('_'))
                })
                .map(|e| e.file_name.as_str())
                .collect();

            if !ambiguous.is_empty() {
                return Err(CacheError::config(format!(
                    "arquivos ambíguos para o programa '{}': {}. Remova-os com clear por função",
                    program,
                    ambiguous.join(", ")
                )));
            }
        }

        let mut removed = 0;
        for entry in entries {
            if self.discard(&entry.path)? {
                removed += 1;
            }
        }
        tracing::info!(
            "{} arquivo(s) de cache removidos de {}",
            removed,
            self.resolver.folder().display()
        );
        Ok(removed)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Operações por caminho (compartilhadas com Memoized)
    // ═══════════════════════════════════════════════════════════════════════

    pub(crate) fn load_path<T: DeserializeOwned>(&self, path: &Path) -> CacheResult<Option<T>> {
        let decoded = match std::fs::read(path) {
            Ok(bytes) => self.format.decode(&bytes, path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Cache ausente: {}", path.display());
                return Ok(None);
            }
            Err(e) => Err(CacheError::Corrupted {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        };

        match decoded {
            Ok(value) => {
                tracing::debug!("Cache carregado: {}", path.display());
                Ok(Some(value))
            }
            Err(e) => {
                tracing::error!(
                    "Erro ao carregar cache de {}: {}. Arquivo provavelmente corrompido, removido",
                    path.display(),
                    e
                );
                self.discard(path)?;
                Ok(None)
            }
        }
    }

    pub(crate) fn save_path<T: Serialize + ?Sized>(&self, value: &T, path: &Path) -> CacheResult<()> {
        let result = self
            .format
            .encode(value)
            .and_then(|bytes| std::fs::write(path, bytes).map_err(|e| CacheError::io(path, e)));

        match result {
            Ok(()) => {
                tracing::debug!("Cache gravado: {}", path.display());
                Ok(())
            }
            Err(e) => {
                tracing::error!("Erro ao gravar cache em {}: {}", path.display(), e);
                if let Err(rm) = self.discard(path) {
                    tracing::error!("Falha ao remover cache incompleto: {}", rm);
                }
                Err(e)
            }
        }
    }

    /// Apaga o arquivo, se existir. Retorna se algo foi removido.
    pub(crate) fn discard(&self, path: &Path) -> CacheResult<bool> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::io(path, e)),
        }
    }
}
