//! Envolvimento de funções com cache persistente.
//!
//! [`Memoized`] recebe uma função e um [`MemoizeOptions`] e devolve um
//! chamável que consulta o cache antes de executar. A chave depende só do
//! programa e do nome da função, nunca dos argumentos.

use std::fmt::Display;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::CacheStore;
use crate::{CacheError, CacheResult};

/// Opções do cache de uma função.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoizeOptions {
    /// Sempre executa a função e regrava o cache, mesmo com cache válido.
    pub force_rerun: bool,
}

impl MemoizeOptions {
    /// Opções com `force_rerun` ativado.
    pub fn force_rerun() -> Self {
        Self { force_rerun: true }
    }
}

/// Função envolvida pelo cache.
pub struct Memoized<F> {
    store: CacheStore,
    function_name: String,
    options: MemoizeOptions,
    func: F,
}

impl<F> Memoized<F> {
    /// Envolve `func`, gravando seu resultado sob `function_name`.
    pub fn new<S: Into<String>>(
        store: CacheStore,
        function_name: S,
        options: MemoizeOptions,
        func: F,
    ) -> Self {
        Self {
            store,
            function_name: function_name.into(),
            options,
            func,
        }
    }

    /// Nome usado na chave do cache.
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Opções configuradas.
    pub fn options(&self) -> MemoizeOptions {
        self.options
    }

    /// Caminho do arquivo de cache desta função.
    pub fn cache_path(&self) -> CacheResult<PathBuf> {
        self.store.path(&self.function_name, None)
    }

    /// Chama a função passando pelo cache.
    ///
    /// Em cache hit a função não é executada. Em miss (ou com
    /// `force_rerun`) o resultado é gravado antes de ser retornado.
    /// Erros da função voltam inalterados, sem deixar arquivo de cache;
    /// erros do próprio cache são convertidos via `E: From<CacheError>`.
    pub fn call<A, T, E>(&self, args: A) -> Result<T, E>
    where
        F: Fn(A) -> Result<T, E>,
        T: Serialize + DeserializeOwned,
        E: From<CacheError> + Display,
    {
        let path = self.cache_path()?;
        self.store.ensure_folder()?;

        if !self.options.force_rerun {
            if let Some(value) = self.store.load_path(&path)? {
                tracing::info!("Usando resultado em cache de {}", path.display());
                return Ok(value);
            }
        }

        tracing::debug!("Executando {} (sem cache válido)", self.function_name);

        match (self.func)(args) {
            Ok(value) => {
                self.store.save_path(&value, &path)?;
                tracing::info!("Resultado de {} salvo em {}", self.function_name, path.display());
                Ok(value)
            }
            Err(e) => {
                tracing::error!(
                    "Erro ao executar {}: {}. Arquivo de cache não criado",
                    self.function_name,
                    e
                );
                if let Err(rm) = self.store.discard(&path) {
                    tracing::error!("Falha ao remover cache anterior: {}", rm);
                }
                Err(e)
            }
        }
    }
}

impl CacheStore {
    /// Envolve `func` usando este store.
    pub fn memoize<F, S: Into<String>>(
        &self,
        function_name: S,
        options: MemoizeOptions,
        func: F,
    ) -> Memoized<F> {
        Memoized::new(self.clone(), function_name, options, func)
    }
}
