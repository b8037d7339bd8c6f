//! Cache persistente de resultados de funções.
//!
//! Este módulo grava o retorno de uma função em `saved_states/` e, nas
//! execuções seguintes do mesmo programa, devolve o valor gravado em vez
//! de executar a função de novo.
//!
//! As funções livres abaixo usam o store padrão ([`CacheStore::with_defaults`]);
//! para outra pasta ou formato, construa um [`CacheStore`] a partir de
//! [`CacheConfig`](crate::types::config::CacheConfig).

mod codec;
mod memoize;
mod resolver;
mod store;

pub use codec::Format;
pub use memoize::{MemoizeOptions, Memoized};
pub use resolver::{current_program_name, PathResolver};
pub use store::{CacheEntry, CacheStore};

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::config::CacheConfig;
use crate::CacheResult;

fn default_store(program_name: Option<&str>) -> CacheResult<CacheStore> {
    match program_name {
        Some(name) => CacheStore::from_config(&CacheConfig::default().with_program_name(name)),
        None => CacheStore::with_defaults(),
    }
}

/// Envolve `func` com o cache padrão, sob o programa em execução.
pub fn cacheme<F>(
    function_name: &str,
    options: MemoizeOptions,
    func: F,
) -> CacheResult<Memoized<F>> {
    Ok(default_store(None)?.memoize(function_name, options, func))
}

/// Caminho do arquivo de cache de uma função.
pub fn get_cache_filepath(function_name: &str, program_name: Option<&str>) -> CacheResult<PathBuf> {
    default_store(program_name)?.path(function_name, None)
}

/// Carrega o valor em cache, ou `None` se ausente ou corrompido.
pub fn load_cache<T: DeserializeOwned>(
    function_name: &str,
    program_name: Option<&str>,
) -> CacheResult<Option<T>> {
    default_store(program_name)?.load(function_name, None)
}

/// Grava `value` como cache da função.
pub fn save_cache<T: Serialize + ?Sized>(
    value: &T,
    function_name: &str,
    program_name: Option<&str>,
) -> CacheResult<()> {
    default_store(program_name)?.save(value, function_name, None)
}

/// Remove o cache da função; retorna `false` se não havia arquivo.
pub fn clear_cache(function_name: &str, program_name: Option<&str>) -> CacheResult<bool> {
    default_store(program_name)?.clear(function_name, None)
}
