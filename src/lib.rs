//! # Cachorro
//!
//! Cache persistente de resultados de funções.
//!
//! Na primeira chamada, o valor retornado por uma função é serializado em
//! `saved_states/<programa>_<função>.<ext>`. Nas chamadas seguintes, inclusive
//! em execuções futuras do mesmo programa, o arquivo é lido e a função não
//! é executada.
//!
//! ```no_run
//! use cachorro::{cacheme, MemoizeOptions};
//!
//! fn double(arr: Vec<i32>) -> anyhow::Result<Vec<i32>> {
//!     Ok(arr.iter().map(|x| x * 2).collect())
//! }
//!
//! let cached = cacheme("double", MemoizeOptions::default(), double)?;
//! assert_eq!(cached.call(vec![1, 2, 3])?, vec![2, 4, 6]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Módulos
//!
//! - [`cache`] - Resolução de caminhos, store em arquivos e memoização
//! - [`cli`] - Interface de linha de comando para manutenção do cache
//! - [`types`] - Configuração e erros

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod types;

pub use cache::{
    cacheme, clear_cache, get_cache_filepath, load_cache, save_cache, CacheStore, Format,
    MemoizeOptions, Memoized,
};
pub use types::config::Config;
pub use types::errors::{CacheError, CacheResult};
