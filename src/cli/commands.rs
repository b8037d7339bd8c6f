//! Implementação dos comandos CLI do Cachorro.

use std::path::PathBuf;

use anyhow::Context;

use crate::cache::CacheStore;
use crate::types::config::{CacheConfig, Config, DEFAULT_CONFIG_FILE};
use crate::{CacheError, CacheResult};

/// Cria a configuração padrão no diretório informado.
pub fn init(path: Option<PathBuf>) -> anyhow::Result<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)
            .with_context(|| format!("criando {}", target_dir.display()))?;
        tracing::info!("Diretório criado: {}", target_dir.display());
    }

    let config_path = target_dir.join(DEFAULT_CONFIG_FILE);

    if config_path.exists() {
        println!("Configuração já existe em: {}", config_path.display());
        return Ok(());
    }

    let config = Config::default_config();
    config.save(&config_path)?;

    println!("Cachorro inicializado!");
    println!("Configuração criada em: {}", config_path.display());
    println!("Pasta do cache: {}", config.cache.folder.display());
    println!("Formato: {}", config.cache.format);

    Ok(())
}

/// Programa informado na linha de comando ou na configuração.
///
/// O nome do próprio binário não serve como namespace aqui.
fn required_program(program: Option<&str>, config: &Config) -> CacheResult<String> {
    program
        .map(str::to_string)
        .or_else(|| config.cache.program_name.clone())
        .ok_or_else(|| {
            CacheError::config("informe --program ou defina cache.program_name na configuração")
        })
}

fn program_store(program: Option<&str>, config: &Config) -> CacheResult<CacheStore> {
    let program = required_program(program, config)?;
    let cache_config: CacheConfig = config.cache.clone().with_program_name(program);
    CacheStore::from_config(&cache_config)
}

fn folder_store(config: &Config) -> CacheResult<CacheStore> {
    // Listagem não depende do programa padrão
    let cache_config = config.cache.clone().with_program_name(
        config
            .cache
            .program_name
            .clone()
            .unwrap_or_else(|| "cachorro".to_string()),
    );
    CacheStore::from_config(&cache_config)
}

/// Mostra o caminho do cache de uma função.
pub fn path(function: &str, program: Option<&str>, config: &Config) -> anyhow::Result<()> {
    let store = program_store(program, config)?;
    let path = store.path(function, None)?;
    println!("{}", path.display());
    Ok(())
}

/// Lista os arquivos de cache.
pub fn list(program: Option<&str>, config: &Config) -> anyhow::Result<()> {
    let store = folder_store(config)?;
    let entries = store
        .entries(program)
        .with_context(|| format!("listando {}", config.cache.folder.display()))?;

    if entries.is_empty() {
        println!("Nenhum cache em {}", config.cache.folder.display());
        return Ok(());
    }

    let mut total = 0u64;
    for entry in &entries {
        total += entry.size_bytes;
        let modified = entry
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<40} {:>10} bytes  {}", entry.file_name, entry.size_bytes, modified);
    }

    println!();
    println!(
        "{} entrada(s), {} bytes ({})",
        entries.len(),
        total,
        store.format()
    );
    Ok(())
}

/// Remove o cache de cada função informada.
pub fn clear(functions: &[String], program: Option<&str>, config: &Config) -> anyhow::Result<()> {
    let store = program_store(program, config)?;

    for function in functions {
        let path = store.path(function, None)?;
        if store.clear(function, None)? {
            println!("Removido: {}", path.display());
        } else {
            println!("Nenhum cache em: {}", path.display());
        }
    }
    Ok(())
}

/// Remove todos os arquivos de cache.
pub fn purge(program: Option<&str>, config: &Config) -> anyhow::Result<()> {
    let store = folder_store(config)?;
    let removed = store.purge(program)?;
    println!("{} arquivo(s) removido(s)", removed);
    Ok(())
}

/// Mostra versão.
pub fn version() {
    println!("cachorro {}", env!("CARGO_PKG_VERSION"));
}
