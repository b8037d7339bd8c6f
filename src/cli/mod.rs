//! Interface de linha de comando do Cachorro.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::config::DEFAULT_CONFIG_FILE;

/// Cachorro - manutenção do cache persistente de funções.
#[derive(Parser, Debug)]
#[command(name = "cachorro")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cria cachorro.toml no diretório.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Mostra o caminho do cache de uma função.
    Path {
        /// Nome da função.
        function: String,

        /// Programa dono do cache.
        #[arg(short, long)]
        program: Option<String>,
    },

    /// Lista os arquivos de cache.
    List {
        /// Filtra por programa.
        #[arg(short, long)]
        program: Option<String>,
    },

    /// Remove o cache de uma ou mais funções.
    Clear {
        /// Nomes das funções.
        #[arg(required = true)]
        functions: Vec<String>,

        /// Programa dono do cache.
        #[arg(short, long)]
        program: Option<String>,
    },

    /// Remove todos os arquivos de cache.
    Purge {
        /// Remove só os caches deste programa (recusa nomes ambíguos).
        #[arg(short, long)]
        program: Option<String>,
    },

    /// Mostra versão.
    Version,
}
