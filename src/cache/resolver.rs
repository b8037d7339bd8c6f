//! Resolução do caminho dos arquivos de cache.
//!
//! O caminho é `<pasta>/<programa>_<função>.<extensão>`. O nome do programa
//! é decidido uma única vez, na construção do [`PathResolver`], e não lido
//! do ambiente a cada chamada.

use std::path::{Path, PathBuf};

use crate::cache::Format;
use crate::types::config::CacheConfig;
use crate::{CacheError, CacheResult};

/// Deriva o nome do programa a partir do executável em execução.
///
/// Usa o nome do arquivo sem extensão. Falha com
/// [`CacheError::Configuration`] quando não há executável identificável.
pub fn current_program_name() -> CacheResult<String> {
    let from_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| file_stem(&exe));

    from_exe
        .or_else(|| {
            std::env::args_os()
                .next()
                .and_then(|arg0| file_stem(Path::new(&arg0)))
        })
        .ok_or_else(|| {
            CacheError::config("não foi possível determinar o programa em execução; informe program_name")
        })
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Valida um componente do nome do arquivo de cache.
fn validate_component(kind: &str, value: &str) -> CacheResult<()> {
    if value.is_empty() {
        return Err(CacheError::config(format!("nome de {} vazio", kind)));
    }
    if value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(CacheError::config(format!(
            "nome de {} inválido para arquivo: '{}'",
            kind, value
        )));
    }
    Ok(())
}

/// Calcula caminhos de cache a partir de programa e função.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    folder: PathBuf,
    program_name: String,
    extension: &'static str,
}

impl PathResolver {
    /// Cria um resolver com programa explícito.
    pub fn new<P: Into<PathBuf>, S: Into<String>>(
        folder: P,
        program_name: S,
        format: Format,
    ) -> CacheResult<Self> {
        let program_name = program_name.into();
        validate_component("programa", &program_name)?;
        Ok(Self {
            folder: folder.into(),
            program_name,
            extension: format.extension(),
        })
    }

    /// Cria um resolver a partir da configuração.
    ///
    /// Sem `program_name` configurado, usa [`current_program_name`].
    pub fn from_config(config: &CacheConfig) -> CacheResult<Self> {
        let program_name = match &config.program_name {
            Some(name) => name.clone(),
            None => current_program_name()?,
        };
        Self::new(&config.folder, program_name, config.format)
    }

    /// Pasta onde os arquivos são gravados.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Programa padrão usado quando nenhum é informado.
    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// Extensão dos arquivos de cache.
    pub fn extension(&self) -> &'static str {
        self.extension
    }

    /// Resolve o caminho do cache de `function_name`.
    ///
    /// `program_name` sobrescreve o programa padrão. Não toca no disco.
    pub fn resolve(&self, function_name: &str, program_name: Option<&str>) -> CacheResult<PathBuf> {
        let program_name = program_name.unwrap_or(&self.program_name);
        validate_component("programa", program_name)?;
        validate_component("função", function_name)?;

        Ok(self.folder.join(format!(
            "{}_{}.{}",
            program_name, function_name, self.extension
        )))
    }
}
