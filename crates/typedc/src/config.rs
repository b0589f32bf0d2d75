use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::document::{CompileOptions, ModuleMode, OutputExtension};
use crate::TypedcError;

/// Project settings read from a `typed.toml` next to the compile target.
/// CLI flags override these; the defaults apply when the file is absent.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub compiler: CompilerConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CompilerConfig {
    pub mode: Option<String>,
    pub extension: Option<String>,
    pub out_dir: Option<String>,
}

/// Read `typed.toml` from the directory that holds the compile target, if
/// one is present.
pub fn load_config(target: &Path) -> Result<ProjectConfig, TypedcError> {
    let dir = if target.is_dir() {
        target
    } else {
        target.parent().unwrap_or(Path::new("."))
    };
    let path = dir.join("typed.toml");
    if !path.is_file() {
        return Ok(ProjectConfig::default());
    }
    let text = fs::read_to_string(&path)?;
    toml::from_str(&text).map_err(|err| TypedcError::Config {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// Flags override typed.toml, which overrides the defaults.
pub fn resolve_options(
    config: &ProjectConfig,
    single: bool,
    dts: bool,
) -> Result<CompileOptions, TypedcError> {
    let mut options = CompileOptions::default();

    match config.compiler.mode.as_deref() {
        Some("single") => options.mode = ModuleMode::Single,
        Some("multiple") | None => {}
        Some(other) => {
            return Err(TypedcError::Config {
                path: "typed.toml".to_string(),
                message: format!("unknown mode \"{other}\""),
            })
        }
    }
    match config.compiler.extension.as_deref() {
        Some(".d.ts") => options.extension = OutputExtension::Dts,
        Some(".ts") | None => {}
        Some(other) => {
            return Err(TypedcError::Config {
                path: "typed.toml".to_string(),
                message: format!("unknown extension \"{other}\""),
            })
        }
    }
    if single {
        options.mode = ModuleMode::Single;
    }
    if dts {
        options.extension = OutputExtension::Dts;
    }
    Ok(options)
}
