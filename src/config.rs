use crate::error::{QuartoHeaderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub header: HeaderConfig,
    pub assets: AssetConfig,
}

/// Fixed fields of the generated header. Title, subtitle and the
/// self-contained flag come from the command line instead.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub author: String,
    pub date: String,
    pub date_format: String,
    pub dark_theme: Vec<String>,
    pub light_theme: Vec<String>,
    pub toc: bool,
    pub code_copy: bool,
    pub code_overflow: String,
    pub main_font: String,
    pub code_annotations: String,
    pub filters: Vec<String>,
    pub lightbox: String,
    pub execute: ExecuteConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExecuteConfig {
    pub echo: bool,
    pub warning: bool,
    pub message: bool,
    pub freeze: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding the asset folders. Defaults to the directory of the
    /// running executable.
    pub source_dir: Option<PathBuf>,
    pub folders: Vec<String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            author: "Kangheng Liu".to_string(),
            date: "last-modified".to_string(),
            date_format: "long".to_string(),
            dark_theme: vec![
                "cosmo".to_string(),
                "style/html-sta313.scss".to_string(),
                "style/html-dark.scss".to_string(),
                "style/my-adjustments.scss".to_string(),
            ],
            light_theme: vec![
                "cosmo".to_string(),
                "style/html-sta313.scss".to_string(),
            ],
            toc: true,
            code_copy: true,
            code_overflow: "wrap".to_string(),
            main_font: "Atkinson Hyperlegible".to_string(),
            code_annotations: "hover".to_string(),
            filters: vec!["openlinksinnewpage".to_string()],
            lightbox: "auto".to_string(),
            execute: ExecuteConfig::default(),
        }
    }
}

impl Default for ExecuteConfig {
    fn default() -> Self {
        Self {
            echo: true,
            warning: false,
            message: false,
            freeze: "auto".to_string(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            source_dir: None,
            folders: vec!["style".to_string(), "_extensions".to_string()],
        }
    }
}

impl AssetConfig {
    /// Directory the asset folders are copied from.
    pub fn resolve_source_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.source_dir {
            return Ok(dir.clone());
        }

        let exe = std::env::current_exe()?;
        exe.parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| QuartoHeaderError::InvalidPath {
                path: exe.display().to_string(),
            })
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(QuartoHeaderError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| QuartoHeaderError::Config {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| QuartoHeaderError::Config {
                message: format!("Failed to parse config file {}: {}", path.display(), e),
            })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["quarto-header.toml", ".quarto-header.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref author) = cli_args.author {
            self.header.author = author.clone();
        }

        if let Some(ref assets_dir) = cli_args.assets_dir {
            self.assets.source_dir = Some(assets_dir.clone());
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| QuartoHeaderError::Config {
                message: format!("Failed to serialize config: {}", e),
            })?;

        std::fs::write(path, content)
            .map_err(|e| QuartoHeaderError::Config {
                message: format!("Failed to write config file {}: {}", path.display(), e),
            })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.header.author.trim().is_empty() {
            return Err(QuartoHeaderError::Config {
                message: "Header author must not be empty".to_string(),
            });
        }

        if self.assets.folders.is_empty() {
            return Err(QuartoHeaderError::Config {
                message: "At least one asset folder must be specified".to_string(),
            });
        }

        // Folder names are joined onto both the source and destination
        // directories, so they must stay a single path component.
        for folder in &self.assets.folders {
            let is_plain_name = !folder.is_empty()
                && folder != "."
                && folder != ".."
                && !folder.contains('/')
                && !folder.contains('\\');

            if !is_plain_name {
                return Err(QuartoHeaderError::Config {
                    message: format!("Invalid asset folder name: {:?}", folder),
                });
            }
        }

        if let Some(ref dir) = self.assets.source_dir {
            if !dir.is_dir() {
                return Err(QuartoHeaderError::Config {
                    message: format!("Asset directory does not exist: {}", dir.display()),
                });
            }
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub author: Option<String>,
    pub assets_dir: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    pub fn with_assets_dir(mut self, assets_dir: Option<PathBuf>) -> Self {
        self.assets_dir = assets_dir;
        self
    }
}
