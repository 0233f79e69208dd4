use contracts::shared::zones::ZonePalette;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Переменная окружения, переопределяющая `[data].path`
pub const DATA_PATH_ENV: &str = "P909_DATA_PATH";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub data: DataConfig,
    /// Необязательная палитра; нужны все пять категорий.
    #[serde(default)]
    pub palette: Option<ZonePalette>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    pub path: String,
}

impl Config {
    pub fn palette(&self) -> ZonePalette {
        self.palette.clone().unwrap_or_default()
    }
}

/// Конфигурация по умолчанию, встроенная в бинарник
const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 3000

[data]
path = "data/inventory_projection.json"
"#;

/// Загрузка конфигурации из config.toml
///
/// Порядок поиска:
/// 1. Рядом с исполняемым файлом (production)
/// 2. Иначе встроенная конфигурация по умолчанию
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return load_config_from(&config_path);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

/// Путь к файлу данных проекции из конфигурации
///
/// `P909_DATA_PATH` важнее значения из файла. Относительный путь разрешается
/// позже, см. `system::initialization::resolve_data_path`.
pub fn get_data_path(config: &Config) -> PathBuf {
    data_path_with_override(config, std::env::var(DATA_PATH_ENV).ok())
}

/// Путь к данным с явным переопределением (пустая строка не считается)
pub fn data_path_with_override(config: &Config, env_override: Option<String>) -> PathBuf {
    env_override
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.data.path))
}
