use serde::Deserialize;
use std::fs::{File, metadata};
use std::io::Read;
use once_cell::sync::Lazy;
use serde_yaml;

// ---------------------------------------------- Provider Config ----------------------------------------------
// Gemini generateContent API
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_base: String,
    pub model_name: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model_name: "gemini-2.0-flash-exp".to_string(),
        }
    }
}

// ---------------------------------------------- Config ----------------------------------------------
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    pub provider: String,
    pub gemini: GeminiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            provider: "gemini".to_string(),
            gemini: GeminiConfig::default(),
        }
    }
}

impl Config {
    pub fn load_config() -> Config {
        let config_path = if metadata("/etc/synthig/configs.yaml").is_ok() {
            "/etc/synthig/configs.yaml"
        } else {
            "src/configs/configs.yaml"
        };
        let mut file = File::open(config_path).expect("Failed to open config file");
        let mut contents = String::new();
        file.read_to_string(&mut contents).expect("Failed to read config file");
        serde_yaml::from_str(&contents).expect("Failed to parse config file")
    }
}

// Global static configuration object
pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(|| Config::load_config());
