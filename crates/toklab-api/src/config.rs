//! HTTP server configuration

use std::path::PathBuf;

pub const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub address: String,

    /// Directory holding `index.html` and the UI assets under `/static`
    pub static_dir: PathBuf,

    /// Serve the interactive API explorer at `/swagger-ui`
    pub swagger_ui: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            swagger_ui: true,
        }
    }
}

impl ServerConfig {
    pub fn index_file(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.address, "0.0.0.0:8000");
        assert_eq!(config.index_file(), PathBuf::from("static/index.html"));
        assert!(config.swagger_ui);
    }
}
