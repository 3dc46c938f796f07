//! Centralized defaults for project layout and configuration keys

/// Default locations inside a project directory
pub mod paths {
    pub const DEFAULT_CONFIG_PATH: &str = "config.yml";
    pub const DEFAULT_DOMAIN_PATH: &str = "domain.yml";
    pub const DEFAULT_DATA_PATH: &str = "data";

    /// File names recognized as project configuration
    pub const CONFIG_FILE_NAMES: &[&str] = &["config.yml", "config.yaml"];

    /// File stem prefix of domain files in multi-project layouts
    pub const DOMAIN_FILE_PREFIX: &str = "domain";
}

/// Keys read from training configuration files
pub mod keys {
    /// List of importer specifications
    pub const IMPORTERS: &str = "importers";
    /// Importer name inside an importer specification
    pub const IMPORTER_NAME: &str = "name";
    /// Sub-projects imported by a multi-project config
    pub const IMPORTS: &str = "imports";
}

/// Environment variable settings
pub mod env {
    pub const SETTINGS_PREFIX: &str = "DIALOGUE_DATA";
    pub const SETTINGS_SEPARATOR: &str = "__";
    pub const LIST_SEPARATOR: &str = ",";
}
