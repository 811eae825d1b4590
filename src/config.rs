use std::error::Error;
use std::fs;
use std::path::Path;
use toml::Table;

/// Settings loaded from a TOML file. Keys are looked up first in the section named after
/// the service and then in a "default" section.
pub struct Config {
    table: toml::Table,
    service: String,
    err: Option<Box<dyn Error>>,
}

impl Config {
    /// service is the name of the config section to check for default overrides.
    pub fn load(path: &Path, service: &str) -> Config {
        match fs::read_to_string(path) {
            Ok(contents) => Config::parse(&contents, service),
            Err(err) => Config {
                table: Table::new(),
                service: service.to_string(),
                err: Some(Box::new(err)),
            },
        }
    }

    pub fn parse(contents: &str, service: &str) -> Config {
        let service = service.to_string();
        match contents.parse::<Table>() {
            Ok(table) => Config {
                table,
                service,
                err: None,
            },
            Err(err) => Config {
                table: Table::new(),
                service,
                err: Some(Box::new(err)),
            },
        }
    }

    /// If there was an error reading the config file it will be returned here and the
    /// config will be empty. This is awkward but errors are typically reported via
    /// logging and logging is initialized after the config loads.
    pub fn error(&self) -> &Option<Box<dyn Error>> {
        &self.err
    }

    pub fn str_value(&self, key: &str, default: &str) -> String {
        self.section_value(&self.service, key)
            .or_else(|| self.section_value("default", key))
            .and_then(|value| value.as_str().map(|s| s.to_string()))
            .unwrap_or_else(|| default.to_string())
    }

    /// Integers are accepted too.
    pub fn float_value(&self, key: &str, default: f64) -> f64 {
        self.section_value(&self.service, key)
            .or_else(|| self.section_value("default", key))
            .and_then(|value| match value {
                toml::Value::Float(f) => Some(*f),
                toml::Value::Integer(i) => Some(*i as f64),
                _ => None, // awkward case: found value but it wasn't a number
            })
            .unwrap_or(default)
    }

    fn section_value(&self, section: &str, key: &str) -> Option<&toml::Value> {
        self.table
            .get(section)
            .and_then(|value| match value {
                toml::Value::Table(table) => Some(table),
                _ => None,
            })
            .and_then(|table| table.get(key))
    }
}
