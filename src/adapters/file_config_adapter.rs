//! INI file configuration adapter.
//!
//! Only whole-line comments are recognised. `#` and `;` inside a value are
//! kept, so `name = Fund #1; A` reads back unchanged.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = parser();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = parser();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

fn parser() -> Ini {
    let mut defaults = Ini::new().defaults();
    defaults.enable_inline_comments = false;
    Ini::new_from_defaults(defaults)
}

impl ConfigPort for FileConfigAdapter {
    fn has_section(&self, section: &str) -> bool {
        self.config
            .sections()
            .iter()
            .any(|s| s.eq_ignore_ascii_case(section))
    }

    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }
}
