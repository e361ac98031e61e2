//! Configuration access port trait.

/// Sectioned key/value configuration. Section and key lookups are
/// case-insensitive.
pub trait ConfigPort {
    fn has_section(&self, section: &str) -> bool;
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}
