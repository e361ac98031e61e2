//! Dashboard rendering port trait.

use std::fs;
use std::path::Path;

use crate::domain::dashboard::DashboardView;
use crate::domain::error::FolioError;

/// Port for turning a dashboard view into a document.
pub trait DashboardPort {
    fn render(&self, view: &DashboardView) -> Result<String, FolioError>;

    /// Default implementation: renders and writes the result to `output_path`.
    fn write(&self, view: &DashboardView, output_path: &Path) -> Result<(), FolioError> {
        let content = self.render(view)?;
        fs::write(output_path, content)?;
        Ok(())
    }
}
