//! Opens URLs and `mailto:` links with the desktop's default handler.

use termfolio_terminal::ResourceOpener;
use termfolio_types::error::{Result, TermfolioError};

/// Hands targets to the platform opener without waiting for it.
pub struct DesktopOpener;

impl ResourceOpener for DesktopOpener {
    fn open(&self, target: &str) -> Result<()> {
        log::info!("Opening {target}");
        open::that_detached(target)
            .map_err(|e| TermfolioError::Resource(format!("cannot open {target}: {e}")))
    }
}
