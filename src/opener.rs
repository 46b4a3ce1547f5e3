//! Source link opener.
//!
//! Hands a card's outbound link to the desktop's default browser.

use anyhow::{Context, Result};

/// Open a source URL in the system browser.
///
/// # Arguments
/// * `url` - Link from a result card
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Only http(s) links are opened. The URL is handed to the platform opener
/// as a single argument, never through a shell.
pub fn open_link(url: &str) -> Result<()> {
    let url = url.trim();
    if !is_openable(url) {
        return Err(anyhow::anyhow!("Refusing to open non-http link: {}", url));
    }

    open::that(url).with_context(|| format!("Failed to launch a browser for {}", url))?;

    tracing::info!(%url, "opened source link");
    Ok(())
}

/// Check whether a link uses a scheme the opener accepts.
pub fn is_openable(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_openable() {
        assert!(is_openable("https://example.org/doc.pdf"));
        assert!(is_openable(" HTTP://example.org "));
        assert!(!is_openable("javascript:alert(1)"));
        assert!(!is_openable("file:///etc/passwd"));
    }

    #[test]
    fn test_open_link_rejects_other_schemes() {
        assert!(open_link("ftp://example.org").is_err());
        assert!(open_link("file:///etc/passwd?x=1&calc").is_err());
        assert!(open_link("  ").is_err());
    }

    #[test]
    fn test_query_string_links_stay_openable() {
        // Ampersands are part of the URL and reach the opener unchanged.
        assert!(is_openable("https://x.example/?a=1&b=2"));
    }
}
