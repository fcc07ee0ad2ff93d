//! Hand URLs to the desktop's default opener.
use std::process::{Command, Stdio};

use crate::error::{Result, simple_error};

fn opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

/// Spawn the platform opener for `url` without waiting for it.
///
/// Output is discarded so the opener cannot scribble over the TUI.
pub fn open_url(url: &str) -> Result<()> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(simple_error(format!("refusing to open non-web URL: {url}")));
    }
    let (program, args) = opener();
    Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| simple_error(format!("failed to execute {program}: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_web_urls() {
        let err = open_url("file:///etc/passwd").unwrap_err();
        assert!(err.to_string().contains("non-web"));
    }
}
