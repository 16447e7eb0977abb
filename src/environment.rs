//! Host runtime detection and transcoder path resolution.

use std::path::PathBuf;

/// Environment variable inspected for Termux detection.
pub const SANDBOX_ENV_VAR: &str = "PREFIX";

const SANDBOX_MARKER: &str = "com.termux";

/// Read-only snapshot of the host runtime, computed once at startup.
#[derive(Clone, Debug)]
pub struct EnvironmentProfile {
    /// Platform name as the original runtime reported it (Linux, Windows, Darwin).
    pub platform: String,
    /// True when running inside the Termux sandboxed Android runtime.
    pub termux: bool,
    /// Directory containing the ffmpeg binary, handed to the extraction tool.
    pub ffmpeg_location: PathBuf,
}

impl EnvironmentProfile {
    /// Detect the profile from the current process environment.
    pub fn detect() -> Self {
        let prefix = std::env::var(SANDBOX_ENV_VAR).ok();
        Self::resolve(std::env::consts::OS, prefix.as_deref())
    }

    /// Pure resolution from an OS identifier and the optional PREFIX value.
    ///
    /// Termux detection wins over the reported OS: a PREFIX containing the
    /// Termux marker always selects the sandboxed ffmpeg path.
    pub fn resolve(os: &str, prefix: Option<&str>) -> Self {
        let termux = prefix.is_some_and(|p| p.contains(SANDBOX_MARKER));

        let ffmpeg_location = if termux {
            PathBuf::from("/data/data/com.termux/files/usr/bin/")
        } else if os == "windows" {
            PathBuf::from("./ffmpeg/bin/")
        } else {
            PathBuf::from("/usr/bin/")
        };

        EnvironmentProfile {
            platform: platform_name(os),
            termux,
            ffmpeg_location,
        }
    }

    /// Default bind address: reachable from other devices under Termux,
    /// loopback-only everywhere else.
    pub fn default_bind_host(&self) -> &'static str {
        if self.termux {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        }
    }
}

fn platform_name(os: &str) -> String {
    match os {
        "linux" | "android" => "Linux",
        "windows" => "Windows",
        "macos" => "Darwin",
        other => other,
    }
    .to_string()
}
