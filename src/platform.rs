//! Platform identity.
//!
//! The host platform is resolved once in `main` and passed down explicitly, so every
//! platform-dependent decision can be exercised for all variants from any host.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    /// POSIX-like systems other than macOS (Linux, the BSDs, ...).
    Posix,
    Other,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Windows,
        Platform::MacOs,
        Platform::Posix,
        Platform::Other,
    ];

    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" | "solaris" | "illumos"
            | "android" => Platform::Posix,
            _ => Platform::Other,
        }
    }

    /// Interpreter used to run the clang-tidy wrapper script.
    pub fn python(&self) -> &'static str {
        match self {
            Platform::Windows => "python.exe",
            Platform::MacOs | Platform::Posix => "python3",
            Platform::Other => "python",
        }
    }

    /// Command prefix that opens a file with the desktop's default handler.
    pub fn opener(&self) -> Vec<String> {
        let parts: &[&str] = match self {
            Platform::Windows => &["cmd", "/C", "start", ""],
            Platform::MacOs => &["open"],
            Platform::Posix | Platform::Other => &["xdg-open"],
        };
        parts.iter().map(|s| s.to_string()).collect()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Posix => "posix",
            Platform::Other => "other",
        };
        write!(f, "{}", name)
    }
}
