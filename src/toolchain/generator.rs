//! CMake generator selection.

use super::ProbeResult;
use crate::platform::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Ninja,
    VisualStudio,
    UnixMakefiles,
    Xcode,
}

impl Generator {
    pub fn name(&self) -> &'static str {
        match self {
            Generator::Ninja => "Ninja",
            Generator::VisualStudio => "Visual Studio 17 2022",
            Generator::UnixMakefiles => "Unix Makefiles",
            Generator::Xcode => "Xcode",
        }
    }

    /// The `-G` argument passed to cmake.
    pub fn flag(&self) -> String {
        format!("-G{}", self.name())
    }
}

/// Pick a generator; first match wins: Ninja when installed, then the platform default.
///
/// `None` leaves the choice to cmake itself.
pub fn select_generator(ninja: &ProbeResult, platform: Platform) -> Option<Generator> {
    if ninja.is_present() {
        return Some(Generator::Ninja);
    }
    match platform {
        Platform::Windows => Some(Generator::VisualStudio),
        Platform::Posix => Some(Generator::UnixMakefiles),
        Platform::MacOs => Some(Generator::Xcode),
        Platform::Other => None,
    }
}
