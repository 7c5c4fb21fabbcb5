use semver::Version;

/// Static description of an external tool devtool knows how to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Executable name, also used in messages.
    pub name: &'static str,
    /// Arguments that make the tool print its version and exit.
    pub version_args: &'static [&'static str],
    pub min_version: Option<Version>,
    /// Whether the flows using this tool cannot proceed without it.
    pub required: bool,
}

impl ToolDescriptor {
    pub fn new(name: &'static str, required: bool) -> Self {
        Self {
            name,
            version_args: &["--version"],
            min_version: None,
            required,
        }
    }

    pub fn with_min_version(mut self, major: u64, minor: u64, patch: u64) -> Self {
        self.min_version = Some(Version::new(major, minor, patch));
        self
    }

    pub fn version_command(&self) -> Vec<String> {
        std::iter::once(self.name)
            .chain(self.version_args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    pub fn cmake() -> Self {
        Self::new("cmake", true).with_min_version(3, 25, 0)
    }

    pub fn ninja() -> Self {
        Self::new("ninja", false)
    }

    pub fn clang_format() -> Self {
        Self::new("clang-format", true)
    }

    pub fn clang_tidy() -> Self {
        Self::new("clang-tidy", true)
    }

    pub fn git() -> Self {
        Self::new("git", true)
    }

    pub fn doxygen() -> Self {
        Self::new("doxygen", false)
    }

    pub fn sphinx_build() -> Self {
        Self::new("sphinx-build", false)
    }

    /// Every tool devtool may invoke, in the order `doctor` reports them.
    pub fn catalog() -> Vec<Self> {
        vec![
            Self::cmake(),
            Self::ninja(),
            Self::git(),
            Self::clang_format(),
            Self::clang_tidy(),
            Self::doxygen(),
            Self::sphinx_build(),
        ]
    }
}

/// Outcome of probing one tool. An absent tool never carries a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    tool: ToolDescriptor,
    present: bool,
    version: Option<String>,
}

impl ProbeResult {
    pub fn absent(tool: ToolDescriptor) -> Self {
        Self {
            tool,
            present: false,
            version: None,
        }
    }

    pub fn found(tool: ToolDescriptor, version: Option<String>) -> Self {
        Self {
            tool,
            present: true,
            version,
        }
    }

    pub fn tool(&self) -> &ToolDescriptor {
        &self.tool
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}
