// ─── Platform ───
// Host OS / architecture as seen by manifest rules.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Windows,
    MacOs,
    Linux,
    Unknown,
}

impl OsFamily {
    /// Name used by manifest `os.name` rules and `natives` maps.
    pub fn canonical_name(self) -> &'static str {
        match self {
            OsFamily::Windows => "windows",
            OsFamily::MacOs => "osx",
            OsFamily::Linux => "linux",
            OsFamily::Unknown => "unknown",
        }
    }

    fn detect() -> Self {
        match std::env::consts::OS {
            "windows" => OsFamily::Windows,
            "macos" => OsFamily::MacOs,
            "linux" => OsFamily::Linux,
            _ => OsFamily::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86,
    X64,
    Arm32,
    Arm64,
    Unknown,
}

impl Arch {
    /// Name used by manifest `os.arch` rules.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X64 => "x86_64",
            Arch::Arm32 => "arm32",
            Arch::Arm64 => "arm64",
            Arch::Unknown => "unknown",
        }
    }

    /// Pointer width substituted for `${arch}` in native classifier keys.
    pub fn bits(self) -> &'static str {
        match self {
            Arch::X86 | Arch::Arm32 => "32",
            _ => "64",
        }
    }

    fn detect() -> Self {
        match std::env::consts::ARCH {
            "x86" => Arch::X86,
            "x86_64" => Arch::X64,
            "arm" => Arch::Arm32,
            "aarch64" => Arch::Arm64,
            _ => Arch::Unknown,
        }
    }
}

/// Immutable description of the platform a pass resolves for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDescriptor {
    pub os: OsFamily,
    pub arch: Arch,
    /// OS version string matched by `os.version` rule patterns.
    pub os_version: Option<String>,
}

static CURRENT: OnceLock<PlatformDescriptor> = OnceLock::new();

impl PlatformDescriptor {
    pub fn new(os: OsFamily, arch: Arch) -> Self {
        Self {
            os,
            arch,
            os_version: None,
        }
    }

    pub fn with_os_version(mut self, version: impl Into<String>) -> Self {
        self.os_version = Some(version.into());
        self
    }

    /// The host platform, detected once per process.
    pub fn current() -> &'static PlatformDescriptor {
        CURRENT.get_or_init(|| PlatformDescriptor {
            os: OsFamily::detect(),
            arch: Arch::detect(),
            os_version: sysinfo::System::os_version(),
        })
    }

    pub fn os_name(&self) -> &'static str {
        self.os.canonical_name()
    }

    pub fn arch_name(&self) -> &'static str {
        self.arch.canonical_name()
    }

    pub fn arch_bits(&self) -> &'static str {
        self.arch.bits()
    }

    /// Path-list separator for the Java classpath.
    pub fn classpath_separator(&self) -> &'static str {
        match self.os {
            OsFamily::Windows => ";",
            _ => ":",
        }
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os_name(), self.arch_name())?;
        if let Some(version) = &self.os_version {
            write!(f, " ({})", version)?;
        }
        Ok(())
    }
}
