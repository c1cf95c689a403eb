//! Bun target model.
//!
//! Bun can only load prebuilt libraries for a fixed set of targets (see
//! <https://bun.sh/docs/bundler/executables#supported-targets>). Each target
//! names a platform, an architecture and, on Linux and Windows, a C runtime:
//!
//! | Target             | Zig triple            |
//! |--------------------|-----------------------|
//! | `linux-x64-gnu`    | `x86_64-linux-gnu`    |
//! | `linux-x64-musl`   | `x86_64-linux-musl`   |
//! | `linux-arm64-gnu`  | `aarch64-linux-gnu`   |
//! | `linux-arm64-musl` | `aarch64-linux-musl`  |
//! | `darwin-x64`       | `x86_64-macos`        |
//! | `darwin-arm64`     | `aarch64-macos`       |
//! | `win32-x64-msvc`   | `x86_64-windows-msvc` |

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error resolving or parsing a target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("unsupported platform: {platform} {arch}")]
    UnsupportedHost { platform: String, arch: String },

    #[error("invalid target \"{0}\", valid values: {names}", names = Target::names().join(", "))]
    UnknownTarget(String),

    #[error("invalid optimize \"{0}\", valid values: Debug, ReleaseSmall, ReleaseFast, ReleaseSafe")]
    UnknownOptimize(String),
}

/// Operating system family, named the way Node reports `process.platform`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    Darwin,
    Win32,
}

impl Platform {
    /// The running platform, if Bun supports it.
    pub fn host() -> Option<Platform> {
        match std::env::consts::OS {
            "linux" => Some(Platform::Linux),
            "macos" => Some(Platform::Darwin),
            "windows" => Some(Platform::Win32),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Darwin => "darwin",
            Platform::Win32 => "win32",
        }
    }

    /// Shared library file prefix.
    pub fn library_prefix(&self) -> &'static str {
        match self {
            Platform::Win32 => "",
            _ => "lib",
        }
    }

    /// Shared library file extension, including the dot.
    pub fn library_suffix(&self) -> &'static str {
        match self {
            Platform::Darwin => ".dylib",
            Platform::Win32 => ".dll",
            Platform::Linux => ".so",
        }
    }

    /// File name of the shared library called `name` on this platform.
    pub fn library_name(&self, name: &str) -> String {
        format!("{}{}{}", self.library_prefix(), name, self.library_suffix())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture, named the way Node reports `process.arch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X64,
    Arm64,
}

impl Arch {
    /// The running architecture, if Bun supports it.
    pub fn host() -> Option<Arch> {
        match std::env::consts::ARCH {
            "x86_64" => Some(Arch::X64),
            "aarch64" => Some(Arch::Arm64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Bun-supported build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Target {
    LinuxX64Gnu,
    LinuxX64Musl,
    LinuxArm64Gnu,
    LinuxArm64Musl,
    DarwinX64,
    DarwinArm64,
    Win32X64Msvc,
}

/// The split form of a target name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetParts {
    pub platform: Platform,
    pub arch: Arch,
    pub abi: Option<&'static str>,
}

impl Target {
    /// Every supported target.
    pub const ALL: [Target; 7] = [
        Target::LinuxX64Gnu,
        Target::LinuxX64Musl,
        Target::LinuxArm64Gnu,
        Target::LinuxArm64Musl,
        Target::DarwinX64,
        Target::DarwinArm64,
        Target::Win32X64Msvc,
    ];

    /// Names of every supported target.
    pub fn names() -> Vec<&'static str> {
        Target::ALL.iter().map(Target::as_str).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::LinuxX64Gnu => "linux-x64-gnu",
            Target::LinuxX64Musl => "linux-x64-musl",
            Target::LinuxArm64Gnu => "linux-arm64-gnu",
            Target::LinuxArm64Musl => "linux-arm64-musl",
            Target::DarwinX64 => "darwin-x64",
            Target::DarwinArm64 => "darwin-arm64",
            Target::Win32X64Msvc => "win32-x64-msvc",
        }
    }

    /// Resolve the target for a platform/architecture pair.
    pub fn detect(platform: Platform, arch: Arch, musl: bool) -> Result<Target, TargetError> {
        match (platform, arch) {
            (Platform::Linux, Arch::X64) if musl => Ok(Target::LinuxX64Musl),
            (Platform::Linux, Arch::X64) => Ok(Target::LinuxX64Gnu),
            (Platform::Linux, Arch::Arm64) if musl => Ok(Target::LinuxArm64Musl),
            (Platform::Linux, Arch::Arm64) => Ok(Target::LinuxArm64Gnu),
            (Platform::Darwin, Arch::X64) => Ok(Target::DarwinX64),
            (Platform::Darwin, Arch::Arm64) => Ok(Target::DarwinArm64),
            // Windows only ships x64 builds; Bun runs them under emulation on arm64.
            (Platform::Win32, _) => Ok(Target::Win32X64Msvc),
        }
    }

    /// The target for the running machine.
    pub fn host() -> Result<Target, TargetError> {
        let unsupported = || TargetError::UnsupportedHost {
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        };
        let platform = Platform::host().ok_or_else(unsupported)?;
        let arch = Arch::host().ok_or_else(unsupported)?;
        let musl = platform == Platform::Linux && is_musl();

        Target::detect(platform, arch, musl)
    }

    /// Split the target name into platform, arch and optional ABI.
    pub fn parts(&self) -> TargetParts {
        let (platform, arch, abi) = match self {
            Target::LinuxX64Gnu => (Platform::Linux, Arch::X64, Some("gnu")),
            Target::LinuxX64Musl => (Platform::Linux, Arch::X64, Some("musl")),
            Target::LinuxArm64Gnu => (Platform::Linux, Arch::Arm64, Some("gnu")),
            Target::LinuxArm64Musl => (Platform::Linux, Arch::Arm64, Some("musl")),
            Target::DarwinX64 => (Platform::Darwin, Arch::X64, None),
            Target::DarwinArm64 => (Platform::Darwin, Arch::Arm64, None),
            Target::Win32X64Msvc => (Platform::Win32, Arch::X64, Some("msvc")),
        };
        TargetParts {
            platform,
            arch,
            abi,
        }
    }

    pub fn platform(&self) -> Platform {
        self.parts().platform
    }

    pub fn arch(&self) -> Arch {
        self.parts().arch
    }

    /// Target triple passed to `zig build -Dtarget=`.
    pub fn zig_triple(&self) -> &'static str {
        match self {
            Target::LinuxX64Gnu => "x86_64-linux-gnu",
            Target::LinuxX64Musl => "x86_64-linux-musl",
            Target::LinuxArm64Gnu => "aarch64-linux-gnu",
            Target::LinuxArm64Musl => "aarch64-linux-musl",
            Target::DarwinX64 => "x86_64-macos",
            Target::DarwinArm64 => "aarch64-macos",
            Target::Win32X64Msvc => "x86_64-windows-msvc",
        }
    }

    /// Value of the npm `libc` field for this target's package.
    pub fn libc(&self) -> Option<&'static str> {
        let parts = self.parts();
        if parts.platform != Platform::Linux {
            return None;
        }
        match parts.abi {
            Some("gnu") => Some("glibc"),
            Some("musl") => Some("musl"),
            _ => None,
        }
    }

    /// Library file name for a library called `name` on this target.
    pub fn library_name(&self, name: &str) -> String {
        self.platform().library_name(name)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TargetError::UnknownTarget(s.to_string()))
    }
}

impl TryFrom<String> for Target {
    type Error = TargetError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Target> for String {
    fn from(target: Target) -> String {
        target.as_str().to_string()
    }
}

/// Zig optimization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Optimize {
    Debug,
    ReleaseSmall,
    ReleaseFast,
    ReleaseSafe,
}

impl Optimize {
    pub const ALL: [Optimize; 4] = [
        Optimize::Debug,
        Optimize::ReleaseSmall,
        Optimize::ReleaseFast,
        Optimize::ReleaseSafe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Optimize::Debug => "Debug",
            Optimize::ReleaseSmall => "ReleaseSmall",
            Optimize::ReleaseFast => "ReleaseFast",
            Optimize::ReleaseSafe => "ReleaseSafe",
        }
    }
}

impl fmt::Display for Optimize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Optimize {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Optimize::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| TargetError::UnknownOptimize(s.to_string()))
    }
}

/// Whether the running Linux system uses musl.
///
/// Checked once per process.
pub fn is_musl() -> bool {
    static IS_MUSL: OnceLock<bool> = OnceLock::new();
    *IS_MUSL.get_or_init(|| match std::fs::read_to_string("/usr/bin/ldd") {
        Ok(ldd) => ldd.contains("musl"),
        Err(e) => {
            tracing::debug!("cannot read /usr/bin/ldd ({}), using build-time libc", e);
            cfg!(target_env = "musl")
        }
    })
}

/// Path of a locally built library inside a Zig project.
pub fn local_library_path(zig_cwd: &Path, name: &str, platform: Platform) -> PathBuf {
    zig_cwd
        .join("zig-out")
        .join("lib")
        .join(platform.library_name(name))
}
