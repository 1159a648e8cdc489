use std::fmt;
use std::io::{self, Write};

/// Value used for every field that was not injected at build time
pub const UNSET: &str = "None";

/// Build metadata of a binary, set once and read many times
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildInfo {
    version: String,
    git_branch: String,
    build_hash: String,
    build_time: String,
    service: String,
}

impl BuildInfo {
    pub fn new<V, G, H, T, S>(
        version: V,
        git_branch: G,
        build_hash: H,
        build_time: T,
        service: S,
    ) -> Self
    where
        V: Into<String>,
        G: Into<String>,
        H: Into<String>,
        T: Into<String>,
        S: Into<String>,
    {
        Self {
            version: version.into(),
            git_branch: git_branch.into(),
            build_hash: build_hash.into(),
            build_time: build_time.into(),
            service: service.into(),
        }
    }

    /// Metadata injected through `DALGEN_*` variables when this crate was compiled
    pub fn current() -> Self {
        Self::new(
            option_env!("DALGEN_VERSION").unwrap_or(UNSET),
            option_env!("DALGEN_GIT_BRANCH").unwrap_or(UNSET),
            option_env!("DALGEN_BUILD_HASH").unwrap_or(UNSET),
            option_env!("DALGEN_BUILD_TIME").unwrap_or(UNSET),
            option_env!("DALGEN_SERVICE_NAME").unwrap_or(UNSET),
        )
    }

    /// `{version}-{git_branch}-{build_hash}`
    pub fn version_string(&self) -> String {
        format!("{}-{}-{}", self.version, self.git_branch, self.build_hash)
    }

    pub fn product_version(&self) -> &str {
        &self.version
    }

    pub fn git_branch(&self) -> &str {
        &self.git_branch
    }

    pub fn build_hash(&self) -> &str {
        &self.build_hash
    }

    pub fn build_time(&self) -> &str {
        &self.build_time
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Write the five labelled lines of [`BuildInfo::print_full_version`]
    pub fn write_full_version<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "Service:    {}", self.service)?;
        writeln!(w, "Version:    {}", self.version)?;
        writeln!(w, "Git Branch: {}", self.git_branch)?;
        writeln!(w, "Git Commit: {}", self.build_hash)?;
        writeln!(w, "Build Time: {}", self.build_time)
    }

    /// Print service, version, branch, commit and build time, one per line
    pub fn print_full_version(&self) -> io::Result<()> {
        self.write_full_version(io::stdout().lock())
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::new(UNSET, UNSET, UNSET, UNSET, UNSET)
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version_string())
    }
}
