//! CLI settings: parse/write `synonyms.conf`.
//!
//! The file uses `<key> = <value>` lines. Comments (lines starting with `#`)
//! and blank lines are ignored, unknown keys are skipped.

use std::path::{Path, PathBuf};

/// File name looked up in the config directories.
pub const CONFIG_FILE_NAME: &str = "synonyms.conf";

/// Dictionary used when neither the command line nor the config names one.
pub const DEFAULT_DICTIONARY: &str = "synonyms.txt";

/// Settings for the `synonyms` binary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    /// Default dictionary file.
    pub dictionary: Option<PathBuf>,
    /// Sort the store before each save.
    pub sort_on_save: bool,
    /// Default tracing filter, e.g. `warn` or `synonym_store=debug`.
    pub log_level: Option<String>,
    /// Keys in the file that were not recognized, in file order.
    pub ignored_keys: Vec<String>,
}

impl Settings {
    /// Load settings from `explicit` when given, else from the first config
    /// file found in the standard locations, else defaults.
    ///
    /// A config file that exists but cannot be read, or an explicit path that
    /// does not exist, is an error.
    pub fn resolve(explicit: Option<&Path>) -> std::io::Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => config_file_read_path(CONFIG_FILE_NAME),
        };
        match path {
            Some(p) => std::fs::read_to_string(&p).map(|contents| Self::parse(&contents)),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from a configuration file.
    ///
    /// # Returns
    ///
    /// `Some(settings)` if the file exists and is readable; `None` otherwise.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Parse settings text. Malformed lines are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut cfg = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }

            match lhs {
                "dictionary" => cfg.dictionary = Some(PathBuf::from(rhs)),
                "sort_on_save" => cfg.sort_on_save = parse_bool(rhs),
                "log_level" => cfg.log_level = Some(rhs.to_string()),
                other => cfg.ignored_keys.push(other.to_string()),
            }
        }
        cfg
    }

    /// Write these settings as a commented `key = value` file.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# synonyms configuration\n");
        buf.push_str("# dictionary: path to the `word | syn, syn` file\n");
        match &self.dictionary {
            Some(p) => {
                let _ = writeln!(&mut buf, "dictionary = {}", p.display());
            }
            None => {
                let _ = writeln!(&mut buf, "# dictionary = {DEFAULT_DICTIONARY}");
            }
        }
        buf.push_str("# sort_on_save: sort words and synonyms before every write\n");
        let _ = writeln!(&mut buf, "sort_on_save = {}", self.sort_on_save);
        buf.push_str("# log_level: tracing filter used when RUST_LOG is unset\n");
        let _ = writeln!(&mut buf, "log_level = {}", self.log_level());

        std::fs::write(path, buf)
    }

    /// Configured log filter, `warn` when unset.
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }

    /// Pick the dictionary path: command line first, then config, then the default.
    pub fn dictionary_path(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.dictionary.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DICTIONARY))
    }
}

/// First existing `<config dir>/synonyms/<name>`, checking `$XDG_CONFIG_HOME`
/// then `$HOME/.config`.
pub fn config_file_read_path(name: &str) -> Option<PathBuf> {
    config_dirs(
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
    .into_iter()
    .map(|dir| dir.join("synonyms").join(name))
    .find(|p| p.is_file())
}

fn config_dirs(xdg: Option<PathBuf>, home: Option<PathBuf>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(x) = xdg.filter(|p| !p.as_os_str().is_empty()) {
        dirs.push(x);
    }
    if let Some(h) = home.filter(|p| !p.as_os_str().is_empty()) {
        dirs.push(h.join(".config"));
    }
    dirs
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
