use crate::cli::Args;
use crate::error::{BatchError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_START: &str = "2:5";
pub const DEFAULT_END: &str = ":5";

/// Defaults derived once at startup from the executable location and the clipboard.
#[derive(Debug, Clone)]
pub struct StartupContext {
    pub default_path: PathBuf,
    pub default_config: PathBuf,
    pub default_content: String,
}

impl StartupContext {
    /// `<exe dir>/<exe stem>.xlsx`, `<exe dir>/<exe stem>.json` and the trimmed clipboard text.
    pub fn detect() -> Self {
        let exe = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("batch-excel"));
        let dir = exe.parent().map(Path::to_path_buf).unwrap_or_default();
        let stem = exe
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "batch-excel".to_string());
        Self {
            default_path: dir.join(format!("{}.xlsx", stem)),
            default_config: dir.join(format!("{}.json", stem)),
            default_content: clipboard_text(),
        }
    }

    /// The built-in configuration.
    pub fn defaults(&self) -> ConfigFile {
        ConfigFile {
            path: self.default_path.clone(),
            content: self.default_content.clone(),
            start: DEFAULT_START.to_string(),
            end: DEFAULT_END.to_string(),
            copy: false,
            tip: false,
        }
    }
}

fn clipboard_text() -> String {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            debug!("clipboard unavailable, default content is empty: {}", e);
            String::new()
        }
    }
}

/// On-disk JSON configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub content: String,
    pub start: String,
    pub end: String,
    pub copy: bool,
    #[serde(default)]
    pub tip: bool,
}

/// Final values for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub path: PathBuf,
    pub content: String,
    pub start: String,
    pub end: String,
    pub copy: bool,
    pub tip: bool,
}

/// What [`resolve`] decided.
#[derive(Debug)]
pub enum Resolved {
    Run(Settings),
    /// A template was written and the run stops here.
    TemplateOnly(PathBuf),
}

/// Write the default configuration as 4-space indented JSON.
pub fn create_config_template(path: &Path, ctx: &StartupContext) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    ctx.defaults()
        .serialize(&mut ser)
        .map_err(|source| BatchError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush()?;
    Ok(())
}

/// Read a config file. A missing file yields the built-in defaults.
pub fn read_config_file(path: &Path, ctx: &StartupContext) -> Result<ConfigFile> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no config at {}, using defaults", path.display());
            return Ok(ctx.defaults());
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&text).map_err(|source| BatchError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge CLI flags over the config file (or defaults).
///
/// With `-cc` and no existing config file a template is written first. When the
/// dialog prompt (`-t`) is on that ends the run; headless runs carry on with the
/// freshly written defaults.
pub fn resolve(args: &Args, ctx: &StartupContext) -> Result<Resolved> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| ctx.default_config.clone());

    if args.cc && !config_path.exists() {
        create_config_template(&config_path, ctx)?;
        if args.tip {
            return Ok(Resolved::TemplateOnly(config_path));
        }
    }
    let config = read_config_file(&config_path, ctx)?;

    let settings = Settings {
        path: args.path.clone().unwrap_or(config.path),
        content: args.content.clone().unwrap_or(config.content),
        start: args.start.clone().unwrap_or(config.start),
        end: args.end.clone().unwrap_or(config.end),
        copy: args.copy || config.copy,
        tip: args.tip || config.tip,
    };
    debug!("resolved settings: {:?}", settings);
    Ok(Resolved::Run(settings))
}
