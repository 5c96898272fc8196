use crate::cli::Args;
use crate::config::{self, Resolved, Settings, StartupContext};
use crate::error::{BatchError, Result};
use crate::notify::{Dialog, Notifier, Silent};
use crate::parser::Parser;
use crate::spreadsheet::{Rect, Workbook};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

const PREVIEW_CHARS: usize = 100;

/// How a run ended, when it did not fail.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Written { cells: usize, path: PathBuf },
    Cancelled,
    TemplateCreated(PathBuf),
}

pub fn notifier_for(tip: bool) -> Box<dyn Notifier> {
    if tip {
        Box::new(Dialog)
    } else {
        Box::new(Silent)
    }
}

/// Resolve the configuration and run one batch.
///
/// User-facing failures are reported through a warning dialog first when the
/// prompt is on; the error is still returned.
pub fn handle_commands(args: &Args, ctx: &StartupContext) -> Result<Outcome> {
    handle_with(args, ctx, &notifier_for)
}

fn handle_with(
    args: &Args,
    ctx: &StartupContext,
    make_notifier: &dyn Fn(bool) -> Box<dyn Notifier>,
) -> Result<Outcome> {
    let settings = match config::resolve(args, ctx) {
        Ok(Resolved::Run(settings)) => settings,
        Ok(Resolved::TemplateOnly(path)) => {
            make_notifier(args.tip).info(&format!(
                "Configuration template created: {}",
                path.display()
            ));
            return Ok(Outcome::TemplateCreated(path));
        }
        Err(e) => return Err(report(e, make_notifier(args.tip).as_ref())),
    };

    let notifier = make_notifier(settings.tip);
    run(&settings, notifier.as_ref()).map_err(|e| report(e, notifier.as_ref()))
}

fn report(e: BatchError, notifier: &dyn Notifier) -> BatchError {
    if e.is_user_facing() {
        notifier.warn(&e.to_string());
    }
    e
}

/// Load, resolve both corners, confirm, write and save.
///
/// Nothing touches the filesystem until every step before the save succeeded.
pub fn run(settings: &Settings, notifier: &dyn Notifier) -> Result<Outcome> {
    if settings.content.is_empty() {
        return Err(BatchError::EmptyContent);
    }
    let mut workbook = Workbook::open(&settings.path)?;
    let (max_row, max_col) = workbook.bounds();
    let start = Parser::resolve(&settings.start, max_row, max_col)?;
    let end = Parser::resolve(&settings.end, max_row, max_col)?;
    let rect = Rect::spanning(start, end);
    info!(
        "{}: start {:?} end {:?} -> {} (sheet bounds {}x{})",
        settings.path.display(),
        start,
        end,
        rect,
        max_row,
        max_col
    );

    let question = format!(
        "Write into the non-empty cells of {} ({} rows x {} columns) in {}?\n\nContent: {}",
        rect,
        rect.rows(),
        rect.cols(),
        settings.path.display(),
        preview(&settings.content)
    );
    if !notifier.confirm(&question) {
        notifier.info("Cancelled, the workbook was not modified.");
        return Ok(Outcome::Cancelled);
    }

    let cells = workbook.write_range(rect, &settings.content)?;

    let target = if settings.copy {
        copy_file(&settings.path)?
    } else {
        settings.path.clone()
    };
    workbook.save(&target)?;

    notifier.info(&format!("{} cells updated in {}", cells, target.display()));
    Ok(Outcome::Written {
        cells,
        path: target,
    })
}

/// `<dir>/<stem>_Copy<.ext>` for `path`.
pub fn copy_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_Copy.{}", stem, ext.to_string_lossy()),
        None => format!("{}_Copy", stem),
    };
    path.with_file_name(name)
}

/// Duplicate `path` next to itself and return the copy's path.
pub fn copy_file(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(BatchError::MissingFile(path.to_path_buf()));
    }
    let target = copy_path(path);
    fs::copy(path, &target)?;
    Ok(target)
}

fn preview(content: &str) -> String {
    content.chars().take(PREVIEW_CHARS).collect()
}
