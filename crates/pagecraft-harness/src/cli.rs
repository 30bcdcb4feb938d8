#![forbid(unsafe_code)]

//! Command-line rendering of page documents.
//!
//! Arguments are parsed by hand. Page settings come from an optional JSON
//! config file, then `PAGECRAFT_*` environment overrides, then explicit
//! flags.

use std::path::PathBuf;

use pagecraft_core::{Document, DocumentError, RenderMode, SelectionState};
use pagecraft_runtime::{ConfigError, Page, PageConfig};

use crate::outline::frame_to_outline;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
pagecraft - render page documents to HTML

USAGE:
    pagecraft render <FILE> [OPTIONS]

OPTIONS:
    --editor             Render with authoring affordances
    --width=N            Viewport width in pixels
    --selected=ID        Mark component ID as selected (editor only)
    --config=PATH        JSON page config
    --outline            Print an indented outline instead of HTML
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    PAGECRAFT_CONFIG              Config path when --config is absent
    PAGECRAFT_BREAKPOINTS         Column breakpoints as w0,w1,w2
    PAGECRAFT_VIEWPORT_WIDTH      Viewport width when --width is absent
    PAGECRAFT_SLIDER_INTERVAL_MS  Default slider autoplay interval
    PAGECRAFT_ADD_AFTER           Show add-after buttons (0|1)
    PAGECRAFT_LOG                 Log filter (default: warn)";

pub const ENV_CONFIG: &str = "PAGECRAFT_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}\n\nRun with --help for usage.")]
    Usage(String),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Options of the `render` subcommand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderArgs {
    pub file: PathBuf,
    pub editor: bool,
    pub width: Option<u32>,
    pub selected: Option<String>,
    pub config: Option<PathBuf>,
    pub outline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Render(RenderArgs),
}

impl Command {
    /// Parse `args` (without the program name).
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::parse_with_env(args, |key| std::env::var(key).ok())
    }

    /// Parse with an explicit environment lookup.
    pub fn parse_with_env<I, S>(
        args: I,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        if args.iter().any(|a| a == "--help" || a == "-h") {
            return Ok(Self::Help);
        }
        if args.iter().any(|a| a == "--version" || a == "-V") {
            return Ok(Self::Version);
        }

        let mut rest = args.iter();
        match rest.next().map(String::as_str) {
            Some("render") => {}
            Some(other) => return Err(CliError::Usage(format!("unknown command {other:?}"))),
            None => return Err(CliError::Usage("missing command".into())),
        }

        let mut render = RenderArgs {
            config: lookup(ENV_CONFIG).map(PathBuf::from),
            ..RenderArgs::default()
        };
        let mut file = None;
        for arg in rest {
            match arg.as_str() {
                "--editor" => render.editor = true,
                "--outline" => render.outline = true,
                other => {
                    if let Some(val) = other.strip_prefix("--width=") {
                        let width = val
                            .parse()
                            .map_err(|_| CliError::Usage(format!("invalid --width {val:?}")))?;
                        render.width = Some(width);
                    } else if let Some(val) = other.strip_prefix("--selected=") {
                        render.selected = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--config=") {
                        render.config = Some(PathBuf::from(val));
                    } else if other.starts_with('-') {
                        return Err(CliError::Usage(format!("unknown option {other:?}")));
                    } else if file.is_none() {
                        file = Some(PathBuf::from(other));
                    } else {
                        return Err(CliError::Usage(format!("unexpected argument {other:?}")));
                    }
                }
            }
        }
        render.file = file.ok_or_else(|| CliError::Usage("missing document file".into()))?;
        Ok(Self::Render(render))
    }
}

/// Execute `command`, returning what should be printed to stdout.
pub fn run(command: &Command) -> Result<String, CliError> {
    match command {
        Command::Help => Ok(HELP_TEXT.to_string()),
        Command::Version => Ok(format!("pagecraft {VERSION}")),
        Command::Render(args) => render(args),
    }
}

fn render(args: &RenderArgs) -> Result<String, CliError> {
    let json = std::fs::read_to_string(&args.file).map_err(|source| CliError::Io {
        path: args.file.clone(),
        source,
    })?;
    let document = Document::from_json(&json)?;

    let mut config = match &args.config {
        Some(path) => PageConfig::load(path)?,
        None => PageConfig::default(),
    }
    .with_env();
    if let Some(width) = args.width {
        config.viewport_width = Some(width);
    }

    let mode = if args.editor {
        RenderMode::Editor
    } else {
        RenderMode::Runtime
    };
    tracing::info!(
        file = %args.file.display(),
        ?mode,
        nodes = document.node_count(),
        "rendering document"
    );

    let mut page = Page::new(document, mode, &config);
    if let Some(id) = &args.selected {
        if page.document().find(id).is_none() {
            tracing::warn!(id = %id, "selected component not in document");
        }
        page.set_selection(SelectionState::selected(id.as_str()));
    }

    let frame = page.frame();
    Ok(if args.outline {
        frame_to_outline(frame)
    } else {
        frame.to_html()
    })
}
