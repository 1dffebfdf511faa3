//! The glyph compiler front-end CLI.
//!
//! Provides a single `check` entry point: loads the package
//! rooted at the given main source file (and everything it transitively
//! imports), runs semantic analysis, and reports every diagnostic either as
//! human-readable `ariadne` reports or as a JSON array. It
//! performs no codegen -- there is no back-end crate in this workspace.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use glyph_check::{Application, FilesystemPackageSource};
use glyph_common::{Diagnostic, Severity};

#[derive(Parser)]
#[command(name = "glyphc", version, about = "The glyph compiler front-end")]
struct Cli {
    /// Main source file of the package being checked.
    main_file: PathBuf,

    /// Directory containing sibling packages, each at `<dir>/<name>/header.glyph`.
    /// Defaults to the main file's own containing directory.
    #[arg(long = "package-dir")]
    package_dir: Option<PathBuf>,

    /// Emit diagnostics as a JSON array instead of human-readable reports.
    #[arg(long = "json-diagnostics")]
    json_diagnostics: bool,
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    let Some(main_dir) = cli.main_file.parent() else {
        eprintln!("error: could not determine the main file's containing directory");
        return 1;
    };
    let Some(package_name) = main_dir.file_name().and_then(|n| n.to_str()) else {
        eprintln!("error: could not determine the package name from '{}'", cli.main_file.display());
        return 1;
    };
    let package_dir = cli.package_dir.unwrap_or_else(|| main_dir.to_path_buf());

    let source = FilesystemPackageSource { base_dir: package_dir };
    let mut app = Application::new();

    if let Err(e) = app.compile(package_name, &source) {
        app.sink.push(e.into_diagnostic());
    }

    report(&app, cli.json_diagnostics)
}

fn report(app: &Application, json: bool) -> i32 {
    let mut has_errors = false;
    let mut payload = Vec::new();

    for diagnostic in app.sink.iter() {
        has_errors |= diagnostic.severity == Severity::Error;
        let file_path = app.files.path(diagnostic.position.file);
        if json {
            payload.push(diagnostic.render_json(&file_path));
        } else {
            render_human(diagnostic, &file_path);
        }
    }

    if json {
        println!("{}", serde_json::Value::Array(payload));
    }

    if has_errors {
        1
    } else {
        0
    }
}

/// Renders one diagnostic as an `ariadne` report against its own source
/// file, falling back to the plain `🚨 line L col C <path>: <message>` form
/// if the file can no longer be read.
fn render_human(diagnostic: &Diagnostic, file_path: &str) {
    use ariadne::{Label, Report, ReportKind, Source};

    let Ok(text) = std::fs::read_to_string(file_path) else {
        eprintln!("{}", diagnostic.render_human(file_path));
        return;
    };
    let offset = offset_of(&text, diagnostic.position.line, diagnostic.position.character);
    let kind = match diagnostic.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
    };
    let report = Report::<std::ops::Range<usize>>::build(kind, offset..offset + 1)
        .with_message(diagnostic.category.to_string())
        .with_label(Label::new(offset..offset + 1).with_message(&diagnostic.message))
        .finish();
    let _ = report.eprint(Source::from(text));
}

/// Converts a 1-based line / 0-based character position back to the byte
/// offset `ariadne::Source` indexes by.
fn offset_of(text: &str, line: u32, character: u32) -> usize {
    let mut offset = 0usize;
    for (i, l) in text.split('\n').enumerate() {
        if i as u32 + 1 == line {
            return offset + character as usize;
        }
        offset += l.len() + 1;
    }
    offset
}
