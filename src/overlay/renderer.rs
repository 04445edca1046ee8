//! Source-code-to-diagram renderers.

use super::document::DiagramDocument;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;
use thiserror::Error;

/// Errors raised while turning source code into a diagram.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("source could not be converted to a diagram: {0}")]
    Malformed(String),

    #[error("renderer process failed: {0}")]
    Process(#[from] io::Error),

    #[error("renderer produced no SVG document")]
    NoDocument,
}

/// Converts a source-code string into a sized SVG diagram.
///
/// Called once per overlay activation; a failure aborts that activation and is
/// never retried automatically.
pub trait DiagramRenderer {
    fn render(&self, source: &str) -> Result<DiagramDocument, RenderError>;
}

impl<F> DiagramRenderer for F
where
    F: Fn(&str) -> Result<DiagramDocument, RenderError>,
{
    fn render(&self, source: &str) -> Result<DiagramDocument, RenderError> {
        self(source)
    }
}

/// Renderer for hosts whose source string already is SVG markup.
///
/// The markup is parsed with `usvg` so malformed input is rejected up front
/// instead of surfacing later as a failed image decode.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgMarkupRenderer;

impl DiagramRenderer for SvgMarkupRenderer {
    fn render(&self, source: &str) -> Result<DiagramDocument, RenderError> {
        resvg::usvg::Tree::from_str(source, &resvg::usvg::Options::default())
            .map_err(|err| RenderError::Malformed(err.to_string()))?;
        Ok(DiagramDocument::from_svg(source))
    }
}

/// Renderer that pipes the source into an external converter and reads SVG
/// from its standard output.
///
/// Any program with that contract works, e.g. a small node wrapper around a
/// code-to-flowchart library.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

impl CommandRenderer {
    /// Builds a renderer from an argv list. Returns `None` for an empty list.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Splits a command line on whitespace. No shell quoting is supported.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let argv: Vec<String> = command.split_whitespace().map(str::to_string).collect();
        Self::from_argv(&argv)
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl DiagramRenderer for CommandRenderer {
    fn render(&self, source: &str) -> Result<DiagramDocument, RenderError> {
        log::debug!("Running renderer: {} {:?}", self.program, self.args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Written concurrently with the stdout read; both pipes are bounded.
        let stdin = child.stdin.take();
        let input = source.to_owned();
        let writer = thread::spawn(move || -> io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(input.as_bytes())?;
            }
            Ok(())
        });

        let output = child.wait_with_output()?;
        if let Ok(Err(err)) = writer.join() {
            // Renderers may exit without draining stdin.
            if err.kind() != io::ErrorKind::BrokenPipe {
                return Err(err.into());
            }
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(RenderError::Malformed(reason));
        }

        let markup = String::from_utf8(output.stdout)
            .map_err(|err| RenderError::Malformed(format!("output is not UTF-8: {err}")))?;
        if !markup.contains("<svg") {
            return Err(RenderError::NoDocument);
        }

        Ok(DiagramDocument::from_svg(markup))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::SurfaceSize;

    const SQUARE: &str =
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="30"><rect width="40" height="30" fill="red"/></svg>"#;

    #[test]
    fn svg_markup_renderer_accepts_valid_svg() {
        let doc = SvgMarkupRenderer.render(SQUARE).unwrap();
        assert_eq!(doc.size(), SurfaceSize::new(40, 30));
    }

    #[test]
    fn svg_markup_renderer_rejects_source_code() {
        let err = SvgMarkupRenderer
            .render("function broken( {")
            .unwrap_err();
        assert!(matches!(err, RenderError::Malformed(_)));
    }

    #[test]
    fn svg_markup_renderer_rejects_empty_source() {
        assert!(SvgMarkupRenderer.render("").is_err());
    }

    #[test]
    fn closures_are_renderers() {
        let renderer = |_: &str| -> Result<DiagramDocument, RenderError> {
            Ok(DiagramDocument::from_svg("<svg width=\"5\"></svg>"))
        };
        let doc = renderer.render("anything").unwrap();
        assert_eq!(doc.intrinsic_size(), (Some(5), None));
    }

    #[test]
    fn command_renderer_parses_argv() {
        assert!(CommandRenderer::from_command_line("   ").is_none());
        let renderer = CommandRenderer::from_command_line("node flowchart.js --svg").unwrap();
        assert_eq!(renderer.program(), "node");
    }

    #[cfg(unix)]
    #[test]
    fn command_renderer_reads_stdout() {
        let renderer = CommandRenderer::from_command_line("cat").unwrap();
        let doc = renderer.render(SQUARE).unwrap();
        assert_eq!(doc.markup(), SQUARE);
        assert_eq!(doc.size(), SurfaceSize::new(40, 30));
    }

    #[cfg(unix)]
    #[test]
    fn command_renderer_rejects_non_svg_output() {
        let renderer = CommandRenderer::from_command_line("cat").unwrap();
        assert!(matches!(
            renderer.render("plain text"),
            Err(RenderError::NoDocument)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn command_renderer_reports_failure_status() {
        let renderer = CommandRenderer::from_command_line("false").unwrap();
        assert!(matches!(
            renderer.render(SQUARE),
            Err(RenderError::Malformed(_))
        ));
    }

    #[test]
    fn command_renderer_reports_missing_program() {
        let renderer =
            CommandRenderer::from_command_line("flowboard-renderer-that-does-not-exist").unwrap();
        assert!(matches!(
            renderer.render(SQUARE),
            Err(RenderError::Process(_))
        ));
    }
}
