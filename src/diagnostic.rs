use crate::span::Span;

/// A compiler error attached to a source range.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    /// Write the report for this diagnostic through ariadne.
    fn write_report<W: std::io::Write>(
        &self,
        filename: &str,
        source: &str,
        color: bool,
        out: W,
    ) -> std::io::Result<()> {
        use ariadne::{Color, Config, Label, Report, ReportKind, Source};

        let mut report = Report::build(ReportKind::Error, filename, self.span.start as usize)
            .with_config(Config::default().with_color(color))
            .with_message(&self.message);

        if !self.span.is_dummy() {
            report = report.with_label(
                Label::new((filename, self.span.start as usize..self.span.end as usize))
                    .with_message(&self.message)
                    .with_color(Color::Red),
            );
        }

        for note in &self.notes {
            report = report.with_note(note);
        }

        if let Some(help) = &self.help {
            report = report.with_help(help);
        }

        report.finish().write((filename, Source::from(source)), out)
    }

    /// Render the diagnostic to stderr using ariadne.
    pub fn render(&self, filename: &str, source: &str) {
        let _ = self.write_report(filename, source, true, std::io::stderr());
    }

    /// Render without colors into a string.
    pub fn render_plain(&self, filename: &str, source: &str) -> String {
        let mut buf = Vec::new();
        let _ = self.write_report(filename, source, false, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
