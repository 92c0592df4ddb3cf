use std::io::{self, Write};

use crate::report::{TipReport, VariableReport};

const BARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A surface that draws finished results. It is only ever handed a complete
/// report; errors are reported by the caller instead.
pub trait Presenter {
    /// Drops whatever the previous `present` drew
    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn present(&mut self, report: &TipReport) -> io::Result<()>;
}

/// Renders curves as block-character sparklines, one row per term
pub struct TextPresenter<W> {
    out: W,
    verbose: bool,
    clear_screen: bool,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self { out, verbose, clear_screen: false }
    }

    /// Clear the terminal with ANSI escapes before each redraw
    pub fn clear_screen(self, clear_screen: bool) -> Self {
        Self { clear_screen, ..self }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn variable(&mut self, title: &str, variable: &VariableReport) -> io::Result<()> {
        writeln!(self.out, "{title}")?;

        for term in &variable.terms {
            write!(self.out, "  {:<10} {}", term.name, sparkline(&term.membership))?;
            match term.degree {
                Some(degree) => writeln!(self.out, " {degree:.3}")?,
                None => writeln!(self.out)?,
            }
        }

        Ok(())
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            write!(self.out, "\x1b[2J\x1b[H")?;
        }

        Ok(())
    }

    fn present(&mut self, report: &TipReport) -> io::Result<()> {
        if self.verbose {
            for input in &report.inputs {
                let title = match input.input {
                    Some(x) => format!("{} quality ({x:.2})", input.name),
                    None => format!("{} quality", input.name),
                };
                self.variable(&title, input)?;
            }
            self.variable("Tip amount", &report.tip)?;

            writeln!(self.out, "Output membership activity")?;
            for rule in &report.rules {
                writeln!(
                    self.out,
                    "  {:<10} {} {:.3}  IF {}",
                    rule.consequence,
                    sparkline(&rule.membership),
                    rule.strength,
                    rule.premise
                )?;
            }

            writeln!(self.out, "Aggregated membership and result (line)")?;
            writeln!(self.out, "  {:<10} {}", "aggregated", sparkline(&report.aggregated))?;
            writeln!(self.out, "  {:<10} {}", "", marker(&report.tip.universe, report.tip_percentage))?;
        }

        writeln!(self.out, "Tip Percentage: {:.2}", report.tip_percentage)?;
        self.out.flush()
    }
}

/// Writes the report as a JSON document per line
pub struct JsonPresenter<W> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self { out, pretty }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn present(&mut self, report: &TipReport) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, report)?;
        } else {
            serde_json::to_writer(&mut self.out, report)?;
        }

        writeln!(self.out)?;
        self.out.flush()
    }
}

fn sparkline(values: &[f64]) -> String {
    let top = (BARS.len() - 1) as f64;

    values.iter().map(|v| BARS[(v.clamp(0., 1.) * top).round() as usize]).collect()
}

// A `|` under the universe point closest to `x`
fn marker(universe: &[f64], x: f64) -> String {
    let closest = universe
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - x).abs().total_cmp(&(*b - x).abs()))
        .map_or(0, |(i, _)| i);

    format!("{}|", " ".repeat(closest))
}
