//! Plain-text probe report.
//!
//! Each probe is a block: its label line followed by either
//! `Status:`/`Response:` lines or a single `Error:` line. Blocks are
//! separated by a blank line, [`SEPARATOR`], and another blank line.

use std::io::{self, Write};

use crate::parity::Parity;
use crate::probe::ProbeOutcome;

/// Rule printed between blocks (50 `=`).
pub const SEPARATOR: &str = "==================================================";

/// Writes probe blocks to an output stream, flushing after each line group.
pub struct Report<W: Write> {
    out: W,
    blocks: usize,
}

impl<W: Write> Report<W> {
    /// Wrap an output stream.
    pub fn new(out: W) -> Self {
        Self { out, blocks: 0 }
    }

    /// Begin a block, preceded by the separator unless it is the first.
    pub fn start_block(&mut self, label: &str) -> io::Result<()> {
        if self.blocks > 0 {
            self.separator()?;
        }
        writeln!(self.out, "{label}")?;
        self.blocks += 1;
        self.out.flush()
    }

    /// Finish the current block with its outcome.
    pub fn outcome(&mut self, outcome: &ProbeOutcome) -> io::Result<()> {
        match outcome {
            Ok(response) => {
                writeln!(self.out, "Status: {}", response.status)?;
                writeln!(self.out, "Response: {}", response.body)?;
            }
            Err(e) => writeln!(self.out, "Error: {e}")?,
        }
        self.out.flush()
    }

    /// Append the parity verdict after the last block.
    pub fn parity(&mut self, parity: &Parity) -> io::Result<()> {
        if self.blocks > 0 {
            self.separator()?;
        }
        write!(self.out, "{parity}")?;
        self.out.flush()
    }

    /// Recover the output stream.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn separator(&mut self) -> io::Result<()> {
        write!(self.out, "\n{SEPARATOR}\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::probe::ProbeResponse;

    fn render(blocks: &[(&str, ProbeOutcome)]) -> String {
        let mut report = Report::new(Vec::new());
        for (label, outcome) in blocks {
            report.start_block(label).unwrap();
            report.outcome(outcome).unwrap();
        }
        String::from_utf8(report.into_inner()).unwrap()
    }

    fn timeout() -> ProbeOutcome {
        Err(ProbeError::Timeout {
            url: "http://localhost:3001/api/auth/register".into(),
            secs: 5,
        })
    }

    #[test]
    fn separator_is_fifty_equals() {
        assert_eq!(SEPARATOR.len(), 50);
        assert!(SEPARATOR.chars().all(|c| c == '='));
    }

    #[test]
    fn success_then_timeout() {
        let out = render(&[
            (
                "Testing POST through API Gateway (localhost:3000):",
                Ok(ProbeResponse {
                    status: 201,
                    body: r#"{"id":1}"#.into(),
                }),
            ),
            (
                "Testing POST directly to User Service (localhost:3001):",
                timeout(),
            ),
        ]);

        let expected = format!(
            "Testing POST through API Gateway (localhost:3000):\n\
             Status: 201\n\
             Response: {{\"id\":1}}\n\
             \n\
             {SEPARATOR}\n\
             \n\
             Testing POST directly to User Service (localhost:3001):\n\
             Error: request to http://localhost:3001/api/auth/register timed out after 5s\n"
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn single_block_has_no_separator() {
        let out = render(&[("only:", timeout())]);
        assert!(!out.contains(SEPARATOR));
        assert!(out.starts_with("only:\n"));
    }

    #[test]
    fn separator_between_every_pair() {
        let out = render(&[("a:", timeout()), ("b:", timeout()), ("c:", timeout())]);
        assert_eq!(out.matches(SEPARATOR).count(), 2);
        assert!(!out.ends_with(&format!("{SEPARATOR}\n\n")));
    }

    #[test]
    fn body_is_printed_verbatim() {
        let out = render(&[(
            "x:",
            Ok(ProbeResponse {
                status: 400,
                body: "  {\"error\": \"Email already registered\"}  ".into(),
            }),
        )]);
        assert!(out.contains("Status: 400\n"));
        assert!(out.contains("Response:   {\"error\": \"Email already registered\"}  \n"));
    }
}
