//! Probe the registration endpoint on every target.

use anyhow::{Context, Result};
use probe_core::{Config, Parity, ProbeKind, Prober, Report};

/// Run the register command.
///
/// Probe failures are part of the report; only configuration and stdout
/// write errors are returned.
pub async fn run(config: &Config, compare: bool) -> Result<()> {
    let targets = config.targets()?;
    let prober = Prober::new(config)?;

    let stdout = std::io::stdout();
    let mut report = Report::new(stdout.lock());

    let probes = prober
        .run(&targets, ProbeKind::Register, &mut report)
        .await
        .context("Failed to write report")?;

    let parity = Parity::of(&probes);
    tracing::debug!(identical = parity.is_identical(), "register probes finished");

    if compare {
        report.parity(&parity).context("Failed to write report")?;
    }

    Ok(())
}
