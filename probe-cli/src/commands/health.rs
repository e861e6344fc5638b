//! Check the health endpoint of every target.

use anyhow::{Context, Result};
use probe_core::{Config, Probe, ProbeKind, Prober, Report};

/// Run the health command.
pub async fn run(config: &Config) -> Result<()> {
    let targets = config.targets()?;
    let prober = Prober::new(config)?;

    let stdout = std::io::stdout();
    let mut report = Report::new(stdout.lock());

    let probes = prober
        .run(&targets, ProbeKind::Health, &mut report)
        .await
        .context("Failed to write report")?;

    let healthy = count_healthy(&probes);
    if healthy < probes.len() {
        tracing::warn!(healthy, total = probes.len(), "some targets are unhealthy");
    }

    Ok(())
}

/// Targets that answered with a 2xx status.
fn count_healthy(probes: &[Probe]) -> usize {
    probes
        .iter()
        .filter(|p| matches!(&p.outcome, Ok(r) if (200..300).contains(&r.status)))
        .count()
}
