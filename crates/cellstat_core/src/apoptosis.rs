//! Per-cell-update apoptosis rate.

use crate::aggregate::MeanAccumulator;
use crate::error::Result;
use crate::view::{expect_len, RunView, UpdateRange};

/// Apoptosis type codes counted as apoptotic unless configured otherwise.
pub const DEFAULT_APOPTOSIS_CODES: [u64; 2] = [1, 2];

/// Fraction of (agent, update) samples whose apoptosis code is one of `codes`.
///
/// The agent count comes from the ownership index; every snapshot must match
/// it. An empty update range yields NaN.
pub fn apoptosis_rate<R: RunView + ?Sized>(
    run: &R,
    range: UpdateRange,
    codes: &[u64],
) -> Result<f64> {
    let agents = run.agent_count()?;
    let mut acc = MeanAccumulator::new();
    for update in range {
        let flags = run.apoptosis(update)?;
        expect_len(&flags, agents, || format!("Apoptosis/upd_{update}"))?;
        acc.extend(
            flags
                .iter()
                .map(|code| if codes.contains(code) { 1.0 } else { 0.0 }),
        );
    }
    Ok(acc.mean())
}
