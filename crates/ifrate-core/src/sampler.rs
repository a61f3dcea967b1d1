// ── Sampling loop ──
//
// Exactly `samples` reads spread across the observation window, with a
// plain sleep between reads and none after the last. The first failed read
// ends the loop; partial runs are never averaged.

use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::config::CheckConfig;
use crate::counter::CounterDescriptor;
use crate::error::CoreError;
use crate::rate::Sample;
use crate::source::CounterSource;

/// Upper bound on the up-front reservation; larger runs grow as they read.
const MAX_PREALLOCATED: usize = 64;

/// Poll `descriptor` `config.samples` times, returning the readings in order.
pub async fn collect_samples<S: CounterSource>(
    source: &mut S,
    descriptor: &CounterDescriptor,
    config: &CheckConfig,
) -> Result<Vec<Sample>, CoreError> {
    let count = usize::try_from(config.samples).unwrap_or(usize::MAX);
    let interval = config.sample_interval();
    let mut samples = Vec::with_capacity(count.min(MAX_PREALLOCATED));

    debug!(
        oid = %descriptor.oid,
        samples = config.samples,
        interval_ms = interval.as_millis(),
        "sampling"
    );

    for index in 0..count {
        if index > 0 {
            sleep(interval).await;
        }

        let value = source.read_counter(&descriptor.oid).await?;
        let sample = Sample::new(value, Instant::now());
        debug!(index, value, "sample");
        samples.push(sample);
    }

    Ok(samples)
}
