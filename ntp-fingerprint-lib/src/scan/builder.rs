use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

use crate::error::{FingerprintError, Result};
use crate::probe::{ProbeCatalog, ProbeOutcome, ResponseVector};
use crate::udp::ProbeSender;

/// Send every probe in `catalog` to `target` and collect the outcomes in
/// catalog order.
///
/// With `concurrency == 1` probes go out strictly one after another. Larger
/// values spawn one task per probe, at most `concurrency` in flight; each task
/// reports its own index so completion order never affects the result.
pub async fn build_vector<S: ProbeSender>(
    catalog: &ProbeCatalog,
    sender: Arc<S>,
    target: SocketAddr,
    concurrency: usize,
) -> Result<ResponseVector> {
    if concurrency <= 1 {
        let mut outcomes = Vec::with_capacity(catalog.len());
        for probe in catalog {
            outcomes.push(sender.send(probe, target).await);
        }
        return Ok(ResponseVector::new(outcomes));
    }

    let permits = Arc::new(Semaphore::new(concurrency));
    let mut workers = JoinSet::new();
    for (index, probe) in catalog.iter().enumerate() {
        let sender = Arc::clone(&sender);
        let permits = Arc::clone(&permits);
        let probe = probe.clone();
        workers.spawn(async move {
            let _permit = permits.acquire_owned().await;
            (index, sender.send(&probe, target).await)
        });
    }

    let mut slots: Vec<Option<ProbeOutcome>> = vec![None; catalog.len()];
    while let Some(joined) = workers.join_next().await {
        let (index, outcome) = joined.map_err(|e| FingerprintError::Worker(e.to_string()))?;
        debug!(index, ?outcome, "probe completed");
        let slot = slots
            .get_mut(index)
            .ok_or_else(|| FingerprintError::Worker(format!("probe slot {index} out of range")))?;
        if slot.replace(outcome).is_some() {
            return Err(FingerprintError::Worker(format!(
                "probe slot {index} reported more than once"
            )));
        }
    }

    let outcomes = slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| FingerprintError::Worker(format!("probe slot {index} never reported")))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ResponseVector::new(outcomes))
}
