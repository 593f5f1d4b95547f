use crate::config::types::Config;
use crate::probe::ProbeId;

/// Upper bound on probes in flight
pub const MAX_CONCURRENCY: usize = 64;

pub fn validate(config: &Config) -> Result<(), String> {
    if config.probe.timeout_secs == 0 {
        return Err("timeout_secs must be > 0".into());
    }
    if config.probe.port == 0 {
        return Err("port must be > 0".into());
    }
    if config.probe.concurrency == 0 || config.probe.concurrency > MAX_CONCURRENCY {
        return Err(format!("concurrency must be between 1 and {MAX_CONCURRENCY}"));
    }
    for signature in &config.signatures {
        if signature.name.trim().is_empty() {
            return Err("signature name cannot be empty".into());
        }
        if signature.expect.is_empty() {
            return Err(format!("signature \"{}\" has no expectations", signature.name));
        }
        for probe in signature.expect.keys() {
            probe
                .parse::<ProbeId>()
                .map_err(|e| format!("signature \"{}\": {e}", signature.name))?;
        }
    }
    Ok(())
}
