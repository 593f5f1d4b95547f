use std::fs;
use std::path::Path;

use crate::config::types::{Config, SignatureConfig};
use crate::config::validator::validate;
use crate::error::{FingerprintError, Result};
use crate::fingerprinting::{FingerprintTable, Signature};
use crate::probe::{ProbeId, ProbeOutcome};

pub fn load_from_path<P: AsRef<Path>>(p: P) -> Result<Config> {
    let txt = fs::read_to_string(p)
        .map_err(|e| FingerprintError::Config(format!("Failed to read config file: {e}")))?;
    let cfg: Config = toml::from_str(&txt)
        .map_err(|e| FingerprintError::Config(format!("Failed to parse config: {e}")))?;

    validate(&cfg).map_err(FingerprintError::Config)?;

    Ok(cfg)
}

impl SignatureConfig {
    pub fn to_signature(&self) -> Result<Signature> {
        let mut expected = self
            .expect
            .iter()
            .map(|(probe, replies)| {
                let id = probe.parse::<ProbeId>().map_err(FingerprintError::Config)?;
                Ok((id, ProbeOutcome::from(*replies)))
            })
            .collect::<Result<Vec<_>>>()?;
        expected.sort_by_key(|(id, _)| *id);
        Ok(Signature::new(self.name.clone(), expected))
    }
}

impl Config {
    /// Built-in table followed by the configured signatures
    pub fn fingerprint_table(&self) -> Result<FingerprintTable> {
        let extra = self
            .signatures
            .iter()
            .map(SignatureConfig::to_signature)
            .collect::<Result<Vec<_>>>()?;
        Ok(FingerprintTable::builtin().with_extra(extra))
    }
}
