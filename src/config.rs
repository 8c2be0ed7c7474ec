//! Configuration types for pipeline runs

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::context::{CancelHandle, StreamContext};
use crate::error::{StreamError, StreamResult};

/// Settings for a configurable pipeline run.
///
/// Durations are (de)serialized as whole milliseconds; missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source: Vec<i64>,
    #[serde(with = "opt_millis")]
    pub stage_delay: Option<Duration>,
    #[serde(with = "opt_millis")]
    pub timeout: Option<Duration>,
    pub buffer_size: usize,
    pub replicas: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: vec![1, 2, 3, 4, 5],
            stage_delay: None,
            timeout: None,
            buffer_size: 16,
            replicas: 2,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> StreamResult<Self> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StreamResult<()> {
        if self.buffer_size == 0 {
            return Err(StreamError::Config(
                "buffer_size must be greater than zero".to_string(),
            ));
        }
        if self.replicas == 0 {
            return Err(StreamError::Config(
                "replicas must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Context for one run: bounded by `timeout` when set
    pub fn context(&self) -> (StreamContext, CancelHandle) {
        match self.timeout {
            Some(timeout) => StreamContext::with_timeout(timeout),
            None => StreamContext::with_cancel(),
        }
    }
}

mod opt_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
