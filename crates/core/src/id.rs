use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidIdError;

/// Composite identifier of a task or process instance within a connection,
/// rendered as `<instanceId>@<containerId>`.
///
/// Parsing splits on the last `@`; the instance part must be a non-negative
/// integer and the container id is whatever follows the separator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CompositeId {
    pub container_id: String,
    pub instance_id: u64,
}

impl CompositeId {
    #[must_use]
    pub fn new(container_id: impl Into<String>, instance_id: u64) -> Self {
        Self { container_id: container_id.into(), instance_id }
    }
}

impl FromStr for CompositeId {
    type Err = InvalidIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (instance, container) =
            raw.rsplit_once('@').ok_or_else(|| InvalidIdError { raw: raw.to_owned() })?;
        if container.is_empty() {
            return Err(InvalidIdError { raw: raw.to_owned() });
        }
        let instance_id =
            instance.parse::<u64>().map_err(|_| InvalidIdError { raw: raw.to_owned() })?;
        Ok(Self { container_id: container.to_owned(), instance_id })
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.instance_id, self.container_id)
    }
}
