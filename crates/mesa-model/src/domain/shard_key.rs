use serde::{Deserialize, Serialize};

use crate::{InstanceId, JobKey};

/// Address of a single job instance, the unit targeted by shard rewrites.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShardKey {
    pub job_key: JobKey,
    pub instance_id: InstanceId,
}

impl ShardKey {
    pub fn new(job_key: JobKey, instance_id: InstanceId) -> Self {
        Self {
            job_key,
            instance_id,
        }
    }
}
