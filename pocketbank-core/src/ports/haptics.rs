//! Haptic feedback port

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;

/// Strength of a haptic impact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactStyle {
    Light,
    Heavy,
}

/// Device haptics.
///
/// Calls must return quickly. Failures are reported but callers treat
/// haptics as a side channel and ignore them.
pub trait HapticFeedback: Send + Sync {
    fn impact(&self, style: ImpactStyle) -> Result<()>;
}
