//! Haptic feedback adapters
//!
//! A terminal has no vibration motor, so the CLI rings the bell for heavy
//! impacts and stays silent otherwise.

use std::io::Write;
use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::ports::{HapticFeedback, ImpactStyle};

/// Does nothing. Used when haptics are disabled.
#[derive(Debug, Default)]
pub struct NoopHaptics;

impl HapticFeedback for NoopHaptics {
    fn impact(&self, _style: ImpactStyle) -> Result<()> {
        Ok(())
    }
}

/// Rings the terminal bell on heavy impacts
#[derive(Debug, Default)]
pub struct TerminalBell;

impl HapticFeedback for TerminalBell {
    fn impact(&self, style: ImpactStyle) -> Result<()> {
        if style == ImpactStyle::Heavy {
            let mut stderr = std::io::stderr();
            stderr.write_all(b"\x07")?;
            stderr.flush()?;
        }
        Ok(())
    }
}

/// Records every impact. Optionally fails each call after recording it.
#[derive(Debug, Default)]
pub struct RecordingHaptics {
    impacts: Mutex<Vec<ImpactStyle>>,
    failing: bool,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose every call reports a failure
    pub fn failing() -> Self {
        Self {
            impacts: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn impacts(&self) -> Vec<ImpactStyle> {
        self.impacts.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl HapticFeedback for RecordingHaptics {
    fn impact(&self, style: ImpactStyle) -> Result<()> {
        if let Ok(mut impacts) = self.impacts.lock() {
            impacts.push(style);
        }
        if self.failing {
            return Err(Error::Other("haptic engine unavailable".to_string()));
        }
        Ok(())
    }
}
