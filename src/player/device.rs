use crate::errors::DjError;

/// Which device playback commands go to, if any.
///
/// Commands are gated on the binding alone: once the player reports "not
/// ready" the binding is dropped rather than kept around as a stale id.
#[derive(Debug, Default)]
pub struct DeviceBinder {
    device_id: Option<String>,
}

impl DeviceBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_ready(&mut self, device_id: impl Into<String>) {
        self.device_id = Some(device_id.into());
    }

    pub fn on_not_ready(&mut self) {
        self.device_id = None;
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    pub fn is_bound(&self) -> bool {
        self.device_id.is_some()
    }

    /// The bound device, or [`DjError::DeviceUnavailable`].
    pub fn require(&self) -> Result<&str, DjError> {
        self.device_id.as_deref().ok_or(DjError::DeviceUnavailable)
    }
}
