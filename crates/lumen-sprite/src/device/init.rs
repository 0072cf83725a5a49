/// Initialization parameters for a headless GPU context.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct HeadlessInit {
    /// Adapter preference. Low power keeps CI machines on the integrated GPU.
    pub power_preference: wgpu::PowerPreference,

    /// Accept only a software (fallback) adapter.
    pub force_fallback_adapter: bool,

    /// Required wgpu features.
    ///
    /// The sprite pipeline needs none; favor an empty set for portability.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,
}

impl Default for HeadlessInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::LowPower,
            force_fallback_adapter: false,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
        }
    }
}
