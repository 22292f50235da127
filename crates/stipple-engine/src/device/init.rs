/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Let the surface sRGB-encode fragment output.
    ///
    /// Off by default: point colors are already sRGB values, as on a 2D
    /// canvas, and must reach the framebuffer unchanged.
    pub prefer_srgb: bool,

    /// Swap behavior. FIFO is supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Alpha mode preference; an unsupported request falls back to the first
    /// mode the surface offers.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on platform and backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
