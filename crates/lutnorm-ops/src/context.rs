//! Per-batch correction settings.

use lutnorm_dds::DXGI_FORMAT_R8G8B8A8_UNORM;
use lutnorm_lut::{AxisOrder, DEFAULT_AXIS_ORDER};

/// Settings shared by every file of a batch.
///
/// Built once and handed to each worker by reference. It holds no mutable
/// state, so it is `Send + Sync` and needs no locking.
///
/// # Example
///
/// ```rust
/// use lutnorm_ops::CorrectionContext;
/// use lutnorm_lut::AxisOrder;
///
/// let ctx = CorrectionContext::default().with_axis_order(AxisOrder::GreenFastest);
/// assert_eq!(ctx.format_code, 28);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionContext {
    /// DXGI format code that is rewritten. Any other code passes through.
    pub format_code: u32,
    /// Enumeration order of cube points.
    pub axis_order: AxisOrder,
}

impl Default for CorrectionContext {
    fn default() -> Self {
        Self {
            format_code: DXGI_FORMAT_R8G8B8A8_UNORM,
            axis_order: DEFAULT_AXIS_ORDER,
        }
    }
}

impl CorrectionContext {
    /// Sets the enumeration order.
    pub fn with_axis_order(mut self, order: AxisOrder) -> Self {
        self.axis_order = order;
        self
    }

    /// True if a container with this DXGI format should be corrected.
    #[inline]
    pub fn accepts(&self, dxgi_format: Option<u32>) -> bool {
        dxgi_format == Some(self.format_code)
    }
}
