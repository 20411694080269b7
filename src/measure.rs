//! Host measurement protocol.
//!
//! A host proposes a `(mode, size)` pair per axis and the widget answers with
//! a concrete pixel size. Width and height go through the same rule.

/// How a proposed size constrains one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// The parent dictates the size.
    Exact,
    /// The widget may be as large as the proposed size, no larger.
    AtMost,
    /// No constraint; the proposed size is only a hint.
    Unspecified,
}

/// One axis of a measurement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureSpec {
    pub mode: MeasureMode,
    pub size: i32,
}

impl MeasureSpec {
    pub const fn new(mode: MeasureMode, size: i32) -> Self {
        Self { mode, size }
    }

    pub const fn exact(size: i32) -> Self {
        Self::new(MeasureMode::Exact, size)
    }

    pub const fn at_most(size: i32) -> Self {
        Self::new(MeasureMode::AtMost, size)
    }

    pub const fn unspecified(size: i32) -> Self {
        Self::new(MeasureMode::Unspecified, size)
    }
}

/// Resolved pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const ZERO: Size = Size::new(0, 0);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Resolves one axis against the widget's previously measured dimension.
///
/// Negative proposals are clamped to zero.
pub fn resolve_dimension(spec: MeasureSpec, measured: u32) -> u32 {
    let proposed = spec.size.max(0) as u32;
    match spec.mode {
        MeasureMode::Exact => proposed,
        MeasureMode::AtMost if measured > 0 => proposed.min(measured),
        MeasureMode::Unspecified if measured > 0 => measured,
        MeasureMode::AtMost | MeasureMode::Unspecified => proposed,
    }
}

/// Resolves both axes independently.
pub fn resolve_size(width: MeasureSpec, height: MeasureSpec, measured: Size) -> Size {
    Size::new(
        resolve_dimension(width, measured.width),
        resolve_dimension(height, measured.height),
    )
}
