/// One entry of the mode table.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeMode {
    multiplier: f64,
    warp: bool,
    label: Option<&'static str>,
}

impl TimeMode {
    /// A physics-coupled mode (pause, slow motion, normal, fast forward).
    pub fn physics(multiplier: f64) -> Self {
        Self {
            multiplier,
            warp: false,
            label: None,
        }
    }

    /// A mode that runs on rails instead of stepping physics every frame.
    pub fn warp(multiplier: f64) -> Self {
        Self {
            multiplier,
            warp: true,
            label: None,
        }
    }

    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// Simulated seconds per real second.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn is_warp(&self) -> bool {
        self.warp
    }

    pub fn label(&self) -> Option<&'static str> {
        self.label
    }
}

/// The five contiguous regions of a mode table, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Pause,
    SlowMotion,
    Normal,
    FastForward,
    Warp,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Pause,
        Region::SlowMotion,
        Region::Normal,
        Region::FastForward,
        Region::Warp,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::Pause => "Pause",
            Region::SlowMotion => "Slow Motion",
            Region::Normal => "Normal",
            Region::FastForward => "Fast Forward",
            Region::Warp => "Warp",
        }
    }
}

/// The four time-panel buttons that can be mirrored by a keybind.
///
/// `ALL` is ordered by dispatch priority: when several bindings fire in the
/// same tick only the first one in this list is acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarpAction {
    SlowMotion,
    NormalSpeed,
    FastForward,
    Warp,
}

impl WarpAction {
    pub const ALL: [WarpAction; 4] = [
        WarpAction::SlowMotion,
        WarpAction::NormalSpeed,
        WarpAction::FastForward,
        WarpAction::Warp,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WarpAction::SlowMotion => "Slow Motion Mode",
            WarpAction::NormalSpeed => "Normal Speed Mode",
            WarpAction::FastForward => "Fast Forward Mode",
            WarpAction::Warp => "Warp Mode",
        }
    }
}
