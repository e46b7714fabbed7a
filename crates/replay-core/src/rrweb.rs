//! rrweb numeric code tables as closed enums.
//!
//! Captured events carry small-integer `type` and `data.source` codes
//! assigned by the rrweb recorder
//! (<https://github.com/rrweb-io/rrweb/blob/master/packages/rrweb/src/types.ts>).
//! Modeling them as enums with explicit discriminants gives exhaustiveness
//! checking at classification sites; unknown codes decode to `None` rather
//! than failing, since the recorder may grow new codes independently.

/// Top-level `event.type` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum EventType {
    DomContentLoaded = 0,
    Load = 1,
    FullSnapshot = 2,
    IncrementalSnapshot = 3,
    Meta = 4,
    Custom = 5,
    Plugin = 6,
}

impl EventType {
    /// Decodes a raw `event.type` code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::DomContentLoaded),
            1 => Some(Self::Load),
            2 => Some(Self::FullSnapshot),
            3 => Some(Self::IncrementalSnapshot),
            4 => Some(Self::Meta),
            5 => Some(Self::Custom),
            6 => Some(Self::Plugin),
            _ => None,
        }
    }

    /// Returns the numeric wire code.
    #[must_use]
    pub const fn code(self) -> i64 {
        self as i64
    }
}

/// `event.data.source` codes on incremental snapshots.
///
/// Older recorder builds collapsed Font, Log, Drag, StyleDeclaration and
/// Selection onto code 1; classification keys off the numeric code, so
/// events captured that way still classify as mouse movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum IncrementalSource {
    Mutation = 0,
    MouseMove = 1,
    MouseInteraction = 2,
    Scroll = 3,
    ViewportResize = 4,
    Input = 5,
    TouchMove = 6,
    MediaInteraction = 7,
    StyleSheetRule = 8,
    CanvasMutation = 9,
    Font = 10,
    Log = 11,
    Drag = 12,
    StyleDeclaration = 13,
    Selection = 14,
}

impl IncrementalSource {
    /// Decodes a raw `event.data.source` code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Mutation),
            1 => Some(Self::MouseMove),
            2 => Some(Self::MouseInteraction),
            3 => Some(Self::Scroll),
            4 => Some(Self::ViewportResize),
            5 => Some(Self::Input),
            6 => Some(Self::TouchMove),
            7 => Some(Self::MediaInteraction),
            8 => Some(Self::StyleSheetRule),
            9 => Some(Self::CanvasMutation),
            10 => Some(Self::Font),
            11 => Some(Self::Log),
            12 => Some(Self::Drag),
            13 => Some(Self::StyleDeclaration),
            14 => Some(Self::Selection),
            _ => None,
        }
    }

    /// Returns the numeric wire code.
    #[must_use]
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// Whether this source marks direct user interaction.
    ///
    /// These are the sources that keep an active segment open: mouse,
    /// touch, scroll, resize, input, media and drag.
    #[must_use]
    pub const fn is_user_activity(self) -> bool {
        matches!(
            self,
            Self::MouseMove
                | Self::MouseInteraction
                | Self::Scroll
                | Self::ViewportResize
                | Self::Input
                | Self::TouchMove
                | Self::MediaInteraction
                | Self::Drag
        )
    }
}

/// `event.data.type` codes on `MouseInteraction` sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum MouseInteractionKind {
    MouseUp = 0,
    MouseDown = 1,
    Click = 2,
    ContextMenu = 3,
    DblClick = 4,
    Focus = 5,
    Blur = 6,
    TouchStart = 7,
    TouchMoveDeparted = 8,
    TouchEnd = 9,
    TouchCancel = 10,
}

impl MouseInteractionKind {
    /// Decodes a raw `event.data.type` code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::MouseUp),
            1 => Some(Self::MouseDown),
            2 => Some(Self::Click),
            3 => Some(Self::ContextMenu),
            4 => Some(Self::DblClick),
            5 => Some(Self::Focus),
            6 => Some(Self::Blur),
            7 => Some(Self::TouchStart),
            8 => Some(Self::TouchMoveDeparted),
            9 => Some(Self::TouchEnd),
            10 => Some(Self::TouchCancel),
            _ => None,
        }
    }
}
