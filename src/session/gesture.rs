use crate::foundation::core::Point;

/// Pointer button behind a pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Paints strokes.
    #[default]
    Primary,
    /// Pans the view.
    Secondary,
}

/// Input delivered to an [`EditSession`](crate::EditSession). Positions are canvas pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureEvent {
    /// Button pressed.
    PointerDown {
        /// Canvas x.
        x: f64,
        /// Canvas y.
        y: f64,
        /// Pressed button.
        #[serde(default)]
        button: PointerButton,
    },
    /// Pointer moved with a button held.
    PointerDrag {
        /// Canvas x.
        x: f64,
        /// Canvas y.
        y: f64,
        /// Held button.
        #[serde(default)]
        button: PointerButton,
    },
    /// Button released.
    PointerUp {
        /// Canvas x.
        x: f64,
        /// Canvas y.
        y: f64,
        /// Released button.
        #[serde(default)]
        button: PointerButton,
    },
    /// Wheel turned; positive `delta` zooms in.
    Wheel {
        /// Canvas x.
        x: f64,
        /// Canvas y.
        y: f64,
        /// Raw wheel delta; only its sign is used.
        delta: f64,
    },
    /// Threshold slider moved.
    ThresholdChanged {
        /// New threshold.
        value: u8,
    },
    /// Threshold typed into the entry box.
    ThresholdEntered {
        /// Raw entry text.
        text: String,
    },
}

impl GestureEvent {
    /// Canvas position for pointer and wheel events.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::PointerDown { x, y, .. }
            | Self::PointerDrag { x, y, .. }
            | Self::PointerUp { x, y, .. }
            | Self::Wheel { x, y, .. } => Some(Point::new(x, y)),
            Self::ThresholdChanged { .. } | Self::ThresholdEntered { .. } => None,
        }
    }

    /// Whether handling the event needs a laid-out canvas.
    pub fn needs_canvas(&self) -> bool {
        self.position().is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/gesture.rs"]
mod tests;
