use crate::math::Vec2;
use crate::state::{Mode, ModeKind, SceneConfig, SceneState};
use log::info;

/// Input events fed to the scene by a front-end
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    SelectMode(ModeKind),
    PointerDown,
    PointerUp,
    PointerMove(Vec2),
}

/// Whether the frame loop keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl SceneState {
    /// Applies one input event. Pointer events only matter in drag mode.
    pub fn handle_event(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Quit => return Flow::Quit,
            InputEvent::SelectMode(kind) => {
                if self.mode.kind() != kind {
                    info!("Switching to {:?} mode", kind);
                }
                self.select_mode(kind);
            }
            InputEvent::PointerDown => {
                if let Mode::Drag { pointer_down, .. } = &mut self.mode {
                    *pointer_down = true;
                }
            }
            InputEvent::PointerUp => {
                if let Mode::Drag { pointer_down, .. } = &mut self.mode {
                    *pointer_down = false;
                }
            }
            InputEvent::PointerMove(pos) => {
                if let Mode::Drag {
                    pointer_down: true, ..
                } = self.mode
                {
                    self.light_pos = pos;
                }
            }
        }
        Flow::Continue
    }

    /// Drains a batch of events, stopping at the first quit
    pub fn handle_events<I>(&mut self, events: I) -> Flow
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            if self.handle_event(event) == Flow::Quit {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Input then animation for one frame. The step runs even when a quit
    /// arrives, so the caller can finish the frame before stopping.
    pub fn advance<I>(&mut self, config: &SceneConfig, events: I) -> Flow
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let flow = self.handle_events(events);
        self.step(config);
        flow
    }
}
