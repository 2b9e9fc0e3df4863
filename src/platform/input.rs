//! Device input events and the per-frame queue

use glam::IVec2;

use crate::sim::FrameInput;

/// Discrete input surfaced by the browser or window system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// Window close / page teardown
    Quit,
    /// Escape key
    Escape,
    /// Primary button pressed at a device position (y down)
    PrimaryDown { x: i32, y: i32 },
}

/// Events collected between frames
#[derive(Debug, Clone)]
pub struct InputQueue {
    events: Vec<DeviceEvent>,
    max_events: usize,
    dropped: usize,
}

impl InputQueue {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::with_capacity(max_events),
            max_events,
            dropped: 0,
        }
    }

    /// Queue an event; clicks past the per-frame limit are dropped, quits never are
    pub fn push(&mut self, event: DeviceEvent) {
        let is_click = matches!(event, DeviceEvent::PrimaryDown { .. });
        if is_click && self.events.len() >= self.max_events {
            self.dropped += 1;
            return;
        }
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drain queued events into canonical input, flipping y against the field height
    pub fn drain(&mut self, field_height: u32) -> FrameInput {
        if self.dropped > 0 {
            log::warn!("Dropped {} input events this frame", self.dropped);
            self.dropped = 0;
        }

        let mut input = FrameInput::default();
        for event in self.events.drain(..) {
            match event {
                DeviceEvent::Quit | DeviceEvent::Escape => input.quit = true,
                DeviceEvent::PrimaryDown { x, y } => {
                    input.clicks.push(device_to_canonical(x, y, field_height));
                }
            }
        }
        input
    }
}

/// Flip a device position (y down) into canonical field space (y up)
pub fn device_to_canonical(x: i32, y: i32, field_height: u32) -> IVec2 {
    IVec2::new(x, field_height as i32 - y)
}
