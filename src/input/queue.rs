/// Input events the game understands
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key was pressed (DOM `KeyboardEvent.key`)
    KeyDown(String),
    /// A key was released
    KeyUp(String),
    /// The pointer moved to `x` (logical px, relative to the canvas)
    PointerMove { x: f32 },
}

/// A queue of input events.
/// Event handlers write into the queue; the frame callback drains it.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown("ArrowLeft".into()));
        q.push(InputEvent::PointerMove { x: 10.0 });
        assert_eq!(q.len(), 2);

        let events = q.drain();
        assert_eq!(
            events,
            vec![
                InputEvent::KeyDown("ArrowLeft".into()),
                InputEvent::PointerMove { x: 10.0 },
            ]
        );
        assert!(q.is_empty());
    }
}
