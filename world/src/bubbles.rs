//! Bubble storage owned by the active run.

use photosynthesis_core::{BubbleId, BubbleSnapshot, SURFACE_LINE};

#[derive(Debug)]
pub(crate) struct Bubble {
    id: BubbleId,
    x: f32,
    y: f32,
    visible: bool,
}

impl Bubble {
    pub(crate) fn new(id: BubbleId, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            visible: false,
        }
    }

    /// Moves the bubble upwards and returns `true` on its first crossing of the surface line.
    pub(crate) fn rise(&mut self, distance: f32) -> bool {
        if distance.is_finite() && distance > 0.0 {
            self.y -= distance;
        }

        if !self.visible && self.y <= SURFACE_LINE {
            self.visible = true;
            return true;
        }
        false
    }

    pub(crate) fn snapshot(&self) -> BubbleSnapshot {
        BubbleSnapshot {
            id: self.id,
            x: self.x,
            y: self.y,
            visible: self.visible,
        }
    }
}

/// Bubbles in creation order. Identifiers are allocated densely, so the
/// identifier doubles as the index.
#[derive(Debug, Default)]
pub(crate) struct BubbleField {
    bubbles: Vec<Bubble>,
}

impl BubbleField {
    pub(crate) fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub(crate) fn spawn(&mut self, x: f32, y: f32) -> BubbleId {
        let id = BubbleId::new(u32::try_from(self.bubbles.len()).unwrap_or(u32::MAX));
        self.bubbles.push(Bubble::new(id, x, y));
        id
    }

    pub(crate) fn get_mut(&mut self, id: BubbleId) -> Option<&mut Bubble> {
        let index = usize::try_from(id.get()).ok()?;
        self.bubbles.get_mut(index)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.bubbles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rise_reports_the_surface_crossing_once() {
        let mut bubble = Bubble::new(BubbleId::new(0), 100.0, 416.0);

        assert!(!bubble.rise(0.5));
        assert!(bubble.rise(0.5));
        assert!(!bubble.rise(1.0));
        assert!(bubble.snapshot().visible);
    }

    #[test]
    fn rise_ignores_downward_or_invalid_distances() {
        let mut bubble = Bubble::new(BubbleId::new(0), 100.0, 500.0);

        assert!(!bubble.rise(-10.0));
        assert!(!bubble.rise(f32::NAN));
        assert_eq!(bubble.snapshot().y, 500.0);
    }

    #[test]
    fn identifiers_follow_creation_order() {
        let mut field = BubbleField::default();
        let first = field.spawn(10.0, 430.0);
        let second = field.spawn(20.0, 440.0);

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
        assert_eq!(field.len(), 2);
        assert!(field.get_mut(BubbleId::new(2)).is_none());
    }
}
