// Decorative animation: mirrored elements flip back and forth on every animation tick.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct MirrorAnimation {
    enabled: bool,
    mirrored: bool,
}

impl MirrorAnimation {
    pub fn new() -> Self { MirrorAnimation { enabled: false, mirrored: false } }

    pub fn is_enabled(&self) -> bool { self.enabled }
    pub fn is_mirrored(&self) -> bool { self.mirrored }

    // Returns the new `enabled` state. Disabling always leaves the elements unmirrored.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        if !self.enabled {
            self.mirrored = false;
        }
        self.enabled
    }

    // Returns the phase to render.
    pub fn tick(&mut self) -> bool {
        if self.enabled {
            self.mirrored = !self.mirrored;
        }
        self.mirrored
    }
}
