// The seam between the VM and whatever body a program is driving

/// Domain operations a tank exposes to its program.
///
/// Angles cross this boundary in radians; the VM does the degree conversion.
pub trait TankHost {
    fn fire_ready(&self) -> bool;
    fn fire(&mut self);
    fn teleport_ready(&self) -> bool;
    fn teleport(&mut self);
    /// Desired tread speeds, left then right
    fn set_speed(&mut self, left: f64, right: f64);
    fn set_turret(&mut self, angle: f64);
    fn turret(&self) -> f64;
    /// Trigger mask of sensor `index`, 0 for a sensor that does not exist
    fn sensor(&self, index: f64) -> u32;
    fn set_led(&mut self, on: bool);
    /// Uniform integer in [0, max); callers guarantee `max >= 1`
    fn random(&mut self, max: f64) -> f64;
}

/// A host with no body, for running core-only programs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl TankHost for NullHost {
    fn fire_ready(&self) -> bool {
        false
    }
    fn fire(&mut self) {}
    fn teleport_ready(&self) -> bool {
        false
    }
    fn teleport(&mut self) {}
    fn set_speed(&mut self, _left: f64, _right: f64) {}
    fn set_turret(&mut self, _angle: f64) {}
    fn turret(&self) -> f64 {
        0.0
    }
    fn sensor(&self, _index: f64) -> u32 {
        0
    }
    fn set_led(&mut self, _on: bool) {}
    fn random(&mut self, _max: f64) -> f64 {
        0.0
    }
}
