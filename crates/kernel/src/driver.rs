use laneway_common::DriveConfig;
use laneway_input::InputState;

use crate::camera::{CameraPose, ChaseCamera};
use crate::motion::MotionIntegrator;
use crate::pose::VehiclePose;
use crate::slot::{AssetSlot, PendingAsset};

/// What the renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a, V> {
    /// Number of ticks run so far, including this one.
    pub frame: u64,
    pub pose: VehiclePose,
    pub camera: CameraPose,
    /// The vehicle handle, once loaded.
    pub vehicle: Option<&'a V>,
}

/// Per-frame driver owning the vehicle pose, input state and vehicle slot.
///
/// Call [`tick`](Self::tick) once per rendered frame. While the vehicle is
/// pending a tick only advances the frame counter; pose and camera keep
/// their initial values.
pub struct FrameDriver<V> {
    integrator: MotionIntegrator,
    chase: ChaseCamera,
    pose: VehiclePose,
    camera: CameraPose,
    input: InputState,
    vehicle: AssetSlot<V>,
    frame: u64,
}

impl<V> FrameDriver<V> {
    pub fn new(config: &DriveConfig, vehicle: AssetSlot<V>) -> Self {
        Self {
            integrator: MotionIntegrator::new(config.motion, config.road),
            chase: ChaseCamera::new(&config.camera),
            pose: VehiclePose::at(config.start_position()),
            camera: CameraPose::initial(config),
            input: InputState::new(),
            vehicle,
            frame: 0,
        }
    }

    /// Driver whose vehicle arrives later from `source`.
    pub fn loading(config: &DriveConfig, source: impl PendingAsset<V> + 'static) -> Self {
        Self::new(config, AssetSlot::pending(source))
    }

    /// Driver whose vehicle is available from the first tick.
    pub fn ready(config: &DriveConfig, vehicle: V) -> Self {
        Self::new(config, AssetSlot::Ready(vehicle))
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Input state for the key-event handler to write between ticks.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn pose(&self) -> &VehiclePose {
        &self.pose
    }

    /// Overwrite the vehicle pose, e.g. to restart a run.
    pub fn set_pose(&mut self, pose: VehiclePose) {
        self.pose = pose;
        if self.vehicle.is_ready() {
            self.camera = self.chase.follow(&self.pose);
        }
    }

    pub fn camera(&self) -> &CameraPose {
        &self.camera
    }

    pub fn vehicle(&self) -> Option<&V> {
        self.vehicle.get()
    }

    pub fn is_vehicle_ready(&self) -> bool {
        self.vehicle.is_ready()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn integrator(&self) -> &MotionIntegrator {
        &self.integrator
    }

    /// Run one frame of vehicle logic and return what should be drawn.
    pub fn tick(&mut self) -> FrameSnapshot<'_, V> {
        self.frame += 1;
        if self.vehicle.poll() {
            tracing::info!(frame = self.frame, "vehicle ready");
        }

        if self.vehicle.is_ready() {
            self.pose = self.integrator.step(&self.pose, &self.input);
            self.camera = self.chase.follow(&self.pose);
            tracing::trace!(
                frame = self.frame,
                x = self.pose.position.x,
                z = self.pose.position.z,
                heading = self.pose.heading,
                speed = self.pose.speed,
                "vehicle stepped"
            );
        }

        self.snapshot()
    }

    /// Current frame state without advancing.
    pub fn snapshot(&self) -> FrameSnapshot<'_, V> {
        FrameSnapshot {
            frame: self.frame,
            pose: self.pose,
            camera: self.camera,
            vehicle: self.vehicle.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::Never;
    use glam::Vec3;
    use laneway_input::Control;
    use std::sync::mpsc;

    #[test]
    fn pending_vehicle_keeps_initial_pose() {
        let config = DriveConfig::default();
        let mut driver: FrameDriver<()> = FrameDriver::loading(&config, Never);
        driver.input_mut().set_control(Control::Accelerate, true);
        driver.input_mut().set_control(Control::SteerLeft, true);

        for _ in 0..30 {
            let frame = driver.tick();
            assert!(frame.vehicle.is_none());
            assert_eq!(frame.pose.position, config.start_position());
            assert_eq!(frame.pose.heading, 0.0);
            assert_eq!(frame.camera, CameraPose::initial(&config));
        }
        assert_eq!(driver.frame(), 30);
    }

    #[test]
    fn ready_vehicle_moves_and_camera_follows() {
        let config = DriveConfig::default();
        let mut driver = FrameDriver::ready(&config, "car");
        driver.input_mut().set_control(Control::Accelerate, true);

        let frame = driver.tick();
        assert_eq!(frame.vehicle, Some(&"car"));
        assert!(frame.pose.position.z > config.start_position().z);
        assert_eq!(frame.camera.target, frame.pose.position);
        assert_eq!(frame.camera.eye.y, config.camera.height);
    }

    #[test]
    fn vehicle_activates_when_load_completes() {
        let config = DriveConfig::default();
        let (tx, rx) = mpsc::channel();
        let mut driver = FrameDriver::loading(&config, rx);
        driver.input_mut().set_control(Control::Accelerate, true);

        driver.tick();
        driver.tick();
        assert!(!driver.is_vehicle_ready());
        assert_eq!(driver.pose().position, config.start_position());

        tx.send(42_u32).unwrap();
        let frame = driver.tick();
        assert_eq!(frame.vehicle, Some(&42));
        assert_eq!(frame.frame, 3);
        // The first ready tick already integrates motion.
        assert!((frame.pose.speed - 0.00196).abs() < 1e-6);
    }

    #[test]
    fn matches_direct_integration() {
        let config = DriveConfig::default();
        let mut driver = FrameDriver::ready(&config, ());
        let input = InputState::holding(&[Control::Accelerate, Control::SteerRight]);
        *driver.input_mut() = input;

        let integrator = MotionIntegrator::new(config.motion, config.road);
        let mut pose = VehiclePose::at(config.start_position());
        for _ in 0..200 {
            pose = integrator.step(&pose, &input);
            driver.tick();
        }
        assert_eq!(*driver.pose(), pose);
        assert_eq!(*driver.camera(), ChaseCamera::new(&config.camera).follow(&pose));
    }

    #[test]
    fn input_changes_between_ticks_are_observed() {
        let config = DriveConfig::default();
        let mut driver = FrameDriver::ready(&config, ());
        driver.input_mut().set_control(Control::SteerLeft, true);
        driver.tick();
        driver.input_mut().set_control(Control::SteerLeft, false);
        driver.tick();
        assert!((driver.pose().heading - config.motion.turn_step).abs() < 1e-6);
    }

    #[test]
    fn set_pose_refreshes_camera_when_ready() {
        let config = DriveConfig::default();
        let mut driver = FrameDriver::ready(&config, ());
        let pose = VehiclePose::at(Vec3::new(2.0, 0.05, 10.0));
        driver.set_pose(pose);
        assert_eq!(driver.camera().target, pose.position);
    }
}
