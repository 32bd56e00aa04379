use laneway_common::{MotionConfig, RoadConfig};
use laneway_input::{Control, InputState};

use crate::pose::{VehiclePose, forward};

/// Advances a [`VehiclePose`] by one fixed logical tick.
///
/// Each call is one tick regardless of wall-clock time. The step is a pure
/// function of `(pose, input)` and the constants captured at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionIntegrator {
    motion: MotionConfig,
    min_x: f32,
    max_x: f32,
}

impl MotionIntegrator {
    pub fn new(motion: MotionConfig, road: RoadConfig) -> Self {
        let (min_x, max_x) = road.lateral_limits();
        Self {
            motion,
            min_x,
            max_x,
        }
    }

    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    /// Inclusive range the vehicle's x coordinate is clamped to.
    pub fn lateral_limits(&self) -> (f32, f32) {
        (self.min_x, self.max_x)
    }

    /// Produce the pose one tick after `pose` under `input`.
    ///
    /// Steering changes heading even at zero speed. Hitting the lateral
    /// limit clamps x but leaves speed untouched.
    pub fn step(&self, pose: &VehiclePose, input: &InputState) -> VehiclePose {
        let m = &self.motion;

        let mut speed = pose.speed;
        if input.is_pressed(Control::Accelerate) {
            speed += m.accel_step;
        }
        if input.is_pressed(Control::Brake) {
            speed -= m.accel_step;
        }
        speed *= m.damping_factor;

        let mut heading = pose.heading;
        if input.is_pressed(Control::SteerLeft) {
            heading += m.turn_step;
        }
        if input.is_pressed(Control::SteerRight) {
            heading -= m.turn_step;
        }

        let mut position = pose.position + forward(heading) * speed;
        position.x = position.x.max(self.min_x).min(self.max_x);

        VehiclePose {
            position,
            heading,
            speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const EPS: f32 = 1e-6;

    fn integrator() -> MotionIntegrator {
        MotionIntegrator::new(MotionConfig::default(), RoadConfig::default())
    }

    fn run(
        integrator: &MotionIntegrator,
        mut pose: VehiclePose,
        input: &InputState,
        ticks: usize,
    ) -> VehiclePose {
        for _ in 0..ticks {
            pose = integrator.step(&pose, input);
        }
        pose
    }

    #[test]
    fn single_accelerate_tick() {
        let pose = integrator().step(
            &VehiclePose::default(),
            &InputState::holding(&[Control::Accelerate]),
        );
        assert!((pose.speed - 0.00196).abs() < EPS);
        assert_eq!(pose.position.x, 0.0);
        assert_eq!(pose.position.y, 0.0);
        assert!((pose.position.z - 0.00196).abs() < EPS);
        assert_eq!(pose.heading, 0.0);
    }

    #[test]
    fn single_steer_tick_turns_in_place() {
        let pose = integrator().step(
            &VehiclePose::default(),
            &InputState::holding(&[Control::SteerLeft]),
        );
        assert!((pose.heading - 0.03).abs() < EPS);
        assert_eq!(pose.speed, 0.0);
        assert_eq!(pose.position, Vec3::ZERO);
    }

    #[test]
    fn steer_right_decreases_heading() {
        let pose = integrator().step(
            &VehiclePose::default(),
            &InputState::holding(&[Control::SteerRight]),
        );
        assert!((pose.heading + 0.03).abs() < EPS);
    }

    #[test]
    fn opposite_inputs_cancel() {
        let input = InputState::holding(&Control::ALL);
        let start = VehiclePose {
            speed: 0.05,
            heading: 0.4,
            ..VehiclePose::default()
        };
        let pose = integrator().step(&start, &input);
        assert!((pose.heading - 0.4).abs() < EPS);
        assert!((pose.speed - 0.05 * 0.98).abs() < EPS);
    }

    #[test]
    fn brake_reverses_from_rest() {
        let pose = integrator().step(
            &VehiclePose::default(),
            &InputState::holding(&[Control::Brake]),
        );
        assert!(pose.speed < 0.0);
        assert!(pose.position.z < 0.0);
    }

    #[test]
    fn coasting_speed_decays_monotonically() {
        let integrator = integrator();
        let idle = InputState::new();
        for initial in [0.5_f32, -0.3] {
            let mut pose = VehiclePose {
                speed: initial,
                ..VehiclePose::default()
            };
            let mut ticks = 0;
            while pose.speed.abs() > 1e-6 {
                let next = integrator.step(&pose, &idle);
                assert!(next.speed.abs() < pose.speed.abs());
                assert_eq!(next.speed.signum(), initial.signum());
                pose = next;
                ticks += 1;
                assert!(ticks < 10_000, "speed failed to decay");
            }
        }
    }

    #[test]
    fn sustained_acceleration_converges() {
        let integrator = integrator();
        let pose = run(
            &integrator,
            VehiclePose::default(),
            &InputState::holding(&[Control::Accelerate]),
            2_000,
        );
        let terminal = integrator.motion().terminal_speed();
        assert!((pose.speed - terminal).abs() < 1e-5);
    }

    #[test]
    fn sustained_braking_converges_to_negative_terminal() {
        let integrator = integrator();
        let pose = run(
            &integrator,
            VehiclePose::default(),
            &InputState::holding(&[Control::Brake]),
            2_000,
        );
        assert!((pose.speed + integrator.motion().terminal_speed()).abs() < 1e-5);
    }

    #[test]
    fn out_of_bounds_start_is_clamped() {
        let road = RoadConfig {
            half_width: 5.0,
            margin: 0.5,
            ..RoadConfig::default()
        };
        let integrator = MotionIntegrator::new(MotionConfig::default(), road);
        for input in [
            InputState::new(),
            InputState::holding(&[Control::Accelerate]),
            InputState::holding(&[Control::SteerLeft, Control::Brake]),
        ] {
            let pose = integrator.step(&VehiclePose::at(Vec3::new(10.0, 0.0, 0.0)), &input);
            assert_eq!(pose.position.x, 4.5);
            let pose = integrator.step(&VehiclePose::at(Vec3::new(-10.0, 0.0, 0.0)), &input);
            assert_eq!(pose.position.x, -4.5);
        }
    }

    #[test]
    fn steering_into_rail_never_escapes() {
        let integrator = integrator();
        let (min_x, max_x) = integrator.lateral_limits();
        for steer in [Control::SteerLeft, Control::SteerRight] {
            let input = InputState::holding(&[Control::Accelerate, steer]);
            let mut pose = VehiclePose::default();
            for _ in 0..5_000 {
                pose = integrator.step(&pose, &input);
                assert!(pose.position.x >= min_x && pose.position.x <= max_x);
            }
        }
    }

    #[test]
    fn road_narrower_than_margin_pins_to_centre() {
        let road = RoadConfig {
            half_width: 0.3,
            margin: 0.5,
            ..RoadConfig::default()
        };
        let integrator = MotionIntegrator::new(MotionConfig::default(), road);
        let input = InputState::holding(&[Control::Accelerate, Control::SteerLeft]);
        let pose = run(&integrator, VehiclePose::at(Vec3::new(2.0, 0.0, 0.0)), &input, 50);
        assert_eq!(pose.position.x, 0.0);
        assert!(pose.speed > 0.0);
    }

    #[test]
    fn rail_contact_keeps_speed() {
        let integrator = integrator();
        let start = VehiclePose {
            position: Vec3::new(4.5, 0.0, 0.0),
            heading: std::f32::consts::FRAC_PI_2,
            speed: 0.08,
        };
        let pose = integrator.step(&start, &InputState::new());
        assert_eq!(pose.position.x, 4.5);
        assert!((pose.speed - 0.08 * 0.98).abs() < EPS);
    }

    #[test]
    fn heading_ignores_throttle() {
        let integrator = integrator();
        let start = VehiclePose {
            heading: 1.25,
            speed: 0.04,
            ..VehiclePose::default()
        };
        for input in [
            InputState::new(),
            InputState::holding(&[Control::Accelerate]),
            InputState::holding(&[Control::Brake]),
        ] {
            assert_eq!(integrator.step(&start, &input).heading, 1.25);
        }
    }

    #[test]
    fn step_is_deterministic() {
        let integrator = integrator();
        let input = InputState::holding(&[Control::Accelerate, Control::SteerLeft]);
        let a = run(&integrator, VehiclePose::default(), &input, 300);
        let b = run(&integrator, VehiclePose::default(), &input, 300);
        assert_eq!(a, b);
    }

    #[test]
    fn y_is_never_touched() {
        let integrator = integrator();
        let start = VehiclePose::at(Vec3::new(0.0, 0.05, -95.0));
        let pose = run(
            &integrator,
            start,
            &InputState::holding(&[Control::Accelerate, Control::SteerRight]),
            120,
        );
        assert_eq!(pose.position.y, 0.05);
    }
}
