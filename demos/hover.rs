// demos/hover.rs

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::convert::Infallible;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tilt_rotor_mixer::{
    ActuatorChannel, ActuatorDriver, BodyRates, LinearVelocity, Position, Quaternion,
    StateStore, TiltRotorConfig, TiltRotorController,
};

// Prints every duty cycle instead of driving PWM hardware.
struct ConsoleServos;

impl ActuatorDriver<f64> for ConsoleServos {
    type Error = Infallible;

    fn set_duty_cycle(
        &mut self,
        channel: ActuatorChannel,
        duty_cycle: f64,
    ) -> Result<(), Self::Error> {
        print!("  pin {:2}: {:5.3}", channel.pin, duty_cycle);
        Ok(())
    }
}

fn main() {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    let config = TiltRotorConfig::<f64>::reference();
    let mut controller = match TiltRotorController::with_config(config) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("invalid configuration: {}", e);
            return;
        }
    };
    let period = controller.control_period().unwrap_or(Duration::from_millis(20));
    let store = Arc::new(StateStore::<f64>::new());
    let mut servos = ConsoleServos;

    if let Err(e) = controller.arm(&mut servos) {
        eprintln!("{}", e);
        return;
    }
    println!();

    // Setpoint source: hold one meter forward, level.
    let setpoints = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(60));
            store.update_target_attitude(Quaternion::identity());
            store.update_target_position(Position::new(1.0, 0.0, 1.0));
        })
    };

    // Feedback source: a crude vehicle creeping toward the target.
    let feedback = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            let mut x = 0.0;
            for _ in 0..20 {
                let vx = 0.5 * (1.0 - x);
                x += vx * 0.03;
                store.update_vehicle_pose(Position::new(x, 0.0, 1.0), Quaternion::identity());
                store.update_vehicle_rates(LinearVelocity::new(vx, 0.0, 0.0), BodyRates::zero());
                thread::sleep(Duration::from_millis(30));
            }
        })
    };

    // The scheduler lives here, outside the crate.
    for _ in 0..25 {
        print!("tick {:2} (data: {:5})", controller.tick_count() + 1, store.has_data());
        controller.tick(&store, &mut servos);
        println!();
        thread::sleep(period);
    }

    setpoints.join().ok();
    feedback.join().ok();
}
