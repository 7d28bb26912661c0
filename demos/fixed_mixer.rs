// demos/fixed_mixer.rs

use fixed::types::I16F16;
use tilt_rotor_mixer::{ControlEfforts, MixerConfig, TiltMixer};

fn main() {
    let mixer = TiltMixer::with_config(MixerConfig::new(
        I16F16::from_num(0.2),
        I16F16::from_num(7),
        I16F16::from_num(5),
        I16F16::from_num(9),
    ));

    println!("      u_x,    u_yaw ->     dc_1,     dc_2,     dc_3,     dc_4");
    for step in -4..=4 {
        let efforts = ControlEfforts {
            x: I16F16::from_num(step),
            y: I16F16::from_num(0),
            roll: I16F16::from_num(0),
            pitch: I16F16::from_num(0),
            yaw: I16F16::from_num(step) / I16F16::from_num(2),
        };
        let [dc_1, dc_2, dc_3, dc_4] = mixer.mix(&efforts).duty_cycles;
        println!(
            " {:-8.3}, {:-8.3} -> {:-8.3}, {:-8.3}, {:-8.3}, {:-8.3}",
            efforts.x, efforts.yaw, dc_1, dc_2, dc_3, dc_4
        );
    }
}
