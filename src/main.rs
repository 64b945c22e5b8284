//! Shake Sensing Kernel
//!
//! Demo entry point: replays a scripted shake timeline through the full
//! pipeline and prints the view transitions a host UI would render. Real
//! hosts embed the library (or the C FFI surface) and supply their own
//! sensor and audio bindings.

use shake_sensing::audio::{AudioBackend, Sound, SoundResource};
use shake_sensing::error::AudioError;
use shake_sensing::pipeline::ShakePipeline;
use shake_sensing::sensor::ScriptedSensor;
use shake_sensing::types::{MotionSample, ShakeConfig};

/// Audio backend that narrates playback to stdout.
struct ConsoleBackend;

struct ConsoleSound;

impl Sound for ConsoleSound {
    fn play(&mut self) -> Result<(), AudioError> {
        println!("  [audio] play");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        println!("  [audio] stop");
        Ok(())
    }

    fn replay(&mut self) -> Result<(), AudioError> {
        println!("  [audio] replay");
        Ok(())
    }

    fn unload(&mut self) -> Result<(), AudioError> {
        println!("  [audio] unload");
        Ok(())
    }
}

impl AudioBackend for ConsoleBackend {
    fn load(&mut self, resource: &SoundResource) -> Result<Box<dyn Sound>, AudioError> {
        println!("  [audio] load {}", resource.0);
        Ok(Box::new(ConsoleSound))
    }
}

fn main() {
    env_logger::init();

    println!("Shake Sensing Kernel v0.1.0");

    // A short timeline: one clean shake, one re-trigger attempt inside the
    // cooldown, one accepted re-trigger after it.
    let timeline = vec![
        MotionSample::new(0, [0.0, 0.0, 0.0]),
        MotionSample::new(100, [1.5, 0.0, 0.0]),
        MotionSample::new(800, [1.5, 0.0, 0.0]),
        MotionSample::new(1300, [0.0, 0.0, 0.0]),
        MotionSample::new(1700, [1.6, 0.0, 0.0]),
    ];

    let mut pipeline = ShakePipeline::new(
        ScriptedSensor::new(timeline),
        ConsoleBackend,
        SoundResource::new("assets/sound/percussion.wav"),
        ShakeConfig::default(),
    );

    let mut last_view = pipeline.view();
    println!("t=0ms view: {} {:?}", last_view.background, last_view.label);

    for now_ms in (0..=3200).step_by(100) {
        pipeline.pump(now_ms);
        let view = pipeline.view();
        if view != last_view {
            println!("t={now_ms}ms view: {} {:?}", view.background, view.label);
            last_view = view;
        }
    }

    println!("accepted triggers: {}", pipeline.accepted_triggers());
    pipeline.shutdown();
}
