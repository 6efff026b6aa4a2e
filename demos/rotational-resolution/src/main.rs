use twops_core::{as_floats, debug_draw_world, flatten_lines};
use twops_sandbox::{RotationalResolution, ScenarioRunner};

const FRAME_DT: f32 = 1.0 / 60.0;
const REPORT_EVERY: u32 = 30;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let frames: u32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(600);

    let mut runner = ScenarioRunner::new(RotationalResolution::default());
    for frame in 1..=frames {
        runner.tick(FRAME_DT);
        if frame % REPORT_EVERY != 0 {
            continue;
        }
        let world = runner.world();
        let scenario = runner.scenario();
        for (label, id) in [("ball", scenario.ball()), ("tower", scenario.tower())] {
            let Some(body) = id.and_then(|id| world.body(id)) else {
                continue;
            };
            log::info!(
                "frame {:>4} {:<5} center ({:>7.1}, {:>7.1}) angle {:>6.2} spin {:>6.2}",
                frame,
                label,
                body.center().x,
                body.center().y,
                body.angle(),
                body.angular_velocity()
            );
        }
    }

    let vertices = flatten_lines(&debug_draw_world(runner.world()));
    log::info!(
        "{} steps, debug buffer {} floats",
        runner.ticks(),
        as_floats(&vertices).len()
    );
}
