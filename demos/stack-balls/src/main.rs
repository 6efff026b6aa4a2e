use twops_core::{debug_draw_world, flatten_lines};
use twops_sandbox::{ScenarioRunner, StackBalls};

const FRAME_DT: f32 = 1.0 / 60.0;
const REPORT_EVERY: u32 = 60;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let frames: u32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(600);

    let mut runner = ScenarioRunner::new(StackBalls::default());
    for frame in 1..=frames {
        runner.tick(FRAME_DT);
        if frame % REPORT_EVERY == 0 {
            let world = runner.world();
            log::info!(
                "frame {:>5}: kinetic energy {:>12.1}, contacts {:>3}",
                frame,
                world.kinetic_energy(),
                world.contacts().len()
            );
        }
    }

    let world = runner.world();
    let highest = runner
        .scenario()
        .balls()
        .iter()
        .filter_map(|&id| world.body(id))
        .map(|b| b.center().y)
        .fold(f32::INFINITY, f32::min);
    let vertices = flatten_lines(&debug_draw_world(world));
    log::info!(
        "{} steps, top of the pile at y = {:.1}, {} debug vertices",
        runner.ticks(),
        highest,
        vertices.len()
    );
}
