mod audio;
mod renderer;
mod utils;

use anyhow::{anyhow, Result};
use audio::Player;
use nannou::prelude::*;
use rand::rngs::ThreadRng;
use shape_viz_core::{FrameClock, PlaybackState, Scene, Settings, SpectrumAnalyzer};
use std::fs::File;
use std::io::BufReader;
use tracing::{error, info, warn};

fn main() {
    utils::logging::init();

    nannou::app(model).update(update).exit(exit).run();
}

/// Everything the render loop owns, created at startup and torn down on exit
struct Model {
    scene: Scene,
    analyzer: SpectrumAnalyzer<BufReader<File>>,
    player: Player,
    center_image: wgpu::Texture,
    clock: FrameClock,
    rng: ThreadRng,
    frame_count: u64,
}

fn model(app: &App) -> Model {
    match init(app) {
        Ok(model) => model,
        Err(err) => {
            error!("Startup failed: {:#}", err);
            std::process::exit(1);
        }
    }
}

fn init(app: &App) -> Result<Model> {
    let settings = Settings::default();

    app.new_window()
        .title(settings.title)
        .size(settings.width, settings.height)
        .resizable(false)
        .view(view)
        .build()
        .map_err(|e| anyhow!("failed to create window: {:?}", e))?;
    info!("Window size: {}x{}", settings.width, settings.height);

    let center_image = utils::assets::load_center_image(app, &settings.image_path)?;
    let (track, analyzer) = utils::assets::load_audio(&settings.audio_path, settings.window_frames)?;
    let player = Player::start(track)?;

    Ok(Model {
        clock: FrameClock::new(settings.frame_budget()),
        scene: Scene::new(settings),
        analyzer,
        player,
        center_image,
        rng: rand::rng(),
        frame_count: 0,
    })
}

fn update(app: &App, model: &mut Model, _update: Update) {
    let was_playing = model.scene.state() == PlaybackState::Playing;

    if model.player.is_finished() {
        model.scene.finish_playback();
    }
    let elapsed = model.player.elapsed();
    model
        .scene
        .step(&mut model.analyzer, elapsed, app.time, &mut model.rng);

    if was_playing && model.scene.state() == PlaybackState::Ended {
        info!(
            "Rendering silence from now on; {} particle(s) left to despawn",
            model.scene.particles().len()
        );
    }

    model.frame_count += 1;
    model.clock.tick();
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    renderer::draw_scene(&draw, &model.scene, &model.center_image);

    if let Err(e) = draw.to_frame(app, &frame) {
        warn!("Failed to render frame: {:?}", e);
    }
}

fn exit(app: &App, model: Model) {
    model.player.stop();
    info!(
        "Exiting after {} frames ({:.1}s); playback on {} {}",
        model.frame_count,
        app.time,
        model.player.device_name(),
        if model.player.is_finished() {
            "finished"
        } else {
            "stopped early"
        }
    );
}
