use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use explorer::{
    config::Settings,
    engine::EngineState,
    help,
    input::InputTranslator,
    interaction::InputEvent,
    logging,
    render::{FrameInput, Renderer},
    screenshot,
};
use tracing_appender::non_blocking::WorkerGuard;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::Event,
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowBuilder},
};

#[derive(Parser)]
#[command(name = "explorer")]
#[command(about = "Real-time explorer for Mandelbrot-style 2D maps")]
struct Cli {
    /// Path to a YAML settings file
    #[arg(short, long, default_value = "explorer.yaml")]
    config: PathBuf,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Start in borderless fullscreen
    #[arg(long)]
    fullscreen: bool,

    /// Starting system, numbered like the 1-9 keys
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=9))]
    fractal: Option<u8>,

    /// Iteration cap for escape-time coloring and the orbit overlay
    #[arg(long)]
    iterations: Option<u32>,

    #[arg(long, default_value = "logs")]
    log_dir: String,

    #[arg(long)]
    screenshot_dir: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(width) = self.width {
            settings.window.width = width;
        }
        if let Some(height) = self.height {
            settings.window.height = height;
        }
        if self.fullscreen {
            settings.window.fullscreen = true;
        }
        if let Some(fractal) = self.fractal {
            settings.starting_system = usize::from(fractal - 1);
        }
        if let Some(iterations) = self.iterations {
            settings.render.max_iterations = iterations;
        }
        if let Some(dir) = &self.screenshot_dir {
            settings.screenshot_dir = dir.clone();
        }
    }
}

/// What the event loop owns besides the window and renderer. The log guard
/// lives here so the file writer flushes when the loop drops it.
struct Session {
    state: EngineState,
    translator: InputTranslator,
    _log_guard: WorkerGuard,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_guard = logging::init_logging(&cli.log_dir)?;
    tracing::info!("Explorer starting up");

    let mut settings = if cli.config.exists() {
        tracing::info!("Loading settings from {:?}", cli.config);
        Settings::load(&cli.config)?
    } else {
        tracing::warn!("Settings file not found: {:?}, using defaults", cli.config);
        Settings::default()
    };
    cli.apply(&mut settings);
    settings.validate()?;

    let event_loop = EventLoop::new();

    let windowed_size = PhysicalSize::new(settings.window.width, settings.window.height);
    let window = WindowBuilder::new()
        .with_title(settings.window.title.clone())
        .with_inner_size(windowed_size)
        .with_resizable(true)
        .build(&event_loop)?;
    let mut fullscreen = settings.window.fullscreen;
    if fullscreen {
        set_window_mode(&window, true, windowed_size);
    }

    let mut renderer = pollster::block_on(Renderer::new(
        &window,
        settings.render.max_iterations as usize,
    ))?;
    let mut session = Session {
        state: EngineState::new(&settings),
        translator: InputTranslator::default(),
        _log_guard: log_guard,
    };
    let (width, height) = renderer.size();
    session.state.resize(width, height);

    let help_text = help::help_text();
    let screenshot_dir = settings.screenshot_dir.clone();
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(settings.window.target_fps));
    let mut next_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                let Some(input) = session.translator.translate(event) else {
                    return;
                };
                if let InputEvent::Resized { width, height } = input {
                    renderer.resize(width, height);
                }
                let help_was_visible = session.state.help_visible();
                session.state.handle(input);
                if session.state.help_visible() && !help_was_visible {
                    println!("{help_text}");
                }
                if session.state.exit_requested() {
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::RedrawRequested(window_id) if window_id == window.id() => {
                session.state.begin_frame();

                let orbit = session.state.orbit_overlay();
                let frame = FrameInput {
                    params: session.state.frame_params(),
                    blend: session.state.blend_mode(),
                    orbit: &orbit,
                    help_visible: session.state.help_visible(),
                };
                match renderer.render(&frame) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        tracing::warn!("Surface lost, reconfiguring");
                        renderer.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        tracing::error!("Out of GPU memory, exiting");
                        *control_flow = ControlFlow::Exit;
                    }
                    Err(e) => tracing::warn!("Skipping frame: {}", e),
                }

                let requests = session.state.take_requests();
                if requests.screenshot {
                    let path = screenshot::path_in(&screenshot_dir);
                    if let Err(e) = renderer.capture().and_then(|capture| capture.save(&path)) {
                        tracing::error!("Screenshot failed: {}", e);
                    }
                }
                if requests.fullscreen {
                    fullscreen = !fullscreen;
                    set_window_mode(&window, fullscreen, windowed_size);
                }

                session.state.end_frame();
            }
            Event::MainEventsCleared => {
                if session.state.exit_requested() {
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                let now = Instant::now();
                if now >= next_frame {
                    window.request_redraw();
                    next_frame += frame_time;
                    if next_frame < now {
                        next_frame = now + frame_time;
                    }
                }
                *control_flow = ControlFlow::WaitUntil(next_frame);
            }
            _ => {}
        }
    });
}

/// Borderless fullscreen on the current monitor, or the initial window size
/// centred on it.
fn set_window_mode(window: &Window, fullscreen: bool, windowed_size: PhysicalSize<u32>) {
    if fullscreen {
        window.set_fullscreen(Some(Fullscreen::Borderless(window.current_monitor())));
    } else {
        window.set_fullscreen(None);
        window.set_inner_size(windowed_size);
        if let Some(monitor) = window.current_monitor() {
            let origin = monitor.position();
            let screen = monitor.size();
            let x = origin.x + (screen.width as i32 - windowed_size.width as i32) / 2;
            let y = origin.y + (screen.height as i32 - windowed_size.height as i32) / 2;
            window.set_outer_position(PhysicalPosition::new(x, y));
        }
    }
    window.focus_window();
    tracing::info!(fullscreen, "Switched window mode");
}
