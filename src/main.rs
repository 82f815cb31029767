use fblife::{
    Display, Session, SessionConfig,
    application::teardown,
    rendering::ImageSurface,
};
use macroquad::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn window_conf() -> Conf {
    Conf {
        window_title: "fblife".to_owned(),
        window_width: 800,
        window_height: 600,
        window_resizable: false,
        ..Default::default()
    }
}

/// Defaults, overridden by any `FBLIFE_*` environment variables
/// (see [`SessionConfig::apply_env`]).
fn session_config() -> fblife::Result<SessionConfig> {
    SessionConfig::default().apply_env(|name| std::env::var(name).ok())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging();

    teardown::install(|| {
        show_mouse(true);
        info!("display restored");
    });
    teardown::run_on_panic();
    #[cfg(unix)]
    if let Err(err) = teardown::install_signal_handlers() {
        warn!("termination signals won't restore the display: {err}");
    }
    let _teardown = teardown::TeardownGuard::new();
    prevent_quit();

    let (width, height) = (screen_width() as usize, screen_height() as usize);
    let display = Display::new(ImageSurface::new(width, height));
    let session = session_config().and_then(|config| Session::new(&config, width, height));
    let (mut display, mut session) = match (display, session) {
        (Ok(display), Ok(session)) => (display, session),
        (Err(err), _) | (_, Err(err)) => {
            error!("{err}");
            return;
        }
    };
    if let Err(err) = session.start(&mut display) {
        error!("{err}");
        return;
    }

    show_mouse(false);
    let texture = Texture2D::from_image(display.surface().image());
    texture.set_filter(FilterMode::Nearest);

    loop {
        if teardown::signalled()
            || is_quit_requested()
            || is_key_pressed(KeyCode::Escape)
            || is_key_pressed(KeyCode::Q)
        {
            break;
        }

        match session.tick(get_frame_time(), &mut display) {
            Ok(true) => texture.update(display.surface().image()),
            Ok(false) => {}
            Err(err) => {
                error!("{err}");
                break;
            }
        }

        clear_background(BLACK);
        draw_texture(&texture, 0.0, 0.0, WHITE);
        next_frame().await;
    }

    info!(generations = session.generation, reseeds = session.reseeds, "session finished");
    teardown::run();
}
