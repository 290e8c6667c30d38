use std::sync::Arc;

use autoclick::args::Args;
use autoclick::capture::ScreenCapturer;
use autoclick::catalog;
use autoclick::config::RunConfig;
use autoclick::detection::{ControlFlags, DetectionLoop, LoopEvent, create_loop_channels};
use autoclick::input::SystemInjector;

fn main() {
    let Some(args) = Args::parse() else {
        return;
    };

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("❌ Failed to start runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(run(args)) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = RunConfig::load_or_create(&args.config_path)?;
    if args.debug {
        config.debug_logging = true;
    }
    if args.start_enabled {
        config.enabled = true;
    }

    let templates = catalog::scan_directory(&args.templates_dir)?;
    log::info!(
        "🔍 Found {} template image(s) in {}",
        templates.len(),
        args.templates_dir.display()
    );

    let flags = Arc::new(ControlFlags::new(config.enabled));
    let (event_tx, mut event_rx) = create_loop_channels();

    // drain loop events into the log
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                LoopEvent::ClickPerformed {
                    template,
                    x,
                    y,
                    confidence_percent,
                    kind,
                } => log::info!(
                    "🖱️ {kind:?} click at ({x}, {y}) for '{template}' ({confidence_percent:.2}%)"
                ),
                LoopEvent::StateChanged(state) => log::debug!("State changed: {state:?}"),
                LoopEvent::PassCompleted {
                    templates,
                    displays,
                    clicks,
                } => log::debug!(
                    "Scan pass done: {templates} template(s) x {displays} display(s), {clicks} click(s)"
                ),
                LoopEvent::Error(message) => log::warn!("⚠️ {message}"),
            }
        }
    });

    // Ctrl-C requests shutdown; the loop notices within one poll interval
    {
        let flags = Arc::clone(&flags);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("🛑 Shutdown requested");
                flags.request_shutdown();
            }
        });
    }

    let injector = SystemInjector::new()?;
    let mut detection =
        DetectionLoop::new(config, flags, templates, ScreenCapturer::new(), injector, event_tx);

    if args.once {
        detection.run_once().await;
    } else {
        detection.run().await;
    }
    Ok(())
}
