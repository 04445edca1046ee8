use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use flowboard::draw::CairoSurface;
use flowboard::notification;
use flowboard::overlay::{CommandRenderer, DiagramRenderer, ResvgDecoder, SvgMarkupRenderer};
use flowboard::script::{Script, ScriptRunner};
use flowboard::surface::{SurfaceController, SurfaceOptions, SurfaceProps};
use flowboard::Config;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "flowboard")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FLOWBOARD_GIT_HASH"), ")"),
    about = "Drawing surface with a flowchart overlay, driven by replay scripts"
)]
struct Cli {
    /// TOML script of actions to replay
    #[arg(long, short = 's', value_name = "FILE", required_unless_present = "init_config")]
    script: Option<PathBuf>,

    /// PNG file the final surface is written to
    #[arg(long, short = 'o', value_name = "FILE", required_unless_present = "init_config")]
    output: Option<PathBuf>,

    /// File holding the source code rendered by the flowchart overlay
    #[arg(long, short = 'c', value_name = "FILE")]
    code: Option<PathBuf>,

    /// Base surface width (overrides surface.width)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=16384))]
    width: Option<u32>,

    /// Base surface height (overrides surface.height)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=16384))]
    height: Option<u32>,

    /// Source-to-SVG converter command line (overrides overlay.renderer_command)
    #[arg(long, value_name = "CMD")]
    renderer_cmd: Option<String>,

    /// Also report render failures as desktop notifications
    #[arg(long, action = ArgAction::SetTrue)]
    notify: bool,

    /// Config file to use instead of ~/.config/flowboard/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the example config to ~/.config/flowboard/config.toml and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Created {}", path.display());
        return Ok(());
    }

    let (Some(script_path), Some(output)) = (cli.script.as_deref(), cli.output.as_deref()) else {
        return Err(anyhow::anyhow!("--script and --output are required"));
    };

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let script = Script::load(script_path)?;
    let code = cli
        .code
        .as_deref()
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read source code from {}", path.display()))
        })
        .transpose()?;

    let props = SurfaceProps {
        width: cli.width.unwrap_or(config.surface.width),
        height: cli.height.unwrap_or(config.surface.height),
        code,
        class_name: None,
    };
    let renderer = build_renderer(cli.renderer_cmd.as_deref(), &config)?;
    let surface = CairoSurface::new(props.base_size()).context("Failed to allocate surface")?;
    let controller = SurfaceController::new(
        props,
        SurfaceOptions::from_config(&config),
        surface,
        renderer,
    )?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start tokio runtime")?;
    let mut runner = ScriptRunner::new(controller, Arc::new(ResvgDecoder), runtime.handle().clone());

    log::info!(
        "Replaying {} steps from {}",
        script.steps.len(),
        script_path.display()
    );

    let mut notifications = Vec::new();
    let report = runtime.block_on(runner.run(&script, |err| {
        eprintln!("{err}");
        if cli.notify {
            notifications.push(notification::notify_render_failure(
                runtime.handle(),
                &err.to_string(),
            ));
        }
    }));
    runtime.block_on(notification::wait_for_deliveries(notifications));

    let controller = runner.into_controller();
    controller
        .surface()
        .write_png(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let size = controller.size();
    println!(
        "Wrote {}x{} surface to {} ({} steps, {} diagram paints, {} stale, {} render failures)",
        size.width,
        size.height,
        output.display(),
        report.steps,
        report.painted,
        report.stale,
        report.render_failures
    );

    Ok(())
}

fn build_renderer(command_line: Option<&str>, config: &Config) -> Result<Box<dyn DiagramRenderer>> {
    let command = match command_line {
        Some(line) => {
            Some(CommandRenderer::from_command_line(line).context("--renderer-cmd is empty")?)
        }
        None => config
            .overlay
            .renderer_command
            .as_deref()
            .and_then(CommandRenderer::from_argv),
    };

    Ok(match command {
        Some(command) => {
            log::info!("Rendering flowcharts with {}", command.program());
            Box::new(command)
        }
        None => {
            log::info!("No renderer command configured, source code is read as SVG");
            Box::new(SvgMarkupRenderer)
        }
    })
}
