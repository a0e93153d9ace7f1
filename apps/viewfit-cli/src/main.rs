use std::ops::ControlFlow;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use tracing_subscriber::EnvFilter;
use viewfit_assets::PendingLoad;
use viewfit_camera::{FitMultiplier, compute_framing};
use viewfit_common::BoundingVolume;
use viewfit_frame::{FrameContext, FrameLoop, ViewerConfig};
use viewfit_render::DebugTextRenderer;
use viewfit_viewport::{CanvasSurface, DisplaySurface, Viewport, sync_viewport};

#[derive(Parser)]
#[command(name = "viewfit", about = "Viewport sync and camera framing tools")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Check one surface measurement and resize its backing buffer
    Sync {
        /// CSS width of the surface
        #[arg(long)]
        width: f32,
        /// CSS height of the surface
        #[arg(long)]
        height: f32,
        /// Device pixel ratio
        #[arg(long, default_value = "1.0")]
        dpr: f32,
        /// Current backing buffer width
        #[arg(long, default_value = "300")]
        backing_width: u32,
        /// Current backing buffer height
        #[arg(long, default_value = "150")]
        backing_height: u32,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compute the camera placement that frames a bounding volume
    Frame {
        /// Diagonal length of the volume
        #[arg(long)]
        size: f32,
        /// Volume center as x,y,z
        #[arg(long, default_value = "0,0,0", value_parser = parse_vec3)]
        center: Vec3,
        /// Current camera position as x,y,z
        #[arg(long, default_value = "0,10,20", value_parser = parse_vec3)]
        camera: Vec3,
        /// Vertical field of view in degrees
        #[arg(long, default_value = "90")]
        fov: f32,
        /// Margin multiplier, at least 1
        #[arg(long, default_value = "1.2")]
        fit: f32,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load a glTF model and frame the configured camera around it
    FitModel {
        /// Path to a .gltf or .glb file
        path: PathBuf,
        /// Viewer config (YAML) supplying the camera
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a headless frame loop
    Simulate {
        /// Viewer config (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the number of frames
        #[arg(short, long)]
        frames: Option<u64>,
        /// Change the CSS size at this frame
        #[arg(long, requires = "resize_to")]
        resize_at: Option<u64>,
        /// New CSS size as WIDTHxHEIGHT
        #[arg(long, value_parser = parse_size)]
        resize_to: Option<(f32, f32)>,
    },
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z, got {s:?}")),
    }
}

fn parse_size(s: &str) -> Result<(f32, f32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w = w.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let h = h.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok((w, h))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ViewerConfig> {
    match path {
        Some(p) => ViewerConfig::load(p).with_context(|| format!("reading {}", p.display())),
        None => Ok(ViewerConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("viewfit v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", viewfit_common::crate_info());
            println!("viewport: {}", viewfit_viewport::crate_info());
            println!("camera: {}", viewfit_camera::crate_info());
            println!("assets: {}", viewfit_assets::crate_info());
            println!("render: {}", viewfit_render::crate_info());
            println!("frame: {}", viewfit_frame::crate_info());
        }
        Commands::Sync {
            width,
            height,
            dpr,
            backing_width,
            backing_height,
            json,
        } => {
            let mut surface =
                CanvasSurface::new(width, height, dpr).with_backing(backing_width, backing_height);
            let resized = sync_viewport(&mut surface);
            let viewport = Viewport::measure(&surface);
            let aspect = if resized { viewport.aspect_ratio() } else { None };

            if json {
                let out = serde_json::json!({
                    "resized": resized,
                    "viewport": viewport,
                    "aspect": aspect,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let (w, h) = surface.backing_size();
                println!("resized: {resized}");
                println!("backing: {w}x{h}");
                match aspect {
                    Some(a) => println!("camera aspect: {a:.4}"),
                    None => println!("camera aspect: unchanged"),
                }
            }
        }
        Commands::Frame {
            size,
            center,
            camera,
            fov,
            fit,
            json,
        } => {
            let fit = FitMultiplier::new(fit)?;
            let volume = BoundingVolume::new(center, size);
            let result = compute_framing(&volume, fit, camera, fov)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let p = result.position;
                println!("size to fit: {:.4}", result.size_to_fit);
                println!("distance: {:.4}", result.distance);
                println!("position: ({:.4}, {:.4}, {:.4})", p.x, p.y, p.z);
                println!("near: {} far: {}", result.near, result.far);
                if result.used_fallback {
                    println!("note: camera was at the center, framed along +Z");
                }
            }
        }
        Commands::FitModel { path, config, json } => {
            let config = load_config(config.as_ref())?;
            let mut camera = config.camera.build()?;

            let bounds = PendingLoad::spawn(&path)
                .wait()
                .context("model load already consumed")?
                .with_context(|| format!("loading {}", path.display()))?;
            let result =
                viewfit_camera::frame_bounds(&mut camera, &bounds.volume(), config.fit_multiplier)?;

            if json {
                let out = serde_json::json!({ "bounds": bounds, "framing": result });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let (min, max) = (bounds.aabb.min, bounds.aabb.max);
                println!("meshes: {}", bounds.mesh_instances);
                println!(
                    "bounds: ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
                    min.x, min.y, min.z, max.x, max.y, max.z
                );
                let p = camera.position;
                println!("camera: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
                println!("clip: [{}, {}]", camera.near(), camera.far());
            }
        }
        Commands::Simulate {
            config,
            frames,
            resize_at,
            resize_to,
        } => {
            let config = load_config(config.as_ref())?;
            let frames = frames.unwrap_or(config.frames);

            let mut ctx = FrameContext::new(
                config.canvas.build(),
                config.camera.build()?,
                DebugTextRenderer::new(),
            );
            if let Some(model) = &config.model {
                ctx.load_model(PendingLoad::spawn(model), config.fit_multiplier);
            }

            let mut driver = FrameLoop::new(config.frame_interval_ms);
            let stats = driver.run(
                &mut ctx,
                frames,
                |frame, ctx| {
                    if let (Some(at), Some((w, h))) = (resize_at, resize_to) {
                        if frame == at {
                            tracing::info!(frame, width = w, height = h, "changing surface size");
                            ctx.surface.set_client_size(w, h);
                        }
                    }
                },
                |_, outcome| {
                    let mut line = outcome.output;
                    if outcome.resized {
                        line.push_str(" [resized]");
                    }
                    if outcome.framed.is_some() {
                        line.push_str(" [framed]");
                    }
                    println!("{line}");
                    ControlFlow::Continue(())
                },
            );

            println!(
                "frames={} resizes={} framings={} failed_loads={}",
                stats.frames, stats.resizes, stats.framings, stats.failed_loads
            );
            if ctx.has_pending_load() {
                println!("model load still pending; camera was not reframed");
            }
        }
    }

    Ok(())
}
