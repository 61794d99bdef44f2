use anyhow::Result;
use clap::Parser;

mod cli;
mod directives;
mod effects;
mod engine;
mod error;
mod external;
mod graph;
mod media;
mod pipeline;
mod probe;
mod progress;
mod render;
mod sfx;

use cli::Args;
use engine::FfmpegEngine;
use error::Error;
use media::MediaType;
use probe::FfprobeProber;
use sfx::DirLibrary;

fn main() {
    let args = Args::parse();
    progress::set_verbose(args.verbose);

    if let Err(e) = run(&args) {
        progress::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let media = MediaType::from_path(&args.input);
    if media == MediaType::Unknown {
        let ext = args
            .input
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_else(|| "(none)".to_string());
        return Err(Error::UnsupportedInput(ext).into());
    }

    let request = directives::parse(&args.directives);
    if request.is_empty() {
        progress::print_warn("no directives given; output will be a plain re-encode");
    }
    let resolved = pipeline::validate(&request, media)?;

    // Validation is complete; only now is it worth touching the filesystem.
    if !args.input.exists() {
        anyhow::bail!("input file not found: {}", args.input.display());
    }

    let prober = FfprobeProber;
    let graph = pipeline::compile(&resolved, media, &args.input, &prober)?;

    // Engine availability is checked only once a renderable graph exists.
    external::check_dependencies()?;

    if args.verbose {
        progress::print_info(&format!(
            "compiled {} directive(s): video=[{}] audio=[{}]",
            resolved.len(),
            graph.video,
            graph.audio
        ));
    }

    let engine = FfmpegEngine;
    let library = DirLibrary::new(args.sfx_library.clone());
    render::run(
        &graph,
        media,
        &args.input,
        &args.output,
        &engine,
        &prober,
        &library,
        args.keep_temp,
    )?;

    progress::print_success(&format!("created {}", args.output.display()));
    Ok(())
}
