//! Maquette's main application entry point and orchestration logic.
//! Handles command-line argument parsing, configuration resolution and the
//! template materialization flow.

use maquette::{
    cli::{get_args, Args},
    config::load_manifest,
    error::{default_error_handler, Result},
    flags,
    formatter::{CommandFormatter, Formatter, NoopFormatter},
    processor::{ensure_output_dir, Processor},
    prompt::{answers_from_stdin, collect_answers},
    prune::build_prune_set,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Validates the output directory
/// 2. Loads the template manifest
/// 3. Collects operator answers (stdin or interactive prompts)
/// 4. Resolves the flag configuration, including implication rules
/// 5. Compiles flag-conditional prune rules
/// 6. Materializes the template tree
/// 7. Invokes the formatter on the emitted files
fn run(args: Args) -> Result<()> {
    let output_root = ensure_output_dir(&args.output_dir, args.force)?;
    let (manifest, manifest_path) = load_manifest(&args.template)?;

    let preloaded = if args.stdin { Some(answers_from_stdin()?) } else { None };
    let answers = collect_answers(&manifest, preloaded)?;

    // All configuration checks complete before any file is touched.
    let config = flags::resolve(&manifest, &answers.choices)?;
    let prune = build_prune_set(&manifest.prune, &config)?;

    let processor = Processor::new(
        &args.template,
        &output_root,
        &config,
        &answers.variables,
        prune,
        Some(manifest_path.as_path()),
    );

    let emitted = processor.materialize()?;

    if args.skip_format || manifest.format.is_empty() {
        NoopFormatter.format(&emitted)?;
    } else {
        CommandFormatter::new(manifest.format.clone()).format(&emitted)?;
    }

    println!(
        "Generated {} files in {}.",
        emitted.len(),
        output_root.display()
    );
    Ok(())
}
