use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

// Import from docstruct-core
use docstruct_core::{PageSource, PipelineStages, PlainTextSource, RuleSet, StructureEngine};

#[derive(Parser)]
#[command(name = "docstruct")]
#[command(about = "Recognize document structure in extracted text and emit normalized records")]
struct Args {
    /// Path to the extracted text file to process (pages separated by form feeds)
    input: Option<String>,

    /// Named rule preset: palliative_care, iso_standard or general.
    /// Unknown names fall back to general.
    #[arg(short, long, default_value = "general")]
    preset: String,

    /// Path to custom rule file (YAML format); takes precedence over --preset
    #[arg(short, long)]
    config: Option<String>,

    /// Output file path (if not specified, auto-generated based on input)
    #[arg(short, long)]
    output: Option<String>,

    /// Show available rule presets and exit
    #[arg(long)]
    show_configs: bool,

    /// Dump all intermediate pipeline stage outputs to a directory
    /// Captures: raw text, normalized text, merged text and final records
    #[arg(long)]
    dump_stages: bool,

    /// Directory for stage dump output
    #[arg(long, default_value = "stage_outputs")]
    stages_dir: String,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("🦀 Docstruct Structure Recognizer");

    if args.show_configs {
        show_configs();
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        println!("⚠️  No input file given. See --help, or --show-configs for presets.");
        return Ok(());
    };

    if !Path::new(input).exists() {
        println!("⚠️  Input file not found at: {input}");
        println!("   Please check the file path.");
        return Ok(());
    }

    // Load rules: explicit config file wins over the preset name.
    let rules = match &args.config {
        Some(config_path) => {
            let rules = RuleSet::load_with_fallback(Some(config_path));
            println!("📋 Loaded rules from: {config_path}");
            rules
        }
        None => {
            println!("📋 Using preset: {}", args.preset);
            RuleSet::preset(&args.preset)
        }
    };

    println!("📄 Processing: {input}");

    let source = PlainTextSource::new();
    let pages = source.extract_pages(Path::new(input))?;
    println!("   {} page(s) extracted via {}", pages.len(), source.name());

    let engine = StructureEngine::new_plain_text();

    // Print progress at coarse steps only; the engine may emit every line.
    let mut last_step = 0u8;
    let quiet = args.quiet;
    let mut progress = move |percent: u8| {
        let step = percent / 10;
        if !quiet && (step > last_step || percent == 100) {
            last_step = step;
            println!("   ⏳ {percent}%");
        }
    };

    let stages = engine.process_pages_capture_stages(&pages, &rules, &mut progress)?;

    if args.dump_stages {
        dump_stages(&stages, &args.stages_dir)?;
    }

    report_and_write(&stages, input, args.output.as_deref())
}

fn report_and_write(stages: &PipelineStages, input: &str, output: Option<&str>) -> Result<()> {
    // Zero records is a valid outcome, not an error — message it as such.
    if stages.records.is_empty() {
        println!("⚠️  No structural elements recognized in {input}");
        println!("   The rules may not match this document family (try another preset).");
        return Ok(());
    }

    println!("✅ Recognized {} structural element(s)", stages.records.len());

    let output_path = match output {
        Some(path) => path.to_string(),
        None => {
            let stem = Path::new(input)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document");
            format!("{stem}_records.json")
        }
    };

    let json = serde_json::to_string_pretty(&stages.records)?;
    std::fs::write(&output_path, json)
        .with_context(|| format!("writing records to {output_path}"))?;
    println!("💾 Saved records to {output_path}");

    Ok(())
}

fn dump_stages(stages: &PipelineStages, stages_dir: &str) -> Result<()> {
    std::fs::create_dir_all(stages_dir)
        .with_context(|| format!("creating stage dump directory {stages_dir}"))?;

    std::fs::write(format!("{stages_dir}/stage0_raw.txt"), &stages.raw_text)?;
    std::fs::write(
        format!("{stages_dir}/stage1_normalized.txt"),
        &stages.normalized_text,
    )?;
    std::fs::write(format!("{stages_dir}/stage2_merged.txt"), &stages.merged_text)?;
    std::fs::write(
        format!("{stages_dir}/stage3_records.json"),
        serde_json::to_string_pretty(&stages.records)?,
    )?;

    println!("💾 Dumped pipeline stages to {stages_dir}/");
    Ok(())
}

fn show_configs() {
    println!("Available rule presets:\n");
    for name in RuleSet::preset_names() {
        let rules = RuleSet::preset(name);
        println!("── {name} ──");
        match serde_yaml::to_string(&rules) {
            Ok(yaml) => println!("{yaml}"),
            Err(e) => println!("(failed to render: {e})"),
        }
        println!("Example input:\n{}", rules.example);
    }
    println!("Use --preset <name>, or --config <file.yaml> with the same fields.");
}
