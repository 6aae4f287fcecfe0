use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use lab_cli::logging::redact_value;
use lab_cli::render::{
    render_extraction, render_knowledge, render_report, render_text_analysis, to_json,
};
use lab_core::Analyzer;
use lab_knowledge::{KNOWLEDGE_ENV_VAR, KnowledgeBase, knowledge_root};
use lab_model::{ExtractionOutcome, values_from_json};
use tracing::{info, info_span, trace, warn};

use crate::cli::{AnalyzeArgs, ExtractArgs, KnowledgeArgs, OutputFormatArg};

pub fn run_extract(args: &ExtractArgs, knowledge_dir: Option<&Path>) -> Result<()> {
    let analyzer = build_analyzer(knowledge_dir)?;
    let text = read_input(args.input.as_deref())?;
    let outcome = analyzer.extract(&text);
    trace_values(&outcome);

    match args.format {
        OutputFormatArg::Json => println!("{}", to_json(&outcome)?),
        OutputFormatArg::Table => print!("{}", render_extraction(&outcome)),
    }
    Ok(())
}

pub fn run_analyze(args: &AnalyzeArgs, knowledge_dir: Option<&Path>) -> Result<()> {
    let analyzer = build_analyzer(knowledge_dir)?;

    if let Some(path) = &args.values {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read values file {}", path.display()))?;
        let values = values_from_json(&json)
            .with_context(|| format!("parse values file {}", path.display()))?;
        let report = analyzer.analyze(&values).context("analyze values")?;
        match args.format {
            OutputFormatArg::Json => println!("{}", to_json(&report)?),
            OutputFormatArg::Table => print!("{}", render_report(&report)),
        }
        return Ok(());
    }

    let text = read_input(args.input.as_deref())?;
    let analysis = analyzer.analyze_text(&text).context("analyze report text")?;
    trace_values(&analysis.extraction);
    match args.format {
        OutputFormatArg::Json => println!("{}", to_json(&analysis)?),
        OutputFormatArg::Table => print!("{}", render_text_analysis(&analysis)),
    }
    Ok(())
}

pub fn run_knowledge(args: &KnowledgeArgs, knowledge_dir: Option<&Path>) -> Result<()> {
    let knowledge = load_knowledge(knowledge_dir)?;
    let summary = knowledge.summary();
    match args.format {
        OutputFormatArg::Json => println!("{}", to_json(&summary)?),
        OutputFormatArg::Table => print!("{}", render_knowledge(&summary)),
    }
    Ok(())
}

fn build_analyzer(knowledge_dir: Option<&Path>) -> Result<Analyzer> {
    let knowledge = load_knowledge(knowledge_dir)?;
    let analyzer = Analyzer::new(Arc::new(knowledge));
    info!(
        fingerprint = analyzer.knowledge().fingerprint().unwrap_or("-"),
        "knowledge ready"
    );
    Ok(analyzer)
}

/// Flag, then `LAB_KNOWLEDGE_DIR`, then the workspace `knowledge/` directory.
/// Falls back to the compiled-in tables when no directory was asked for and
/// the default one is absent.
fn load_knowledge(knowledge_dir: Option<&Path>) -> Result<KnowledgeBase> {
    let _span = info_span!("knowledge").entered();
    let explicit = knowledge_dir.is_some() || std::env::var_os(KNOWLEDGE_ENV_VAR).is_some();
    let dir: PathBuf = knowledge_dir.map_or_else(knowledge_root, Path::to_path_buf);

    if !explicit && !dir.join("manifest.toml").is_file() {
        warn!(dir = %dir.display(), "knowledge directory not found, using builtin tables");
        return KnowledgeBase::builtin().context("load builtin knowledge");
    }

    KnowledgeBase::load(&dir)
        .with_context(|| format!("load knowledge directory {}", dir.display()))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("read input {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("read input from stdin")?;
            Ok(text)
        }
    }
}

fn trace_values(outcome: &ExtractionOutcome) {
    for (name, value) in &outcome.values {
        let shown = value.to_string();
        trace!(parameter = %name, value = %redact_value(&shown), "extracted");
    }
}
