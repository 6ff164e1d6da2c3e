use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tehai::plan::artifact::PayloadEntry;
use tehai::prelude::*;

/// Analyze node-graph workflows: report required model files, build a
/// deduplicated fetch plan, and render backend submission payloads.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Workflow JSON files to analyze
    #[arg(required = true)]
    workflows: Vec<PathBuf>,

    /// Write each translated submission payload to this directory
    #[arg(short = 'p', long)]
    payload_dir: Option<PathBuf>,

    /// Save the whole analysis (plan + payloads) to this artifact file
    #[arg(short = 'a', long)]
    artifact: Option<PathBuf>,

    /// Print one download command line per plan entry
    #[arg(short = 'c', long)]
    commands: bool,
}

fn main() {
    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. File loading ---
    let load_start = Instant::now();
    let mut sources = Vec::with_capacity(cli.workflows.len());
    for path in &cli.workflows {
        let text = fs::read_to_string(path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to read workflow file '{}': {}",
                path.display(),
                e
            ))
        });
        sources.push(text);
    }
    let load_duration = load_start.elapsed();

    // --- 2. Analysis ---
    println!("Analyzing {} workflow(s)...", sources.len());
    let analyze_start = Instant::now();
    let analyzer = Analyzer::builder().build();
    let report = analyzer.analyze(sources.iter().map(|s| s.as_str()));
    let analyze_duration = analyze_start.elapsed();

    // --- 3. Per-graph results ---
    let mut payloads = Vec::new();
    for (path, graph_report) in cli.workflows.iter().zip(&report.graphs) {
        match graph_report {
            GraphReport::Rejected { error } => {
                eprintln!("Rejected '{}': {}", path.display(), error);
            }
            GraphReport::Analyzed {
                graph,
                references,
                translation,
            } => {
                println!(
                    "\n{}: {} nodes, {} links, {} model reference(s)",
                    path.display(),
                    graph.nodes.len(),
                    graph.links.len(),
                    references.len()
                );
                match translation {
                    Ok(call_plan) => {
                        for warning in &call_plan.warnings {
                            eprintln!("  Warning: {}", warning);
                        }
                        let payload = call_plan.to_submission();
                        let json = serde_json::to_string_pretty(&payload)
                            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
                        payloads.push(PayloadEntry {
                            label: path.display().to_string(),
                            json,
                        });
                    }
                    Err(e) => eprintln!("  Translation failed: {}", e),
                }
            }
        }
    }

    // --- 4. Fetch plan report ---
    print_plan(&report.plan, cli.commands);

    // --- 5. Outputs ---
    if let Some(dir) = &cli.payload_dir {
        fs::create_dir_all(dir).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to create payload directory '{}': {}",
                dir.display(),
                e
            ))
        });
        for (index, entry) in payloads.iter().enumerate() {
            let out = dir.join(format!("payload_{:03}.json", index));
            fs::write(&out, &entry.json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", out.display(), e))
            });
            println!("Wrote {} (from {})", out.display(), entry.label);
        }
    }

    if let Some(path) = &cli.artifact {
        let artifact = AnalysisArtifact::new(report.plan.clone(), payloads);
        artifact
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save artifact: {}", e)));
        println!("Saved analysis artifact to {}", path.display());
    }

    // --- 6. Summary ---
    let total_duration = total_start.elapsed();
    println!("\n--- Performance Summary ---");
    println!("File Loading:   {:?}", load_duration);
    println!("Analysis:       {:?}", analyze_duration);
    println!("---------------------------");
    println!("Total:          {:?}", total_duration);
}

fn print_plan(plan: &FetchPlan, commands: bool) {
    if plan.is_empty() {
        println!("\nNo model files required.");
        return;
    }

    println!("\n--- Fetch Plan ({} file(s)) ---", plan.file_count());
    for batch in &plan.batches {
        println!("{} ({} file(s)):", batch.repo, batch.requests.len());
        for request in &batch.requests {
            println!(
                "  - {} [{}] -> models/{}",
                request.filename,
                request.kind,
                request.category.directory()
            );
        }
    }

    if !plan.manual.is_empty() {
        println!("\nNeeds manual resolution ({} file(s)):", plan.manual.len());
        for manual in &plan.manual {
            let hint = manual
                .hint
                .as_deref()
                .map(|h| format!(" (matched token '{}')", h))
                .unwrap_or_default();
            println!(
                "  - {} -> search '{}'{}",
                manual.filename, manual.search_term, hint
            );
        }
    }

    if commands {
        println!("\nDownload commands:");
        for batch in &plan.batches {
            for request in &batch.requests {
                println!(
                    "  huggingface-cli download \"{}\" \"{}\" --local-dir \"models/{}\" --resume",
                    batch.repo,
                    request.filename,
                    request.category.directory()
                );
            }
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
