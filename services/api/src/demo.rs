use crate::infra::{build_review_service, load_candidate_store_from_path, SAMPLE_DATASET};
use chrono::{Duration, Utc};
use clap::Args;
use quickhire::config::AppConfig;
use quickhire::error::AppError;
use quickhire::workflows::review::{CandidateStore, GeminiExtractor, ReviewService, SalaryBand};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Candidate dataset (JSON array). Defaults to the embedded sample.
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Free-text prompt for the AI filter extraction step (requires
    /// GEMINI_API_KEY; skipped otherwise).
    #[arg(long)]
    pub(crate) prompt: Option<String>,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let store = match &args.dataset {
        Some(path) => load_candidate_store_from_path(path)?,
        None => CandidateStore::from_json_slice(SAMPLE_DATASET.as_bytes())?,
    };

    println!("Candidate review demo");
    println!("- {} candidates loaded", store.len());

    let service = build_review_service(store, &config.ai);

    let facets = service.facets();
    println!(
        "- {} distinct locations | {} distinct skills",
        facets.locations.len(),
        facets.skills.len()
    );
    println!("  Locations: {}", facets.locations.join(", "));

    println!("\nDebounced search for \"react\"");
    let typed_at = Utc::now();
    service.type_search("react", typed_at);
    let pending = service.browse(typed_at + Duration::milliseconds(100));
    println!(
        "- 100ms after the last keystroke: input still pending, {} candidates shown",
        pending.total_matches
    );
    let committed = service.browse(typed_at + Duration::milliseconds(250));
    println!(
        "- after the quiet period: search committed, {} match(es)",
        committed.total_matches
    );

    println!("\nNarrowing to the $100k - $150k band");
    let mut spec = service.filters();
    spec.salary_expectation = Some(SalaryBand::From100kTo150k);
    service.set_filters(spec);
    let view = service.browse(Utc::now());
    println!(
        "- page {}/{} | {} of {} candidates match",
        view.page,
        view.total_pages.max(1),
        view.total_matches,
        view.total_candidates
    );
    for candidate in &view.candidates {
        println!(
            "  - {} ({}) | {} | {} | ${}",
            candidate.name,
            candidate.location,
            candidate.experience_tier,
            candidate.status,
            candidate.salary_expectation
        );
    }

    println!("\nMoving candidates through the pipeline");
    let ids: Vec<_> = service
        .store()
        .candidates()
        .iter()
        .map(|candidate| candidate.id.clone())
        .collect();
    let last = &ids[ids.len() - 1];

    for (id, outcome) in [
        (&ids[0], service.add_to_final_selection(&ids[0])),
        (&ids[1], service.add_to_shortlist(&ids[1])),
        (last, service.add_to_rejected(last)),
    ] {
        match outcome {
            Ok(view) => println!("- {} -> {}", id, view.status),
            Err(err) => println!("- {} transition failed: {}", id, err),
        }
    }
    if let Err(err) = service.set_selection_reason(&ids[0], "strongest portfolio in the pool") {
        println!("- reason not recorded: {err}");
    }

    let counts = service.counts();
    println!(
        "- totals: {} shortlisted | {} selected | {} rejected",
        counts.shortlisted, counts.selected, counts.rejected
    );

    println!("\nFinal selection");
    for entry in service.selection_view() {
        match &entry.reason {
            Some(reason) => println!("- {}: {}", entry.candidate.name, reason),
            None => println!("- {}: (no reason recorded)", entry.candidate.name),
        }
    }

    match service.diversity() {
        Some(report) => {
            println!("\nTeam diversity");
            println!("Geographic distribution:");
            for entry in &report.locations {
                println!("  - {}: {}", entry.value, entry.count);
            }
            println!("Experience levels:");
            for entry in &report.experience_levels {
                println!("  - {}: {}", entry.value, entry.count);
            }
            println!("Education levels:");
            for entry in &report.education_levels {
                println!("  - {}: {}", entry.value, entry.count);
            }
            println!("Top skills:");
            for entry in &report.top_skills {
                println!("  - {}: {}", entry.value, entry.count);
            }
        }
        None => println!("\nTeam diversity: no team selected yet"),
    }

    println!("\nRestoring the rejected candidate");
    match service.remove_from_rejected(last) {
        Ok(restored) => println!(
            "- {} -> {} (rejection is a hard reset; no prior membership restored)",
            last, restored.status
        ),
        Err(err) => println!("- {} transition failed: {}", last, err),
    }

    run_extraction_step(&service, args.prompt.as_deref()).await;

    Ok(())
}

async fn run_extraction_step(service: &ReviewService<GeminiExtractor>, prompt: Option<&str>) {
    let Some(prompt) = prompt else {
        println!("\nAI filter extraction: skipped (pass --prompt to try it)");
        return;
    };

    println!("\nAI filter extraction for prompt: {prompt:?}");
    match service.extract_filters(prompt).await {
        Ok(spec) => {
            println!("- merged filter spec:");
            match serde_json::to_string_pretty(&spec) {
                Ok(json) => println!("{json}"),
                Err(err) => println!("  (spec not serializable: {err})"),
            }
        }
        Err(err) => println!("- extraction unavailable: {err}"),
    }
}

