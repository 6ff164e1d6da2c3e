//! Tests for fetch plan construction: dedup, grouping, ordering, and
//! idempotence.
mod common;
use common::*;
use tehai::prelude::*;

fn resolver() -> Resolver {
    Resolver::new(Catalog::with_defaults())
}

#[test]
fn test_dedup_is_by_filename_alone() {
    let resolver = resolver();
    let mut builder = FetchPlanBuilder::new(&resolver);
    // Same physical file, referenced by two nodes under two roles.
    builder.add_reference(&reference(
        1,
        "CheckpointLoaderSimple",
        "sd_xl_base_1.0.safetensors",
        AssetRole::Checkpoint,
    ));
    builder.add_reference(&reference(
        9,
        "LoraLoader",
        "sd_xl_base_1.0.safetensors",
        AssetRole::Lora,
    ));
    let plan = builder.build();

    assert_eq!(plan.file_count(), 1);
    let request = &plan.batches[0].requests[0];
    // The smaller role wins deterministically.
    assert_eq!(request.category, AssetRole::Checkpoint);
}

#[test]
fn test_same_repo_requests_are_batched() {
    let resolver = resolver();
    let mut builder = FetchPlanBuilder::new(&resolver);
    // Both catalog entries point at xinntao/realesrgan.
    builder.add_reference(&reference(
        1,
        "UpscaleModelLoader",
        "RealESRGAN_x4plus.pth",
        AssetRole::Upscale,
    ));
    builder.add_reference(&reference(
        2,
        "UpscaleModelLoader",
        "RealESRGAN_x4plus_anime_6B.pth",
        AssetRole::Upscale,
    ));
    let plan = builder.build();

    assert_eq!(plan.batches.len(), 1);
    let batch = &plan.batches[0];
    assert_eq!(batch.repo, "xinntao/realesrgan");
    assert_eq!(batch.requests.len(), 2);
}

#[test]
fn test_unresolved_assets_do_not_block_planning() {
    let resolver = resolver();
    let mut builder = FetchPlanBuilder::new(&resolver);
    builder.add_reference(&reference(
        1,
        "CheckpointLoaderSimple",
        "sd_xl_base_1.0.safetensors",
        AssetRole::Checkpoint,
    ));
    builder.add_reference(&reference(
        2,
        "LoraLoader",
        "mystery_lora_final.safetensors",
        AssetRole::Lora,
    ));
    let plan = builder.build();

    assert_eq!(plan.batches.len(), 1);
    assert_eq!(plan.manual.len(), 1);
    assert_eq!(plan.manual[0].filename, "mystery_lora_final.safetensors");
    assert_eq!(
        plan.manual[0].search_term,
        "mystery_lora_final.safetensors"
    );
    assert_eq!(plan.manual[0].category, AssetRole::Lora);
}

#[test]
fn test_plan_is_order_independent() {
    let references = vec![
        reference(1, "CheckpointLoaderSimple", "sd_xl_base_1.0.safetensors", AssetRole::Checkpoint),
        reference(2, "VAELoader", "sdxl_vae.safetensors", AssetRole::Vae),
        reference(3, "UpscaleModelLoader", "RealESRGAN_x4plus.pth", AssetRole::Upscale),
        reference(4, "LoraLoader", "wan-thiccum-v3.safetensors", AssetRole::Lora),
        reference(5, "LoraLoader", "mystery_lora_final.safetensors", AssetRole::Lora),
    ];

    let resolver = resolver();
    let mut forward = FetchPlanBuilder::new(&resolver);
    forward.add_references(&references);

    let mut backward = FetchPlanBuilder::new(&resolver);
    let mut reversed = references.clone();
    reversed.reverse();
    backward.add_references(&reversed);

    let plan_a = forward.build();
    let plan_b = backward.build();
    assert_eq!(plan_a, plan_b);

    // Byte-identical, not just structurally equal.
    assert_eq!(
        serde_json::to_string(&plan_a).unwrap(),
        serde_json::to_string(&plan_b).unwrap()
    );
}

#[test]
fn test_plan_is_idempotent_under_duplicated_input() {
    let references = vec![
        reference(1, "CheckpointLoaderSimple", "sd_xl_base_1.0.safetensors", AssetRole::Checkpoint),
        reference(2, "LoraLoader", "mystery_lora_final.safetensors", AssetRole::Lora),
    ];

    let resolver = resolver();
    let mut once = FetchPlanBuilder::new(&resolver);
    once.add_references(&references);

    let mut twice = FetchPlanBuilder::new(&resolver);
    twice.add_references(&references);
    twice.add_references(&references);

    assert_eq!(once.build(), twice.build());
}

#[test]
fn test_batches_are_sorted_by_repository() {
    let mut catalog = Catalog::empty();
    catalog.register("zeta.safetensors", "zeta/models");
    catalog.register("alpha.safetensors", "alpha/models");
    let resolver = Resolver::new(catalog);

    let mut builder = FetchPlanBuilder::new(&resolver);
    builder.add_reference(&reference(1, "CheckpointLoaderSimple", "zeta.safetensors", AssetRole::Checkpoint));
    builder.add_reference(&reference(2, "CheckpointLoaderSimple", "alpha.safetensors", AssetRole::Checkpoint));
    let plan = builder.build();

    let repos: Vec<&str> = plan.batches.iter().map(|b| b.repo.as_str()).collect();
    assert_eq!(repos, vec!["alpha/models", "zeta/models"]);
}

#[test]
fn test_add_graph_extracts_and_merges() {
    let resolver = resolver();
    let loaders = LoaderRegistry::with_defaults();
    let graph = create_loader_graph();

    let mut builder = FetchPlanBuilder::new(&resolver);
    builder.add_graph(&graph, &loaders);
    builder.add_graph(&graph, &loaders);
    let plan = builder.build();

    // Three distinct files: two catalog hits and one keyword-only LoRA.
    assert_eq!(plan.file_count(), 3);
    assert_eq!(plan.manual.len(), 1);
    assert_eq!(plan.manual[0].hint.as_deref(), Some("wan"));
}

#[test]
fn test_artifact_round_trip() {
    let resolver = resolver();
    let mut builder = FetchPlanBuilder::new(&resolver);
    builder.add_reference(&reference(
        1,
        "CheckpointLoaderSimple",
        "sd_xl_base_1.0.safetensors",
        AssetRole::Checkpoint,
    ));
    let plan = builder.build();

    let artifact = AnalysisArtifact::new(plan.clone(), vec![]);
    let path = std::env::temp_dir().join("tehai_artifact_test.bin");

    artifact.save(&path).unwrap();
    let loaded = AnalysisArtifact::from_file(&path).unwrap();
    assert_eq!(loaded, artifact);
    assert_eq!(loaded.plan, plan);

    let _ = std::fs::remove_file(&path);
}
