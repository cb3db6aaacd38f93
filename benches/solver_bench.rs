//! Benchmarks for the frame-analysis solver pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use frame_analysis::prelude::*;

fn create_cantilever_model() -> FrameModel {
    let mut model = FrameModel::new();

    model.add_material(Material::steel("steel")).unwrap();
    model
        .add_cross_section(CrossSection::rectangular("section", 0.3, 0.5).unwrap())
        .unwrap();

    let mut beam = Beam::new(
        vec![BeamNode::new("root", 0.0, 0.0, 0.0), BeamNode::new("tip", 10.0, 0.0, 0.0)],
        20,
    );
    beam.set_orientation("root", "tip", Vec3::new(0.0, 0.0, 1.0));
    beam.set_material("root", "tip", "steel");
    beam.set_cross_section("root", "tip", "section");
    beam.add_point_load(PointLoad::new("tip", [0.0, -10_000.0, 0.0, 0.0, 0.0, 0.0], false));
    model.add_beam(beam).unwrap();
    model.fix("root", vec![DofSymbol::All]);

    model
}

/// Every named node lives in exactly one beam's namespace (SPEC_FULL's
/// beams never share UIDs); coincident column/girder joints are tied
/// together with rigid `connect` links instead.
fn create_multi_story_frame(stories: usize, bays: usize) -> FrameModel {
    let mut model = FrameModel::new();

    model.add_material(Material::steel("steel")).unwrap();
    model
        .add_cross_section(CrossSection::rectangular("column", 0.4, 0.4).unwrap())
        .unwrap();
    model
        .add_cross_section(CrossSection::rectangular("girder", 0.3, 0.6).unwrap())
        .unwrap();

    let story_height = 3.5;
    let bay_width = 6.0;

    // One girder beam per story, spanning every bay, 1 element per bay.
    for story in 1..=stories {
        let y = story as f64 * story_height;
        let nodes: Vec<BeamNode> = (0..=bays)
            .map(|bay| BeamNode::new(format!("G{story}_{bay}"), bay as f64 * bay_width, y, 0.0))
            .collect();
        let first = nodes.first().unwrap().uid.clone();
        let last = nodes.last().unwrap().uid.clone();
        let mut girder = Beam::new(nodes, bays);
        girder.set_orientation(first.as_str(), last.as_str(), Vec3::new(0.0, 0.0, 1.0));
        girder.set_material(first.as_str(), last.as_str(), "steel");
        girder.set_cross_section(first.as_str(), last.as_str(), "girder");
        girder.add_distr_load(DistributedLoad::new(first.as_str(), last.as_str(), [0.0, -50_000.0, 0.0, 0.0, 0.0, 0.0], false));
        model.add_beam(girder).unwrap();
    }

    // One column per (story, bay), its own node namespace, rigidly
    // connected to the girder node (or fixed to ground) at each end.
    for story in 0..stories {
        for bay in 0..=bays {
            let bottom = format!("Col{story}_{bay}_bot");
            let top = format!("Col{story}_{bay}_top");
            let x = bay as f64 * bay_width;
            let (y0, y1) = (story as f64 * story_height, (story + 1) as f64 * story_height);
            let mut col = Beam::new(
                vec![BeamNode::new(bottom.as_str(), x, y0, 0.0), BeamNode::new(top.as_str(), x, y1, 0.0)],
                1,
            );
            col.set_orientation(bottom.as_str(), top.as_str(), Vec3::new(1.0, 0.0, 0.0));
            col.set_material(bottom.as_str(), top.as_str(), "steel");
            col.set_cross_section(bottom.as_str(), top.as_str(), "column");
            model.add_beam(col).unwrap();

            if story == 0 {
                model.fix(bottom.as_str(), vec![DofSymbol::All]);
            } else {
                model.connect(bottom.as_str(), format!("G{story}_{bay}"), vec![DofSymbol::All]);
            }
            model.connect(top.as_str(), format!("G{}_{bay}", story + 1), vec![DofSymbol::All]);
        }
    }

    model
}

fn benchmark_cantilever(c: &mut Criterion) {
    c.bench_function("cantilever_linear", |b| {
        b.iter(|| {
            let model = create_cantilever_model();
            let results = model.run(&AnalysisOptions::default()).unwrap();
            black_box(results);
        })
    });
}

fn benchmark_small_frame(c: &mut Criterion) {
    c.bench_function("frame_3story_2bay_linear", |b| {
        b.iter(|| {
            let model = create_multi_story_frame(3, 2);
            let results = model.run(&AnalysisOptions::default()).unwrap();
            black_box(results);
        })
    });
}

fn benchmark_medium_frame(c: &mut Criterion) {
    c.bench_function("frame_10story_5bay_linear", |b| {
        b.iter(|| {
            let model = create_multi_story_frame(10, 5);
            let results = model.run(&AnalysisOptions::default()).unwrap();
            black_box(results);
        })
    });
}

criterion_group!(benches, benchmark_cantilever, benchmark_small_frame, benchmark_medium_frame);
criterion_main!(benches);
