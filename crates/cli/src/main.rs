use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use planar::prelude::*;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod export;
mod points;
mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Divide-and-conquer planar structures over point files")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Shape {
    Box,
    Disk,
    Radial,
}

#[derive(Subcommand)]
enum Action {
    /// Draw a random point cloud and write it in the text format
    Generate {
        #[arg(long, default_value_t = 64)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = Shape::Box)]
        shape: Shape,
        /// Half-width (box) or radius (disk, radial)
        #[arg(long, default_value_t = 100.0)]
        scale: f64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Build the tree over a point file, evaluate algorithms and write JSON
    Run {
        /// Text (`n` then `x y` pairs) or CSV with `x`, `y` columns
        #[arg(long)]
        input: PathBuf,
        /// Algorithm name; repeatable. Defaults to convex hull and Voronoi diagram.
        #[arg(long)]
        algo: Vec<String>,
        #[arg(long, default_value_t = 3)]
        leaf_size: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print version, git revision and the built-in algorithm order
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate {
            count,
            seed,
            shape,
            scale,
            out,
        } => generate(count, seed, shape, scale, &out),
        Action::Run {
            input,
            algo,
            leaf_size,
            out,
        } => run(&input, algo, leaf_size, &out),
        Action::Report => report(),
    }
}

fn generate(count: usize, seed: u64, shape: Shape, scale: f64, out: &Path) -> Result<()> {
    let shape = match shape {
        Shape::Box => CloudShape::Box { half_width: scale },
        Shape::Disk => CloudShape::Disk { radius: scale },
        Shape::Radial => CloudShape::Radial {
            radius: scale,
            angle_jitter_frac: 0.25,
            radial_jitter: 0.1,
        },
    };
    let pts = draw_points(CloudCfg { count, shape }, ReplayToken { seed, index: 0 });
    points::save(out, &pts)?;
    tracing::info!(count, seed, ?shape, out = %out.display(), "generate");
    provenance::record(
        "generate",
        out,
        json!({
            "count": count,
            "seed": seed,
            "shape": format!("{shape:?}"),
        }),
        &[],
    )?;
    Ok(())
}

fn run(input: &Path, algo: Vec<String>, leaf_size: usize, out: &Path) -> Result<()> {
    let names: Vec<AlgorithmName> = if algo.is_empty() {
        vec![AlgorithmName::CONVEX_HULL, AlgorithmName::VORONOI_DIAGRAM]
    } else {
        algo.into_iter().map(AlgorithmName::new).collect()
    };
    let pts = points::load(input)?;
    let doc = evaluate(pts, &names, DacCfg::with_leaf_size(leaf_size))?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(input = %input.display(), out = %out.display(), "run");

    provenance::record(
        "run",
        out,
        json!({
            "input": input.to_string_lossy(),
            "leaf_size": leaf_size,
            "points": doc["points"].as_array().map_or(0, |a| a.len()),
        }),
        &names,
    )?;
    Ok(())
}

/// Build a tree over `pts` with the built-in registry and export the requested results.
fn evaluate(pts: Vec<Point>, names: &[AlgorithmName], cfg: DacCfg) -> Result<Value> {
    let registry = Registry::builtin()?;
    let mut tree = DacTree::with_registry(pts, registry, cfg)?;
    let mut results = Map::new();
    for name in names {
        let res = tree
            .process_algorithm(name)
            .with_context(|| format!("evaluating `{name}`"))?;
        results.insert(name.to_string(), export::result(res)?);
    }
    Ok(json!({
        "version": planar::VERSION,
        "leaf_size": tree.cfg().leaf_size,
        "nodes": tree.nodes().len(),
        "points": tree.points().iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
        "results": results,
    }))
}

fn report() -> Result<()> {
    let registry = Registry::builtin()?;
    let algorithms: Vec<Value> = registry
        .descriptors()
        .map(|d| {
            json!({
                "name": d.name.as_str(),
                "dependencies": d.dependencies.iter().map(|n| n.as_str()).collect::<Vec<_>>(),
            })
        })
        .collect();
    let obj = json!({
        "code_rev": provenance::code_rev(),
        "planar_version": planar::VERSION,
        "algorithms": algorithms,
        "order": registry.resolve_order().iter().map(|n| n.as_str()).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
