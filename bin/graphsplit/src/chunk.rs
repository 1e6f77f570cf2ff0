//! The `chunk` subcommand: the slice controller (spec.md §4.7) wiring the
//! enumerator, planner, DAG builder, CAR writer, CommP engine and manifest
//! writer together.

use std::io::Cursor;

use graphsplit_core::{
    enumerate::{roots, FileEnumerator},
    naming::{gen_graph_name, slice_count_estimate},
    ChunkConfig, SlicePlanner,
};
use graphsplit_manifest::{build_fs_detail, ManifestWriter};
use graphsplit_unixfs::{build_slice_dag, payload_cid, reachable_order};

use crate::cli::ChunkArgs;
use crate::error::{Error, Result};

impl From<&ChunkArgs> for ChunkConfig {
    fn from(args: &ChunkArgs) -> Self {
        Self {
            slice_size: args.slice_size,
            parallel: args.parallel,
            graph_name: args.graph_name.clone(),
            parent_path: if args.parent_path.is_empty() {
                None
            } else {
                Some(args.parent_path.clone().into())
            },
            car_dir: args.car_dir.clone(),
            save_manifest: args.save_manifest,
            calc_commp: args.calc_commp,
            rename: args.rename,
            add_padding: args.add_padding,
        }
    }
}

pub fn run(args: &ChunkArgs) -> Result<()> {
    let config: ChunkConfig = args.into();
    config.validate()?;

    let root_is_single_file = args.input.is_file();
    let root_paths = roots(&args.input);

    let total_bytes = FileEnumerator::total_bytes(root_paths.clone())?;
    let slice_total = slice_count_estimate(total_bytes, config.slice_size).max(1);
    if total_bytes == 0 {
        tracing::warn!(input = %args.input.display(), "empty folder or file");
        return Ok(());
    }

    let enumerator = FileEnumerator::new(root_paths);
    let planner = SlicePlanner::new(enumerator, config.slice_size)?;

    let mut manifest = if config.save_manifest {
        Some(ManifestWriter::open(&config.car_dir, config.calc_commp)?)
    } else {
        None
    };

    for (slice_index, plan) in planner.enumerate() {
        let plan = plan?;
        let span = tracing::info_span!("build_slice", slice = slice_index);
        let _enter = span.enter();
        tracing::info!("start to generate car");
        let started = std::time::Instant::now();

        let (store, root) = build_slice_dag(
            &plan,
            config.parent_path.as_deref(),
            root_is_single_file,
            config.parallel,
        )?;
        let order = reachable_order(root.cid, &store)?;
        let blocks = order
            .into_iter()
            .map(|cid| (cid, store.get(&cid).expect("order only yields stored CIDs").to_vec()));

        let mut buf = Vec::new();
        graphsplit_car::write_car(vec![root.cid], blocks, &mut buf)?;

        let base_name = gen_graph_name(&config.graph_name, slice_index, slice_total);
        let root_name = if root_is_single_file {
            plan.entries.first().map_or_else(String::new, |f| f.name.clone())
        } else {
            String::new()
        };
        let detail = build_fs_detail(&root_name, payload_cid(&root), &store)?;

        let commp = if config.calc_commp {
            let payload_size = buf.len() as u64;
            let commp = graphsplit_commp::compute_commp(&mut Cursor::new(&buf), payload_size)?;
            if config.add_padding {
                let target = graphsplit_commp::padded_size_for(payload_size);
                graphsplit_commp::pad_car(&mut buf, target)?;
            }
            Some(commp)
        } else {
            None
        };

        let filename = match &commp {
            Some(commp) if config.rename => format!("{}.car", commp.piece_cid),
            _ => base_name,
        };
        let out_path = config.car_dir.join(&filename);
        if out_path.exists() {
            return Err(Error::RenameCollision { path: out_path });
        }
        std::fs::write(&out_path, &buf)?;

        if let Some(manifest) = manifest.as_mut() {
            match &commp {
                Some(commp) => {
                    let piece_size = graphsplit_commp::padded_size_for(commp.payload_size);
                    manifest.write_row_with_commp(
                        payload_cid(&root),
                        &filename,
                        commp.piece_cid,
                        commp.payload_size,
                        piece_size,
                        &detail,
                    )?;
                }
                None => manifest.write_row(payload_cid(&root), &filename, &detail)?,
            }
        }

        tracing::info!(elapsed = ?started.elapsed(), car = %filename, "generate car file completed");
    }

    Ok(())
}
