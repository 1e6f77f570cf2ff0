//! The standalone `commp` subcommand: compute the piece commitment of an
//! existing CAR file, optionally padding and renaming it in place
//! (spec.md §6 `commP <carfile>`).

use std::io::Cursor;

use crate::cli::CommpArgs;
use crate::error::{Error, Result};

pub fn run(args: &CommpArgs) -> Result<()> {
    let mut buf = std::fs::read(&args.carfile)?;

    // "check that the data is a car file; if it's not, retrieval won't
    // work" (commp.go) -- a header parse failure is reported as
    // Error::NotACarFile rather than a raw decode error.
    graphsplit_car::read_car(&mut Cursor::new(&buf))
        .map_err(|_| Error::NotACarFile(args.carfile.clone()))?;

    let payload_size = buf.len() as u64;
    let commitment = graphsplit_commp::compute_commp(&mut Cursor::new(&buf), payload_size)?;

    if args.add_padding {
        let target = graphsplit_commp::padded_size_for(payload_size);
        graphsplit_commp::pad_car(&mut buf, target)?;
        std::fs::write(&args.carfile, &buf)?;
    }

    let mut final_path = args.carfile.clone();
    if args.rename {
        let renamed = args
            .carfile
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(format!("{}.car", commitment.piece_cid));
        if renamed.exists() && renamed != args.carfile {
            return Err(Error::RenameCollision { path: renamed });
        }
        std::fs::rename(&args.carfile, &renamed)?;
        final_path = renamed;
    }

    println!("piece_cid: {}", commitment.piece_cid);
    println!("payload_size: {}", commitment.payload_size);
    println!("unpadded_piece_size: {}", commitment.unpadded_piece_size);
    println!("car_path: {}", final_path.display());
    Ok(())
}
