use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use rtgen_core::SimpleTable;

/// Writes one line per chain, in the order of the chains.
pub fn write_table<W: Write>(table: &SimpleTable, mut writer: W) -> std::io::Result<()> {
    for chain in table {
        writeln!(
            writer,
            "Password: {}, Last Hash: {}",
            chain.startpoint,
            hex::encode(&chain.endpoint)
        )?;
    }

    writer.flush()
}

/// Stores the table to the given path and returns the size of the file in bytes.
pub fn store_table(table: &SimpleTable, path: &Path) -> Result<u64> {
    let disk_error = "Unable to store the generated rainbow table to the disk";

    let file = File::options()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .context(disk_error)?;

    let buf_writer = BufWriter::with_capacity(1024 * 1024, file);
    write_table(table, buf_writer).context(disk_error)?;

    let size = fs::metadata(path)
        .context("Unable to read the size of the stored rainbow table")?
        .len();

    Ok(size)
}
