//! Inspect command - list the contents of a chart archive

use chartpack_core::list_archive;
use console::style;
use std::path::Path;

use crate::error::Result;
use crate::util::format_size;

pub fn run(archive_path: &Path) -> Result<()> {
    let entries = list_archive(archive_path)?;

    println!("{}", style(archive_path.display()).cyan().bold());
    for entry in entries.iter().filter(|e| !e.is_dir) {
        println!("  {:40} {:>10}", entry.path, format_size(entry.size));
    }

    let file_count = entries.iter().filter(|e| !e.is_dir).count();
    let total_size: u64 = entries.iter().filter(|e| !e.is_dir).map(|e| e.size).sum();

    println!();
    println!("{} files, {} total", file_count, format_size(total_size));

    Ok(())
}
