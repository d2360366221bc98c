//! Handler for the `init` command

use crate::cli::OutputFormatter;
use crate::error::Result;
use crate::storage::FileStorage;
use std::path::Path;

/// Create the data directory layout
pub fn handle_init_command(data_dir: &Path, output: &OutputFormatter) -> Result<()> {
    let storage = FileStorage::new(data_dir);
    if storage.is_initialized() {
        output.warning(&format!(
            "Data directory {} already initialized",
            data_dir.display()
        ));
        return Ok(());
    }

    storage.init()?;
    output.success(&format!("Initialized data directory {}", data_dir.display()));
    Ok(())
}
