use std::{
    fs::{self, File},
    io,
    path::Path,
};

use anyhow::Result;
use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    {ContentLimit, FileRotate},
};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

/// Installs the global logger, writing to `logs/main.log` under `cache_dir`
/// and keeping the 3 most recent files of up to 1000 lines.
pub fn init(cache_dir: &str) -> Result<()> {
    let folder = Path::new(cache_dir).join("logs");
    fs::create_dir_all(&folder)?;
    let log = FileRotate::new(
        folder.join("main.log"),
        AppendTimestamp::default(FileLimit::MaxFiles(3)),
        ContentLimit::Lines(1000),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    WriteLogger::init(LevelFilter::Info, config, log)?;
    Ok(())
}

/// Zips all log files under `cache_dir` into `target_file_path`.
pub fn export(cache_dir: &str, target_file_path: &str) -> Result<()> {
    let mut zip = zip::ZipWriter::new(File::create(target_file_path)?);
    let default_options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    let log_folder = Path::new(cache_dir).join("logs/");
    for entry in (fs::read_dir(&log_folder)?).flatten() {
        let path = entry.path();
        if path.is_file() {
            if let Some(name) = path.strip_prefix(cache_dir)?.to_str() {
                zip.start_file(name, default_options)?;
                let mut log_file = File::open(&path)?;
                io::copy(&mut log_file, &mut zip)?;
            }
        }
    }

    zip.finish()?;
    Ok(())
}
