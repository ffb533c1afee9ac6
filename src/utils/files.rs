use std::fs;
use std::io;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub fn is_stdin<F: AsRef<Path> + ?Sized>(f: &F) -> bool {
    f.as_ref() == Path::new("-")
}

/// Reads a whole file, or stdin when the path is `-`.
pub fn read_file<F: AsRef<Path> + ?Sized>(f: &F) -> io::Result<Vec<u8>> {
    let mut content = Vec::new();
    if is_stdin(f) {
        io::stdin().read_to_end(&mut content)?;
    } else {
        content = fs::read(f)?;
    }
    Ok(content)
}

pub fn write_file<F: AsRef<Path> + ?Sized>(f: &F, data: &[u8]) -> io::Result<()> {
    make_sure_dir_exists(f)?;
    let mut file = fs::File::create(f)?;
    file.write_all(data)?;
    Ok(())
}

pub fn make_sure_dir_exists<F: AsRef<Path> + ?Sized>(f: &F) -> io::Result<()> {
    let path = f.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Default extraction directory: the input path with its extension replaced by `_out`,
/// or `pup_out` when reading stdin.
pub fn default_output_dir<F: AsRef<Path> + ?Sized>(input: &F) -> PathBuf {
    if is_stdin(input) {
        return PathBuf::from("pup_out");
    }
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("pup"));
    input.with_file_name(format!("{}_out", stem))
}
