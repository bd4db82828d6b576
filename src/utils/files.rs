use std::path::Path;

use tokio::{fs, io};

/// Decode text as UTF-8, falling back to Latin-1 when the bytes are not valid UTF-8
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        // Every Latin-1 byte is the code point of the same value
        Err(_) => bytes.iter().map(|&byte| char::from(byte)).collect(),
    }
}

/// Read a whole file as one text
pub async fn read_text<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let bytes = fs::read(path).await?;

    Ok(decode_text(&bytes))
}

/// Create the parent directory of a file path if it is missing
pub async fn ensure_parent<P: AsRef<Path>>(path: P) -> io::Result<()> {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent).await,
        _ => Ok(()),
    }
}
