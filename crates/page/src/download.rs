use agenda_client::disposition::DEFAULT_FILENAME;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

/// Reduces a server-suggested name to a plain file name.
pub fn sanitize_filename(name: &str) -> String {
    let last = name.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        cleaned.to_string()
    }
}

pub fn filename_from_url(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or("");
    sanitize_filename(segment)
}

async fn unique_path(dir: &Path, name: &str) -> io::Result<PathBuf> {
    let candidate = dir.join(name);
    if !tokio::fs::try_exists(&candidate).await? {
        return Ok(candidate);
    }

    let path = Path::new(name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
        .to_string();
    let ext = path.extension().and_then(|e| e.to_str());

    let mut n = 1;
    loop {
        let numbered = match ext {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = dir.join(numbered);
        if !tokio::fs::try_exists(&candidate).await? {
            return Ok(candidate);
        }
        n += 1;
    }
}

/// Writes `bytes` into `dir` under a free variant of `filename`.
///
/// The data lands in a `.part` file first and is renamed into place, so a
/// failed write never leaves a truncated document under the final name.
pub async fn save(dir: &Path, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let target = unique_path(dir, &sanitize_filename(filename)).await?;
    let mut part_name = target.as_os_str().to_owned();
    part_name.push(".part");
    let part = PathBuf::from(part_name);

    tokio::fs::write(&part, bytes).await?;
    if let Err(e) = tokio::fs::rename(&part, &target).await {
        let _ = tokio::fs::remove_file(&part).await;
        return Err(e);
    }

    tracing::info!(path = %target.display(), size = bytes.len(), "Saved document");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename(r"C:\temp\agenda.docx"), "agenda.docx");
        assert_eq!(sanitize_filename("reports/"), DEFAULT_FILENAME);
        assert_eq!(sanitize_filename(".."), DEFAULT_FILENAME);
    }

    #[test]
    fn url_filename_ignores_query() {
        let url = Url::parse("https://blob.example/docs/out.docx?sig=abc").unwrap();
        assert_eq!(filename_from_url(&url), "out.docx");
        let url = Url::parse("https://blob.example/").unwrap();
        assert_eq!(filename_from_url(&url), DEFAULT_FILENAME);
    }

    #[tokio::test]
    async fn save_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();

        let first = save(dir.path(), "agenda.docx", b"one").await.unwrap();
        let second = save(dir.path(), "agenda.docx", b"two").await.unwrap();

        assert_eq!(first, dir.path().join("agenda.docx"));
        assert_eq!(second, dir.path().join("agenda (1).docx"));
        assert_eq!(std::fs::read(&first).unwrap(), b"one");
        assert_eq!(std::fs::read(&second).unwrap(), b"two");
        assert!(!dir.path().join("agenda.docx.part").exists());
    }

    #[tokio::test]
    async fn save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("downloads");

        let path = save(&nested, "x.docx", b"data").await.unwrap();
        assert_eq!(path, nested.join("x.docx"));
    }
}
