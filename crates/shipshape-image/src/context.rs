//! Build-context packing.
//!
//! The daemon's build endpoint consumes the build context as a tar stream;
//! the directory is packed in memory and gzip-compressed before upload.

use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use shipshape_common::error::{Result, ShipshapeError};

/// Packs a build-context directory into a gzipped tar archive.
///
/// The archive is rooted at the directory itself, so a `Dockerfile` at the
/// top level of `dir` ends up at the top level of the context.
///
/// # Errors
///
/// Returns an error if the directory does not exist or cannot be read.
pub fn pack_context(dir: &Path) -> Result<Vec<u8>> {
    if !dir.is_dir() {
        return Err(ShipshapeError::NotFound {
            kind: "build context",
            id: dir.display().to_string(),
        });
    }

    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut archive = tar::Builder::new(encoder);
    archive
        .append_dir_all(".", dir)
        .map_err(|e| ShipshapeError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
    let encoder = archive.into_inner().map_err(|e| ShipshapeError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let packed = encoder.finish().map_err(|e| ShipshapeError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(
        context = %dir.display(),
        bytes = packed.len(),
        "build context packed"
    );
    Ok(packed)
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn pack_context_missing_directory_is_not_found() {
        let err = pack_context(Path::new("/nonexistent/build-context"))
            .expect_err("packing a missing directory should fail");
        assert!(matches!(err, ShipshapeError::NotFound { .. }));
    }

    #[test]
    fn pack_context_produces_gzip_stream() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").expect("write");

        let packed = pack_context(dir.path()).expect("pack");
        assert!(packed.len() > 2);
        assert_eq!(&packed[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn packed_archive_contains_top_level_dockerfile() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").expect("write");
        std::fs::create_dir(dir.path().join("app")).expect("mkdir");
        std::fs::write(dir.path().join("app").join("main.py"), "app = None\n").expect("write");

        let packed = pack_context(dir.path()).expect("pack");
        let decoder = flate2::read::GzDecoder::new(packed.as_slice());
        let mut archive = tar::Archive::new(decoder);

        let mut paths = Vec::new();
        for entry in archive.entries().expect("entries") {
            let entry = entry.expect("entry");
            paths.push(entry.path().expect("path").into_owned());
        }
        assert!(paths.iter().any(|p| p.ends_with("Dockerfile")));
        assert!(paths.iter().any(|p| p.ends_with("app/main.py")));
    }

    #[test]
    fn packed_dockerfile_content_survives_the_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").expect("write");

        let packed = pack_context(dir.path()).expect("pack");
        let decoder = flate2::read::GzDecoder::new(packed.as_slice());
        let mut archive = tar::Archive::new(decoder);

        for entry in archive.entries().expect("entries") {
            let mut entry = entry.expect("entry");
            if entry.path().expect("path").ends_with("Dockerfile") {
                let mut content = String::new();
                let _ = entry.read_to_string(&mut content).expect("read");
                assert_eq!(content, "FROM scratch\n");
                return;
            }
        }
        panic!("Dockerfile missing from archive");
    }
}
