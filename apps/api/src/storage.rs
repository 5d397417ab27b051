//! Object-storage addressing. This service hands out paths and URLs; file
//! bytes move directly between clients, the worker, and the bucket.

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use uuid::Uuid;

use crate::errors::AppError;
use crate::paths::normalize_pdf_path;

/// Presigned PUT URLs expire after this long.
const UPLOAD_URL_TTL: Duration = Duration::from_secs(15 * 60);

/// Allocates a fresh object path under the caller's prefix. Directory
/// components in the client-supplied name are dropped; the result always
/// carries exactly one `.pdf` suffix.
pub fn allocate_upload_path(user_id: Uuid, file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    normalize_pdf_path(&format!("uploads/{user_id}/{}-{base}", Uuid::new_v4()))
}

/// Presigns a PUT for direct client upload (the authenticated-write side of
/// the bucket policy).
pub async fn presign_upload(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    path: &str,
) -> Result<String, AppError> {
    let presigning = PresigningConfig::expires_in(UPLOAD_URL_TTL)
        .map_err(|e| AppError::S3(format!("Invalid presigning config: {e}")))?;

    let request = s3
        .put_object()
        .bucket(bucket)
        .key(path)
        .presigned(presigning)
        .await
        .map_err(|e| AppError::S3(format!("Failed to presign upload for '{path}': {e}")))?;

    Ok(request.uri().to_string())
}

/// Public-read URL for a stored object. Bucket objects are world-readable
/// once the path is known, so no signing is involved.
pub fn public_object_url(endpoint: &str, bucket: &str, path: &str) -> String {
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};

    #[test]
    fn test_allocate_upload_path_is_normalized() {
        let user_id = Uuid::new_v4();
        let path = allocate_upload_path(user_id, "resume.pdf.pdf");
        assert!(path.starts_with(&format!("uploads/{user_id}/")));
        assert!(path.ends_with(".pdf"));
        assert!(!path.ends_with(".pdf.pdf"));
    }

    #[test]
    fn test_allocate_upload_path_appends_suffix() {
        let path = allocate_upload_path(Uuid::new_v4(), "resume");
        assert!(path.ends_with(".pdf"));
    }

    #[test]
    fn test_allocate_upload_path_strips_directories() {
        let user_id = Uuid::new_v4();
        let path = allocate_upload_path(user_id, "../../../etc/passwd");
        assert!(path.starts_with(&format!("uploads/{user_id}/")));
        assert!(!path.contains(".."));
        assert!(path.ends_with("passwd.pdf"));
    }

    #[test]
    fn test_public_object_url_joins_cleanly() {
        assert_eq!(
            public_object_url("http://localhost:9000/", "files", "uploads/a.pdf"),
            "http://localhost:9000/files/uploads/a.pdf"
        );
        assert_eq!(
            public_object_url("https://cdn.example.com", "files", "uploads/a.pdf"),
            "https://cdn.example.com/files/uploads/a.pdf"
        );
    }

    #[tokio::test]
    async fn test_presign_upload_signs_locally() {
        // Presigning is pure SigV4 computation; no network involved.
        let credentials = Credentials::new("test-key", "test-secret", None, None, "test");
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .endpoint_url("http://localhost:9000")
            .build();
        let client = aws_sdk_s3::Client::from_conf(conf);

        let url = presign_upload(&client, "files", "uploads/u/cv.pdf")
            .await
            .unwrap();
        assert!(url.contains("files"));
        assert!(url.contains("cv.pdf"));
        assert!(url.contains("X-Amz-Signature"));
    }
}
