use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{Client, config::Credentials, config::Region, primitives::ByteStream};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::S3Config;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object store: {0}")]
    Backend(String),
}

pub struct StoredObject {
    pub content_type: String,
    pub body: ObjectBody,
}

// Remote reads stay a stream until the response body is written; only the
// in-memory backend hands back a buffer.
pub enum ObjectBody {
    Buffered(Vec<u8>),
    Streamed(ByteStream),
}

impl ObjectBody {
    pub async fn into_bytes(self) -> Result<Vec<u8>, StorageError> {
        match self {
            ObjectBody::Buffered(data) => Ok(data),
            ObjectBody::Streamed(stream) => Ok(stream
                .collect()
                .await
                .map_err(|e| StorageError::Backend(e.to_string()))?
                .into_bytes()
                .to_vec()),
        }
    }
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), StorageError>;
    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StorageError>;
    async fn copy(&self, src: &str, dst: &str) -> Result<(), StorageError>;
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

pub const TRASH_PREFIX: &str = "trash/";

// Copy-then-delete, not an atomic rename: a crash in between can leave the
// blob present in both places, never lost.
pub async fn move_to_trash(store: &dyn ObjectStore, key: &str) -> Result<String, StorageError> {
    let trash_key = format!("{TRASH_PREFIX}{}", key.strip_prefix(TRASH_PREFIX).unwrap_or(key));
    store.copy(key, &trash_key).await?;
    store.delete(key).await?;
    Ok(trash_key)
}

pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub async fn new(cfg: &S3Config) -> Self {
        let credentials = Credentials::new(
            cfg.access_key.clone(),
            cfg.secret_key.clone(),
            None,
            None,
            "static",
        );

        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(cfg.endpoint.clone())
            .load()
            .await;

        // Path style is required by most self-hosted S3-compatible endpoints.
        let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
            .force_path_style(true)
            .build();

        Self { client: Client::from_conf(s3_config), bucket: cfg.bucket.clone() }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StorageError> {
        let obj = match self.client.get_object().bucket(&self.bucket).key(key).send().await {
            Ok(obj) => obj,
            Err(err) => {
                if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                    return Ok(None);
                }
                return Err(StorageError::Backend(err.to_string()));
            }
        };

        let content_type =
            obj.content_type.clone().unwrap_or_else(|| "application/octet-stream".to_string());
        Ok(Some(StoredObject { content_type, body: ObjectBody::Streamed(obj.body) }))
    }

    async fn copy(&self, src: &str, dst: &str) -> Result<(), StorageError> {
        self.client
            .copy_object()
            .bucket(&self.bucket)
            .copy_source(format!("{}/{}", self.bucket, src))
            .key(dst)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, (String, Vec<u8>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        self.objects.lock().await.insert(key.to_string(), (content_type.to_string(), data));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, StorageError> {
        Ok(self.objects.lock().await.get(key).cloned().map(|(content_type, data)| {
            StoredObject { content_type, body: ObjectBody::Buffered(data) }
        }))
    }

    async fn copy(&self, src: &str, dst: &str) -> Result<(), StorageError> {
        let mut objects = self.objects.lock().await;
        let Some(obj) = objects.get(src).cloned() else {
            return Err(StorageError::Backend(format!("no such key: {src}")));
        };
        objects.insert(dst.to_string(), obj);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        store.put("titles/1/artworks/poster-x", b"jpeg".to_vec(), "image/jpeg").await.unwrap();

        let obj = store.get("titles/1/artworks/poster-x").await.unwrap().unwrap();
        assert_eq!(obj.content_type, "image/jpeg");
        assert_eq!(obj.body.into_bytes().await.unwrap(), b"jpeg");

        assert!(store.get("titles/1/artworks/other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn trash_move_relocates_blob() {
        let store = MemoryStore::new();
        store.put("titles/7/captions/en-subtitles-1", b"WEBVTT".to_vec(), "text/vtt").await.unwrap();

        let trash_key =
            move_to_trash(&store, "titles/7/captions/en-subtitles-1").await.unwrap();
        assert_eq!(trash_key, "trash/titles/7/captions/en-subtitles-1");

        assert!(store.get("titles/7/captions/en-subtitles-1").await.unwrap().is_none());
        assert!(store.get(&trash_key).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn trash_move_does_not_stack_prefixes() {
        let store = MemoryStore::new();
        store.put("trash/titles/7/documents/qc_report-1", b"pdf".to_vec(), "application/pdf")
            .await
            .unwrap();

        let trash_key =
            move_to_trash(&store, "trash/titles/7/documents/qc_report-1").await.unwrap();
        assert_eq!(trash_key, "trash/titles/7/documents/qc_report-1");
    }
}
