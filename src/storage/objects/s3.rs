//! S3-compatible object storage (MinIO, AWS)

use super::types::ObjectStorage;
use crate::config::StorageConfig;
use crate::utils::error::{ExtractError, Result};
use async_trait::async_trait;
use aws_sdk_s3 as aws_s3;
use aws_s3::config::{Credentials, Region};
use aws_s3::error::DisplayErrorContext;
use aws_s3::primitives::ByteStream;
use tracing::{debug, info};

/// S3 object storage
#[derive(Debug, Clone)]
pub struct S3Storage {
    bucket: String,
    client: aws_s3::Client,
}

impl S3Storage {
    /// Connect to the configured endpoint and make sure the bucket exists
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let endpoint = config.endpoint_url();
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "about-extract",
        );

        let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(endpoint.clone())
            .credentials_provider(credentials)
            .load()
            .await;

        // MinIO serves buckets under the path, not as subdomains
        let s3_config = aws_s3::config::Builder::from(&shared)
            .force_path_style(true)
            .build();

        let storage = Self {
            bucket: config.bucket.clone(),
            client: aws_s3::Client::from_conf(s3_config),
        };
        storage.ensure_bucket().await?;

        info!(
            "S3 object storage initialized: endpoint={}, bucket={}, region={}",
            endpoint, config.bucket, config.region
        );
        Ok(storage)
    }

    /// Bucket name
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Create the bucket when it does not exist yet
    pub async fn ensure_bucket(&self) -> Result<()> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => {
                debug!("Bucket exists: {}", self.bucket);
                Ok(())
            }
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => {
                self.client
                    .create_bucket()
                    .bucket(&self.bucket)
                    .send()
                    .await
                    .map_err(|e| {
                        ExtractError::Storage(format!(
                            "Failed to create bucket {}: {}",
                            self.bucket,
                            DisplayErrorContext(&e)
                        ))
                    })?;
                info!("Created bucket: {}", self.bucket);
                Ok(())
            }
            Err(e) => Err(ExtractError::Storage(format!(
                "Failed to check bucket {}: {}",
                self.bucket,
                DisplayErrorContext(&e)
            ))),
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn list(
        &self,
        prefix: &str,
        recursive: bool,
        limit: Option<usize>,
    ) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);
            if !recursive {
                request = request.delimiter("/");
            }
            if let Some(token) = continuation.take() {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|e| {
                ExtractError::Listing(format!("S3 listing failed: {}", DisplayErrorContext(&e)))
            })?;

            for key in response.contents().iter().filter_map(|obj| obj.key()) {
                keys.push(key.to_string());
                if limit.is_some_and(|limit| keys.len() >= limit) {
                    return Ok(keys);
                }
            }

            match response.next_continuation_token() {
                Some(token) if response.is_truncated().unwrap_or(false) => {
                    continuation = Some(token.to_string());
                }
                _ => break,
            }
        }

        debug!("Listed {} objects under {}", keys.len(), prefix);
        Ok(keys)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
            Err(e) => Err(ExtractError::Storage(format!(
                "S3 head failed for {}: {}",
                key,
                DisplayErrorContext(&e)
            ))),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let result = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(result) => result,
            Err(e) if e.as_service_error().is_some_and(|se| se.is_no_such_key()) => {
                return Ok(None);
            }
            Err(e) => {
                return Err(ExtractError::Storage(format!(
                    "S3 download failed for {}: {}",
                    key,
                    DisplayErrorContext(&e)
                )));
            }
        };

        let bytes = result.body.collect().await.map_err(|e| {
            ExtractError::Storage(format!("Failed to read S3 content for {}: {}", key, e))
        })?;

        Ok(Some(bytes.into_bytes().to_vec()))
    }

    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                ExtractError::StorageWrite(format!(
                    "S3 upload failed for {}: {}",
                    key,
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!("Object uploaded to S3: {}", key);
        Ok(())
    }
}
