//! MinIO/S3-compatible storage client for report images.
//!
//! Objects live under a public prefix that anonymous clients may read, so the
//! URL returned at upload time can be stored on the report row directly.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use tracing::{debug, info, warn};

use super::object_store::ObjectStore;
use super::sigv4::{CanonicalRequest, SigV4Signer};
use crate::core::config::MinIOConfig;
use crate::core::error::AppError;

pub struct MinIOClient {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    endpoint: String,
    public_endpoint: String,
    public_prefix: String,
    signer: SigV4Signer,
    http_client: Client,
}

impl MinIOClient {
    /// Connect to the bucket, creating it and its public-read policy if needed.
    pub async fn new(config: MinIOConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create MinIO credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to create MinIO bucket: {}", e)))?;

        // path-style: http://endpoint/bucket/key
        bucket.set_path_style();

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let client = Self {
            bucket,
            region,
            credentials,
            signer: SigV4Signer::new(&config.access_key, &config.secret_key, &config.region),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            public_endpoint: config.public_endpoint.trim_end_matches('/').to_string(),
            public_prefix: config.public_prefix.trim_matches('/').to_string(),
            http_client,
        };

        client.ensure_bucket_exists().await;
        client.set_public_read_policy().await;

        info!(
            "MinIO client initialized for endpoint: {}, bucket: {}, public_prefix: {}",
            client.endpoint,
            client.bucket.name(),
            client.public_prefix
        );

        Ok(client)
    }

    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }

    /// Create the bucket; an "already exists" answer is success.
    async fn ensure_bucket_exists(&self) {
        let result = Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await;

        match result {
            Ok(_) => info!("Bucket '{}' created successfully", self.bucket.name()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                }
            }
        }
    }

    /// Allow anonymous reads under the public prefix. Failure only warns;
    /// the policy can be set manually with `mc anonymous set download`.
    async fn set_public_read_policy(&self) {
        let bucket_name = self.bucket.name();
        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [
                {
                    "Effect": "Allow",
                    "Principal": {"AWS": "*"},
                    "Action": ["s3:GetObject"],
                    "Resource": [format!("arn:aws:s3:::{}/{}/*", bucket_name, self.public_prefix)]
                }
            ]
        })
        .to_string();

        match self.put_bucket_policy(&bucket_name, &policy).await {
            Ok(()) => info!(
                "Set public read policy for {}/{}/*",
                bucket_name, self.public_prefix
            ),
            Err(e) => warn!(
                "Failed to set bucket policy for '{}': {}. Report images may not be publicly readable.",
                bucket_name, e
            ),
        }
    }

    async fn put_bucket_policy(&self, bucket_name: &str, policy: &str) -> Result<(), AppError> {
        let endpoint_url = Url::parse(&self.endpoint)
            .map_err(|e| AppError::Internal(format!("Invalid endpoint URL: {}", e)))?;
        let host = endpoint_url
            .host_str()
            .ok_or_else(|| AppError::Internal("Endpoint URL has no host".to_string()))?;
        let host_header = match endpoint_url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let uri = format!("/{}", bucket_name);
        let signed = self.signer.sign(
            &CanonicalRequest {
                method: "PUT",
                uri: &uri,
                query: "policy=",
                host: &host_header,
                payload: policy.as_bytes(),
            },
            Utc::now(),
        )?;

        let response = self
            .http_client
            .put(format!("{}/{}?policy", self.endpoint, bucket_name))
            .header("Host", &host_header)
            .header("x-amz-date", &signed.amz_date)
            .header("x-amz-content-sha256", &signed.payload_hash)
            .header("Authorization", &signed.authorization)
            .header("Content-Type", "application/json")
            .body(policy.to_string())
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send policy request: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(AppError::Internal(format!(
                "Failed to set bucket policy: {} - {}",
                status, body
            )))
        }
    }

    fn public_key(&self, path: &str) -> String {
        format!("{}/{}", self.public_prefix, path.trim_start_matches('/'))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_endpoint, self.bucket.name(), key)
    }
}

#[async_trait]
impl ObjectStore for MinIOClient {
    async fn put_public(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        let key = self.public_key(path);

        self.bucket
            .put_object_with_content_type(&key, &data, content_type)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to upload file '{}': {}", key, e)))?;

        debug!("Uploaded '{}' to bucket '{}'", key, self.bucket.name());
        Ok(self.public_url(&key))
    }
}
