//! S3 client built on rust-s3.

use crate::client::{GetObjectOutput, HeadObjectOutput, ObjectStoreClient, PutObjectOutput};
use fly_core::{Error, Result};
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::region::Region;
use s3::Bucket;
use std::collections::HashMap;

const BACKEND: &str = "s3";

/// Connection settings for [`BucketClient`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketSettings {
    /// Region name, e.g. `us-east-1`.
    pub region: String,
    /// Custom endpoint for S3-compatible stores (MinIO, R2, ...).
    pub endpoint: Option<String>,
    /// Access key; falls back to the environment and profile when unset.
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`.
    pub path_style: bool,
}

/// [`ObjectStoreClient`] for S3 and S3-compatible endpoints.
///
/// Holds region and credentials only; a `Bucket` handle is built per call,
/// which involves no network traffic.
#[derive(Debug, Clone)]
pub struct BucketClient {
    region: Region,
    credentials: Credentials,
    path_style: bool,
}

impl BucketClient {
    pub fn new(region: Region, credentials: Credentials) -> Self {
        Self {
            region,
            credentials,
            path_style: false,
        }
    }

    /// Use path-style bucket addressing.
    pub fn with_path_style(mut self) -> Self {
        self.path_style = true;
        self
    }

    /// Build a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Backend`] if the region cannot be parsed or no
    /// credentials can be resolved.
    pub fn from_settings(settings: &BucketSettings) -> Result<Self> {
        let region = match &settings.endpoint {
            Some(endpoint) => Region::Custom {
                region: settings.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => settings
                .region
                .parse::<Region>()
                .map_err(|e| Error::backend(BACKEND, e))?,
        };

        let credentials = Credentials::new(
            settings.access_key.as_deref(),
            settings.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| Error::backend(BACKEND, e))?;

        let client = Self::new(region, credentials);
        Ok(if settings.path_style {
            client.with_path_style()
        } else {
            client
        })
    }

    fn bucket(&self, name: &str) -> Result<Box<Bucket>> {
        let bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())
            .map_err(|e| Error::backend(BACKEND, e))?;

        Ok(if self.path_style {
            bucket.with_path_style()
        } else {
            bucket
        })
    }
}

fn map_err(key: &str, err: S3Error) -> Error {
    match err {
        S3Error::HttpFailWithBody(404, _) => Error::not_found(key),
        other => Error::backend(BACKEND, other),
    }
}

fn check_status(key: &str, status: u16) -> Result<()> {
    match status {
        200..=299 => Ok(()),
        404 => Err(Error::not_found(key)),
        status => Err(Error::backend(
            BACKEND,
            format!("unexpected HTTP status {status} for {key}"),
        )),
    }
}

fn header(headers: &HashMap<String, String>, name: &str) -> Option<String> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.clone())
}

#[async_trait::async_trait]
impl ObjectStoreClient for BucketClient {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<PutObjectOutput> {
        let bucket = self.bucket(bucket)?;
        let response = match content_type {
            Some(content_type) => bucket
                .put_object_with_content_type(key, &body, content_type)
                .await,
            None => bucket.put_object(key, &body).await,
        }
        .map_err(|e| map_err(key, e))?;
        check_status(key, response.status_code())?;

        Ok(PutObjectOutput {
            etag: header(&response.headers(), "etag"),
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<GetObjectOutput> {
        let bucket = self.bucket(bucket)?;
        let response = bucket.get_object(key).await.map_err(|e| map_err(key, e))?;
        check_status(key, response.status_code())?;

        Ok(GetObjectOutput {
            body: response.bytes().to_vec(),
            content_type: header(&response.headers(), "content-type"),
        })
    }

    async fn head_object(&self, bucket: &str, key: &str) -> Result<HeadObjectOutput> {
        let bucket = self.bucket(bucket)?;
        let (head, status) = bucket.head_object(key).await.map_err(|e| map_err(key, e))?;
        check_status(key, status)?;

        Ok(HeadObjectOutput {
            content_type: head.content_type,
            content_length: head.content_length.and_then(|len| u64::try_from(len).ok()),
            etag: head.e_tag,
        })
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        let bucket = self.bucket(bucket)?;
        let response = bucket.delete_object(key).await.map_err(|e| map_err(key, e))?;
        check_status(key, response.status_code())
    }

    async fn copy_object(&self, bucket: &str, src_key: &str, dst_key: &str) -> Result<()> {
        let bucket = self.bucket(bucket)?;
        let status = bucket
            .copy_object_internal(src_key, dst_key)
            .await
            .map_err(|e| map_err(src_key, e))?;
        check_status(src_key, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(check_status("k", 200).is_ok());
        assert!(check_status("k", 204).is_ok());
        assert!(check_status("k", 404).unwrap_err().is_not_found());
        assert!(matches!(
            check_status("k", 403).unwrap_err(),
            Error::Backend { .. }
        ));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let mut headers = HashMap::new();
        headers.insert("ETag".to_string(), "\"abc\"".to_string());
        assert_eq!(header(&headers, "etag").as_deref(), Some("\"abc\""));
        assert!(header(&headers, "content-type").is_none());
    }

    #[test]
    fn from_settings_with_custom_endpoint() {
        let settings = BucketSettings {
            region: "garage".to_string(),
            endpoint: Some("http://localhost:3900".to_string()),
            access_key: Some("key".to_string()),
            secret_key: Some("secret".to_string()),
            path_style: true,
        };
        let client = BucketClient::from_settings(&settings).unwrap();
        assert!(client.path_style);
        assert!(matches!(client.region, Region::Custom { .. }));
        assert!(client.bucket("assets").is_ok());
    }
}
