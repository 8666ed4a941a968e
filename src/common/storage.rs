use anyhow::Result;
use object_store::{
    aws::AmazonS3Builder, gcp::GoogleCloudStorageBuilder, local::LocalFileSystem, memory::InMemory, ObjectStore,
};
use std::sync::Arc;
use url::Url;

use crate::common::config::StorageConfig;

/// Crea el cliente del bucket a partir de la configuración
pub fn create_object_store(storage_config: &StorageConfig) -> Result<Arc<dyn ObjectStore>> {
    create_object_store_from_dsn(&storage_config.dsn)
}

/// Crea el cliente del bucket a partir de un DSN:
/// `memory://`, `file:///ruta`, `s3://[clave:secreto@]host[:puerto]/bucket`
/// o `gs://bucket`
pub fn create_object_store_from_dsn(dsn: &str) -> Result<Arc<dyn ObjectStore>> {
    let url = Url::parse(dsn).map_err(|e| anyhow::anyhow!("Invalid storage DSN '{}': {}", dsn, e))?;

    match url.scheme() {
        "file" => {
            let path = url.path();
            if path.is_empty() || path == "/" {
                return Err(anyhow::anyhow!("File DSN must specify a path: file:///path/to/storage"));
            }
            // /.data/storage es relativa al directorio de trabajo
            let path = if path.starts_with("/.") { &path[1..] } else { path };
            std::fs::create_dir_all(path)?;
            Ok(Arc::new(LocalFileSystem::new_with_prefix(path)?))
        },
        "memory" => Ok(Arc::new(InMemory::new())),
        "s3" => Ok(Arc::new(create_s3_builder_from_dsn(&url)?.build()?)),
        "gs" => {
            let bucket = url.host_str()
                .ok_or_else(|| anyhow::anyhow!("GCS DSN must specify a bucket: gs://bucket"))?;
            // Credenciales desde GOOGLE_SERVICE_ACCOUNT / GOOGLE_APPLICATION_CREDENTIALS
            let store = GoogleCloudStorageBuilder::from_env()
                .with_bucket_name(bucket)
                .build()?;
            Ok(Arc::new(store))
        },
        scheme => Err(anyhow::anyhow!(
            "Unsupported storage scheme: {}. Supported: file, memory, s3, gs",
            scheme
        )),
    }
}

/// S3 o compatible (MinIO). Sin credenciales en el DSN se usan las
/// variables AWS_* del entorno.
fn create_s3_builder_from_dsn(dsn: &Url) -> Result<AmazonS3Builder> {
    let host = dsn.host_str().ok_or_else(|| anyhow::anyhow!("Missing S3 host in DSN"))?;
    let port = dsn.port();
    let bucket = dsn.path().trim_start_matches('/');

    // s3://bucket sin host explícito
    if bucket.is_empty() {
        return Ok(AmazonS3Builder::from_env().with_bucket_name(host));
    }

    let mut builder = AmazonS3Builder::from_env()
        .with_bucket_name(bucket);

    let access_key = dsn.username();
    if !access_key.is_empty() {
        builder = builder
            .with_access_key_id(access_key)
            .with_secret_access_key(dsn.password().unwrap_or(""));
    }

    if !host.contains("amazonaws.com") {
        let scheme = if port == Some(443) { "https" } else { "http" };
        let endpoint = match port {
            Some(p) => format!("{scheme}://{host}:{p}"),
            None => format!("{scheme}://{host}"),
        };
        builder = builder
            .with_endpoint(endpoint)
            .with_allow_http(true)
            .with_virtual_hosted_style_request(false);
    }

    Ok(builder)
}
