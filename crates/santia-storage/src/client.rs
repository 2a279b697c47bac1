use aws_sdk_s3::Client;

/// Build an S3 client from the default AWS config, optionally pinned to
/// an explicit endpoint and/or region.
///
/// A custom endpoint (MinIO, LocalStack) switches to path-style
/// addressing, which those servers expect.
pub async fn build_client(endpoint_url: Option<&str>, region: Option<&str>) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(aws_config::Region::new(region.to_string()));
    }
    let sdk_config = loader.load().await;

    let mut s3_config = aws_sdk_s3::config::Builder::from(&sdk_config);
    if let Some(url) = endpoint_url {
        s3_config = s3_config.endpoint_url(url).force_path_style(true);
    }

    Client::from_conf(s3_config.build())
}
