use std::env;

use anyhow::Result;
use ucare_core::{Context, OsEnv};
use ucare_file_read_tokio::TokioFileRead;
use ucare_http_send_reqwest::ReqwestHttpSend;
use ucare_upload::{Client, Config, CreateGroup, Upload};

/// Upload every argument (local paths or urls) and group the results.
///
/// ```shell
/// UPLOADCARE_PUBLIC_KEY=demopublickey cargo run --example upload -- photo.jpg https://example.com/pic.png
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    let config = Config::new().from_env(&ctx);
    let secure = config.secret_key.is_some();
    let client = Client::new(ctx, config)?;

    let mut files = Vec::new();
    for input in env::args().skip(1) {
        let mut opts = Upload::new(input.as_str());
        if secure {
            opts = opts.with_expire("tomorrow");
        }

        let url = client.upload(opts).await?;
        println!("{input} -> {url}");
        println!("{}", client.info_pretty(&url).await?);
        files.push(url);
    }

    if files.len() > 1 {
        let mut opts = CreateGroup::new(files);
        if secure {
            opts = opts.with_expire("tomorrow");
        }
        let group = client.create_group(opts).await?;
        println!("group: {group}");
    }

    Ok(())
}
