#[tokio::main]
async fn main() -> anyhow::Result<()> {
    satinalma_onay_server::run().await
}
